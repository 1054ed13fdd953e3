//! NEC Infrarot-Decoder
//!
//! Pollt eine einzelne Digital-Leitung (ohne Interrupts), erkennt Flanken
//! und setzt über eine 5-Zustands-Maschine Bytes aus Puls-/Pausenlängen
//! zusammen. Ein Byte pro Frame: Leitpuls, Pause, 8 Datenbits (MSB zuerst).
//!
//! Der IR-Empfänger invertiert: ein elektrisches HIGH bedeutet "kein
//! Träger" (logisch LOW).

use crate::traits::{DigitalRead, MicrosClock};
use crate::types::PhysicalLine;

/// Leitpuls muss länger sein (µs)
pub const LEADING_PULSE_MIN_US: u32 = 8900;

/// Pause nach dem Leitpuls muss länger sein (µs)
pub const LEADING_SPACE_MIN_US: u32 = 3375;

/// Datenpuls muss kürzer sein (µs)
pub const DATA_PULSE_MAX_US: u32 = 648;

/// Pausen über diesem Wert kodieren eine 1 (µs)
pub const ONE_SPACE_MIN_US: u32 = 1120;

/// Größe des Ausgabepuffers (Bytes pro Scan)
pub const OUTPUT_CAPACITY: usize = 8;

/// Rückgabewert von `byte_at` für Indizes ohne dekodiertes Byte
pub const MISSING_BYTE: u8 = b'Z';

/// Standard-Budget an Poll-Iterationen pro Scan
pub const DEFAULT_POLL_BUDGET: u32 = 100_000;

/// Zustände der NEC-Zustandsmaschine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NecPhase {
    /// Warten auf steigende Flanke des Leitpulses
    WaitLeadingRise,
    /// Warten auf fallende Flanke am Ende des Leitpulses
    WaitLeadingFall,
    /// Warten auf steigende Flanke am Ende der Leitpause
    WaitSpaceRise,
    /// Warten auf fallende Flanke am Ende eines Datenpulses
    WaitDataFall,
    /// Warten auf steigende Flanke am Ende einer Datenpause
    WaitDataRise,
}

/// Logische Flanke (nach Invertierung)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

/// Decoder-Konfiguration
///
/// Das Poll-Budget begrenzt einen Scan über die Anzahl Iterationen,
/// nicht über die Zeit. Die Scan-Dauer hängt also von der
/// Geschwindigkeit eines Lesezugriffs ab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    pub poll_budget: u32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            poll_budget: DEFAULT_POLL_BUDGET,
        }
    }
}

/// NEC Decoder mit Zustand und Ausgabepuffer
///
/// Wird über mehrere Scans wiederverwendet. Jeder Scan beginnt mit
/// leerem Puffer und in `WaitLeadingRise`; Pegel und Zeitstempel der
/// letzten Flanke bleiben erhalten.
#[derive(Debug, Clone)]
pub struct NecDecoder {
    config: DecoderConfig,
    phase: NecPhase,
    pending_byte: u8,
    bit_mask: u8,
    last_edge_us: u32,
    last_level: bool,
    buffer: [u8; OUTPUT_CAPACITY],
    count: usize,
}

impl Default for NecDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NecDecoder {
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            phase: NecPhase::WaitLeadingRise,
            pending_byte: 0,
            bit_mask: 0,
            last_edge_us: 0,
            last_level: false,
            buffer: [0; OUTPUT_CAPACITY],
            count: 0,
        }
    }

    pub fn config(&self) -> DecoderConfig {
        self.config
    }

    pub fn phase(&self) -> NecPhase {
        self.phase
    }

    /// Scannt eine Leitung für das komplette Poll-Budget
    ///
    /// Bricht nach einem vollständigen Byte nicht ab, sondern pollt bis
    /// das Budget verbraucht ist. Blockiert den Aufrufer solange.
    ///
    /// Gibt die Anzahl dekodierter Bytes zurück.
    pub fn scan<B, C>(&mut self, board: &mut B, line: PhysicalLine, clock: &C) -> usize
    where
        B: DigitalRead,
        C: MicrosClock,
    {
        self.buffer = [0; OUTPUT_CAPACITY];
        self.count = 0;
        self.phase = NecPhase::WaitLeadingRise;

        for _ in 0..self.config.poll_budget {
            let raw_high = board.digital_read(line);
            if let Some(edge) = self.classify(raw_high) {
                self.on_edge(edge, clock.micros());
            }
        }

        debug!("NEC: scan on line {} decoded {} byte(s)", line, self.count);
        self.count
    }

    /// Wandelt einen gelesenen Pegel in ein Flanken-Ereignis
    ///
    /// Elektrisch HIGH ist logisch LOW. Ohne Pegelwechsel gibt es kein
    /// Ereignis.
    pub fn classify(&mut self, raw_high: bool) -> Option<Edge> {
        let level = !raw_high;
        let edge = match (self.last_level, level) {
            (true, false) => Some(Edge::Falling),
            (false, true) => Some(Edge::Rising),
            _ => None,
        };
        self.last_level = level;
        edge
    }

    /// Verarbeitet eine Flanke zum Zeitpunkt `now_us`
    ///
    /// Die Dauer seit der vorigen Flanke wird vor dem Zustandswechsel
    /// berechnet, der Zeitstempel danach übernommen.
    pub fn on_edge(&mut self, edge: Edge, now_us: u32) {
        let ticks = now_us.wrapping_sub(self.last_edge_us);
        self.step(edge, ticks);
        self.last_edge_us = now_us;
    }

    fn step(&mut self, edge: Edge, ticks: u32) {
        match (self.phase, edge) {
            (NecPhase::WaitLeadingRise, Edge::Rising) => {
                self.phase = NecPhase::WaitLeadingFall;
            }
            (NecPhase::WaitLeadingFall, Edge::Falling) => {
                if ticks > LEADING_PULSE_MIN_US {
                    self.phase = NecPhase::WaitSpaceRise;
                } else {
                    trace!("NEC: leading pulse too short ({} us)", ticks);
                    self.phase = NecPhase::WaitLeadingRise;
                }
            }
            (NecPhase::WaitSpaceRise, Edge::Rising) => {
                if ticks > LEADING_SPACE_MIN_US {
                    self.pending_byte = 0;
                    self.bit_mask = 0x80;
                    self.phase = NecPhase::WaitDataFall;
                } else {
                    trace!("NEC: leading space too short ({} us)", ticks);
                    self.phase = NecPhase::WaitLeadingRise;
                }
            }
            (NecPhase::WaitDataFall, Edge::Falling) => {
                if ticks < DATA_PULSE_MAX_US {
                    self.phase = NecPhase::WaitDataRise;
                } else {
                    trace!("NEC: data pulse too long ({} us)", ticks);
                    self.phase = NecPhase::WaitLeadingRise;
                }
            }
            (NecPhase::WaitDataRise, Edge::Rising) => {
                if ticks > ONE_SPACE_MIN_US {
                    self.pending_byte |= self.bit_mask;
                }
                self.bit_mask >>= 1;

                if self.bit_mask == 0 {
                    self.push_byte(self.pending_byte);
                    self.phase = NecPhase::WaitLeadingRise;
                } else {
                    self.phase = NecPhase::WaitDataFall;
                }
            }
            // Flanke passt nicht zum Zustand: ignorieren
            _ => {}
        }
    }

    fn push_byte(&mut self, byte: u8) {
        match self.buffer.get_mut(self.count) {
            Some(slot) => {
                *slot = byte;
                self.count += 1;
            }
            None => warn!("NEC: output buffer full, dropping {=u8:#x}", byte),
        }
    }

    /// Ausgabepuffer des letzten Scans (ungenutzte Plätze sind 0)
    ///
    /// Ohne vorherigen Scan leer; wird nicht automatisch aufgefrischt.
    pub fn buffer(&self) -> &[u8; OUTPUT_CAPACITY] {
        &self.buffer
    }

    /// Nur die im letzten Scan dekodierten Bytes
    pub fn decoded(&self) -> &[u8] {
        &self.buffer[..self.count]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Byte an `index`, oder `MISSING_BYTE` wenn `index >= count()`
    pub fn byte_at(&self, index: usize) -> u8 {
        self.decoded().get(index).copied().unwrap_or(MISSING_BYTE)
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for NecPhase {
    fn format(&self, fmt: defmt::Formatter) {
        let name = match self {
            NecPhase::WaitLeadingRise => "WaitLeadingRise",
            NecPhase::WaitLeadingFall => "WaitLeadingFall",
            NecPhase::WaitSpaceRise => "WaitSpaceRise",
            NecPhase::WaitDataFall => "WaitDataFall",
            NecPhase::WaitDataRise => "WaitDataRise",
        };
        defmt::write!(fmt, "{}", name)
    }
}
