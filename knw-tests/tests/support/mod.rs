//! Mock-Hardware für die Host-Tests
//!
//! - `SimClock`: simulierte Mikrosekunden-Uhr
//! - `ScriptedLine`: Digital-Board, das eine vorgegebene IR-Pegelfolge abspielt
//! - `MockPwm`: PWM-Controller, der alle Schreibzugriffe aufzeichnet
//! - `MockAdc`: Analog-Wandler mit festen Werten pro Leitung
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use knw_core::{AnalogRead, DigitalRead, MicrosClock, PhysicalLine, PwmController, PwmError};

// ============================================================================
// Simulierte Uhr
// ============================================================================

/// Gemeinsam genutzte Uhr: das Board stellt sie bei jedem Lesen weiter
#[derive(Clone, Default)]
pub struct SimClock {
    now: Rc<Cell<u32>>,
}

impl SimClock {
    pub fn starting_at(us: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(us)),
        }
    }

    pub fn advance(&self, us: u32) {
        self.now.set(self.now.get().wrapping_add(us));
    }
}

impl MicrosClock for SimClock {
    fn micros(&self) -> u32 {
        self.now.get()
    }
}

// ============================================================================
// IR-Signal Builder
// ============================================================================

/// Ruhepause vor jedem Frame (µs)
pub const FRAME_IDLE_US: u32 = 1_000;

/// Baut eine Pegelfolge wie sie am Empfänger-Ausgang anliegt
///
/// Der Empfänger invertiert: Träger = elektrisch LOW, Pause = HIGH.
#[derive(Clone, Default)]
pub struct IrSignal {
    segments: Vec<(bool, u32)>,
}

impl IrSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Träger für `us` Mikrosekunden (elektrisch LOW)
    pub fn carrier(mut self, us: u32) -> Self {
        self.segments.push((false, us));
        self
    }

    /// Kein Träger für `us` Mikrosekunden (elektrisch HIGH)
    pub fn gap(mut self, us: u32) -> Self {
        self.segments.push((true, us));
        self
    }

    /// Vollständiger Frame für ein Byte mit NEC-Timing
    pub fn frame(self, byte: u8) -> Self {
        let mut signal = self.gap(FRAME_IDLE_US).carrier(9_000).gap(4_500);
        for bit in (0..8).rev() {
            let space = if byte & (1 << bit) != 0 { 1_690 } else { 560 };
            signal = signal.carrier(560).gap(space);
        }
        // Abschluss-Puls beendet die Pause des letzten Bits
        signal.carrier(560)
    }

    pub fn frames(self, bytes: &[u8]) -> Self {
        bytes.iter().fold(self, |signal, byte| signal.frame(*byte))
    }

    /// Gesamtdauer in µs
    pub fn duration_us(&self) -> u32 {
        self.segments.iter().map(|(_, us)| us).sum()
    }

    /// Pegel zum Zeitpunkt `elapsed`; nach dem Ende Ruhepegel (HIGH)
    pub fn level_at(&self, elapsed: u32) -> bool {
        let mut end = 0;
        for (high, us) in &self.segments {
            end += us;
            if elapsed < end {
                return *high;
            }
        }
        true
    }
}

// ============================================================================
// Scripted Digital Board
// ============================================================================

/// Digital-Board mit einer IR-Leitung
///
/// Jeder Lesezugriff stellt die Uhr um `us_per_read` weiter.
/// Andere Leitungen liefern den Ruhepegel HIGH.
pub struct ScriptedLine {
    clock: SimClock,
    line: PhysicalLine,
    signal: IrSignal,
    start_us: u32,
    us_per_read: u32,
    pub reads: usize,
}

impl ScriptedLine {
    pub fn new(clock: SimClock, line: PhysicalLine, signal: IrSignal) -> Self {
        let start_us = clock.micros();
        Self {
            clock,
            line,
            signal,
            start_us,
            us_per_read: 10,
            reads: 0,
        }
    }

    /// Leitung ohne jede Aktivität
    pub fn idle(clock: SimClock, line: PhysicalLine) -> Self {
        Self::new(clock, line, IrSignal::new())
    }

    pub fn with_us_per_read(mut self, us: u32) -> Self {
        self.us_per_read = us;
        self
    }

    /// Poll-Iterationen, die das komplette Signal abdecken (plus Reserve)
    pub fn reads_needed(&self) -> u32 {
        self.signal.duration_us() / self.us_per_read + 100
    }
}

impl DigitalRead for ScriptedLine {
    fn digital_read(&mut self, line: PhysicalLine) -> bool {
        self.reads += 1;
        let elapsed = self.clock.micros().wrapping_sub(self.start_us);
        self.clock.advance(self.us_per_read);
        if line != self.line {
            return true;
        }
        self.signal.level_at(elapsed)
    }
}

// ============================================================================
// Mock PWM Controller
// ============================================================================

#[derive(Default)]
pub struct MockPwm {
    /// Alle Schreibzugriffe als (Kanal, on, off)
    pub writes: Vec<(PhysicalLine, u16, u16)>,
    /// Simuliere Fehler beim nächsten set_pwm()
    pub fail_next_write: bool,
}

impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PwmController for MockPwm {
    fn set_pwm(&mut self, channel: PhysicalLine, on: u16, off: u16) -> Result<(), PwmError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(PwmError::WriteFailed);
        }

        self.writes.push((channel, on, off));
        Ok(())
    }
}

// ============================================================================
// Mock ADC
// ============================================================================

#[derive(Default)]
pub struct MockAdc {
    /// Feste Messwerte als (Leitung, Wert); unbekannte Leitungen liefern 0
    pub values: Vec<(PhysicalLine, u16)>,
    /// Alle gelesenen Leitungen in Reihenfolge
    pub reads: Vec<PhysicalLine>,
}

impl MockAdc {
    pub fn with_value(mut self, line: PhysicalLine, value: u16) -> Self {
        self.values.push((line, value));
        self
    }
}

impl AnalogRead for MockAdc {
    fn analog_read(&mut self, line: PhysicalLine) -> u16 {
        self.reads.push(line);
        self.values
            .iter()
            .find(|(l, _)| *l == line)
            .map(|(_, value)| *value)
            .unwrap_or(0)
    }
}
