// Digital-Board und Mikrosekunden-Uhr auf ESP32-C6 Hardware

use esp_hal::gpio::Input;
use esp_hal::time::Instant;
use heapless::Vec;

use knw_core::{DigitalRead, MicrosClock, PhysicalLine};

use crate::config::MAX_DIGITAL_INPUTS;

/// Digital-Board aus konfigurierten GPIO-Eingängen
///
/// Jeder Eingang wird unter seiner physischen Leitungsnummer abgelegt.
/// Nicht angeschlossene Leitungen lesen sich wie ein ruhiger
/// IR-Empfänger (HIGH).
pub struct EspBoard<'d> {
    inputs: Vec<(PhysicalLine, Input<'d>), MAX_DIGITAL_INPUTS>,
}

impl<'d> EspBoard<'d> {
    pub fn new() -> Self {
        Self { inputs: Vec::new() }
    }

    /// Hängt einen Eingang unter `line` an
    ///
    /// # Fehlerbehandlung
    /// Gibt den Eingang zurück wenn das Board voll ist
    pub fn attach(&mut self, line: PhysicalLine, input: Input<'d>) -> Result<(), Input<'d>> {
        self.inputs
            .push((line, input))
            .map_err(|(_, input)| input)
    }
}

impl Default for EspBoard<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitalRead for EspBoard<'_> {
    fn digital_read(&mut self, line: PhysicalLine) -> bool {
        self.inputs
            .iter()
            .find(|(attached, _)| *attached == line)
            .map(|(_, input)| input.is_high())
            .unwrap_or(true)
    }
}

/// Mikrosekunden seit Boot aus dem System-Timer
///
/// Abgeschnitten auf 32 Bit; läuft nach ~71 Minuten über.
#[derive(Clone, Copy, Default)]
pub struct EspClock;

impl MicrosClock for EspClock {
    fn micros(&self) -> u32 {
        Instant::now().duration_since_epoch().as_micros() as u32
    }
}
