//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use crate::types::PhysicalLine;

/// Fehler-Typ für PWM-Controller-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    WriteFailed,
}

/// Trait für das Lesen digitaler Leitungen
///
/// # Implementierungen
/// - **Production:** EspBoard (ESP32 GPIO Inputs)
/// - **Testing:** ScriptedLine (Pegelfolge aus dem Test)
pub trait DigitalRead {
    /// Liest den elektrischen Pegel einer Leitung (`true` = HIGH)
    fn digital_read(&mut self, line: PhysicalLine) -> bool;
}

/// Trait für den 10-Bit Analog-Wandler
///
/// # Implementierungen
/// - **Testing:** MockAdc (feste Werte pro Leitung)
pub trait AnalogRead {
    /// Liest den ADC-Wert einer Analog-Leitung (0-1023)
    fn analog_read(&mut self, line: PhysicalLine) -> u16;
}

/// Freilaufender Mikrosekunden-Zähler
///
/// Der Wert läuft über (wrapping); Differenzen immer mit
/// `wrapping_sub` bilden.
pub trait MicrosClock {
    fn micros(&self) -> u32;
}

/// Trait für den 12-Bit PWM-Controller (PCA9685)
pub trait PwmController {
    /// Setzt Ein- und Ausschaltzeitpunkt (0-4095) eines Kanals
    ///
    /// # Fehlerbehandlung
    /// Gibt `PwmError::WriteFailed` zurück wenn der Bus-Zugriff fehlschlägt
    fn set_pwm(&mut self, channel: PhysicalLine, on: u16, off: u16) -> Result<(), PwmError>;
}

#[cfg(feature = "defmt")]
impl defmt::Format for PwmError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PwmError::WriteFailed => defmt::write!(fmt, "WriteFailed"),
        }
    }
}
