//! Aktoren am PWM-Controller
//!
//! Löst logische Motor-/Servo-IDs über die Registry auf und schreibt
//! die berechneten Pulslängen auf den Controller.

use crate::logic::{CONTINUOUS_SERVO, DC_MOTOR, PWM_MAX_TICK, SERVO_180};
use crate::registry::PinRegistry;
use crate::traits::{PwmController, PwmError};
use crate::types::{DeviceCategory, LineKind, LogicalId, PhysicalLine};

/// Fehler-Typ für Aktor-Befehle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveError {
    /// Keine Registrierung für diese ID in der Kategorie
    UnknownId(LogicalId),
    /// Kategorie hängt nicht am PWM-Controller
    NotPwmCategory(DeviceCategory),
    /// Pulslänge größer als 4095
    PulseOutOfRange(u16),
    /// Schreiben auf den Controller fehlgeschlagen
    Pwm(PwmError),
}

impl From<PwmError> for DriveError {
    fn from(e: PwmError) -> Self {
        DriveError::Pwm(e)
    }
}

/// Aktor-Zugriff für einen Befehl
///
/// Leiht sich Registry und Controller nur für die Dauer des Befehls.
pub struct Actuators<'a, P: PwmController> {
    registry: &'a PinRegistry,
    pwm: &'a mut P,
}

impl<'a, P: PwmController> Actuators<'a, P> {
    pub fn new(registry: &'a PinRegistry, pwm: &'a mut P) -> Self {
        Self { registry, pwm }
    }

    fn line(&self, category: DeviceCategory, id: LogicalId) -> Result<PhysicalLine, DriveError> {
        if category.line_kind() != LineKind::PwmController {
            return Err(DriveError::NotPwmCategory(category));
        }
        self.registry
            .resolve(id, category)
            .ok_or(DriveError::UnknownId(id))
    }

    /// Schreibt eine rohe Pulslänge (0-4095)
    ///
    /// # Fehlerbehandlung
    /// - `DriveError::NotPwmCategory` für Sensor-Kategorien
    /// - `DriveError::PulseOutOfRange` wenn `pulse` über 4095 liegt
    /// - `DriveError::UnknownId` wenn die ID nicht registriert ist
    pub fn raw(
        &mut self,
        category: DeviceCategory,
        id: LogicalId,
        pulse: u16,
    ) -> Result<(), DriveError> {
        if pulse > PWM_MAX_TICK {
            return Err(DriveError::PulseOutOfRange(pulse));
        }
        let line = self.line(category, id)?;
        self.pwm.set_pwm(line, 0, pulse)?;
        Ok(())
    }

    /// Schaltet den Kanal eines Geräts ab
    pub fn stop(&mut self, category: DeviceCategory, id: LogicalId) -> Result<(), DriveError> {
        self.raw(category, id, 0)
    }

    /// Schaltet alle Kanäle des Controllers ab, registriert oder nicht
    pub fn stop_all(&mut self) -> Result<(), DriveError> {
        for channel in 0..LineKind::PwmController.capacity() {
            self.pwm.set_pwm(channel as PhysicalLine, 0, 0)?;
        }
        Ok(())
    }

    /// Fährt einen 180°-Servo auf `angle` (0..240, Mitte 120) und hält ihn
    pub fn servo_180(&mut self, id: LogicalId, angle: i32) -> Result<(), DriveError> {
        self.raw(DeviceCategory::Servo, id, SERVO_180.pulse(angle))
    }

    /// Dreht einen Endlos-Servo mit `speed` (-90..90, 0 = Stillstand)
    pub fn continuous_servo(&mut self, id: LogicalId, speed: i32) -> Result<(), DriveError> {
        self.raw(DeviceCategory::Servo, id, CONTINUOUS_SERVO.pulse(speed))
    }

    /// Dreht einen DC-Motor mit `speed` (-1023..1023, 0 = Stillstand)
    pub fn dc_motor(&mut self, id: LogicalId, speed: i32) -> Result<(), DriveError> {
        self.raw(DeviceCategory::Motor, id, DC_MOTOR.pulse(speed))
    }

    /// Zwei DC-Motoren gemeinsam
    ///
    /// Beide IDs werden aufgelöst bevor ein Kanal geschrieben wird.
    pub fn dc_motors(
        &mut self,
        (id1, speed1): (LogicalId, i32),
        (id2, speed2): (LogicalId, i32),
    ) -> Result<(), DriveError> {
        let line1 = self.line(DeviceCategory::Motor, id1)?;
        let line2 = self.line(DeviceCategory::Motor, id2)?;
        self.pwm.set_pwm(line1, 0, DC_MOTOR.pulse(speed1))?;
        self.pwm.set_pwm(line2, 0, DC_MOTOR.pulse(speed2))?;
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DriveError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DriveError::UnknownId(id) => defmt::write!(fmt, "UnknownId({})", id),
            DriveError::NotPwmCategory(category) => {
                defmt::write!(fmt, "NotPwmCategory({})", category)
            }
            DriveError::PulseOutOfRange(pulse) => defmt::write!(fmt, "PulseOutOfRange({})", pulse),
            DriveError::Pwm(e) => defmt::write!(fmt, "Pwm({})", e),
        }
    }
}
