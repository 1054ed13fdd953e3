//! Pure Business Logic Functions
//!
//! Umrechnung von Benutzer-Eingaben (Winkel, Geschwindigkeit) in
//! 12-Bit Pulslängen für den PWM-Controller. Ohne Hardware-Dependencies.

/// Höchster Tick-Wert des PWM-Controllers (12 Bit)
pub const PWM_MAX_TICK: u16 = 4095;

/// Lineare Abbildung mit ganzzahliger Division (wie Arduino `map()`)
///
/// Rundet Richtung 0. Bei leerem Eingangsbereich wird `out_min` geliefert.
///
/// ```
/// # use knw_core::logic::map_range;
/// assert_eq!(map_range(5, 0, 10, 0, 100), 50);
/// assert_eq!(map_range(0, -90, 90, 369, 299), 334);
/// ```
pub fn map_range(x: i64, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> i64 {
    if in_max == in_min {
        return out_min;
    }
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Kalibrierte Abbildung Eingabe → Pulslänge
///
/// Eingaben außerhalb des Bereichs werden auf die Pulsgrenzen begrenzt.
/// `pulse_at_min > pulse_at_max` kehrt die Richtung um.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseProfile {
    pub input_min: i32,
    pub input_max: i32,
    pub pulse_at_min: u16,
    pub pulse_at_max: u16,
}

/// 180°-Servo: Mitte 400, ±320 (bewusst über ±90° hinaus, zum Kalibrieren)
pub const SERVO_180: PulseProfile = PulseProfile::centered(0, 240, 400, 320, false);

/// Endlos-Servo: -90..90, Richtung umgekehrt, Stillstand bei 334
pub const CONTINUOUS_SERVO: PulseProfile = PulseProfile::centered(-90, 90, 334, 35, true);

/// DC-Motor: -1023..1023, Stillstand bei 337
pub const DC_MOTOR: PulseProfile = PulseProfile::centered(-1023, 1023, 337, 183, false);

impl PulseProfile {
    /// Profil aus Mittelpunkt und halber Breite des Pulsbereichs
    pub const fn centered(
        input_min: i32,
        input_max: i32,
        center: u16,
        width: u16,
        reversed: bool,
    ) -> Self {
        let low = center - width;
        let high = center + width;
        let (pulse_at_min, pulse_at_max) = if reversed { (high, low) } else { (low, high) };
        Self {
            input_min,
            input_max,
            pulse_at_min,
            pulse_at_max,
        }
    }

    pub fn pulse_min(&self) -> u16 {
        self.pulse_at_min.min(self.pulse_at_max)
    }

    pub fn pulse_max(&self) -> u16 {
        self.pulse_at_min.max(self.pulse_at_max)
    }

    /// Pulslänge für eine Eingabe
    pub fn pulse(&self, input: i32) -> u16 {
        let raw = map_range(
            i64::from(input),
            i64::from(self.input_min),
            i64::from(self.input_max),
            i64::from(self.pulse_at_min),
            i64::from(self.pulse_at_max),
        );
        let clamped = raw.clamp(i64::from(self.pulse_min()), i64::from(self.pulse_max()));
        // Grenzen stammen aus u16, daher verlustfrei
        clamped as u16
    }
}
