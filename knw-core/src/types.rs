//! Core Types für die Pin-Verwaltung
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Vom Benutzer gewählte Kennung eines Geräts (unabhängig vom Pin)
pub type LogicalId = i32;

/// Physische Leitung: Analog-, Digital- oder PCA-Kanal-Nummer
pub type PhysicalLine = u8;

/// Art der physischen Leitung
///
/// Jede Art hat ihren eigenen Pool mit fester Größe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineKind {
    /// Analog-Eingänge A0-A15
    Analog,
    /// Digital-Pins D0-D53
    Digital,
    /// Kanäle 0-15 des PWM-Controllers (PCA9685)
    PwmController,
}

impl LineKind {
    /// Anzahl der Leitungen im Pool dieser Art
    pub const fn capacity(self) -> usize {
        match self {
            LineKind::Analog => 16,
            LineKind::Digital => 54,
            LineKind::PwmController => 16,
        }
    }
}

/// Gerätekategorie mit eigener Binding-Tabelle
///
/// Die Kapazitäten entsprechen den elektrischen Grenzen des Boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceCategory {
    /// Ultraschall-Abstandssensor (Ping), digital
    Ping,
    /// Kontakt-/Stoßsensor, digital
    Bump,
    /// Infrarot-Empfänger, digital
    Infrared,
    /// DC-Motor am PWM-Controller
    Motor,
    /// Servo am PWM-Controller
    Servo,
    /// Neigungssensor, analog
    Inclinometer,
    /// Temperatursensor, analog
    Temperature,
}

impl DeviceCategory {
    /// Alle Kategorien in Tabellen-Reihenfolge
    pub const ALL: [DeviceCategory; 7] = [
        DeviceCategory::Ping,
        DeviceCategory::Bump,
        DeviceCategory::Infrared,
        DeviceCategory::Motor,
        DeviceCategory::Servo,
        DeviceCategory::Inclinometer,
        DeviceCategory::Temperature,
    ];

    /// Leitungsart, an der Geräte dieser Kategorie hängen
    pub const fn line_kind(self) -> LineKind {
        match self {
            DeviceCategory::Ping | DeviceCategory::Bump | DeviceCategory::Infrared => {
                LineKind::Digital
            }
            DeviceCategory::Motor | DeviceCategory::Servo => LineKind::PwmController,
            DeviceCategory::Inclinometer | DeviceCategory::Temperature => LineKind::Analog,
        }
    }

    /// Maximale Anzahl Geräte dieser Kategorie
    pub const fn capacity(self) -> usize {
        match self {
            DeviceCategory::Ping => 8,
            DeviceCategory::Bump => 8,
            DeviceCategory::Infrared => 4,
            DeviceCategory::Motor => 4,
            DeviceCategory::Servo => 16,
            DeviceCategory::Inclinometer => 1,
            DeviceCategory::Temperature => 1,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Ein registriertes logisches Gerät
///
/// Wird nur von der Registry erzeugt und danach nie verändert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentBinding {
    pub logical_id: LogicalId,
    pub line: PhysicalLine,
    pub kind: LineKind,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for LineKind {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LineKind::Analog => defmt::write!(fmt, "Analog"),
            LineKind::Digital => defmt::write!(fmt, "Digital"),
            LineKind::PwmController => defmt::write!(fmt, "PCA"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceCategory {
    fn format(&self, fmt: defmt::Formatter) {
        let name = match self {
            DeviceCategory::Ping => "Ping",
            DeviceCategory::Bump => "Bump",
            DeviceCategory::Infrared => "IR",
            DeviceCategory::Motor => "Motor",
            DeviceCategory::Servo => "Servo",
            DeviceCategory::Inclinometer => "Incline",
            DeviceCategory::Temperature => "Temp",
        };
        defmt::write!(fmt, "{}", name)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ComponentBinding {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ComponentBinding {{ id: {}, line: {}, kind: {} }}",
            self.logical_id,
            self.line,
            self.kind
        )
    }
}
