//! Pin-Registry
//!
//! Verwaltet die drei Leitungs-Pools (analog, digital, PCA) und ordnet
//! logische Geräte-IDs konkreten Leitungen zu. Einmal belegte Leitungen
//! werden nicht wieder freigegeben.

use heapless::Vec;

use crate::types::{ComponentBinding, DeviceCategory, LineKind, LogicalId, PhysicalLine};

/// Größter Pool (Digital-Pins)
const MAX_POOL_LINES: usize = LineKind::Digital.capacity();

/// Größte Binding-Tabelle (Servos)
const MAX_TABLE_CAPACITY: usize = DeviceCategory::Servo.capacity();

/// Analog-Eingänge, die das Board fest belegt (A0-A3, Leitfähigkeitssonde)
pub const BOARD_RESERVED_ANALOG: [PhysicalLine; 4] = [0, 1, 2, 3];

/// Digital-Pins, die das Board fest belegt
///
/// Serielle Schnittstellen und I2C (0, 1, 14-21) sowie das Keypad
/// (Zeilen 39-45, Spalten 47-53).
pub const BOARD_RESERVED_DIGITAL: [PhysicalLine; 18] = [
    0, 1, 14, 15, 16, 17, 18, 19, 20, 21, 39, 41, 43, 45, 47, 49, 51, 53,
];

/// Fehler-Typ für Registrierungen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// Leitung außerhalb des Pools oder bereits belegt
    LineUnavailable,
    /// Binding-Tabelle der Kategorie ist voll
    CapacityExceeded,
}

/// Belegungstabelle für eine Leitungsart
///
/// `true` = belegt, `false` = frei.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePool {
    kind: LineKind,
    owned: [bool; MAX_POOL_LINES],
}

impl LinePool {
    pub const fn new(kind: LineKind) -> Self {
        Self {
            kind,
            owned: [false; MAX_POOL_LINES],
        }
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.kind.capacity()
    }

    /// Leitung liegt im Pool und ist noch nicht belegt
    ///
    /// Leitungen außerhalb des Pools sind nie frei.
    pub fn is_free(&self, line: PhysicalLine) -> bool {
        let index = usize::from(line);
        index < self.capacity() && !self.owned[index]
    }

    /// Belegungsstatus aller Leitungen des Pools
    pub fn as_slice(&self) -> &[bool] {
        &self.owned[..self.capacity()]
    }

    pub fn owned_count(&self) -> usize {
        self.as_slice().iter().filter(|owned| **owned).count()
    }

    fn claim(&mut self, line: PhysicalLine) {
        let index = usize::from(line);
        if index < self.capacity() {
            self.owned[index] = true;
        }
    }
}

/// Binding-Tabelle einer Gerätekategorie
///
/// Einträge bleiben in Einfüge-Reihenfolge; die Belegung wächst nur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTable {
    category: DeviceCategory,
    bindings: Vec<ComponentBinding, MAX_TABLE_CAPACITY>,
}

impl BindingTable {
    pub const fn new(category: DeviceCategory) -> Self {
        Self {
            category,
            bindings: Vec::new(),
        }
    }

    pub fn category(&self) -> DeviceCategory {
        self.category
    }

    pub fn capacity(&self) -> usize {
        self.category.capacity()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bindings.len() >= self.capacity()
    }

    /// Sucht die Leitung zu einer logischen ID
    ///
    /// IDs sind nicht eindeutig: der zuerst registrierte Eintrag gewinnt.
    pub fn resolve(&self, logical_id: LogicalId) -> Option<PhysicalLine> {
        self.bindings
            .iter()
            .find(|binding| binding.logical_id == logical_id)
            .map(|binding| binding.line)
    }

    pub fn as_slice(&self) -> &[ComponentBinding] {
        &self.bindings
    }

    fn push(&mut self, binding: ComponentBinding) -> Result<(), RegisterError> {
        if self.is_full() {
            return Err(RegisterError::CapacityExceeded);
        }
        self.bindings
            .push(binding)
            .map_err(|_| RegisterError::CapacityExceeded)
    }
}

/// Zentrale Pin-Verwaltung
///
/// Ersetzt die globalen Pin-Tabellen: eine Instanz pro Roboter,
/// gehalten vom Aufrufer (siehe `Robot`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRegistry {
    analog: LinePool,
    digital: LinePool,
    pwm: LinePool,
    tables: [BindingTable; DeviceCategory::ALL.len()],
}

impl Default for PinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PinRegistry {
    /// Registry mit komplett freien Pools
    pub fn new() -> Self {
        Self {
            analog: LinePool::new(LineKind::Analog),
            digital: LinePool::new(LineKind::Digital),
            pwm: LinePool::new(LineKind::PwmController),
            tables: DeviceCategory::ALL.map(BindingTable::new),
        }
    }

    /// Registry mit den fest verdrahteten Board-Leitungen als belegt
    pub fn with_board_reservations() -> Self {
        let mut registry = Self::new();
        for line in BOARD_RESERVED_ANALOG {
            registry.analog.claim(line);
        }
        for line in BOARD_RESERVED_DIGITAL {
            registry.digital.claim(line);
        }
        registry
    }

    pub fn pool(&self, kind: LineKind) -> &LinePool {
        match kind {
            LineKind::Analog => &self.analog,
            LineKind::Digital => &self.digital,
            LineKind::PwmController => &self.pwm,
        }
    }

    fn pool_mut(&mut self, kind: LineKind) -> &mut LinePool {
        match kind {
            LineKind::Analog => &mut self.analog,
            LineKind::Digital => &mut self.digital,
            LineKind::PwmController => &mut self.pwm,
        }
    }

    pub fn table(&self, category: DeviceCategory) -> &BindingTable {
        &self.tables[category.index()]
    }

    /// Registrierte Geräte einer Kategorie in Einfüge-Reihenfolge
    pub fn bindings(&self, category: DeviceCategory) -> &[ComponentBinding] {
        self.table(category).as_slice()
    }

    /// Reine Abfrage: Leitung gültig und frei?
    pub fn is_free(&self, line: PhysicalLine, kind: LineKind) -> bool {
        self.pool(kind).is_free(line)
    }

    /// Registriert ein Gerät an einer Leitung
    ///
    /// Entweder werden Binding, Tabellen-Belegung und Pool-Slot
    /// gemeinsam übernommen, oder es ändert sich nichts.
    ///
    /// # Fehlerbehandlung
    /// - `RegisterError::LineUnavailable` wenn die Leitung belegt oder ungültig ist
    /// - `RegisterError::CapacityExceeded` wenn die Kategorie voll ist
    pub fn register(
        &mut self,
        category: DeviceCategory,
        logical_id: LogicalId,
        line: PhysicalLine,
    ) -> Result<(), RegisterError> {
        let kind = category.line_kind();
        if !self.is_free(line, kind) {
            warn!("Registry: line {} ({}) unavailable", line, kind);
            return Err(RegisterError::LineUnavailable);
        }

        let binding = ComponentBinding {
            logical_id,
            line,
            kind,
        };
        if let Err(e) = self.tables[category.index()].push(binding) {
            warn!("Registry: {} table full", category);
            return Err(e);
        }
        self.pool_mut(kind).claim(line);

        debug!("Registry: {} id {} -> line {}", category, logical_id, line);
        Ok(())
    }

    /// Löst eine logische ID innerhalb einer Kategorie auf
    ///
    /// `None` wenn keine passende Registrierung existiert.
    pub fn resolve(
        &self,
        logical_id: LogicalId,
        category: DeviceCategory,
    ) -> Option<PhysicalLine> {
        self.table(category).resolve(logical_id)
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for RegisterError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RegisterError::LineUnavailable => defmt::write!(fmt, "LineUnavailable"),
            RegisterError::CapacityExceeded => defmt::write!(fmt, "CapacityExceeded"),
        }
    }
}
