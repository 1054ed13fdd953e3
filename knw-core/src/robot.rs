//! Roboter-Kontext
//!
//! Hält Registry, IR-Decoder, Digital-Board und Uhr als ein Objekt mit
//! der Lebensdauer des Geräts. Ein Kontext pro Ausführungsstrang; für
//! Zugriff aus mehreren Threads muss der Aufrufer selbst sperren.

use crate::decoder::{DecoderConfig, NecDecoder, OUTPUT_CAPACITY};
use crate::drive::Actuators;
use crate::registry::{PinRegistry, RegisterError};
use crate::traits::{AnalogRead, DigitalRead, MicrosClock, PwmController};
use crate::types::{DeviceCategory, LogicalId, PhysicalLine};

/// Fehler-Typ für IR-Scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// Kein IR-Empfänger mit dieser ID registriert
    UnknownId(LogicalId),
}

/// Roboter mit Pin-Verwaltung und IR-Decoder
///
/// # Parameter
/// - `B`: Digital-Board (Hardware oder Mock)
/// - `C`: Mikrosekunden-Uhr (Hardware oder Mock)
pub struct Robot<B, C> {
    registry: PinRegistry,
    decoder: NecDecoder,
    board: B,
    clock: C,
}

impl<B: DigitalRead, C: MicrosClock> Robot<B, C> {
    /// Erstellt den Roboter mit den fest belegten Board-Leitungen
    pub fn new(board: B, clock: C) -> Self {
        Self::with_decoder_config(board, clock, DecoderConfig::default())
    }

    pub fn with_decoder_config(board: B, clock: C, config: DecoderConfig) -> Self {
        Self {
            registry: PinRegistry::with_board_reservations(),
            decoder: NecDecoder::with_config(config),
            board,
            clock,
        }
    }

    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ========================================================================
    // Registrierung
    // ========================================================================

    /// Registriert ein Gerät einer Kategorie an einer physischen Leitung
    pub fn setup(
        &mut self,
        category: DeviceCategory,
        id: LogicalId,
        line: PhysicalLine,
    ) -> Result<(), RegisterError> {
        self.registry.register(category, id, line)
    }

    pub fn setup_ping(&mut self, id: LogicalId, pin: PhysicalLine) -> Result<(), RegisterError> {
        self.setup(DeviceCategory::Ping, id, pin)
    }

    pub fn setup_bump(&mut self, id: LogicalId, pin: PhysicalLine) -> Result<(), RegisterError> {
        self.setup(DeviceCategory::Bump, id, pin)
    }

    pub fn setup_ir(&mut self, id: LogicalId, pin: PhysicalLine) -> Result<(), RegisterError> {
        self.setup(DeviceCategory::Infrared, id, pin)
    }

    pub fn setup_servo(
        &mut self,
        id: LogicalId,
        channel: PhysicalLine,
    ) -> Result<(), RegisterError> {
        self.setup(DeviceCategory::Servo, id, channel)
    }

    pub fn setup_motor(
        &mut self,
        id: LogicalId,
        channel: PhysicalLine,
    ) -> Result<(), RegisterError> {
        self.setup(DeviceCategory::Motor, id, channel)
    }

    /// Neigungssensor (nur einer, ID 0)
    pub fn setup_incline(&mut self, pin: PhysicalLine) -> Result<(), RegisterError> {
        self.setup(DeviceCategory::Inclinometer, 0, pin)
    }

    /// Temperatursensor (nur einer, ID 0)
    pub fn setup_temp(&mut self, pin: PhysicalLine) -> Result<(), RegisterError> {
        self.setup(DeviceCategory::Temperature, 0, pin)
    }

    /// Physische Leitung zu einer logischen ID
    ///
    /// Vor jedem Hardware-Zugriff aufrufen; `None` heißt: nicht registriert.
    pub fn physical_line_for(
        &self,
        id: LogicalId,
        category: DeviceCategory,
    ) -> Option<PhysicalLine> {
        self.registry.resolve(id, category)
    }

    // ========================================================================
    // Sensoren
    // ========================================================================

    /// Prüft ob der Bump-Sensor `id` ausgelöst hat (Leitung HIGH)
    ///
    /// `None` wenn kein Bump-Sensor mit dieser ID registriert ist.
    pub fn check_bump(&mut self, id: LogicalId) -> Option<bool> {
        let line = self.physical_line_for(id, DeviceCategory::Bump)?;
        Some(self.board.digital_read(line))
    }

    /// ADC-Wert des Neigungssensors (0-1023)
    ///
    /// `None` solange `setup_incline` nicht erfolgreich war.
    pub fn incline<A: AnalogRead>(&self, adc: &mut A) -> Option<u16> {
        let line = self.physical_line_for(0, DeviceCategory::Inclinometer)?;
        Some(adc.analog_read(line))
    }

    /// ADC-Wert des Temperatursensors (0-1023), `None` ohne `setup_temp`
    pub fn temp<A: AnalogRead>(&self, adc: &mut A) -> Option<u16> {
        let line = self.physical_line_for(0, DeviceCategory::Temperature)?;
        Some(adc.analog_read(line))
    }

    // ========================================================================
    // Infrarot
    // ========================================================================

    /// Scannt den IR-Empfänger `id` nach Zeichen
    ///
    /// Blockiert für das komplette Poll-Budget. Bei unbekannter ID wird
    /// nicht gepollt und der Puffer des letzten Scans bleibt erhalten.
    pub fn scan_ir(&mut self, id: LogicalId) -> Result<usize, ScanError> {
        let line = self
            .physical_line_for(id, DeviceCategory::Infrared)
            .ok_or(ScanError::UnknownId(id))?;
        Ok(self.decoder.scan(&mut self.board, line, &self.clock))
    }

    /// Puffer des letzten Scans (wird nicht automatisch aufgefrischt)
    pub fn ir_buffer(&self) -> &[u8; OUTPUT_CAPACITY] {
        self.decoder.buffer()
    }

    pub fn ir_decoded(&self) -> &[u8] {
        self.decoder.decoded()
    }

    /// Zeichen an `index`, oder `MISSING_BYTE` (`'Z'`) außerhalb des Scans
    pub fn ir_byte_at(&self, index: usize) -> u8 {
        self.decoder.byte_at(index)
    }

    // ========================================================================
    // Aktoren
    // ========================================================================

    /// Aktor-Zugriff über einen PWM-Controller
    ///
    /// ```ignore
    /// robot.actuators(&mut pca).dc_motor(1, 512)?;
    /// ```
    pub fn actuators<'a, P: PwmController>(&'a self, pwm: &'a mut P) -> Actuators<'a, P> {
        Actuators::new(&self.registry, pwm)
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for ScanError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ScanError::UnknownId(id) => defmt::write!(fmt, "UnknownId({})", id),
        }
    }
}
