//! KNW Core - Platform-agnostic Pin Registry and IR Decoder
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, die Pin-Verwaltung, den NEC-Decoder
//! und Pure Functions für die Aktoren.

#![no_std]

#[macro_use]
mod log;

pub mod decoder;
pub mod drive;
pub mod logic;
pub mod registry;
pub mod robot;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use decoder::{DecoderConfig, Edge, MISSING_BYTE, NecDecoder, NecPhase, OUTPUT_CAPACITY};
pub use drive::{Actuators, DriveError};
pub use registry::{BindingTable, LinePool, PinRegistry, RegisterError};
pub use robot::{Robot, ScanError};
pub use traits::{AnalogRead, DigitalRead, MicrosClock, PwmController, PwmError};
pub use types::{ComponentBinding, DeviceCategory, LineKind, LogicalId, PhysicalLine};
