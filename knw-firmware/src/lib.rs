// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von knw-core
pub use knw_core::{
    DecoderConfig, DeviceCategory, DigitalRead, MicrosClock, PinRegistry, RegisterError, Robot,
    ScanError,
};
