// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus knw-core auf ESP32-Peripherals.

pub mod board;

pub use board::{EspBoard, EspClock};
