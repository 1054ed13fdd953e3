// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

use knw_core::{LogicalId, PhysicalLine};

// ============================================================================
// IR-Empfänger
// ============================================================================

/// GPIO-Pin des IR-Empfängers (Ausgang invertiert, Ruhepegel HIGH)
///
/// Muss zum Peripheral passen, das main() an den Task übergibt (GPIO4).
pub const IR_RECEIVER_LINE: PhysicalLine = 4;

/// Logische ID, unter der der Empfänger registriert wird
pub const IR_RECEIVER_ID: LogicalId = 1;

/// Poll-Iterationen pro Scan
///
/// Bei 160 MHz dauert eine Iteration einige Mikrosekunden; 100 000
/// Iterationen decken mehrere Beacon-Frames (je ~13 ms) ab.
pub const IR_POLL_BUDGET: u32 = 100_000;

/// Pause zwischen zwei Scans in Millisekunden
pub const IR_SCAN_INTERVAL_MS: u64 = 500;

// ============================================================================
// Board
// ============================================================================

/// Maximale Anzahl Digital-Eingänge am EspBoard
pub const MAX_DIGITAL_INPUTS: usize = 4;
