// Task-Modul: Enthält alle Embassy Tasks
//
// Der IR-Scan pollt blockierend; während eines Scans laufen keine
// anderen Tasks.

pub mod ir_scan;

// Re-export Tasks für einfachen Import
pub use ir_scan::ir_scan_task;
