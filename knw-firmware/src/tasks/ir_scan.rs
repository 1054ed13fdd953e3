// IR Scan Task - Liest Beacon-Zeichen über den NEC-Decoder
use defmt::{debug, error, info};
use embassy_time::{Duration, Timer};
use esp_hal::gpio::{Input, InputConfig, Pull};

use crate::config::{IR_POLL_BUDGET, IR_RECEIVER_ID, IR_RECEIVER_LINE, IR_SCAN_INTERVAL_MS};
use crate::hal::{EspBoard, EspClock};
use crate::{DecoderConfig, DigitalRead, MicrosClock, Robot};

/// IR Scan Logic - Testbare Logik ohne Hardware-Abhängigkeit
///
/// Scannt periodisch den registrierten Empfänger und loggt die
/// empfangenen Zeichen.
///
/// # Trait-basierte Abstraktion
/// `Robot<B, C>` ist generisch über Board und Uhr:
/// - Real Hardware (EspBoard, EspClock) im Production-Code
/// - Mock Implementation (ScriptedLine, SimClock) in den Host-Tests
pub async fn ir_scan_logic<B: DigitalRead, C: MicrosClock>(robot: &mut Robot<B, C>) {
    loop {
        // Blockiert für das komplette Poll-Budget
        match robot.scan_ir(IR_RECEIVER_ID) {
            Ok(0) => debug!("IR: nothing received"),
            Ok(count) => info!("IR: {} char(s): {=[u8]}", count, robot.ir_decoded()),
            Err(e) => error!("IR: scan failed: {}", e),
        }

        // Async Delay: gibt CPU an andere Tasks zurück
        Timer::after(Duration::from_millis(IR_SCAN_INTERVAL_MS)).await;
    }
}

/// IR Scan Task - Embassy Task
///
/// Initialisiert den Eingang, registriert den Empfänger und ruft dann
/// `ir_scan_logic()` auf.
///
/// # Parameter
/// - `ir_gpio`: GPIO-Peripheral des IR-Empfängers (siehe `IR_RECEIVER_LINE`)
#[embassy_executor::task]
pub async fn ir_scan_task(ir_gpio: esp_hal::peripherals::GPIO4<'static>) {
    // Empfänger-Ausgang ist Open-Collector: Pull-Up für definierten Ruhepegel
    let input = Input::new(ir_gpio, InputConfig::default().with_pull(Pull::Up));

    let mut board = EspBoard::new();
    if board.attach(IR_RECEIVER_LINE, input).is_err() {
        error!("IR: board has no free input slot");
        return;
    }

    let config = DecoderConfig {
        poll_budget: IR_POLL_BUDGET,
    };
    let mut robot = Robot::with_decoder_config(board, EspClock, config);

    if let Err(e) = robot.setup_ir(IR_RECEIVER_ID, IR_RECEIVER_LINE) {
        error!("IR: setup on line {} failed: {}", IR_RECEIVER_LINE, e);
        return;
    }
    info!(
        "IR: receiver {} on line {}, budget {} polls",
        IR_RECEIVER_ID, IR_RECEIVER_LINE, IR_POLL_BUDGET
    );

    ir_scan_logic(&mut robot).await
}
