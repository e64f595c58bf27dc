//! Blink the on-board LED (D7) of a cloud-connected Tinker device.
//!
//! # Usage
//!
//! ```sh
//! PARTICLE_DEVICE_ID=... PARTICLE_TOKEN=... cargo run --example blink
//! ```
//!
//! Each toggle is one HTTPS round trip, so expect roughly one blink per
//! second at best.

use std::time::Duration;

use anyhow::Context;
use tinker_io::hal::CloudTransport;
use tinker_io::{BoardEvent, BoardIo, Config, DeviceConfig, Level, PinMode, TinkerBoard};

const LED: &str = "D7";
const BLINKS: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tinker_io=debug".into()),
        )
        .init();

    let device_id = std::env::var("PARTICLE_DEVICE_ID").context("PARTICLE_DEVICE_ID not set")?;
    let token = std::env::var("PARTICLE_TOKEN").context("PARTICLE_TOKEN not set")?;
    let config = Config::default().with_device(DeviceConfig::new(&device_id, &token));

    let transport = CloudTransport::new(&config)?;
    let mut board = TinkerBoard::new(config.device, transport)?;

    let mut events = board.subscribe();
    while let Some(event) = events.recv().await {
        println!("board {}", event.as_str());
        if event == BoardEvent::Ready {
            break;
        }
    }

    board.pin_mode(LED, PinMode::Output)?;

    let mut level = Level::Low;
    for _ in 0..BLINKS * 2 {
        level = if level == Level::High { Level::Low } else { Level::High };
        board.digital_write(LED, level)?.await?;
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    let light = board.analog_read_async("A0")?.await?;
    println!("A0 reads {light}");

    Ok(())
}
