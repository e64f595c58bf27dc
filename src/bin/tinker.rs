//! Command-line access to a Tinker device.
//!
//! Issues a single pin operation against a device through the Particle
//! cloud and prints the result.
//!
//! # Usage
//!
//! ```bash
//! export PARTICLE_DEVICE_ID=0123456789abcdef
//! export PARTICLE_TOKEN=...
//!
//! tinker digital-write D7 HIGH
//! tinker analog-write A0 128
//! tinker analog-read A5
//! tinker pins
//!
//! # Or load everything from a JSON config file
//! tinker --config device.json digital-read D2
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tinker_io::hal::CloudTransport;
use tinker_io::pins::PIN_TABLE;
use tinker_io::{BoardIo, Config, DeviceConfig, PinMode, TinkerBoard};

/// Drive the pins of a Tinker device through the Particle cloud
#[derive(Parser, Debug)]
#[command(name = "tinker", version, long_about = None)]
struct Args {
    /// JSON config file (device id, token, transport settings)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Device id (overrides the config file)
    #[arg(long, env = "PARTICLE_DEVICE_ID")]
    device_id: Option<String>,

    /// Access token (overrides the config file)
    #[arg(long, env = "PARTICLE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Device API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Request timeout in milliseconds (0 = none)
    #[arg(long)]
    timeout_ms: Option<u32>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set a digital pin (value: 1, HIGH or ON for high, anything else low)
    DigitalWrite { pin: String, value: String },
    /// Write a PWM value
    AnalogWrite { pin: String, value: String },
    /// Write a servo position
    ServoWrite { pin: String, value: String },
    /// Read a digital pin
    DigitalRead { pin: String },
    /// Read an analog pin
    AnalogRead { pin: String },
    /// Check that a pin supports a mode
    Mode { pin: String, mode: PinMode },
    /// Print the pin capability table
    Pins,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Config::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(id) = &args.device_id {
        config.device = config.device.with_device_id(id);
    }
    if let Some(token) = &args.token {
        config.device = config.device.with_access_token(token);
    }
    if let Some(base) = &args.api_base {
        config.transport = config.transport.with_api_base(base);
    }
    if let Some(ms) = args.timeout_ms {
        config.transport = config.transport.with_timeout_ms(ms);
    }
    Ok(config)
}

fn print_pins() {
    for (index, spec) in PIN_TABLE.iter().enumerate() {
        if spec.is_reserved() {
            continue;
        }
        let modes: Vec<&str> = spec.supported_modes.iter().map(PinMode::as_str).collect();
        println!("{:>2}  {:<3} {}", index, spec.name, modes.join(", "));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "tinker_io=debug" } else { "tinker_io=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    if let Command::Pins = args.command {
        print_pins();
        return Ok(());
    }

    let config = load_config(&args)?;
    if config.device.device_id.is_empty() {
        bail!("no device id: pass --device-id, set PARTICLE_DEVICE_ID or use --config");
    }

    let transport = CloudTransport::new(&config)?;
    let device: DeviceConfig = config.device.clone();
    let mut board = TinkerBoard::new(device, transport)?;
    board.ready().await;

    match args.command {
        Command::DigitalWrite { pin, value } => {
            board.digital_write(pin.as_str(), value.as_str())?.await?;
            println!("ok");
        }
        Command::AnalogWrite { pin, value } => {
            board.analog_write(pin.as_str(), value.as_str())?.await?;
            println!("ok");
        }
        Command::ServoWrite { pin, value } => {
            board.servo_write(pin.as_str(), value.as_str())?.await?;
            println!("ok");
        }
        Command::DigitalRead { pin } => {
            println!("{}", board.digital_read_async(pin.as_str())?.await?);
        }
        Command::AnalogRead { pin } => {
            println!("{}", board.analog_read_async(pin.as_str())?.await?);
        }
        Command::Mode { pin, mode } => {
            board.pin_mode(pin.as_str(), mode)?;
            println!("{pin} supports {mode}");
        }
        Command::Pins => unreachable!("handled above"),
    }

    Ok(())
}
