//! SHT4x command-line reader
//!
//! Takes one or more readings from an SHT4x on a Linux I2C bus and prints
//! the average or the full list.
//!
//! ## Usage
//!
//! ```bash
//! # One high-precision reading from 0x44 on /dev/i2c-1
//! sht4x
//!
//! # Five readings in Fahrenheit, one second apart, listed individually
//! sht4x --unit F --readings 5 --readings-delay 1.0 --readings-return list
//!
//! # Alternate address, 110 mW / 0.1 s heater pulse before measuring
//! sht4x --addr 0x45 --mode 7
//! ```
//!
//! ## Options
//!
//! - `--bus <n>` - I2C bus number, as in `/dev/i2c-<n>` (default: 1)
//! - `--addr <addr>` - device address, decimal or `0x` hex (default: 0x44)
//! - `--mode <1-9>` - operating mode (default: 1)
//! - `--unit <C|F|K>` - temperature unit (default: C)
//! - `--bus-delay <secs>` - base delay around each transaction (default: 0.05)
//! - `--readings <n>` - number of readings (default: 1)
//! - `--readings-delay <secs>` - pause between readings (default: 1.0)
//! - `--readings-return <average|list>` - output form (default: average)
//!
//! Set `RUST_LOG=debug` to see the bus traffic.

use linux_embedded_hal::Delay;
use sht4x::common::hal_traits::NativeDelay;
use sht4x::common::LinuxBus;
use sht4x::config::{delay_from_secs, interval_from_secs};
use sht4x::{Aggregation, ReadingPlan, Readings, SessionConfig, Sht4xSession};
use std::error::Error;
use std::str::FromStr;

/// Capacity of the reading buffer.
const MAX_READINGS: usize = 1024;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }
    if let Some(unknown) = args.iter().step_by(2).find(|a| !KNOWN_FLAGS.contains(&a.as_str())) {
        eprintln!("Error: unknown option '{}'", unknown);
        print_help();
        return Err("invalid arguments".into());
    }

    let defaults = SessionConfig::default();
    let config = SessionConfig {
        bus: parse_flag(&args, "--bus")?.unwrap_or(defaults.bus),
        address: parse_flag(&args, "--addr")?.unwrap_or(defaults.address),
        mode: parse_flag(&args, "--mode")?.unwrap_or(defaults.mode),
        unit: parse_flag(&args, "--unit")?.unwrap_or(defaults.unit),
        bus_delay: match parse_flag::<f32>(&args, "--bus-delay")? {
            Some(secs) => delay_from_secs(secs)?,
            None => defaults.bus_delay,
        },
    };

    let plan_defaults = ReadingPlan::default();
    let plan = ReadingPlan {
        count: parse_flag(&args, "--readings")?.unwrap_or(plan_defaults.count),
        interval: match parse_flag::<f32>(&args, "--readings-delay")? {
            Some(secs) => interval_from_secs(secs)?,
            None => plan_defaults.interval,
        },
        aggregation: parse_flag(&args, "--readings-return")?.unwrap_or(plan_defaults.aggregation),
    };

    let bus = LinuxBus::new(config.bus);
    log::debug!("using {} at {}", bus.path(), config.address);
    let mut session = Sht4xSession::new(bus, NativeDelay(Delay), config)?;
    let readings: Readings<MAX_READINGS> = session.take_readings(&plan)?;

    let symbol = session.unit().symbol();
    match plan.aggregation {
        Aggregation::Average => {
            if let Some(avg) = readings.average() {
                println!("Temperature: {:.2}, Humidity: {:.2}%", avg.temperature, avg.humidity);
            }
        }
        Aggregation::List => {
            let temps: Vec<String> = readings
                .iter()
                .map(|m| format!("{:.2}", m.temperature.value))
                .collect();
            let humidities: Vec<String> = readings
                .iter()
                .map(|m| format!("{:.2}", m.humidity))
                .collect();
            println!("Temperature: [{}]{}", temps.join(", "), symbol);
            println!("Humidity: [{}]%", humidities.join(", "));
        }
    }

    Ok(())
}

const KNOWN_FLAGS: [&str; 8] = [
    "--bus",
    "--addr",
    "--mode",
    "--unit",
    "--bus-delay",
    "--readings",
    "--readings-delay",
    "--readings-return",
];

/// Parses the value following `name`, if the flag is present.
fn parse_flag<V>(args: &[String], name: &str) -> Result<Option<V>, Box<dyn Error>>
where
    V: FromStr,
    V::Err: Error + 'static,
{
    let Some(idx) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    let raw = args
        .get(idx + 1)
        .ok_or_else(|| format!("missing value for {}", name))?;
    raw.parse::<V>()
        .map(Some)
        .map_err(|e| format!("{} {}: {}", name, raw, e).into())
}

fn print_help() {
    println!("Usage: sht4x [OPTIONS]");
    println!();
    println!("  --bus <n>                         I2C bus number (default: 1)");
    println!("  --addr <addr>                     device address, e.g. 0x44 (default: 0x44)");
    println!("  --mode <1-9>                      operating mode (default: 1)");
    println!("  --unit <C|F|K>                    temperature unit (default: C)");
    println!("  --bus-delay <secs>                delay around each transaction (default: 0.05)");
    println!("  --readings <n>                    number of readings (default: 1)");
    println!("  --readings-delay <secs>           pause between readings (default: 1.0)");
    println!("  --readings-return <average|list>  output form (default: average)");
}
