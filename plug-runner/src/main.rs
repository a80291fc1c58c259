//! plug chaincode runner
//!
//! Runs a single transaction against a JSON world-state file:
//!
//!   plug-runner --chaincode plug --client-id alice CreateTag '{"name":"rust"}'
//!
//! The result is printed to stdout as JSON. Logs go to stderr.

use anyhow::Result;
use clap::Parser;
use plug_runner::{Args, run};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let (config, invocation) = args.into_parts();
    if let Some(ccid) = &config.ccid {
        info!("Chaincode id: {}", ccid);
    }
    if let Some(address) = &config.address {
        info!("Chaincode server address: {} (not served by the runner)", address);
    }

    let outcome = run(&config, &invocation)?;

    if let Some(event) = &outcome.event {
        info!(
            "Event {}: {}",
            event.name,
            String::from_utf8_lossy(&event.payload)
        );
    }
    if let Some(result) = &outcome.result {
        println!("{}", serde_json::to_string_pretty(result)?);
    }
    Ok(())
}
