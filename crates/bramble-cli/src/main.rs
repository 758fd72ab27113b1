//! bramble - launcher for platform applications
//!
//! ```text
//! bramble [--help] [--clean] [--application=<id>] [--consolelog]
//!         [--testplugin=<id>] [--testapplication=<id>] [args...]
//! ```
//!
//! Initializes the process-wide platform, runs the selected application and
//! exits with its code.

use anyhow::Context;
use bramble_platform::{InitOutcome, Platform};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let code = run(Platform::global(), &args)?;
    std::process::exit(code);
}

fn run(platform: &Platform, args: &[String]) -> anyhow::Result<i32> {
    match platform
        .initialize(args, None)
        .context("failed to initialize the platform")?
    {
        InitOutcome::HelpRequested(text) => {
            println!("{text}");
            return Ok(bramble_platform::EXIT_OK);
        }
        InitOutcome::AlreadyInitialized => {
            tracing::debug!("platform was already initialized");
        }
        InitOutcome::Initialized => {}
    }

    let launched = platform.launch().context("failed to launch the platform");
    if let Err(e) = platform.shutdown() {
        tracing::warn!(error = %e, "platform shutdown incomplete");
    }
    launched
}
