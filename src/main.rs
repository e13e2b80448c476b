//! Blink decoder application: turns eye closures into Morse text or actuator commands.

use anyhow::{Context, Result};
use blink_morse::{
    app::BlinkApp,
    command::CommandSink,
    config::{Config, EXAMPLE_CONFIG},
    landmarks::ReplayProvider,
    transport::{LogCommandSink, UdpCommandSink},
};
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded landmark frames (JSON Lines) to decode
    #[arg(short, long, required_unless_present = "print_config")]
    replay: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Actuator address (overrides the configuration file)
    #[arg(short, long)]
    address: Option<String>,

    /// Actuator UDP port (overrides the configuration file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log commands instead of sending them
    #[arg(long)]
    dry_run: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Blink Morse Decoder");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(address) = args.address {
        config.transport.address = address;
    }
    if let Some(port) = args.port {
        config.transport.port = port;
    }
    if args.dry_run {
        config.transport.enabled = false;
    }
    config.validate().context("Invalid configuration")?;

    let replay_path = args.replay.context("No landmark source given")?;
    let provider = ReplayProvider::open(&replay_path, config.eye_indices())
        .with_context(|| format!("Failed to open landmark recording {replay_path}"))?;

    let sink: Box<dyn CommandSink> = if config.transport.enabled {
        Box::new(
            UdpCommandSink::new(&config.transport.address, config.transport.port)
                .with_context(|| format!("Failed to set up transport to {}", config.endpoint()))?,
        )
    } else {
        info!("Dry run: commands will only be logged");
        Box::new(LogCommandSink::new())
    };

    // Create and run application
    let mut app = BlinkApp::new(&config, Box::new(provider), sink)?;
    let summary = app.run()?;

    println!("Typed word: {}", summary.output_word);
    Ok(())
}
