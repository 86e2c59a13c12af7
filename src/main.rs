#[macro_use]
extern crate log;
extern crate log4rs;

#[macro_use]
extern crate serde_derive;

mod config;
mod dto;
mod error;
mod handler;
mod middleware;
mod page;
mod relay;
mod server;
mod state;

use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use page::PanelLayout;
use relay::HttpRelay;
use server::{panel_chain, PanelServer, WebServer};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

/// Web control panel for the ESP32 compressor rig.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML settings file; defaults apply when it does not exist
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// log4rs YAML file; logs to the console when it does not exist
    #[arg(long, default_value = "logging.yml")]
    logging: PathBuf,

    /// Overrides http.listen_address
    #[arg(long)]
    listen: Option<String>,

    /// Overrides esp32.address
    #[arg(long)]
    esp32: Option<String>,
}

fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    if path.exists() {
        log4rs::init_file(path, Default::default())?;
    } else {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{d} {h({l})} {t} - {m}{n}")))
            .build();
        let config = Config::builder()
            .appender(Appender::builder().build("stdout", Box::new(stdout)))
            .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
        log4rs::init_config(config)?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    init_logging(&args.logging)?;
    info!("Loading configuration");

    let mut settings = config::load(&args.config)?;
    if let Some(listen) = args.listen {
        settings.http.listen_address = listen;
    }
    if let Some(esp32) = args.esp32 {
        settings.esp32.address = esp32;
    }
    settings.validate()?;

    let relay = HttpRelay::new(&settings.esp32.address, settings.relay.timeout());
    match settings.relay.timeout() {
        Some(timeout) => info!(
            "Relaying commands to {} (timeout {:?})",
            relay.endpoint(),
            timeout
        ),
        None => info!("Relaying commands to {} (no timeout)", relay.endpoint()),
    }

    let layout = PanelLayout::new(&settings.panel.title, settings.panel.compressors.clone());
    let chain = panel_chain(layout, relay, settings.http.max_body_length);

    info!("Starting compressor panel");
    let srv = PanelServer::new(settings.listen_address()?, chain);
    // Dropping the listener joins the server threads.
    let _listening = srv.listen()?;
    Ok(())
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        error!("{}", e);
        eprintln!("compressor-panel: {}", e);
        process::exit(1);
    }
}
