use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use iocraft::prelude::*;

use flowhub::app::App;
use flowhub::color::ColorDepth;
use flowhub::config::loader;
use flowhub::engine::{Engine, FixtureEngine};
use flowhub::theme::{Background, ResolvedTheme};

#[derive(Parser)]
#[command(name = "flowhub", version, about = "GitHub PR search board")]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a JSON board fixture (overrides the config entry).
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Enable debug logging to debug.log.
    #[arg(long)]
    debug: bool,
}

/// Panics inside the fullscreen TUI never reach a visible stderr, so mirror
/// them to a file as well.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("{info}\n\n{backtrace}");
        let _ = std::fs::write("panic.log", &msg);
        eprintln!("{msg}");
    }));
}

fn init_tracing() -> Result<()> {
    let file = std::fs::File::create("debug.log")?;
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    install_panic_hook();

    let cli = Cli::parse();
    if cli.debug {
        init_tracing()?;
    }

    let config = loader::load_config(cli.config.as_deref())?;

    // Detect terminal capabilities.
    let color_depth = ColorDepth::detect();
    let theme = ResolvedTheme::resolve(&config.theme, Background::detect());

    // The board engine runs in a dedicated OS thread with its own Tokio
    // runtime. Dropping `engine_handle` at the end of `main` closes the
    // request channel, signalling it to shut down.
    let fixture_path = cli.fixture.clone().or_else(|| config.fixture.clone());
    let engine = match fixture_path {
        Some(ref path) => FixtureEngine::from_json_file(path)?,
        None => FixtureEngine::demo(),
    };
    let engine_handle = engine.start();

    tracing::info!("flowhub starting");

    // Enter fullscreen TUI (iocraft uses smol internally).
    smol::block_on(
        element! {
            App(
                config: &config,
                engine: &engine_handle,
                theme: &theme,
                color_depth,
            )
        }
        .fullscreen(),
    )?;

    Ok(())
}
