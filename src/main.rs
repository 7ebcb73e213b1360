mod app;
mod colors;
mod config;
mod error;
mod fire;
mod help;
mod input;
mod settings;
mod terminal;
mod ui;

use clap::Parser;
use colors::ColorScheme;
use config::{FireConfig, Overrides};
use settings::Settings;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use terminal::Terminal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asciifire")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Interactive ASCII fire: heat diffusion, wind and sparks in your terminal", long_about = None)]
struct Cli {
    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Target frames per second (1-120)
    #[arg(short, long)]
    fps: Option<u32>,

    /// Initial color scheme: classic, blue, ice, plasma, rainbow, matrix
    #[arg(short = 'c', long, value_parser = parse_scheme)]
    scheme: Option<ColorScheme>,

    /// Initial fuel level (0-100)
    #[arg(short = 'F', long)]
    fuel: Option<i32>,

    /// Skip the splash screen
    #[arg(long)]
    no_splash: bool,

    /// Do not capture the mouse (disables click-to-ignite)
    #[arg(long)]
    no_mouse: bool,
}

fn parse_scheme(name: &str) -> Result<ColorScheme, String> {
    ColorScheme::from_name(name).ok_or_else(|| {
        format!("unknown scheme '{}'. Available: classic, blue, ice, plasma, rainbow, matrix", name)
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load();
    let config = FireConfig::resolve(
        Overrides {
            seed: cli.seed,
            fps: cli.fps,
            scheme: cli.scheme,
            fuel: cli.fuel,
            no_splash: cli.no_splash,
            no_mouse: cli.no_mouse,
        },
        &settings.fire,
    );
    info!(?config, "starting");

    // Restore the screen before the panic message is printed
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        terminal::restore_best_effort();
        default_hook(panic_info);
    }));

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        warn!(error = %e, "failed to install interrupt handler");
    }

    match run(&config, &shutdown) {
        Ok(frames) => {
            info!(frames, "shutdown");
            println!("Fire extinguished! Thanks for playing!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "fatal");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &FireConfig, shutdown: &AtomicBool) -> error::Result<u64> {
    let (width, height) = terminal::check_environment()?;
    info!(width, height, "terminal ok");

    // Dropped before the exit message so the primary screen is back
    let mut term = Terminal::new(config.mouse)?;
    let frames = app::run(&mut term, config, shutdown)?;
    Ok(frames)
}
