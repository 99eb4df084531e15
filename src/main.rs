use automata::config::{LifeConfig, PrintConfig};
use automata::engine::patterns::PATTERNS;
use automata::settings::{LifeSettings, Settings};
use automata::viz;
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;

#[derive(Parser)]
#[command(name = "automata")]
#[command(author = "Terminal Art Generator")]
#[command(version = "0.1.0")]
#[command(about = "Conway's Game of Life in the terminal, with fading trails", long_about = None)]
struct Cli {
    /// Append logs to this file (the interactive mode owns the terminal)
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive simulation
    Run {
        /// Seconds per generation
        #[arg(short, long)]
        time: Option<f32>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Stamp this pattern at the centre instead of a random soup
        #[arg(short, long)]
        pattern: Option<String>,

        /// Character used to draw cells
        #[arg(short, long)]
        char: Option<char>,

        /// Generations between random life injections (0 = off)
        #[arg(short, long)]
        inject: Option<u64>,

        /// Directory for Ctrl-S screenshots
        #[arg(long)]
        screenshot_dir: Option<PathBuf>,
    },

    /// Simulate without a display and print the final frame
    Print {
        /// Grid width in cells
        #[arg(short = 'W', long, default_value = "64")]
        width: u16,

        /// Grid height in cells
        #[arg(short = 'H', long, default_value = "24")]
        height: u16,

        /// Generations to simulate
        #[arg(short, long, default_value = "100")]
        generations: u64,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Stamp this pattern at the centre instead of a random soup
        #[arg(short, long)]
        pattern: Option<String>,

        /// Character used to draw cells
        #[arg(short, long, default_value = "#")]
        char: char,
    },

    /// List the built-in patterns
    Patterns,
}

fn init_logging(path: Option<&Path>, verbose: bool) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Run {
            time,
            seed,
            pattern,
            char: draw_char,
            inject,
            screenshot_dir,
        } => {
            let overrides = LifeSettings {
                time_step: time,
                seed,
                pattern,
                draw_char,
                inject_interval: inject,
                screenshot_dir,
            };
            let config = LifeConfig::resolve(overrides, Settings::load().life);
            viz::run(&config)?;
        }
        Commands::Print {
            width,
            height,
            generations,
            seed,
            pattern,
            char: draw_char,
        } => {
            let config = PrintConfig {
                width,
                height,
                generations,
                seed,
                pattern,
                draw_char,
            };
            viz::print(&config)?;
        }
        Commands::Patterns => {
            for pattern in PATTERNS {
                let (w, h) = pattern.size();
                println!("{:<20} {:>3}x{:<3} {}", pattern.name, w, h, pattern.family.label());
            }
        }
    }

    Ok(())
}
