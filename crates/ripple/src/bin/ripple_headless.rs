//! # RIPPLE Headless Runner
//!
//! Runs a ripple session on a simulated clock and prints surface
//! statistics. No window, no GPU.
//!
//! ```bash
//! ripple_headless --ticks 1000 --seed 42
//! ripple_headless --config ripple.toml --dimension 120
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ripple::core::{RippleConfig, RippleResult};
use ripple::RippleSession;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate.
    #[arg(short, long, default_value_t = 500)]
    ticks: u64,

    /// Seed override.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid dimension override.
    #[arg(short, long)]
    dimension: Option<usize>,

    /// Print statistics every N ticks (0 = only at the end).
    #[arg(short, long, default_value_t = 100)]
    report_every: u64,
}

fn load_config(args: &Args) -> RippleResult<RippleConfig> {
    let mut config = match &args.config {
        Some(path) => RippleConfig::from_file(path)?,
        None => RippleConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(dimension) = args.dimension {
        config.grid.dimension = dimension;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> RippleResult<()> {
    let config = load_config(args)?;
    let mut session = RippleSession::new(&config)?;

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    RIPPLE HEADLESS v{}", env!("CARGO_PKG_VERSION"));
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Grid:      {0} x {0}", config.grid.dimension);
    println!("  Tick:      {} ms", session.scheduler().tick_period_ms());
    println!("  Raindrops: every {:.2} ms", session.scheduler().mean_period_ms());
    println!(
        "  Splash:    {} ± {} (width {})",
        config.splash.base_peak, config.splash.delta, config.splash.width
    );
    println!("  Seed:      {}", session.seed().value());
    println!();

    let period = session.scheduler().tick_period_ms();
    let mut now_ms = 0.0;
    let mut drops = 0u64;
    session.start(now_ms);

    while session.field().step_count() < args.ticks {
        now_ms += period + 1.0;
        if let Some(report) = session.advance(now_ms)? {
            drops += u64::from(report.drops);
            if args.report_every > 0 && report.step % args.report_every == 0 {
                let stats = session.surface_stats();
                println!(
                    "  tick {:>6}  min {:>9.3}  max {:>9.3}  energy {:>12.3}",
                    report.step, stats.min, stats.max, stats.energy
                );
            }
        }
    }

    let stats = session.surface_stats();
    println!();
    println!("  Ticks:     {}", session.field().step_count());
    println!("  Drops:     {drops}");
    println!("  Amplitude: {:.4}", stats.amplitude());
    println!("  Mean:      {:.6}", stats.mean);
    println!("  Energy:    {:.4}", stats.energy);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
