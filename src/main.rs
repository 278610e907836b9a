use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use city_sim::simulation::{SimConfig, SimWorld, StepOutcome};

#[derive(Parser)]
#[command(name = "city_sim")]
#[command(about = "Procedural city growth simulation (headless)")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value_t = city_sim_defaults().width)]
    width: i32,

    /// Grid height in cells
    #[arg(long, default_value_t = city_sim_defaults().height)]
    height: i32,

    /// Pixels per cell, passed through for renderers
    #[arg(long, default_value_t = city_sim_defaults().cell_size)]
    cell_size: u32,

    /// Delay between steps in milliseconds when running in real time
    #[arg(long, default_value_t = city_sim_defaults().tick_interval_ms)]
    tick_interval_ms: u64,

    /// Branch roads laid off the arterials at startup
    #[arg(long, default_value_t = city_sim_defaults().initial_roads)]
    initial_roads: u32,

    /// Cars placed on the roads at startup
    #[arg(long, default_value_t = city_sim_defaults().initial_cars)]
    initial_cars: u32,

    /// Hard cap on simulation steps
    #[arg(long, default_value_t = city_sim_defaults().max_steps)]
    max_steps: u64,

    /// Number of steps to run in this session
    #[arg(long, default_value = "300")]
    ticks: u64,

    /// Print a summary and map every this many steps (0 disables)
    #[arg(long, default_value = "100")]
    report_every: u64,

    /// Seed for a reproducible city
    #[arg(long)]
    seed: Option<u64>,

    /// Sleep for the tick interval between steps
    #[arg(long)]
    realtime: bool,
}

fn city_sim_defaults() -> SimConfig {
    SimConfig::default()
}

impl Cli {
    fn config(&self) -> SimConfig {
        SimConfig {
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
            tick_interval_ms: self.tick_interval_ms,
            initial_roads: self.initial_roads,
            initial_cars: self.initial_cars,
            max_steps: self.max_steps,
            seed: self.seed,
            ..SimConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut world = SimWorld::new(cli.config()).context("failed to build the city")?;
    run_headless(&mut world, cli.ticks, cli.report_every, cli.realtime);
    Ok(())
}

/// Run the simulation without graphics
fn run_headless(world: &mut SimWorld, ticks: u64, report_every: u64, realtime: bool) {
    let interval = Duration::from_millis(world.config().tick_interval_ms);
    info!(
        "running {} steps (cap {}), tick interval {:?}",
        ticks,
        world.config().max_steps,
        interval
    );

    println!("Initial state:");
    world.print_summary();
    world.draw_map();

    for _ in 0..ticks {
        match world.step() {
            StepOutcome::Advanced { step, .. } => {
                if report_every > 0 && (step + 1) % report_every == 0 {
                    println!("--- After step {} ---", step + 1);
                    world.print_summary();
                    world.draw_map();
                }
            }
            StepOutcome::Halted => {
                info!("step cap of {} reached", world.config().max_steps);
                break;
            }
        }
        if realtime {
            std::thread::sleep(interval);
        }
    }

    println!("=== Final State ===");
    world.print_summary();
    world.draw_map();
    world.stats().log_summary();
}
