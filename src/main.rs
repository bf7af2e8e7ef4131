use clap::Parser;
use glam::Vec2;
use instant::Instant;

use laggard::{AgentSnapshot, Engine, SimConfig};

/// Headless delayed-perception boids run.
#[derive(Parser, Debug)]
#[command(name = "laggard")]
#[command(version)]
#[command(about = "Boids flocking with perception delay")]
struct Cli {
    /// Perception delay in ticks
    #[arg(long, default_value_t = 1)]
    delay: u32,

    /// Arena width
    #[arg(long, default_value_t = 1024.0)]
    width: f32,

    /// Arena height
    #[arg(long, default_value_t = 768.0)]
    height: f32,

    /// Number of boids
    #[arg(long, default_value_t = 100)]
    num_boids: usize,

    /// Visual range (also the spatial hash cell size)
    #[arg(long, default_value_t = 75.0)]
    vis_range: f32,

    /// Ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// RNG seed for initial placement
    #[arg(long)]
    seed: Option<u64>,

    /// Log flock statistics every N ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("laggard starting up");

    if let Err(e) = run(Cli::parse()) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = Engine::new(SimConfig {
        width: cli.width,
        height: cli.height,
        delay: cli.delay,
        visual_range: cli.vis_range,
        agent_count: cli.num_boids,
        seed: cli.seed,
        ..SimConfig::default()
    })?;

    let started = Instant::now();
    let mut snapshot = Vec::with_capacity(engine.agent_count());
    for _ in 0..cli.ticks {
        engine.step();
        if cli.report_every > 0 && engine.tick_count() % cli.report_every == 0 {
            engine.snapshot_into(&mut snapshot);
            report(&engine, &snapshot);
        }
    }

    let elapsed = started.elapsed().as_secs_f64();
    let tps = if elapsed > 0.0 {
        cli.ticks as f64 / elapsed
    } else {
        0.0
    };
    log::info!(
        "Finished {} ticks in {:.2}s ({:.0} ticks/s)",
        engine.tick_count(),
        elapsed,
        tps,
    );
    Ok(())
}

fn report(engine: &Engine, snapshot: &[AgentSnapshot]) {
    if snapshot.is_empty() {
        log::info!("tick {} | no boids", engine.tick_count());
        return;
    }
    let n = snapshot.len() as f32;
    let centroid = snapshot.iter().map(|b| b.position).sum::<Vec2>() / n;
    let mean_speed = snapshot.iter().map(|b| b.velocity.length()).sum::<f32>() / n;
    // Mean heading agreement: 1.0 when every boid flies the same way.
    let polarization = snapshot
        .iter()
        .map(|b| b.velocity.normalize_or_zero())
        .sum::<Vec2>()
        .length()
        / n;
    log::info!(
        "tick {} | delay {} | centroid ({:.1}, {:.1}) | speed {:.2} | polarization {:.3} | tick {}",
        engine.tick_count(),
        engine.delay(),
        centroid.x,
        centroid.y,
        mean_speed,
        polarization,
        engine.tick_stats(),
    );
}
