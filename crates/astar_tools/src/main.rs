//! A* planner command-line tools.
//!
//! # Usage
//!
//! ```bash
//! # Generate 50 connected 101x101 grids into ./gridworld
//! cargo run -p astar_tools -- generate --count 50 --output gridworld
//!
//! # Solve one grid with full knowledge and draw the path
//! cargo run -p astar_tools -- solve --grid gridworld/1.txt --render
//!
//! # Repeated A* with obstacle discovery, searching from the goal
//! cargo run -p astar_tools -- repeat --grid gridworld/1.txt --direction backward --render
//!
//! # Compare forward and backward over a whole directory
//! cargo run -p astar_tools -- batch --input gridworld --output results/batch.json
//! ```
//!
//! Results go to stdout; logs go to stderr.

use std::path::{Path as FsPath, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use astar_core::generation::generate_batch;
use astar_core::prelude::*;
use astar_tools::{
    batch::{run_batch, BatchConfig},
    config::load_ron,
    error::Result,
    gridworld::{load_grid, load_gridworld, save_gridworld},
    render::{render_ascii, AsciiConfig, Overlay},
};

#[derive(Parser)]
#[command(name = "astar-tools")]
#[command(about = "A* and repeated A* planning on occupancy grids")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate connected random grids
    Generate {
        /// Number of grids
        #[arg(short, long, default_value = "50")]
        count: usize,

        /// Cells per grid row
        #[arg(long, default_value = "101")]
        width: u32,

        /// Cells per grid column
        #[arg(long, default_value = "101")]
        height: u32,

        /// Chance that a cell is blocked
        #[arg(short, long, default_value = "0.3")]
        probability: f64,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output directory
        #[arg(short, long, default_value = "gridworld")]
        output: PathBuf,
    },

    /// Run one A* search on a fully known grid
    Solve {
        /// Grid file
        #[arg(short, long)]
        grid: PathBuf,

        /// Start cell as x,y (default: 0,0)
        #[arg(long, value_parser = parse_coord)]
        from: Option<Coord>,

        /// Goal cell as x,y (default: far corner)
        #[arg(long, value_parser = parse_coord)]
        to: Option<Coord>,

        /// Preference among equal-f cells
        #[arg(long, value_enum, default_value = "greater")]
        tie_break: TieBreakArg,

        /// Draw the grid and path
        #[arg(long)]
        render: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run repeated A* with obstacle discovery
    Repeat {
        /// Grid file
        #[arg(short, long)]
        grid: PathBuf,

        /// Origin cell as x,y (default: 0,0)
        #[arg(long, value_parser = parse_coord)]
        from: Option<Coord>,

        /// Destination cell as x,y (default: far corner)
        #[arg(long, value_parser = parse_coord)]
        to: Option<Coord>,

        /// Search direction, overrides the config file
        #[arg(short, long, value_enum)]
        direction: Option<DirectionArg>,

        /// Planner config file (RON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Draw the grid, trajectory and discovered cells
        #[arg(long)]
        render: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare forward and backward repeated A* over a gridworld directory
    Batch {
        /// Directory of numbered grid files
        #[arg(short, long, default_value = "gridworld")]
        input: PathBuf,

        /// Planner config file (RON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write results JSON here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worker threads (0 = auto)
        #[arg(short, long, default_value = "0")]
        parallel: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieBreakArg {
    Greater,
    Lesser,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Greater => Self::GreaterG,
            TieBreakArg::Lesser => Self::LesserG,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    Forward,
    Backward,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Forward => Self::Forward,
            DirectionArg::Backward => Self::Backward,
        }
    }
}

/// Parse `x,y` into a coordinate.
fn parse_coord(text: &str) -> std::result::Result<Coord, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {text:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|e| format!("bad coordinate {part:?}: {e}"))
    };
    Ok(Coord::new(parse(x)?, parse(y)?))
}

/// JSON report for a single search.
#[derive(Serialize)]
struct SolveReport {
    start: Coord,
    goal: Coord,
    tie_break: TieBreak,
    path: Option<Path>,
    stats: SearchStats,
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins unless --verbose asks for everything
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = match cli.command {
        Commands::Generate {
            count,
            width,
            height,
            probability,
            seed,
            output,
        } => cmd_generate(count, width, height, probability, seed, &output),
        Commands::Solve {
            grid,
            from,
            to,
            tie_break,
            render,
            json,
        } => cmd_solve(&grid, from, to, tie_break.into(), render, json),
        Commands::Repeat {
            grid,
            from,
            to,
            direction,
            config,
            render,
            json,
        } => cmd_repeat(&grid, from, to, direction, config.as_deref(), render, json),
        Commands::Batch {
            input,
            config,
            output,
            parallel,
        } => cmd_batch(&input, config.as_deref(), output.as_deref(), parallel),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn cmd_generate(
    count: usize,
    width: u32,
    height: u32,
    probability: f64,
    seed: u64,
    output: &FsPath,
) -> Result<()> {
    let config = GenerationConfig::default()
        .with_size(width, height)
        .with_obstacle_probability(probability)
        .with_seed(seed);
    tracing::info!("Generating {count} grids of {width}x{height} (p = {probability}, seed = {seed})");

    let grids = generate_batch(&config, count)?;
    let written = save_gridworld(output, &grids)?;
    tracing::info!("Saved {} grids to {}", written.len(), output.display());
    Ok(())
}

fn cmd_solve(
    grid_path: &FsPath,
    from: Option<Coord>,
    to: Option<Coord>,
    tie_break: TieBreak,
    render: bool,
    json: bool,
) -> Result<()> {
    let grid = load_grid(grid_path)?;
    let start = from.unwrap_or_else(|| grid.origin());
    let goal = to.unwrap_or_else(|| grid.far_corner());

    let mut solver = AStar::new(tie_break);
    let outcome = solver.search(&grid, start, goal)?;

    if json {
        let report = SolveReport {
            start,
            goal,
            tie_break,
            path: outcome.path.clone(),
            stats: outcome.stats,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &outcome.path {
            Some(path) => println!(
                "path {start} -> {goal}: {} moves, {} expansions",
                path.moves(),
                outcome.stats.expansions
            ),
            None => println!(
                "no path {start} -> {goal} ({} expansions)",
                outcome.stats.expansions
            ),
        }
    }

    if render {
        let mut overlay = Overlay::new();
        if let Some(path) = &outcome.path {
            overlay = overlay.with_path(path);
        }
        let overlay = overlay.with_endpoints(start, goal);
        print!("{}", render_ascii(&grid, &overlay, &AsciiConfig::default()));
    }
    Ok(())
}

fn cmd_repeat(
    grid_path: &FsPath,
    from: Option<Coord>,
    to: Option<Coord>,
    direction: Option<DirectionArg>,
    config_path: Option<&FsPath>,
    render: bool,
    json: bool,
) -> Result<()> {
    let grid = load_grid(grid_path)?;
    let origin = from.unwrap_or_else(|| grid.origin());
    let destination = to.unwrap_or_else(|| grid.far_corner());

    let mut config: PlannerConfig = match config_path {
        Some(path) => load_ron(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(direction) = direction {
        config = config.with_direction(direction.into());
    }

    let outcome = RepeatedPlanner::new(config).execute(&grid, origin, destination)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!(
            "{:?}: {:?} after {} episodes, {} moves walked, {} obstacles discovered, {} expansions",
            outcome.direction,
            outcome.state,
            outcome.episodes,
            outcome.trajectory.moves(),
            outcome.discovered.len(),
            outcome.stats.expansions
        );
    }

    if render {
        let (start, goal) = outcome.direction.endpoints(origin, destination);
        let overlay = Overlay::new()
            .with_discovered(&outcome.discovered)
            .with_path(&outcome.trajectory)
            .with_endpoints(start, goal);
        print!("{}", render_ascii(&grid, &overlay, &AsciiConfig::default()));
    }
    Ok(())
}

fn cmd_batch(
    input: &FsPath,
    config_path: Option<&FsPath>,
    output: Option<&FsPath>,
    parallel: usize,
) -> Result<()> {
    let planner: PlannerConfig = match config_path {
        Some(path) => load_ron(path)?,
        None => PlannerConfig::default(),
    };
    let grids = load_gridworld(input)?;
    tracing::info!("Loaded {} grids from {}", grids.len(), input.display());

    let config = BatchConfig::default()
        .with_planner(planner)
        .with_parallel(parallel);
    let results = run_batch(&grids, config)?;

    let summary = &results.summary;
    println!("grids: {}", summary.grids);
    for (name, totals) in [("forward", &summary.forward), ("backward", &summary.backward)] {
        println!(
            "{name:>8}: {:.4}s total, {} reached, {} episodes, {} expansions",
            totals.seconds, totals.reached, totals.episodes, totals.expansions
        );
    }
    for error in &results.errors {
        tracing::warn!("grid {} failed: {}", error.index, error.message);
    }

    if let Some(path) = output {
        results.save(path)?;
        tracing::info!("Results saved to {}", path.display());
    }
    Ok(())
}
