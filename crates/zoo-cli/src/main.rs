//! Zoo drone CLI - feeding-route planner.
//!
//! Single binary that provides:
//! - `zoo-drone run` - plan one route per diet and write the chosen paths
//! - `zoo-drone inspect` - show what was loaded from a zoo file
//! - `zoo-drone init` - write a default configuration file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use zoo_kernel::{
    config::DEFAULT_CONFIG_FILE, observability::EventEmitter, render_summary, write_paths,
    PlannerConfig, Retention, RunSummary, TrialRunner, Variant, ZooLoader,
};
use zoo_route::Diet;

#[derive(Parser)]
#[command(name = "zoo-drone")]
#[command(about = "Zoo drone feeding-route planner", version)]
struct Cli {
    /// Configuration file (defaults to ./zoo-drone.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan one route per diet and write the retained paths
    Run {
        /// Zoo description file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the paths
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Planning variant (baseline or extended)
        #[arg(long)]
        variant: Option<Variant>,

        /// Keep the best route or all of them
        #[arg(long)]
        retain: Option<Retention>,

        /// Drop malformed input records instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Show the contents of a zoo file
    Inspect {
        /// Zoo description file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Drop malformed input records instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Some(Commands::Run {
            input,
            output,
            variant,
            retain,
            lenient,
        }) => {
            let mut config = load_config(cli.config.as_deref(), variant)?;
            if let Some(input) = input {
                config.input = input;
            }
            if let Some(output) = output {
                config.output = Some(output);
            }
            if retain.is_some() {
                config.retention = retain;
            }
            if lenient {
                config.strict_parsing = false;
            }
            run_planner(&config)
        }
        Some(Commands::Inspect { input, lenient }) => {
            let mut config = load_config(cli.config.as_deref(), None)?;
            if let Some(input) = input {
                config.input = input;
            }
            if lenient {
                config.strict_parsing = false;
            }
            inspect_zoo(&config)
        }
        Some(Commands::Init { force }) => init_config(cli.config.as_deref(), force),
        None => {
            println!("Zoo Drone - Feeding Route Planner");
            println!();
            println!("Usage: zoo-drone <COMMAND>");
            println!();
            println!("Commands:");
            println!("  run       Plan routes and write the retained paths");
            println!("  inspect   Show the contents of a zoo file");
            println!("  init      Write a default configuration file");
            println!();
            println!("Run 'zoo-drone --help' for more information.");
            Ok(())
        }
    }
}

/// Load the config file and resolve its paths against the file's directory.
fn load_config(path: Option<&Path>, variant: Option<Variant>) -> Result<PlannerConfig> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let (mut config, base) = match path {
        Some(path) => {
            let base = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            (PlannerConfig::load(path)?, base)
        }
        None => (PlannerConfig::load_from_dir(&cwd)?, cwd),
    };

    // The variant picks the default output name, so apply it before resolving.
    if let Some(variant) = variant {
        config.variant = variant;
    }
    config.resolve_paths(&base);
    Ok(config)
}

fn run_planner(config: &PlannerConfig) -> Result<()> {
    tracing::info!(
        input = %config.input.display(),
        variant = %config.variant,
        retention = %config.retention(),
        "Starting run"
    );

    let events = config.events_path.as_deref().map(EventEmitter::new);
    if let Some(events) = &events {
        events.emit_simple(
            "run_start",
            &format!("Planning {} ({})", config.input.display(), config.variant),
        )?;
    }

    let zoo = ZooLoader::new(config.strict_parsing)
        .load(&config.input)
        .with_context(|| format!("Failed to load zoo from {}", config.input.display()))?;
    let summary = TrialRunner::from_config(config).run(&zoo)?;

    if let Some(events) = &events {
        for trial in &summary.trials {
            events.emit_trial(trial)?;
        }
    }

    let paths = summary.paths();
    let output = config.output_path();
    write_paths(&output, &paths)?;

    print_summary(&summary)?;

    if let Some(events) = &events {
        events.emit_simple(
            "run_finished",
            &format!("Wrote {} path(s) to {}", paths.len(), output.display()),
        )?;
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) -> Result<()> {
    print!("{}", render_summary(summary)?);
    Ok(())
}

fn inspect_zoo(config: &PlannerConfig) -> Result<()> {
    let zoo = ZooLoader::new(config.strict_parsing)
        .load(&config.input)
        .with_context(|| format!("Failed to load zoo from {}", config.input.display()))?;

    let d = zoo.dimensions;
    let depot = zoo.depot;

    println!("Zoo: {}", config.input.display());
    println!("=====");
    println!();
    println!("Dimensions: {} x {} x {}", d.x, d.y, d.z);
    println!("Depot: ({}, {}, {})", depot.x, depot.y, depot.z);
    println!("Battery capacity: {}", zoo.battery_capacity);
    println!();
    println!("Storages: {}", zoo.storages.len());
    println!("Enclosures: {}", zoo.enclosures.len());
    for diet in Diet::ALL {
        let storages = zoo.storages_for(diet).count();
        let (enclosures, importance) = zoo
            .enclosures_for(diet)
            .fold((0, 0.0), |(n, sum), (_, e)| (n + 1, sum + e.importance));
        println!(
            "  - {:<9} storages: {}, enclosures: {}, importance: {:.2}",
            diet.name(),
            storages,
            enclosures,
            importance
        );
    }

    Ok(())
}

fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if config_path.exists() && !force {
        println!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
        return Ok(());
    }

    std::fs::write(&config_path, PlannerConfig::default_yaml())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Initialized zoo-drone config at {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Put the zoo description in zoo.txt");
    println!("  2. Run: zoo-drone run");

    Ok(())
}
