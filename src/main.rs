use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use grid_siting::config::Config;
use grid_siting::engine::EvaluationLimits;
use grid_siting::model::{DemandCategory, DemandProfile, NodeId};
use grid_siting::output;
use grid_siting::scoring::Weights;
use grid_siting::{SitingEngine, SitingError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_VALIDATION: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List candidate sites by composite score (default if no subcommand)
    Rank {
        /// Show only the first N sites
        #[arg(short, long)]
        limit: Option<usize>,

        /// Skip sites whose reliability is below this score
        #[arg(long)]
        min_reliability: Option<f64>,

        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Full evaluation of one candidate site
    Evaluate {
        /// Node id as listed in the nodes dataset
        node_id: NodeId,

        #[command(flatten)]
        demand: DemandArgs,
    },
    /// Score an arbitrary location against the asset population
    EvaluateAt {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        #[command(flatten)]
        demand: DemandArgs,
    },
    /// Best other sites under the same weights
    Alternatives {
        node_id: NodeId,

        /// How many alternatives to list (defaults to alternatives_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Assets around a location, closest first
    Nearby {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Search radius in km (defaults to nearby.max_distance_km)
        #[arg(short, long)]
        radius: Option<f64>,

        /// Most assets to list (defaults to nearby.limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only list clean generation
        #[arg(long)]
        clean_only: bool,
    },
    /// Compare several candidate sites side by side
    Compare {
        #[arg(required = true, num_args = 1..)]
        node_ids: Vec<NodeId>,

        #[command(flatten)]
        demand: DemandArgs,
    },
    /// Write every scored site to a JSON file
    Export {
        output: PathBuf,
    },
}

/// Weight overrides shared by every scoring command
#[derive(Args, Debug)]
struct WeightArgs {
    /// Weight of clean generation (defaults to config, then 0.4)
    #[arg(long, global = true)]
    weight_clean: Option<f64>,

    /// Weight of transmission headroom (defaults to config, then 0.3)
    #[arg(long, global = true)]
    weight_transmission: Option<f64>,

    /// Weight of reliability (defaults to config, then 0.3)
    #[arg(long, global = true)]
    weight_reliability: Option<f64>,
}

impl WeightArgs {
    /// Overrides on top of the configured weights, validated
    fn weights(&self, config: &Config) -> Result<Weights, SitingError> {
        let base = config.weights();
        Weights::new(
            self.weight_clean.unwrap_or(base.clean),
            self.weight_transmission.unwrap_or(base.transmission),
            self.weight_reliability.unwrap_or(base.reliability),
        )
    }
}

/// The load being sited. Only commands that apply demand adequacy take these.
#[derive(Args, Debug)]
struct DemandArgs {
    /// Size of the load being sited, in MW
    #[arg(long)]
    demand_mw: Option<f64>,

    /// Kind of load being sited
    #[arg(long, default_value = "data_center")]
    demand_type: DemandCategory,
}

impl DemandArgs {
    fn profile(&self) -> DemandProfile {
        match self.demand_mw {
            Some(size_mw) => DemandProfile::load(size_mw, self.demand_type),
            None => DemandProfile::NoDemand,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "grid-siting")]
#[command(about = "Rank candidate grid sites for large electrical loads", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/grid-siting/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Asset dataset (JSON), overrides datasets.assets
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Candidate node dataset (JSON), overrides datasets.nodes
    #[arg(long, global = true)]
    nodes: Option<PathBuf>,

    #[command(flatten)]
    weights: WeightArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "grid_siting=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Exit code for a failed command. Engine validation and lookup failures
/// are the caller's input; anything else is a data problem.
fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<SitingError>() {
        Some(SitingError::Validation(_)) | Some(SitingError::NotFound(_)) => EXIT_VALIDATION,
        Some(SitingError::EmptyPopulation) | None => EXIT_DATA,
    }
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Rank {
        limit: None,
        min_reliability: None,
        tsv: false,
    });
    let start_time = Instant::now();
    init_tracing(cli.verbose);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match grid_siting::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = grid_siting::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let weights = match cli.weights.weights(&config) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Invalid weights: {}", e);
            std::process::exit(EXIT_VALIDATION);
        }
    };

    let (Some(assets_path), Some(nodes_path)) = (
        cli.assets.or_else(|| config.datasets.assets.clone()),
        cli.nodes.or_else(|| config.datasets.nodes.clone()),
    ) else {
        eprintln!("No datasets configured.");
        eprintln!("Pass --assets and --nodes, or add them to ~/.config/grid-siting/config.yaml:");
        eprintln!("  datasets:");
        eprintln!("    assets: /path/to/assets.json");
        eprintln!("    nodes: /path/to/nodes.json");
        std::process::exit(EXIT_CONFIG);
    };

    // Load datasets
    let load_start = Instant::now();
    let assets = match grid_siting::dataset::load_assets(&assets_path) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Dataset error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };
    let sites = match grid_siting::dataset::load_nodes(&nodes_path) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Dataset error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    let engine = SitingEngine::new(config.scoring());
    let snapshot = match engine.populate(sites, assets) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Dataset error: {}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    if cli.verbose {
        let factors = snapshot.factors();
        eprintln!(
            "Scored {} sites against {} assets ({} clean) in {}",
            snapshot.nodes().len(),
            snapshot.assets().len(),
            snapshot.clean_assets().len(),
            humantime::format_duration(load_start.elapsed())
        );
        eprintln!(
            "  Normalization: clean gen {:.1}, transmission {:.1}",
            factors.clean_gen, factors.transmission
        );
    }

    let use_colors = output::should_use_colors();
    let limits = config.evaluation_limits();

    if let Err(e) = run(command, &engine, &config, &weights, &limits, use_colors) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code_for(&e));
    }

    if cli.verbose {
        eprintln!();
        eprintln!("Done in {}", humantime::format_duration(start_time.elapsed()));
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run(
    command: Commands,
    engine: &SitingEngine,
    config: &Config,
    weights: &Weights,
    limits: &EvaluationLimits,
    use_colors: bool,
) -> anyhow::Result<()> {
    match command {
        Commands::Rank {
            limit,
            min_reliability,
            tsv,
        } => {
            let mut ranked = engine.rank(weights)?;
            if let Some(min) = min_reliability {
                ranked.retain(|site| site.scores.reliability >= min);
            }
            if let Some(limit) = limit {
                ranked.truncate(limit);
            }

            if tsv {
                let out = output::format_tsv(&ranked);
                if !out.is_empty() {
                    println!("{}", out);
                }
            } else {
                println!("{}", output::format_ranking_table(&ranked, use_colors));
            }
        }
        Commands::Evaluate { node_id, demand } => {
            let evaluation = engine.evaluate_site(node_id, weights, &demand.profile(), limits)?;
            println!("{}", output::format_evaluation(&evaluation, use_colors));
        }
        Commands::EvaluateAt {
            latitude,
            longitude,
            demand,
        } => {
            let breakdown = engine.evaluate_at(latitude, longitude, weights, &demand.profile())?;
            println!("{}", output::format_breakdown(&breakdown, use_colors));
        }
        Commands::Alternatives { node_id, limit } => {
            let limit = limit.unwrap_or(config.alternatives_limit());
            let alternatives = engine.alternatives(node_id, weights, limit)?;
            println!("{}", output::format_ranking_table(&alternatives, use_colors));
        }
        Commands::Nearby {
            latitude,
            longitude,
            radius,
            limit,
            clean_only,
        } => {
            let nearby = config.nearby();
            let found = engine.nearby_assets(
                latitude,
                longitude,
                radius.unwrap_or(nearby.max_distance_km()),
                limit.unwrap_or(nearby.limit()),
                clean_only,
            );
            println!("{}", output::format_nearby_table(&found, use_colors));
        }
        Commands::Compare { node_ids, demand } => {
            let comparison = engine.compare(&node_ids, weights, &demand.profile(), limits)?;
            println!("{}", output::format_comparison(&comparison, use_colors));
        }
        Commands::Export { output: path } => {
            let snapshot = engine.snapshot()?;
            let written = grid_siting::dataset::export_scored_nodes(&path, &snapshot, weights)?;
            eprintln!("Wrote {} sites to {}", written, path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demand_flags_belong_to_scoring_commands() {
        let cli = Cli::try_parse_from(["grid-siting", "evaluate", "1", "--demand-mw", "200"]).unwrap();
        let Some(Commands::Evaluate { node_id, demand }) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(node_id, 1);
        assert_eq!(demand.profile().size_mw(), Some(200.0));

        let cli = Cli::try_parse_from(["grid-siting", "compare", "1", "2", "--demand-mw", "50"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Compare { .. })));

        assert!(Cli::try_parse_from(["grid-siting", "evaluate-at", "35.0", "-111.0", "--demand-mw", "75"]).is_ok());
    }

    #[test]
    fn test_demand_flags_rejected_elsewhere() {
        for args in [
            vec!["grid-siting", "rank", "--demand-mw", "99999"],
            vec!["grid-siting", "alternatives", "1", "--demand-type", "ev_hub"],
            vec!["grid-siting", "nearby", "35.0", "-111.0", "--demand-mw", "100"],
            vec!["grid-siting", "export", "out.json", "--demand-mw", "100"],
        ] {
            assert!(Cli::try_parse_from(&args).is_err(), "accepted {:?}", args);
        }
    }

    #[test]
    fn test_weight_flags_stay_global() {
        let cli = Cli::try_parse_from(["grid-siting", "rank", "--weight-clean", "0.5"]).unwrap();
        assert_eq!(cli.weights.weight_clean, Some(0.5));

        let bad = WeightArgs {
            weight_clean: Some(0.9),
            weight_transmission: None,
            weight_reliability: None,
        };
        assert!(bad.weights(&Config::default()).is_err());
    }
}
