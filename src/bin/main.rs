//! RPFM Command Line Interface
//!
//! Trains a potential function classifier on a dataset group and reports how
//! many held-out points it classifies correctly.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use rpfm::api::quick::GroupFiles;
use rpfm::api::PFM;
use rpfm::core::{ModelConfig, PFMError, Result, ScheduleConfig, TrainingMode};
use rpfm::kernel::KernelKind;
use rpfm::solver::ConvergenceSchedule;
use rpfm::{Dataset, Schema, TableDataset};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rpfm")]
#[command(about = "A Rust implementation of the potential function method")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "RPFM Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on <group>.data and evaluate on <group>.test
    Evaluate(EvaluateArgs),
    /// Print the convergence threshold schedule
    Schedule(ScheduleArgs),
}

#[derive(Args)]
struct EvaluateArgs {
    /// Dataset group: path prefix of the .names, .data and .test files
    #[arg(default_value = "housing")]
    group: PathBuf,

    /// JSON configuration file; command line options override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Kernel function
    #[arg(short, long)]
    kernel: Option<CliKernel>,

    /// Kernel scale parameter
    #[arg(short, long)]
    lambda: Option<f64>,

    /// Training mode
    #[arg(short, long)]
    mode: Option<CliMode>,

    /// Maximum number of passes in adaptive mode
    #[arg(long)]
    max_cycles: Option<usize>,

    /// Min-max normalize features
    #[arg(short, long)]
    normalize: bool,

    /// Show detailed metrics
    #[arg(long)]
    detailed: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum CliKernel {
    /// 1 / (1 + lambda * distance)
    #[value(name = "reciprocal")]
    Reciprocal,
    /// exp(-lambda * distance^2)
    #[value(name = "gaussian")]
    Gaussian,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum CliMode {
    /// One pass over the training data
    #[value(name = "single")]
    Single,
    /// Cycle until the convergence schedule is satisfied
    #[value(name = "adaptive")]
    Adaptive,
}

impl From<CliMode> for TrainingMode {
    fn from(cli_mode: CliMode) -> Self {
        match cli_mode {
            CliMode::Single => TrainingMode::SinglePass,
            CliMode::Adaptive => TrainingMode::Adaptive,
        }
    }
}

#[derive(Args)]
struct ScheduleArgs {
    /// Number of updates to tabulate
    #[arg(short, long, default_value = "10")]
    updates: usize,

    /// Per-trial detection margin
    #[arg(long, default_value = "0.05")]
    epsilon: f64,

    /// Confidence parameter (nu); smaller values need more consecutive matches
    #[arg(long, default_value = "0.9")]
    confidence: f64,

    /// Terms of the normalizing series
    #[arg(long, default_value = "1000")]
    terms: usize,

    /// Exponent of the per-update failure share (at most 2147483647)
    #[arg(long, default_value = "3")]
    exponent: u32,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Evaluate(args) => evaluate_command(args),
        Commands::Schedule(args) => schedule_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn resolve_config(args: &EvaluateArgs) -> Result<ModelConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {path:?}");
            ModelConfig::from_file(path)?
        }
        None => ModelConfig::default(),
    };

    if args.kernel.is_some() || args.lambda.is_some() {
        let lambda = args.lambda.unwrap_or(config.kernel.lambda());
        let kernel = args.kernel.unwrap_or(match config.kernel {
            KernelKind::Reciprocal { .. } => CliKernel::Reciprocal,
            KernelKind::Gaussian { .. } => CliKernel::Gaussian,
        });
        config.kernel = match kernel {
            CliKernel::Reciprocal => KernelKind::Reciprocal { lambda },
            CliKernel::Gaussian => KernelKind::Gaussian { lambda },
        };
    }
    if let Some(mode) = args.mode {
        config.training.mode = mode.into();
    }
    if args.max_cycles.is_some() {
        config.training.max_cycles = args.max_cycles;
    }
    if args.normalize {
        config.normalize = true;
    }

    Ok(config)
}

fn evaluate_command(args: EvaluateArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let files = GroupFiles::new(&args.group);

    info!("Schema file: {:?}", files.names);
    let schema = Schema::from_file(&files.names)?;
    let train = TableDataset::from_file(&files.data, &schema)?;
    let test = TableDataset::from_file(&files.test, &schema)?;

    if train.is_empty() {
        return Err(PFMError::InvalidDataset(format!(
            "No training points in {:?}",
            files.data
        )));
    }

    info!(
        "Kernel: {:?}, mode: {:?}, normalize: {}",
        config.kernel, config.training.mode, config.normalize
    );
    let model = PFM::from_config(&config)?.train(&train)?;

    let model_info = model.info();
    info!(
        "Support points: {} ({} positive, {} negative)",
        model_info.n_support_points, model_info.n_positive, model_info.n_negative
    );

    let metrics = model.evaluate(&test);

    println!("ALL TESTS: {}", metrics.total());
    println!("MATCHES: {}", metrics.matches());
    println!("NONMATCHES: {}", metrics.nonmatches());
    println!("NONMATCHES%: {:.2}", metrics.nonmatch_rate() * 100.0);

    if args.detailed {
        let (first, second) = schema.classes();
        println!("\nDetailed Metrics ({first} = positive, {second} = negative):");
        println!("  True Positives:  {}", metrics.true_positives);
        println!("  True Negatives:  {}", metrics.true_negatives);
        println!("  False Positives: {}", metrics.false_positives);
        println!("  False Negatives: {}", metrics.false_negatives);
        println!("  Unknown Labels:  {}", metrics.unknown_labels);
        println!("  Precision:       {:.4}", metrics.precision());
        println!("  Recall:          {:.4}", metrics.recall());
        println!("  F1 Score:        {:.4}", metrics.f1_score());
        println!("  Specificity:     {:.4}", metrics.specificity());
        println!("  Training passes: {}", model_info.summary.passes);
        println!("  Converged:       {}", model_info.summary.converged);
    }

    Ok(())
}

fn schedule_command(args: ScheduleArgs) -> Result<()> {
    let schedule = ConvergenceSchedule::new(ScheduleConfig {
        epsilon: args.epsilon,
        confidence: args.confidence,
        series_terms: args.terms,
        exponent: args.exponent,
    })?;

    println!("Series sum: {:.10}", schedule.series_sum());
    println!("{:>8}  {:>14}", "updates", "matches needed");
    for change in 1..=args.updates {
        println!("{:>8}  {:>14}", change, schedule.matches_needed(change));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate_args(extra: &[&str]) -> EvaluateArgs {
        let mut argv = vec!["rpfm", "evaluate", "group"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Evaluate(args) => args,
            Commands::Schedule(_) => unreachable!(),
        }
    }

    #[test]
    fn test_resolve_config_defaults() {
        let config = resolve_config(&evaluate_args(&[])).unwrap();
        assert_eq!(config, ModelConfig::default());
    }

    #[test]
    fn test_resolve_config_overrides() {
        let args = evaluate_args(&[
            "--kernel",
            "gaussian",
            "--mode",
            "adaptive",
            "--max-cycles",
            "7",
            "--normalize",
        ]);
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.kernel, KernelKind::Gaussian { lambda: 0.5 });
        assert_eq!(config.training.mode, TrainingMode::Adaptive);
        assert_eq!(config.training.max_cycles, Some(7));
        assert!(config.normalize);
    }

    #[test]
    fn test_resolve_config_lambda_keeps_kernel() {
        let config = resolve_config(&evaluate_args(&["--lambda", "2.0"])).unwrap();
        assert_eq!(config.kernel, KernelKind::Reciprocal { lambda: 2.0 });
    }

    #[test]
    fn test_default_group() {
        let args = match Cli::parse_from(["rpfm", "evaluate"]).command {
            Commands::Evaluate(args) => args,
            Commands::Schedule(_) => unreachable!(),
        };
        assert_eq!(args.group, PathBuf::from("housing"));
    }
}
