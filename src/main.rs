use clap::Parser;
use seqclust::{Pipeline, PipelineConfig};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Cluster positioned subsequences by weighted distance
#[derive(Parser, Debug)]
#[command(name = "seqclust")]
#[command(about = "Cluster short positioned subsequences", long_about = None, version)]
struct Args {
    /// Directory with the scanner's *.json entry files
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory receiving clusters.json and clusters.txt
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum distance at which two entries are linked
    #[arg(long)]
    distance_threshold: Option<u64>,

    /// Weight of the content term
    #[arg(long)]
    letter_weight: Option<u64>,

    /// Weight of the position term
    #[arg(long)]
    position_weight: Option<u64>,

    /// Refuse to run when more pairs than this would be compared
    #[arg(long)]
    max_pairs: Option<u64>,

    /// Evaluate distances on all cores
    #[arg(long)]
    parallel: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(input) = self.input {
            config.input_location = input;
        }
        if let Some(output) = self.output {
            config.output_location = output;
        }
        if let Some(threshold) = self.distance_threshold {
            config.cluster.distance_threshold = threshold;
        }
        if let Some(weight) = self.letter_weight {
            config.cluster.letter_weight = weight;
        }
        if let Some(weight) = self.position_weight {
            config.cluster.position_weight = weight;
        }
        if self.max_pairs.is_some() {
            config.cluster.max_pairs = self.max_pairs;
        }
        if self.parallel {
            config.cluster.parallel = true;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting seqclust v{}", env!("CARGO_PKG_VERSION"));

    let config = args.into_config()?;
    info!("Input directory: {:?}", config.input_location);
    info!("Output directory: {:?}", config.output_location);

    let output = Pipeline::new(config).run()?;

    info!(
        "Finished: {} clusters from {} entries",
        output.reports.len(),
        output.reports.iter().map(|r| r.num_entries).sum::<usize>()
    );
    info!("Text report: {:?}", output.paths.text);
    info!("JSON report: {:?}", output.paths.json);
    Ok(())
}
