use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pledge_pre_processing::pre_processor::DEFAULT_STOP_TOKENS;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    Analyzer, CategoryReport, Cutoffs, DEFAULT_ALPHA, DEFAULT_TRAIN_FRACTION, Record, StopList,
    VocabularyScope,
};

#[derive(Parser, Debug)]
#[command(name = "pledge-grams")]
#[command(about = "Rank the n-grams that move crowdfunding pledges", long_about = None)]
pub struct Cli {
    /// JSON files, each holding an array of campaign records
    #[arg(short, long = "input", value_name = "PATH", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Categories to model; defaults to the most common labels
    #[arg(short, long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// How many of the most common labels to model when no category is given
    #[arg(long, value_name = "N", default_value_t = 10)]
    top_categories: usize,

    /// Ridge regularization strength
    #[arg(short, long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,

    /// Most frequent unigrams kept per category
    #[arg(long, default_value_t = Cutoffs::DEFAULT_UNI)]
    uni: usize,

    /// Most frequent bigrams kept per category
    #[arg(long, default_value_t = Cutoffs::DEFAULT_BI)]
    bi: usize,

    /// Most frequent trigrams kept per category
    #[arg(long, default_value_t = Cutoffs::DEFAULT_TRI)]
    tri: usize,

    /// Leading share of each category's records used for training
    #[arg(long, default_value_t = DEFAULT_TRAIN_FRACTION)]
    train_fraction: f64,

    /// Report mean squared error on the held-out records
    #[arg(long)]
    validate: bool,

    /// Add the goal amount as a feature and report its coefficient
    #[arg(long)]
    include_goal: bool,

    /// Build vocabularies from every record carrying the label, not only primary matches
    #[arg(long)]
    any_label_vocabulary: bool,

    /// Extra tokens dropped before forming n-grams (added to the possessive suffixes)
    #[arg(long = "stop-token", value_name = "TOKEN")]
    stop_tokens: Vec<String>,

    /// Log the N most common n-grams of each order per category
    #[arg(long, value_name = "N")]
    diagnostics: Option<usize>,

    /// Number of strongest and weakest n-grams shown per category
    #[arg(short, long, value_name = "K", default_value_t = 10)]
    show: usize,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Log pipeline details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Ranked n-grams per category
    Human,
    /// Full reports as a JSON array
    Json,
}

impl Cli {
    fn log_filter(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (_, true) => "pledge_grams=debug,pledge_pre_processing=debug",
            _ => "pledge_grams=info,pledge_pre_processing=info",
        }
    }

    fn analyzer(&self) -> Analyzer {
        let stop_list = StopList::new(
            DEFAULT_STOP_TOKENS
                .iter()
                .map(|token| (*token).to_string())
                .chain(self.stop_tokens.iter().cloned()),
        );
        let scope = if self.any_label_vocabulary {
            VocabularyScope::AnyLabel
        } else {
            VocabularyScope::Primary
        };

        Analyzer::new()
            .with_alpha(self.alpha)
            .with_cutoffs(Cutoffs::new(self.uni, self.bi, self.tri))
            .with_stop_list(stop_list)
            .with_train_fraction(self.train_fraction)
            .with_validation(self.validate)
            .with_goal_feature(self.include_goal)
            .with_vocabulary_scope(scope)
            .with_diagnostics(self.diagnostics)
            .with_progress(!self.quiet)
    }
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read every record array, concatenated in argument order.
fn load_records(paths: &[PathBuf]) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for path in paths {
        let batch = read_record_file(path)?;
        debug!(path = %path.display(), records = batch.len(), "Loaded records");
        records.extend(batch);
    }
    Ok(records)
}

fn read_record_file(path: &Path) -> Result<Vec<Record>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse records in {}", path.display()))
}

fn output_human(reports: &[CategoryReport], show: usize) {
    for report in reports {
        println!("== {report}");
        println!("-- strongest --");
        for impact in report.strongest(show) {
            println!("{impact}");
        }
        println!("-- weakest --");
        for impact in report.weakest(show) {
            println!("{impact}");
        }
        println!();
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    init_tracing(cli);

    let records = load_records(&cli.inputs)?;
    info!(records = records.len(), "Records loaded");

    let analyzer = cli.analyzer();
    let reports = if cli.categories.is_empty() {
        analyzer.analyze_top_categories(&records, cli.top_categories)?
    } else {
        analyzer.analyze_categories(&records, &cli.categories)?
    };

    match cli.format {
        OutputFormat::Human => output_human(&reports, cli.show),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }
    Ok(())
}
