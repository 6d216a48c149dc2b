//! CDSSM preprocessor CLI
//!
//! Command-line interface for building letter n-gram vocabularies and
//! inspecting the window tensors produced for text pair files.

use cdssm_preprocessor::corpus::read_pairs;
use cdssm_preprocessor::{
    CdssmPreprocessor, Config, DataPack, PadMode, PreprocessError, PreprocessorConfig, Result,
    Stage, TextConfig, TruncateMode,
};
use clap::{Args, Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::error;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "cdssm")]
#[command(version)]
#[command(about = "CDSSM letter n-gram preprocessor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the vocabulary from a train file and report its shapes
    Fit {
        /// Train file (tab-separated, five columns)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Fit on a train file, then transform another file
    Transform {
        /// Train file used to build the vocabulary
        #[arg(short, long)]
        train: PathBuf,

        /// File to transform (ignored for the train stage)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Stage of the transformed file (train or test)
        #[arg(short, long, default_value = "test")]
        stage: String,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Print vocabulary terms with their indices
    Vocab {
        /// Train file (tab-separated, five columns)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of terms to show
        #[arg(short = 'k', long, default_value = "20")]
        limit: usize,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

#[derive(Args, Clone)]
struct PipelineArgs {
    /// Letter n-gram length and window width
    #[arg(long, default_value = "3")]
    sliding_window: usize,

    /// Number of windows per text
    #[arg(long, default_value = "5")]
    window_nb: usize,

    /// Value used to pad short texts
    #[arg(long, default_value = "0")]
    pad_value: f32,

    /// Pad side (pre or post)
    #[arg(long, default_value = "pre")]
    pad_mode: String,

    /// Truncate side (pre or post)
    #[arg(long, default_value = "pre")]
    truncate_mode: String,

    /// Keep stopwords
    #[arg(long)]
    keep_stopwords: bool,

    /// Fail when the train file yields no n-grams
    #[arg(long)]
    strict: bool,
}

impl PipelineArgs {
    fn config(&self) -> Result<Config> {
        Ok(Config {
            preprocessor: PreprocessorConfig {
                sliding_window: self.sliding_window,
                window_nb: self.window_nb,
                pad_value: self.pad_value,
                pad_mode: self.pad_mode.parse::<PadMode>()?,
                truncate_mode: self.truncate_mode.parse::<TruncateMode>()?,
                text_length: None,
            },
            text: TextConfig {
                remove_stopwords: !self.keep_stopwords,
                ..Default::default()
            },
        })
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Fit { input, pipeline } => fit_corpus(input, pipeline),

        Commands::Transform {
            train,
            input,
            stage,
            pipeline,
        } => transform_corpus(train, input, stage, pipeline),

        Commands::Vocab {
            input,
            limit,
            pipeline,
        } => show_vocab(input, limit, pipeline),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Reads the train file and fits a preprocessor on it.
fn fitted_preprocessor(input: &Path, pipeline: &PipelineArgs) -> Result<CdssmPreprocessor> {
    let mut preprocessor = CdssmPreprocessor::new(pipeline.config()?)?;

    let pb = spinner("Building vocabulary...");
    let pairs = read_pairs(input, Stage::Train)?;
    preprocessor.fit(&pairs, Stage::Train)?;
    pb.finish_and_clear();

    let degenerate = preprocessor
        .context()
        .map_or(true, |context| context.is_degenerate());
    if pipeline.strict && degenerate {
        return Err(PreprocessError::DegenerateVocabulary);
    }

    println!("✓ Fitted on {} pairs from {}", pairs.len(), input.display());
    Ok(preprocessor)
}

fn fit_corpus(input: PathBuf, pipeline: PipelineArgs) -> Result<()> {
    let start_time = Instant::now();
    let preprocessor = fitted_preprocessor(&input, &pipeline)?;
    let context = preprocessor.context().ok_or(PreprocessError::MissingContext)?;

    println!();
    println!("Vocabulary");
    println!("   Terms:        {}", context.vocabulary().len());
    println!("   Dims:         {}", context.dims());
    println!("   Text length:  {}", preprocessor.config().text_length());
    let [left, right] = context.input_shapes();
    println!("   Left shape:   {:?}", left);
    println!("   Right shape:  {:?}", right);
    println!();
    println!("Done in {}", HumanDuration(start_time.elapsed()));

    Ok(())
}

fn transform_corpus(
    train: PathBuf,
    input: Option<PathBuf>,
    stage: String,
    pipeline: PipelineArgs,
) -> Result<()> {
    let start_time = Instant::now();
    let stage = stage.parse::<Stage>()?;
    let preprocessor = fitted_preprocessor(&train, &pipeline)?;

    let pairs = match (stage, input) {
        (Stage::Test, Some(path)) => read_pairs(path, Stage::Test)?,
        (Stage::Test, None) => {
            return Err(PreprocessError::Config(
                "--input is required for the test stage".to_string(),
            ))
        }
        (Stage::Train, _) => Vec::new(),
    };

    let pb = spinner("Transforming...");
    let pack = preprocessor.transform(&pairs, stage)?;
    pb.finish_and_clear();

    print_pack(&pack);
    println!();
    println!("Done in {}", HumanDuration(start_time.elapsed()));

    Ok(())
}

fn print_pack(pack: &DataPack) {
    println!("✓ Transformed {} pairs", pack.len());
    println!();

    for (relation, left, right) in pack.pairs() {
        let label = relation
            .label
            .map_or_else(|| "-".to_string(), |label| label.to_string());
        println!(
            "{}\t{}\tlabel={}\tleft={:?} nnz={}\tright={:?} nnz={}",
            relation.id_left,
            relation.id_right,
            label,
            left.dim(),
            left.iter().filter(|v| **v != 0.0).count(),
            right.dim(),
            right.iter().filter(|v| **v != 0.0).count(),
        );
    }
}

fn show_vocab(input: PathBuf, limit: usize, pipeline: PipelineArgs) -> Result<()> {
    let preprocessor = fitted_preprocessor(&input, &pipeline)?;
    let context = preprocessor.context().ok_or(PreprocessError::MissingContext)?;
    let vocabulary = context.vocabulary();

    println!();
    println!("{:>6}  term", "index");
    for (term, index) in vocabulary.iter().take(limit) {
        println!("{:>6}  {}", index, term);
    }
    if vocabulary.len() > limit {
        println!("   ... {} more", vocabulary.len() - limit);
    }

    Ok(())
}
