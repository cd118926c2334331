//! inkmark CLI — command-line interface for pen-gesture recognition.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use inkmark::{
    rough_sequences, CaptureFile, LinearModel, Pattern, RecognizeConfig, RecognizeError,
    Recognizer, RegionLayout, ScaleRange, SequencingResult,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "inkmark")]
#[command(about = "Recognize pen-drawn marks (cross, crossed-out, circle, slash, back-slash) in form regions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize the gestures in every region of a layout.
    Recognize(CliRecognizeArgs),

    /// Dump the feature vector of every rough sequence per region.
    Features(CliFeaturesArgs),

    /// Print a summary of a model file.
    ModelInfo {
        /// Path to the model JSON.
        #[arg(long)]
        model: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct CaptureArgs {
    /// Captured strokes (JSON).
    #[arg(long)]
    input: PathBuf,

    /// Region layout (JSON).
    #[arg(long)]
    layout: PathBuf,

    /// Recognition configuration (JSON); missing fields keep defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Strokes not longer than this are ignored.
    #[arg(long, default_value = "10.0")]
    min_stroke_length: f64,
}

#[derive(Debug, Clone, Args)]
struct CliRecognizeArgs {
    #[command(flatten)]
    capture: CaptureArgs,

    /// Trained model (JSON).
    #[arg(long)]
    model: PathBuf,

    /// Per-feature scale range (plain text). Built-in range when omitted.
    #[arg(long)]
    scale_range: Option<PathBuf>,

    /// Report an all-zero placeholder for regions without strokes.
    #[arg(long)]
    show_empty: bool,

    /// Path to write results (JSON).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct CliFeaturesArgs {
    #[command(flatten)]
    capture: CaptureArgs,

    /// Path to write feature vectors (JSON).
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Serialize)]
struct RegionResults<'a> {
    name: &'a str,
    results: Vec<SequencingResult>,
}

#[derive(serde::Serialize)]
struct SequenceFeatures {
    stroke_ids: Vec<u8>,
    features: [f64; 5],
}

#[derive(serde::Serialize)]
struct RegionFeatures<'a> {
    name: &'a str,
    sequences: Vec<SequenceFeatures>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recognize(args) => run_recognize(&args),
        Commands::Features(args) => run_features(&args),
        Commands::ModelInfo { model } => run_model_info(&model),
    }
}

fn load_config(path: Option<&Path>) -> CliResult<RecognizeConfig> {
    match path {
        Some(p) => {
            tracing::info!("Loading config: {}", p.display());
            RecognizeConfig::from_json_file(p)
                .map_err(|e| -> CliError { format!("Failed to load config {}: {}", p.display(), e).into() })
        }
        None => Ok(RecognizeConfig::default()),
    }
}

/// Load the layout and capture, and route every stroke into the regions.
fn load_regions(args: &CaptureArgs, config: &RecognizeConfig) -> CliResult<RegionLayout> {
    let mut layout = RegionLayout::from_json_file(&args.layout)
        .map_err(|e| -> CliError { format!("Failed to load layout {}: {}", args.layout.display(), e).into() })?
        .with_filter(&config.region);
    let capture = CaptureFile::from_json_file(&args.input)
        .map_err(|e| -> CliError { format!("Failed to load strokes {}: {}", args.input.display(), e).into() })?;
    tracing::info!(
        "Loaded {} strokes, {} regions",
        capture.strokes.len(),
        layout.len()
    );

    let mut routed = 0usize;
    for stroke in capture.to_strokes() {
        match layout.route_stroke(&stroke, args.min_stroke_length) {
            Ok(0) => tracing::debug!("stroke {} outside every region", stroke.id),
            Ok(_) => routed += 1,
            Err(e @ RecognizeError::DegenerateStroke { .. }) => tracing::warn!("skipping: {}", e),
            Err(e) => return Err(e.into()),
        }
    }
    tracing::info!("Routed {} strokes into regions", routed);
    Ok(layout)
}

// ── recognize ──────────────────────────────────────────────────────────

fn run_recognize(args: &CliRecognizeArgs) -> CliResult<()> {
    let config = load_config(args.capture.config.as_deref())?;
    let layout = load_regions(&args.capture, &config)?;

    let scale = match &args.scale_range {
        Some(p) => ScaleRange::from_text_file(p)?,
        None => ScaleRange::default(),
    };
    let recognizer = Recognizer::from_model_file(&args.model)
        .with_config(config)
        .with_scale_range(scale);

    let mut output = Vec::with_capacity(layout.len());
    let mut n_gestures = 0usize;
    for named in layout.regions() {
        let results = recognizer.recognize(&named.region, args.show_empty)?;
        n_gestures += results.iter().filter(|r| r.pattern.is_some()).count();
        output.push(RegionResults {
            name: &named.name,
            results,
        });
    }
    tracing::info!("Recognized {} gestures", n_gestures);

    let json = serde_json::to_string_pretty(&serde_json::json!({ "regions": output }))?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Results written to {}", args.out.display());
    Ok(())
}

// ── features ───────────────────────────────────────────────────────────

fn run_features(args: &CliFeaturesArgs) -> CliResult<()> {
    let config = load_config(args.capture.config.as_deref())?;
    let layout = load_regions(&args.capture, &config)?;

    let output: Vec<RegionFeatures> = layout
        .regions()
        .iter()
        .map(|named| RegionFeatures {
            name: &named.name,
            sequences: rough_sequences(named.region.strokes())
                .into_iter()
                .map(|seq| {
                    let refs: Vec<_> = seq.iter().collect();
                    SequenceFeatures {
                        stroke_ids: seq.iter().map(|s| s.id).collect(),
                        features: inkmark::sequence_features(&refs, &config).0,
                    }
                })
                .collect(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&serde_json::json!({ "regions": output }))?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Features written to {}", args.out.display());
    Ok(())
}

// ── model-info ─────────────────────────────────────────────────────────

fn run_model_info(path: &Path) -> CliResult<()> {
    let model = LinearModel::from_json_file(path)?;

    println!("inkmark gesture model");
    println!("  path:       {}", path.display());
    println!("  schema:     {}", inkmark::MODEL_SCHEMA_V1);
    println!("  features:   {}", model.n_features());
    println!("  classes:");
    for p in Pattern::ALL {
        println!("    {}  {:?}", p.label(), p);
    }
    Ok(())
}
