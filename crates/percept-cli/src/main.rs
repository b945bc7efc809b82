use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use percept_ai::{Classifier, LabelTable, open_image, preprocess};
use percept_fetch::FetchClient;

/// ImageNet classification from the command line.
#[derive(Parser)]
#[command(name = "percept", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify an image and print the top-ranked labels.
    Classify {
        /// Image file to classify.
        image: PathBuf,

        /// Path to the `.onnx` classifier weights.
        #[arg(long, env = "PERCEPT_MODEL")]
        model: PathBuf,

        /// Label table source: an http(s) URL or a local JSON file.
        #[arg(long, env = "PERCEPT_LABELS")]
        labels: String,

        /// Number of ranked predictions to print.
        #[arg(long, default_value_t = 5)]
        top_k: usize,
    },

    /// Fetch the label table JSON and cache it locally.
    FetchLabels {
        #[arg(long)]
        url: String,

        #[arg(long)]
        out: PathBuf,
    },

    /// Download model weights to a local file.
    FetchWeights {
        #[arg(long)]
        url: String,

        #[arg(long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("percept v{}", env!("CARGO_PKG_VERSION"));
    let cli = Cli::parse();

    match cli.command {
        Command::Classify {
            image,
            model,
            labels,
            top_k,
        } => classify(&image, &model, &labels, top_k).await,
        Command::FetchLabels { url, out } => {
            let table = FetchClient::new().cache_labels(&url, &out).await?;
            println!("cached {} classes to {}", table.len(), out.display());
            Ok(())
        }
        Command::FetchWeights { url, out } => {
            let bytes = FetchClient::new().download_weights(&url, &out).await?;
            println!("wrote {bytes} bytes to {}", out.display());
            Ok(())
        }
    }
}

async fn classify(image: &Path, model: &Path, labels: &str, top_k: usize) -> anyhow::Result<()> {
    let table = load_labels(labels).await?;

    let img = open_image(image)?;
    let input = preprocess(&img)?;

    let mut classifier = Classifier::load(model)?;
    let scores = classifier.scores(&input)?;

    for (rank, pred) in table.top_k(&scores, top_k)?.iter().enumerate() {
        println!(
            "{:>2}. {:<28} {}  {:.4}",
            rank + 1,
            pred.label.name,
            pred.label.synset,
            pred.score
        );
    }
    Ok(())
}

/// The label table comes from the network or from a cached local copy.
async fn load_labels(source: &str) -> anyhow::Result<LabelTable> {
    if is_url(source) {
        Ok(FetchClient::new().fetch_labels(source).await?)
    } else {
        Ok(LabelTable::from_path(Path::new(source))?)
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
