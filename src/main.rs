// src/main.rs
mod extractors;
mod storage;
mod utils;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use extractors::pos;
use extractors::vocabulary::VocabularyExtractor;
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the vocabulary dataset extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract vocabulary records from a markdown document
    Extract {
        /// Path of the markdown document to read
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the dataset module and its metadata
        #[arg(short, long, default_value = "./output")]
        output_dir: String,

        /// File name of the dataset module inside the output directory
        #[arg(long, default_value = "vocabulary.js")]
        file_name: String,

        /// Name of the exported constant
        #[arg(long, default_value = "VOCABULARY")]
        const_name: String,
    },

    /// Rewrite the part-of-speech tags of an existing dataset module in place
    Tag {
        /// Path of the dataset module to retag
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    match args.command {
        Command::Extract {
            input,
            output_dir,
            file_name,
            const_name,
        } => run_extract(&input, &output_dir, &file_name, &const_name),
        Command::Tag { file } => run_tag(&file),
    }
}

fn run_extract(
    input: &Path,
    output_dir: &str,
    file_name: &str,
    const_name: &str,
) -> Result<(), AppError> {
    // The whole document is read up front; extraction is a single pass over
    // the in-memory text and cannot fail on content shape.
    let text = fs::read_to_string(input)?;
    tracing::info!("Read {} bytes from {}", text.len(), input.display());

    let extractor = VocabularyExtractor::new();
    let records = extractor.extract(&text);

    let storage = StorageManager::new(output_dir)?;
    let dataset_path = storage.save_dataset(&records, file_name, const_name)?;
    storage.save_dataset_metadata(&records, input, file_name)?;

    println!(
        "Successfully parsed {} words into {}.",
        records.len(),
        dataset_path.display()
    );

    Ok(())
}

fn run_tag(file: &Path) -> Result<(), AppError> {
    let (const_name, mut records) = storage::load_dataset(file)?;
    let total = records.len();

    let changed = pos::retag_records(&mut records);
    storage::write_dataset(file, &records, &const_name)?;

    println!("Updated {}/{} words", changed, total);
    println!("POS distribution:");
    for (tag, count) in pos::pos_distribution(&records) {
        println!("  {}: {}", tag, count);
    }

    Ok(())
}
