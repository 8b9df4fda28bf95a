pub mod ctd;
pub mod documents;
pub mod lookup;
pub mod relations;
pub mod stats;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use biolex_core::{CorpusConfig, CorpusFamily, Split};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "blx",
    about = "Convert PubTator biomedical corpora into document and lookup tables",
    version
)]
pub struct Cli {
    /// Base directory holding the corpora (overrides BIOLEX_DATA_DIR)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config(&self) -> CorpusConfig {
        self.data_dir
            .clone()
            .map_or_else(CorpusConfig::from_env, CorpusConfig::new)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse an annotation corpus into documents with their mentions
    Documents {
        #[command(flatten)]
        input: CorpusInput,
        /// Write one document per line instead of a pretty array
        #[arg(long)]
        lines: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Extract chemical-induced-disease relations
    Relations {
        #[command(flatten)]
        input: CorpusInput,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build the entity lookup table of an annotation corpus
    Lookup {
        #[command(flatten)]
        input: CorpusInput,
        /// Fail on mentions with missing fields instead of coercing them
        #[arg(long)]
        strict: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build the entity lookup table from CTD adapter output (JSON lines)
    Ctd {
        #[command(flatten)]
        input: CorpusInput,
        /// Fail on mentions with missing fields instead of coercing them
        #[arg(long)]
        strict: bool,
        /// Also write the converted documents, one JSON record per line
        #[arg(long = "documents")]
        documents: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Process corpus splits and print counts
    Stats {
        /// Splits to process (all if omitted)
        #[arg(long = "split")]
        splits: Vec<Split>,
        /// Read CTD adapter output instead of annotation files
        #[arg(long)]
        ctd: bool,
    },
}

#[derive(Args)]
pub struct CorpusInput {
    /// Corpus file to read
    #[arg(conflicts_with = "split", required_unless_present = "split")]
    pub path: Option<PathBuf>,
    /// Resolve the file for a split under the data directory
    #[arg(long)]
    pub split: Option<Split>,
}

impl CorpusInput {
    pub fn resolve(&self, config: &CorpusConfig, family: CorpusFamily) -> Result<PathBuf> {
        match (&self.path, self.split) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(split)) => Ok(config.split_path(family, split)),
            (None, None) => bail!("either a corpus path or --split is required"),
        }
    }
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    pub fn writer(&self) -> Result<Box<dyn Write>> {
        open_output(self.output.as_deref())
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
