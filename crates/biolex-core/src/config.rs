use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DATA_DIR_ENV: &str = "BIOLEX_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data/external";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusFamily {
    /// PubTator annotation files with inline CID relations.
    Bc5cdr,
    /// CTD-derived corpus, read through the external adapter.
    Ctd,
}

impl CorpusFamily {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bc5cdr => "bc5cdr",
            Self::Ctd => "ctd",
        }
    }
}

impl fmt::Display for CorpusFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Training,
    Test,
    Development,
}

impl Split {
    pub const ALL: [Self; 3] = [Self::Training, Self::Test, Self::Development];

    /// Name used in BC5CDR file names (`CDR_TrainingSet.PubTator.txt`).
    #[must_use]
    pub const fn bc5cdr_name(&self) -> &'static str {
        match self {
            Self::Training => "Training",
            Self::Test => "Test",
            Self::Development => "Development",
        }
    }

    /// Name used in CTD-derived file names (`train_docs.jsonl`).
    #[must_use]
    pub const fn ctd_name(&self) -> &'static str {
        match self {
            Self::Training => "train",
            Self::Test => "test",
            Self::Development => "dev",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bc5cdr_name())
    }
}

impl FromStr for Split {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "training" | "train" => Ok(Self::Training),
            "test" => Ok(Self::Test),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(format!("unknown split '{s}' (expected training, test or development)")),
        }
    }
}

/// Where corpus files live. Passed explicitly to whatever needs to resolve a
/// split to a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub data_dir: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl CorpusConfig {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn from_env() -> Self {
        std::env::var_os(DATA_DIR_ENV).map_or_else(Self::default, Self::new)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn bc5cdr_dir(&self) -> PathBuf {
        self.data_dir.join("bc5cdr").join("data").join("training")
    }

    pub fn ctd_dir(&self) -> PathBuf {
        self.data_dir
            .join("ChemDisGene")
            .join("data")
            .join("ctd_derived")
    }

    pub fn split_path(&self, family: CorpusFamily, split: Split) -> PathBuf {
        match family {
            CorpusFamily::Bc5cdr => self
                .bc5cdr_dir()
                .join(format!("CDR_{}Set.PubTator.txt", split.bc5cdr_name())),
            CorpusFamily::Ctd => self.ctd_dir().join(format!("{}_docs.jsonl", split.ctd_name())),
        }
    }
}
