use std::env;
use std::path::PathBuf;

use semcor_corpus::LoadMode;
use tracing::warn;

use crate::cli::GlobalArgs;

pub const DEFAULT_CORPUS_ROOT: &str = "semcor";
pub const DEFAULT_OUTPUT_ROOT: &str = "output";
pub const DICTIONARY_FILE: &str = "lemma_dictionary.json";

pub const CORPUS_ROOT_ENV: &str = "SEMCOR_DIR";
pub const OUTPUT_ROOT_ENV: &str = "SEMCOR_OUTPUT_DIR";
pub const DICTIONARY_ENV: &str = "SEMCOR_DICTIONARY";
pub const LOAD_MODE_ENV: &str = "SEMCOR_LOAD_MODE";

/// Settings resolved once at start-up: command line, then environment, then defaults.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    pub corpus_root: PathBuf,
    pub output_root: PathBuf,
    pub dictionary_path: PathBuf,
    pub load_mode: LoadMode,
}

impl Config {
    pub fn load(cli: &GlobalArgs) -> Self {
        Self::from_sources(cli, |key| env::var(key).ok())
    }

    /// Resolve against an arbitrary environment lookup. Empty values count as unset.
    pub fn from_sources(cli: &GlobalArgs, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let corpus_root = cli
            .corpus_root
            .clone()
            .or_else(|| var(CORPUS_ROOT_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS_ROOT));
        let output_root = cli
            .output_root
            .clone()
            .or_else(|| var(OUTPUT_ROOT_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT));
        let dictionary_path = cli
            .dictionary
            .clone()
            .or_else(|| var(DICTIONARY_ENV).map(PathBuf::from))
            .unwrap_or_else(|| output_root.join(DICTIONARY_FILE));
        let load_mode = cli
            .load_mode
            .map(LoadMode::from)
            .or_else(|| {
                var(LOAD_MODE_ENV).and_then(|raw| {
                    let mode = parse_load_mode(&raw);
                    if mode.is_none() {
                        warn!("ignoring {LOAD_MODE_ENV}={raw}: expected mmap or owned");
                    }
                    mode
                })
            })
            .unwrap_or_default();

        Config {
            corpus_root,
            output_root,
            dictionary_path,
            load_mode,
        }
    }
}

pub fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}
