//! Command-line surface of the `semcorproc` binary.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use semcor_corpus::{LoadMode, Subcorpus, list_files};
use tracing::info;

use crate::config::Config;
use crate::context::Boundary;
use crate::error::{ExportError, Result};
use crate::export::{
    self, ConcordanceOptions, ExportSummary, KindId, RUNNING_TEXT_DIR, TABLE_FILE,
    TABLE_SENSE_FILE, TOKENS_DIR, TableOptions,
};

#[derive(Debug, Parser)]
#[command(
    name = "semcorproc",
    version,
    about = "Convert SemCor tag files into lemma dictionaries, tables, concordances and text"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

/// Location and loading settings shared by every subcommand.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Corpus root holding brown1/, brown2/ and brownv/ [env: SEMCOR_DIR]
    #[arg(long, global = true, value_name = "DIR")]
    pub corpus_root: Option<PathBuf>,
    /// Root for default output locations [env: SEMCOR_OUTPUT_DIR]
    #[arg(long, global = true, value_name = "DIR")]
    pub output_root: Option<PathBuf>,
    /// Lemma dictionary to load, or to create when missing [env: SEMCOR_DICTIONARY]
    #[arg(long, global = true, value_name = "FILE")]
    pub dictionary: Option<PathBuf>,
    /// How corpus files are read [env: SEMCOR_LOAD_MODE]
    #[arg(long, global = true, value_enum)]
    pub load_mode: Option<LoadModeArg>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the lemma dictionary and save it as JSON
    Build(BuildArgs),
    /// One row per token with its POS and lemma
    Table(TableArgs),
    /// Occurrences of chosen lemmas with their left and right context
    Concordance(ConcordanceArgs),
    /// One `wordform lemma pos` file per document
    Tokens(TextArgs),
    /// One running-text file per document, a paragraph per line
    RunningText(TextArgs),
}

#[derive(Debug, Default, Args)]
pub struct InputArgs {
    /// Named subcorpus; takes precedence over --input-files
    #[arg(short = 'c', long, value_enum)]
    pub concordance: Option<SubcorpusArg>,
    /// Corpus files or directories
    #[arg(short = 'i', long, num_args = 1.., value_name = "PATH")]
    pub input_files: Vec<PathBuf>,
    /// Keep multiword expressions as single tokens
    #[arg(short = 'm', long)]
    pub multiword: bool,
    /// Report tokens whose POS or lemma could not be settled
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl InputArgs {
    /// Paths to search: the named subcorpus, else the explicit inputs, else the whole corpus.
    pub fn paths(&self, corpus_root: &Path) -> Vec<PathBuf> {
        match self.concordance {
            Some(sub) => Subcorpus::from(sub).paths(corpus_root),
            None if !self.input_files.is_empty() => self.input_files.clone(),
            None => Subcorpus::All.paths(corpus_root),
        }
    }

    /// Corpus files for this selection; an empty selection is an error.
    pub fn files(&self, corpus_root: &Path) -> Result<Vec<PathBuf>> {
        let files = list_files(self.paths(corpus_root));
        if files.is_empty() {
            return Err(ExportError::NoInputs);
        }
        info!("{} corpus files selected", files.len());
        Ok(files)
    }
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Dictionary file to write (defaults to the configured dictionary path)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Keep only sense-tagged tokens and add wnsn/sense_key columns
    #[arg(short = 's', long)]
    pub sense: bool,
}

#[derive(Debug, Args)]
pub struct ConcordanceArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Lemmas to build concordance lines for
    #[arg(short = 't', long, required = true, num_args = 1..)]
    pub types: Vec<String>,
    /// Words of left context
    #[arg(short = 'l', long, default_value_t = 10)]
    pub left: usize,
    /// Words of right context
    #[arg(short = 'r', long, default_value_t = 10)]
    pub right: usize,
    /// Scope the context may not cross
    #[arg(short = 's', long, value_enum, default_value_t = SeparatorArg::Paragraph)]
    pub separator: SeparatorArg,
    /// Keep only nodes whose POS starts with one of these prefixes
    #[arg(short = 'p', long, num_args = 1..)]
    pub pos: Vec<String>,
    /// Add columns with the neighbouring word forms
    #[arg(short = 'a', long)]
    pub add_closest: bool,
    /// Label leading each token_id
    #[arg(short = 'k', long, value_enum, default_value_t = KindIdArg::LemmaPos)]
    pub kind_id: KindIdArg,
}

#[derive(Debug, Args)]
pub struct TextArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output directory
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SubcorpusArg {
    Brown1,
    Brown2,
    Brownv,
    All,
    Semcor,
}

impl From<SubcorpusArg> for Subcorpus {
    fn from(arg: SubcorpusArg) -> Self {
        match arg {
            SubcorpusArg::Brown1 => Subcorpus::Brown1,
            SubcorpusArg::Brown2 => Subcorpus::Brown2,
            SubcorpusArg::Brownv => Subcorpus::BrownV,
            SubcorpusArg::All | SubcorpusArg::Semcor => Subcorpus::All,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LoadModeArg {
    Mmap,
    Owned,
}

impl From<LoadModeArg> for LoadMode {
    fn from(arg: LoadModeArg) -> Self {
        match arg {
            LoadModeArg::Mmap => LoadMode::Mmap,
            LoadModeArg::Owned => LoadMode::Owned,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SeparatorArg {
    Paragraph,
    Sentence,
    None,
}

impl From<SeparatorArg> for Boundary {
    fn from(arg: SeparatorArg) -> Self {
        match arg {
            SeparatorArg::Paragraph => Boundary::Paragraph,
            SeparatorArg::Sentence => Boundary::Sentence,
            SeparatorArg::None => Boundary::Unbounded,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum KindIdArg {
    Wordform,
    Lemma,
    LemmaPos,
}

impl From<KindIdArg> for KindId {
    fn from(arg: KindIdArg) -> Self {
        match arg {
            KindIdArg::Wordform => KindId::Wordform,
            KindIdArg::Lemma => KindId::Lemma,
            KindIdArg::LemmaPos => KindId::LemmaPos,
        }
    }
}

/// Execute one subcommand against a resolved configuration.
pub fn run(command: &Command, config: &Config) -> Result<ExportSummary> {
    match command {
        Command::Build(args) => {
            let files = args.input.files(&config.corpus_root)?;
            let output = args.output.as_ref().unwrap_or(&config.dictionary_path);
            export::export_dictionary(&files, config.load_mode, output)
        }
        Command::Table(args) => {
            let files = args.input.files(&config.corpus_root)?;
            let dictionary = load_dictionary(config)?;
            let options = TableOptions {
                keep_multiword: args.input.multiword,
                sense_only: args.sense,
                verbose: args.input.verbose,
            };
            let default_name = if args.sense { TABLE_SENSE_FILE } else { TABLE_FILE };
            let output = args
                .output
                .clone()
                .unwrap_or_else(|| config.output_root.join(default_name));
            export::export_table(&files, config.load_mode, &dictionary, &options, &output)
        }
        Command::Concordance(args) => {
            let files = args.input.files(&config.corpus_root)?;
            let dictionary = load_dictionary(config)?;
            let options = ConcordanceOptions {
                types: args.types.clone(),
                left: args.left,
                right: args.right,
                boundary: args.separator.into(),
                pos_filter: args.pos.clone(),
                add_closest: args.add_closest,
                kind_id: args.kind_id.into(),
                keep_multiword: args.input.multiword,
                verbose: args.input.verbose,
            };
            let output = args.output.clone().unwrap_or_else(|| {
                config
                    .output_root
                    .join(export::concordance_file_name(&args.types))
            });
            export::export_concordance(&files, config.load_mode, &dictionary, &options, &output)
        }
        Command::Tokens(args) => {
            let files = args.input.files(&config.corpus_root)?;
            let dictionary = load_dictionary(config)?;
            let dir = export::output_dir(
                args.output.as_deref(),
                &config.output_root.join(TOKENS_DIR),
            )?;
            export::export_tokens(
                &files,
                config.load_mode,
                &dictionary,
                args.input.multiword,
                args.input.verbose,
                &dir,
            )
        }
        Command::RunningText(args) => {
            let files = args.input.files(&config.corpus_root)?;
            let dictionary = load_dictionary(config)?;
            let dir = export::output_dir(
                args.output.as_deref(),
                &config.output_root.join(RUNNING_TEXT_DIR),
            )?;
            export::export_running_text(
                &files,
                config.load_mode,
                &dictionary,
                args.input.multiword,
                &dir,
            )
        }
    }
}

fn load_dictionary(config: &Config) -> Result<semcor_lemma::LemmaDictionary> {
    export::load_or_build_dictionary(&config.dictionary_path, &config.corpus_root, config.load_mode)
}
