use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use semcorproc::Config;
use semcorproc::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing();

    let config = Config::load(&args.global);
    info!("using corpus at {}", config.corpus_root.display());
    info!(
        "using lemma dictionary at {} (mode: {:?})",
        config.dictionary_path.display(),
        config.load_mode
    );

    let start = Instant::now();
    let summary = cli::run(&args.command, &config)?;
    info!(
        "{} files, {} rows written to {} in {} ms",
        summary.files,
        summary.rows,
        summary.output.display(),
        start.elapsed().as_millis()
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
