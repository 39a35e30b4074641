use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use semcor_corpus::{CorpusFile, LoadMode, Subcorpus, list_files};
use semcor_types::TaggedNode;

fn main() -> Result<()> {
    let root = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p semcor-corpus --example stats -- <corpus-root>")?;

    let files = list_files(Subcorpus::All.paths(&root));
    let mut per_concordance: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    let mut paragraphs = 0usize;
    let mut sentences = 0usize;
    let mut multiwords = 0usize;
    let mut sense_tagged = 0usize;

    for path in &files {
        let file = CorpusFile::open(path, LoadMode::Mmap)
            .with_context(|| format!("loading {}", path.display()))?;
        let doc = file.document();
        paragraphs += doc.paragraphs().len();
        sentences += doc.paragraphs().iter().map(|p| p.sentences().len()).sum::<usize>();
        for node in doc.nodes().filter(|n| n.is_word()) {
            if node.text().contains('_') {
                multiwords += 1;
            }
            if node.attribute("wnsn").is_some() {
                sense_tagged += 1;
            }
        }
        let entry = per_concordance
            .entry(file.concordance().to_string())
            .or_default();
        entry.0 += 1;
        entry.1 += doc.word_count();
    }

    println!("Corpus root : {}", root.display());
    println!("Files       : {}", files.len());
    for (name, (count, words)) in &per_concordance {
        println!("  {:<8} {:>4} files {:>8} words", name, count, words);
    }
    println!("Paragraphs  : {}", paragraphs);
    println!("Sentences   : {}", sentences);
    println!("Multiwords  : {}", multiwords);
    println!("Sense-tagged: {}", sense_tagged);

    Ok(())
}
