use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use semcor_lemma::LemmaDictionary;
use semcor_types::{NO_POS, Resolution, Token};

fn main() -> Result<()> {
    let usage =
        "usage: cargo run -p semcor-lemma --example lookup -- <dictionary.json> <word> [pos]";
    let mut args = env::args().skip(1);
    let path = args.next().map(PathBuf::from).context(usage)?;
    let word = args.next().context(usage)?;
    let pos = args.next().unwrap_or_else(|| NO_POS.to_string());
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let dict = LemmaDictionary::load(&path)
        .with_context(|| format!("loading dictionary from {}", path.display()))?;
    println!("Dictionary: {} ({} word forms)", path.display(), dict.len());

    match dict.get(&word) {
        Some(entry) => {
            println!("\nRecorded for {:?}:", word);
            for (tag, lemma) in entry {
                println!("  {:<6} {}", tag, lemma);
            }
        }
        None => println!("\n{:?} is not in the dictionary", word),
    }

    let (resolved_pos, pos_status) = dict.resolve_pos(&word, &pos);
    let (lemma, lemma_status) = dict.resolve_lemma(&word, &resolved_pos, None);
    println!("\nresolve_pos   -> {:<10} [{}]", resolved_pos, pos_status);
    println!("resolve_lemma -> {:<10} [{}]", lemma, lemma_status);

    let token = Token::new(word.as_str(), pos.as_str(), lemma.as_str(), Resolution::OK);
    if token.is_multiword() {
        println!("\nComponents:");
        for part in dict.expand(&token) {
            println!(
                "  {:<12} {:<6} {:<12} [{}/{}]",
                part.wordform, part.pos, part.lemma, part.status.pos, part.status.lemma
            );
        }
    }

    Ok(())
}
