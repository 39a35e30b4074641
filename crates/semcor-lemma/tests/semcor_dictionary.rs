use std::env;
use std::path::PathBuf;

use semcor_corpus::{CorpusFile, LoadMode, Subcorpus, list_files};
use semcor_lemma::DictionaryBuilder;
use semcor_types::Status;

fn corpus_root() -> Option<PathBuf> {
    env::var("SEMCOR_DIR").ok().map(PathBuf::from)
}

#[test]
fn builds_dictionary_from_brown1() {
    let Some(root) = corpus_root() else {
        eprintln!("skipping: SEMCOR_DIR not set");
        return;
    };
    let mut builder = DictionaryBuilder::new();
    for path in list_files(Subcorpus::Brown1.paths(&root)) {
        let file = CorpusFile::open(&path, LoadMode::Mmap).expect("load corpus file");
        builder.record_document(file.document().nodes());
    }
    let dict = builder.finish();

    assert!(dict.len() > 10_000, "dictionary too small");
    assert_eq!(dict.resolve_lemma("the", "DT", None), ("the".to_string(), Status::Ok));
    assert!(dict.lemma("said", "VB").is_some());
}
