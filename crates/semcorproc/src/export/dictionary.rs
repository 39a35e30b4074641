use std::path::{Path, PathBuf};
use std::time::Instant;

use semcor_corpus::{CorpusFile, LoadMode, Subcorpus, list_files};
use semcor_lemma::{DictionaryBuilder, LemmaDictionary};
use tracing::info;

use super::ExportSummary;
use crate::error::{ExportError, Result};

/// Record every `<wf>` node of `files`, in order, into a fresh dictionary.
pub fn build_dictionary(files: &[PathBuf], mode: LoadMode) -> Result<LemmaDictionary> {
    let mut builder = DictionaryBuilder::new();
    for path in files {
        let file = CorpusFile::open(path, mode)?;
        builder.record_document(file.document().nodes());
        info!("file \"{}\" processed", file.shortname());
    }
    Ok(builder.finish())
}

/// Build a dictionary from `files` and save it as JSON at `output`.
pub fn export_dictionary(
    files: &[PathBuf],
    mode: LoadMode,
    output: &Path,
) -> Result<ExportSummary> {
    if files.is_empty() {
        return Err(ExportError::NoInputs);
    }
    let dictionary = build_dictionary(files, mode)?;
    dictionary.save(output)?;
    Ok(ExportSummary {
        files: files.len(),
        rows: dictionary.len(),
        output: output.to_path_buf(),
    })
}

/// Load the dictionary at `path`, or build it from the whole corpus under
/// `corpus_root` and save it there first.
pub fn load_or_build_dictionary(
    path: &Path,
    corpus_root: &Path,
    mode: LoadMode,
) -> Result<LemmaDictionary> {
    if path.is_file() {
        let start = Instant::now();
        let dictionary = LemmaDictionary::load(path)?;
        info!(
            "lemma dictionary loaded from {} in {} ms ({} word forms)",
            path.display(),
            start.elapsed().as_millis(),
            dictionary.len()
        );
        return Ok(dictionary);
    }

    info!(
        "no lemma dictionary at {}; building one from {}",
        path.display(),
        corpus_root.display()
    );
    let files = list_files(Subcorpus::All.paths(corpus_root));
    if files.is_empty() {
        return Err(ExportError::NoInputs);
    }
    let dictionary = build_dictionary(&files, mode)?;
    dictionary.save(path)?;
    info!("lemma dictionary saved to {}", path.display());
    Ok(dictionary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn corpus(root: &Path) {
        let tagfiles = root.join("brown1").join("tagfiles");
        fs::create_dir_all(&tagfiles).unwrap();
        fs::write(
            tagfiles.join("br-x01"),
            "<p><s><wf pos=NN lemma=cat>cats</wf><wf pos=DT>The</wf></s></p>",
        )
        .unwrap();
    }

    #[test]
    fn builds_and_saves_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        corpus(tmp.path());
        let path = tmp.path().join("out").join("lemma_dictionary.json");
        let dict = load_or_build_dictionary(&path, tmp.path(), LoadMode::Owned).unwrap();
        assert_eq!(dict.lemma("cats", "NN"), Some("cat"));
        assert_eq!(dict.lemma("The", "DT"), Some("the"));
        assert!(path.is_file());

        let reloaded = load_or_build_dictionary(&path, Path::new("/nonexistent"), LoadMode::Owned)
            .unwrap();
        assert_eq!(reloaded, dict);
    }

    #[test]
    fn missing_corpus_is_no_inputs() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_or_build_dictionary(&tmp.path().join("d.json"), tmp.path(), LoadMode::Mmap)
            .unwrap_err();
        assert!(matches!(err, ExportError::NoInputs));
    }

    #[test]
    fn export_requires_inputs() {
        let tmp = tempfile::tempdir().unwrap();
        let err = export_dictionary(&[], LoadMode::Mmap, &tmp.path().join("d.json")).unwrap_err();
        assert!(matches!(err, ExportError::NoInputs));
    }
}
