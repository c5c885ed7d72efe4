//! Ranked vocabulary list files
//!
//! One token per line in descending frequency rank. Only the first
//! whitespace-delimited field of a line is read, so `token count` listings
//! work as well. Blank lines are skipped.

use crate::special_tokens::NUM_RESERVED;
use crate::vocab::{Vocabulary, VocabularyError};
use std::fs;
use std::path::Path;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> VocabularyError + '_ {
    move |source| VocabularyError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a ranked token list in file order
pub fn read_vocabulary(path: &Path) -> Result<Vec<String>, VocabularyError> {
    let content = fs::read_to_string(path).map_err(io_error(path))?;
    Ok(content
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect())
}

/// Read a ranked token list and build a vocabulary capped at `max_size`
///
/// Tokens past the cap are dropped with a warning.
pub fn load_vocabulary(path: &Path, max_size: usize) -> Result<Vocabulary, VocabularyError> {
    let tokens = read_vocabulary(path)?;
    let vocab = Vocabulary::from_ranked_tokens(max_size, &tokens)?;

    if tokens.len() > vocab.len() - NUM_RESERVED {
        tracing::warn!(
            path = %path.display(),
            listed = tokens.len(),
            kept = vocab.len() - NUM_RESERVED,
            "vocabulary list cut at max size"
        );
    }
    Ok(vocab)
}

/// Write the non-reserved tokens one per line in index order
///
/// The output reads back through [`load_vocabulary`] into the same
/// vocabulary, given the same `max_size`.
pub fn write_vocabulary(vocab: &Vocabulary, path: &Path) -> Result<(), VocabularyError> {
    let mut content = String::new();
    for token in vocab.tokens().skip(NUM_RESERVED) {
        content.push_str(token);
        content.push('\n');
    }
    fs::write(path, content).map_err(io_error(path))
}
