//! Raw corpus reading and length filtering
//!
//! Produces the filtered (source tokens, target tokens) pairs the encoder
//! consumes. Tokenization is plain whitespace splitting.

use crate::error::{DatasetError, DatasetResult};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One raw training example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    pub source: Vec<String>,
    pub target: Vec<String>,
}

impl RawPair {
    pub fn new<S: AsRef<str>>(source: &[S], target: &[S]) -> Self {
        Self {
            source: source.iter().map(|t| t.as_ref().to_string()).collect(),
            target: target.iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Read TAB-separated pairs, one per line
///
/// Blank lines are skipped. The first TAB splits source from target; a
/// non-blank line without one is a [`DatasetError::MalformedRecord`].
pub fn read_pairs(path: &Path) -> DatasetResult<Vec<RawPair>> {
    let io_error = |source: std::io::Error| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = fs::File::open(path).map_err(io_error)?;
    let reader = BufReader::new(file);

    let mut pairs = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(io_error)?;
        if line.trim().is_empty() {
            continue;
        }

        let (source, target) = line
            .split_once('\t')
            .ok_or_else(|| DatasetError::MalformedRecord {
                path: path.to_path_buf(),
                line: line_num + 1,
            })?;

        pairs.push(RawPair {
            source: tokenize(source),
            target: tokenize(target),
        });
    }

    tracing::debug!(path = %path.display(), pairs = pairs.len(), "read corpus");
    Ok(pairs)
}

/// Pair up two parallel lists of pre-tokenized sequences by position
pub fn pairs_from_lists<S: AsRef<str>>(
    src_data: &[Vec<S>],
    tgt_data: &[Vec<S>],
) -> DatasetResult<Vec<RawPair>> {
    if src_data.len() != tgt_data.len() {
        return Err(DatasetError::LengthMismatch {
            src: src_data.len(),
            tgt: tgt_data.len(),
        });
    }

    Ok(src_data
        .iter()
        .zip(tgt_data)
        .map(|(src, tgt)| RawPair::new(src, tgt))
        .collect())
}

/// Drop every pair whose source or target is longer than its cap
///
/// Over-length pairs are excluded whole, never truncated. Order of the kept
/// pairs is preserved.
pub fn filter_pairs(pairs: Vec<RawPair>, src_max_len: usize, tgt_max_len: usize) -> Vec<RawPair> {
    let total = pairs.len();
    let kept: Vec<RawPair> = pairs
        .into_iter()
        .filter(|p| p.source.len() <= src_max_len && p.target.len() <= tgt_max_len)
        .collect();

    tracing::debug!(
        kept = kept.len(),
        dropped = total - kept.len(),
        src_max_len,
        tgt_max_len,
        "filtered pairs by length"
    );
    kept
}
