//! Vocabulary management

use crate::special_tokens::{is_reserved, ReservedSymbol, NUM_RESERVED, RESERVED};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during vocabulary operations
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("max vocabulary size {max_size} is smaller than the {reserved} reserved symbols")]
    MaxSizeTooSmall { max_size: usize, reserved: usize },
    #[error("Index not found in vocabulary: {0}")]
    IndexNotFound(u32),
    #[error("Vocabulary holds {len} tokens but max size is {max_size}")]
    Oversized { len: usize, max_size: usize },
    #[error("Reserved symbol {expected} missing at index {index}")]
    MissingReserved { expected: &'static str, index: usize },
    #[error("Duplicate token in vocabulary: {0}")]
    DuplicateToken(String),
    #[error("Failed to access vocabulary file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn check_max_size(max_size: usize) -> Result<(), VocabularyError> {
    if max_size < NUM_RESERVED {
        return Err(VocabularyError::MaxSizeTooSmall {
            max_size,
            reserved: NUM_RESERVED,
        });
    }
    Ok(())
}

/// Open counting phase of a vocabulary
///
/// Every unseen token is assigned the next index without any cap and every
/// occurrence is counted. Calling [`VocabularyBuilder::trim`] consumes the
/// builder and yields the frozen [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    /// Cap applied by `trim`, reserved symbols included
    max_size: usize,
    /// Mapping from token to index
    token_to_id: HashMap<String, u32>,
    /// Mapping from index to token; its length is the next free index
    id_to_token: Vec<String>,
    /// Occurrence count per index
    counts: Vec<usize>,
}

impl VocabularyBuilder {
    /// Create a builder holding only the reserved symbols
    ///
    /// Fails if `max_size` cannot hold the reserved symbols.
    pub fn new(max_size: usize) -> Result<Self, VocabularyError> {
        check_max_size(max_size)?;

        let mut builder = Self {
            max_size,
            token_to_id: HashMap::new(),
            id_to_token: Vec::with_capacity(NUM_RESERVED),
            counts: Vec::with_capacity(NUM_RESERVED),
        };
        for symbol in RESERVED {
            builder.insert(symbol.to_string(), 0);
        }
        Ok(builder)
    }

    fn insert(&mut self, token: String, count: usize) -> u32 {
        let id = self.id_to_token.len() as u32;
        self.token_to_id.insert(token.clone(), id);
        self.id_to_token.push(token);
        self.counts.push(count);
        id
    }

    /// Count one occurrence of a token
    ///
    /// Returns the index assigned to the token. Unseen tokens get the next
    /// free index.
    pub fn add_token(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.token_to_id.get(token) {
            self.counts[id as usize] += 1;
            return id;
        }
        self.insert(token.to_string(), 1)
    }

    /// Count every token of a sequence, in order
    pub fn add_sequence<S: AsRef<str>>(&mut self, sequence: &[S]) {
        for token in sequence {
            self.add_token(token.as_ref());
        }
    }

    /// Number of occurrences counted for a token
    pub fn count(&self, token: &str) -> usize {
        self.token_to_id
            .get(token)
            .map_or(0, |&id| self.counts[id as usize])
    }

    /// Number of distinct tokens seen so far, reserved symbols included
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    /// True when only the reserved symbols are present
    pub fn is_empty(&self) -> bool {
        self.id_to_token.len() == NUM_RESERVED
    }

    /// Cap that `trim` will apply
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Freeze the vocabulary to at most `max_size` entries
    ///
    /// Non-reserved tokens are ranked by descending count; ties keep
    /// first-seen order. Reserved symbols come first, followed by the kept
    /// tokens in rank order, so indices stay contiguous from 0. Dropped
    /// tokens are gone for good.
    pub fn trim(mut self) -> Vocabulary {
        let mut ranked: Vec<usize> = (NUM_RESERVED..self.id_to_token.len()).collect();
        // stable sort over ascending ids keeps insertion order among ties
        ranked.sort_by(|&a, &b| self.counts[b].cmp(&self.counts[a]));
        let keep = self.max_size - NUM_RESERVED;
        let dropped = ranked.len().saturating_sub(keep);
        ranked.truncate(keep);

        let mut vocab = Vocabulary::reserved_only(self.max_size);
        for id in ranked {
            vocab.push(std::mem::take(&mut self.id_to_token[id]));
        }

        tracing::debug!(
            kept = vocab.len(),
            dropped,
            max_size = self.max_size,
            "trimmed vocabulary"
        );
        vocab
    }
}

/// Frozen vocabulary mapping between tokens and indices
///
/// Maintains bidirectional mappings:
/// - token -> index (for encoding)
/// - index -> token (for decoding)
///
/// Indices are exactly `0..len()`, with the reserved symbols at
/// `0..NUM_RESERVED`. A `Vocabulary` is read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VocabularyData", into = "VocabularyData")]
pub struct Vocabulary {
    max_size: usize,
    token_to_id: HashMap<String, u32>,
    id_to_token: Vec<String>,
}

impl Vocabulary {
    fn reserved_only(max_size: usize) -> Self {
        let mut vocab = Self {
            max_size,
            token_to_id: HashMap::new(),
            id_to_token: Vec::new(),
        };
        for symbol in RESERVED {
            vocab.push(symbol.to_string());
        }
        vocab
    }

    fn push(&mut self, token: String) {
        let id = self.id_to_token.len() as u32;
        self.token_to_id.insert(token.clone(), id);
        self.id_to_token.push(token);
    }

    /// Build a vocabulary from an externally ranked token list
    ///
    /// List position is treated as frequency rank; nothing is counted. At
    /// most `max_size - NUM_RESERVED` tokens are taken. Entries naming a
    /// reserved symbol and repeated entries are skipped.
    pub fn from_ranked_tokens<I, S>(max_size: usize, tokens: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        check_max_size(max_size)?;

        let mut vocab = Self::reserved_only(max_size);
        for token in tokens {
            if vocab.len() == max_size {
                break;
            }
            let token = token.as_ref();
            if is_reserved(token) || vocab.contains(token) {
                continue;
            }
            vocab.push(token.to_string());
        }
        Ok(vocab)
    }

    /// Map each token to its index and append the end-of-sequence index
    ///
    /// Tokens not in the vocabulary map to the unknown index. No
    /// start-of-sequence index is ever prepended.
    pub fn indices_from_sequence<S: AsRef<str>>(&self, sequence: &[S]) -> Vec<u32> {
        let mut ids = Vec::with_capacity(sequence.len() + 1);
        ids.extend(sequence.iter().map(|t| self.index_for_token(t.as_ref())));
        ids.push(self.eos_index());
        ids
    }

    /// Map each index back to its token
    ///
    /// Every id is decoded, so a trailing `<eos>` comes back as `"<eos>"`.
    pub fn sequence_from_indices(&self, ids: &[u32]) -> Result<Vec<&str>, VocabularyError> {
        ids.iter().map(|&id| self.token_for_index(id)).collect()
    }

    /// Get the index for a token, falling back to the unknown index
    pub fn index_for_token(&self, token: &str) -> u32 {
        self.token_to_id
            .get(token)
            .copied()
            .unwrap_or_else(|| self.unk_index())
    }

    /// Get the token for an index
    ///
    /// Returns an error if the index is out of range.
    pub fn token_for_index(&self, index: u32) -> Result<&str, VocabularyError> {
        self.id_to_token
            .get(index as usize)
            .map(|s| s.as_str())
            .ok_or(VocabularyError::IndexNotFound(index))
    }

    /// Check if a token exists in the vocabulary
    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    /// Number of entries, reserved symbols included
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    /// True when only the reserved symbols are present
    pub fn is_empty(&self) -> bool {
        self.id_to_token.len() == NUM_RESERVED
    }

    /// Configured cap, reserved symbols included
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// All tokens in index order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.id_to_token.iter().map(|s| s.as_str())
    }

    pub fn pad_index(&self) -> u32 {
        ReservedSymbol::Pad.index()
    }

    pub fn sos_index(&self) -> u32 {
        ReservedSymbol::Sos.index()
    }

    pub fn eos_index(&self) -> u32 {
        ReservedSymbol::Eos.index()
    }

    pub fn unk_index(&self) -> u32 {
        ReservedSymbol::Unk.index()
    }
}

/// Serialized form: tokens in index order, reserved symbols included
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VocabularyData {
    max_size: usize,
    tokens: Vec<String>,
}

impl From<Vocabulary> for VocabularyData {
    fn from(vocab: Vocabulary) -> Self {
        Self {
            max_size: vocab.max_size,
            tokens: vocab.id_to_token,
        }
    }
}

impl TryFrom<VocabularyData> for Vocabulary {
    type Error = VocabularyError;

    fn try_from(data: VocabularyData) -> Result<Self, Self::Error> {
        check_max_size(data.max_size)?;
        if data.tokens.len() > data.max_size {
            return Err(VocabularyError::Oversized {
                len: data.tokens.len(),
                max_size: data.max_size,
            });
        }
        for (index, expected) in RESERVED.into_iter().enumerate() {
            if data.tokens.get(index).map(|s| s.as_str()) != Some(expected) {
                return Err(VocabularyError::MissingReserved { expected, index });
            }
        }

        let mut vocab = Self {
            max_size: data.max_size,
            token_to_id: HashMap::with_capacity(data.tokens.len()),
            id_to_token: Vec::with_capacity(data.tokens.len()),
        };
        for token in data.tokens {
            if vocab.contains(&token) {
                return Err(VocabularyError::DuplicateToken(token));
            }
            vocab.push(token);
        }
        Ok(vocab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_starts_with_reserved() {
        let builder = VocabularyBuilder::new(10).unwrap();
        assert_eq!(builder.len(), NUM_RESERVED);
        assert!(builder.is_empty());
    }

    #[test]
    fn test_max_size_too_small() {
        let err = VocabularyBuilder::new(3).unwrap_err();
        assert!(matches!(
            err,
            VocabularyError::MaxSizeTooSmall { max_size: 3, reserved: 4 }
        ));
        assert!(Vocabulary::from_ranked_tokens(2, ["a"]).is_err());
    }

    #[test]
    fn test_add_token_counts() {
        let mut builder = VocabularyBuilder::new(10).unwrap();
        let id1 = builder.add_token("hello");
        let id2 = builder.add_token("hello");
        assert_eq!(id1, id2);
        assert_eq!(id1, NUM_RESERVED as u32);
        assert_eq!(builder.count("hello"), 2);
        assert_eq!(builder.count("absent"), 0);
    }

    #[test]
    fn test_add_token_uncapped_before_trim() {
        let mut builder = VocabularyBuilder::new(5).unwrap();
        builder.add_sequence(&["a", "b", "c", "d", "e"]);
        assert_eq!(builder.len(), NUM_RESERVED + 5);
    }

    #[test]
    fn test_trim_keeps_most_frequent() {
        let mut builder = VocabularyBuilder::new(6).unwrap();
        builder.add_sequence(&["a", "b", "b", "c", "c", "c"]);
        let vocab = builder.trim();

        assert_eq!(vocab.len(), 6);
        assert_eq!(vocab.token_for_index(4).unwrap(), "c");
        assert_eq!(vocab.token_for_index(5).unwrap(), "b");
        assert!(!vocab.contains("a"));
    }

    #[test]
    fn test_trim_ties_keep_first_seen_order() {
        let mut builder = VocabularyBuilder::new(7).unwrap();
        builder.add_sequence(&["z", "y", "x", "y", "z", "x"]);
        let vocab = builder.trim();

        let tokens: Vec<&str> = vocab.tokens().skip(NUM_RESERVED).collect();
        assert_eq!(tokens, vec!["z", "y", "x"]);
    }

    #[test]
    fn test_reserved_token_in_corpus_not_duplicated() {
        let mut builder = VocabularyBuilder::new(8).unwrap();
        builder.add_sequence(&["<eos>", "a", "<eos>"]);
        let vocab = builder.trim();

        assert_eq!(vocab.len(), NUM_RESERVED + 1);
        assert_eq!(vocab.index_for_token("<eos>"), vocab.eos_index());
    }

    #[test]
    fn test_indices_from_sequence_appends_eos() {
        let mut builder = VocabularyBuilder::new(10).unwrap();
        builder.add_sequence(&["hello", "world"]);
        let vocab = builder.trim();

        let ids = vocab.indices_from_sequence(&["hello", "novel"]);
        assert_eq!(ids, vec![4, vocab.unk_index(), vocab.eos_index()]);
    }

    #[test]
    fn test_token_for_index_out_of_range() {
        let vocab = Vocabulary::from_ranked_tokens(10, ["a"]).unwrap();
        assert!(matches!(
            vocab.token_for_index(5),
            Err(VocabularyError::IndexNotFound(5))
        ));
    }

    #[test]
    fn test_from_ranked_tokens_caps_and_skips() {
        let vocab =
            Vocabulary::from_ranked_tokens(6, ["the", "<unk>", "the", "a", "of"]).unwrap();
        let tokens: Vec<&str> = vocab.tokens().collect();
        assert_eq!(tokens, vec!["<pad>", "<sos>", "<eos>", "<unk>", "the", "a"]);
    }

    #[test]
    fn test_serde_roundtrip_and_validation() {
        let vocab = Vocabulary::from_ranked_tokens(8, ["x", "y"]).unwrap();
        let json = serde_json::to_string(&vocab).unwrap();
        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vocab);

        let bad = r#"{"max_size": 8, "tokens": ["<pad>", "<sos>", "<unk>", "<eos>"]}"#;
        assert!(serde_json::from_str::<Vocabulary>(bad).is_err());

        let dup = r#"{"max_size": 8, "tokens": ["<pad>", "<sos>", "<eos>", "<unk>", "a", "a"]}"#;
        assert!(serde_json::from_str::<Vocabulary>(dup).is_err());
    }
}
