//! Bounded vocabularies for sequence-to-sequence data preparation
//!
//! This crate provides:
//! - Frequency counting and one-time trimming to a maximum size
//! - Reserved symbols (`<pad>`, `<sos>`, `<eos>`, `<unk>`) at fixed indices
//! - Encoding of token sequences into index sequences
//! - Ranked vocabulary list files
//!
//! # Example
//!
//! ```
//! use seq2seq_vocab::VocabularyBuilder;
//!
//! let mut builder = VocabularyBuilder::new(6).expect("max size holds reserved symbols");
//! builder.add_sequence(&["the", "cat", "the"]);
//! let vocab = builder.trim();
//!
//! // `<eos>` is appended, unseen tokens map to `<unk>`
//! let ids = vocab.indices_from_sequence(&["the", "dog"]);
//! assert_eq!(ids, vec![4, vocab.unk_index(), vocab.eos_index()]);
//! ```

pub mod io;
pub mod special_tokens;
pub mod vocab;

pub use io::{load_vocabulary, read_vocabulary, write_vocabulary};
pub use special_tokens::{ReservedSymbol, NUM_RESERVED};
pub use vocab::{Vocabulary, VocabularyBuilder, VocabularyError};
