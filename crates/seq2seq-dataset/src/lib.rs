//! Paired sequence dataset preparation
//!
//! This crate turns raw (source, target) token sequences into a corpus of
//! index sequences ready for a sequence-to-sequence training loop:
//! - Length filtering (over-length pairs are dropped whole)
//! - Vocabulary resolution per side (built from the corpus, prebuilt, or
//!   read from a ranked list file)
//! - Encoding through each side's vocabulary
//! - Shuffled, fixed-size mini-batches
//!
//! # Example
//!
//! ```
//! use seq2seq_dataset::{Dataset, DatasetConfig, VocabSource};
//!
//! let src = vec![vec!["hello", "world"], vec!["good", "morning"]];
//! let tgt = vec![vec!["bonjour", "monde"], vec!["bonjour"]];
//! let config = DatasetConfig::with_max_len(10, 10);
//!
//! let mut dataset = Dataset::from_list(
//!     &src,
//!     &tgt,
//!     &config,
//!     VocabSource::Unspecified,
//!     VocabSource::Unspecified,
//! )
//! .expect("Failed to build dataset");
//!
//! dataset.shuffle(Some(42));
//! for batch in dataset.make_batches(2).expect("batch size fits") {
//!     assert_eq!(batch.source.len(), batch.target.len());
//! }
//! ```

pub mod batch;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod error;

pub use batch::{Batch, Batches};
pub use config::DatasetConfig;
pub use corpus::RawPair;
pub use dataset::{Dataset, EncodedPair, VocabSource};
pub use error::{DatasetError, DatasetResult};
