//! Mini-batch iteration over an encoded dataset

use crate::dataset::{Dataset, EncodedPair};
use crate::error::{DatasetError, DatasetResult};
use std::slice::Chunks;

/// Consecutive pairs from the dataset, split by side
///
/// `source[i]` and `target[i]` always belong to the same example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<'a> {
    pub source: Vec<&'a [u32]>,
    pub target: Vec<&'a [u32]>,
}

impl Batch<'_> {
    /// Number of pairs in the batch
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Total ids across both sides, `<eos>` included
    pub fn num_tokens(&self) -> usize {
        self.source.iter().chain(&self.target).map(|s| s.len()).sum()
    }
}

/// One pass over the dataset in fixed-size batches
///
/// Every batch holds `batch_size` pairs except possibly the last. The pass
/// borrows the dataset, so it cannot be shuffled until the pass is dropped.
#[derive(Debug, Clone)]
pub struct Batches<'a> {
    chunks: Chunks<'a, EncodedPair>,
}

impl<'a> Iterator for Batches<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(|chunk| Batch {
            source: chunk.iter().map(|p| p.source.as_slice()).collect(),
            target: chunk.iter().map(|p| p.target.as_slice()).collect(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Batches<'_> {}

impl Dataset {
    /// Number of batches a pass of `batch_size` produces
    ///
    /// Equals `ceil(len / batch_size)`; zero when `batch_size` is zero.
    pub fn num_batches(&self, batch_size: usize) -> usize {
        if batch_size == 0 {
            return 0;
        }
        self.data.len().div_ceil(batch_size)
    }

    /// Start a fresh pass over the data in its current order
    ///
    /// # Errors
    /// [`DatasetError::BatchSizeTooLarge`] when `batch_size` exceeds the
    /// number of pairs, and [`DatasetError::InvalidConfig`] when it is zero.
    pub fn make_batches(&self, batch_size: usize) -> DatasetResult<Batches<'_>> {
        if batch_size == 0 {
            return Err(DatasetError::InvalidConfig(
                "batch size must be positive".to_string(),
            ));
        }
        if self.data.len() < batch_size {
            return Err(DatasetError::BatchSizeTooLarge {
                batch_size,
                data_size: self.data.len(),
            });
        }
        Ok(Batches {
            chunks: self.data.chunks(batch_size),
        })
    }
}
