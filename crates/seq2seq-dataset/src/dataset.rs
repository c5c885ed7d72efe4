//! Encoded paired corpus
//!
//! A [`Dataset`] owns the source and target vocabularies and the corpus as
//! index sequences. It is built once, from a TAB-separated file or from two
//! parallel in-memory lists; both routes filter by length and then go
//! through the same encoding step.

use crate::config::DatasetConfig;
use crate::corpus::{filter_pairs, pairs_from_lists, read_pairs, RawPair};
use crate::error::DatasetResult;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use seq2seq_vocab::{load_vocabulary, Vocabulary, VocabularyBuilder};
use std::path::{Path, PathBuf};

/// Where the vocabulary for one side of the corpus comes from
#[derive(Debug, Clone, Default)]
pub enum VocabSource {
    /// Count the corpus and trim to the configured max size
    #[default]
    Unspecified,
    /// Use as-is; the configured max size is ignored
    Prebuilt(Vocabulary),
    /// Ranked token list file, one token per line, cut at the max size
    ExternalList(PathBuf),
}

impl VocabSource {
    fn resolve<'a, I>(self, sequences: I, max_vocab: usize) -> DatasetResult<Vocabulary>
    where
        I: Iterator<Item = &'a [String]>,
    {
        let vocab = match self {
            VocabSource::Unspecified => {
                let mut builder = VocabularyBuilder::new(max_vocab)?;
                for sequence in sequences {
                    builder.add_sequence(sequence);
                }
                builder.trim()
            }
            VocabSource::Prebuilt(vocab) => vocab,
            VocabSource::ExternalList(path) => load_vocabulary(&path, max_vocab)?,
        };
        Ok(vocab)
    }
}

impl From<Vocabulary> for VocabSource {
    fn from(vocab: Vocabulary) -> Self {
        VocabSource::Prebuilt(vocab)
    }
}

impl From<Option<PathBuf>> for VocabSource {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(VocabSource::Unspecified, VocabSource::ExternalList)
    }
}

/// One training example as index sequences, each ending in `<eos>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPair {
    pub source: Vec<u32>,
    pub target: Vec<u32>,
}

/// In-memory encoded corpus with its two vocabularies
///
/// The number of pairs is fixed after construction; only their order changes,
/// through [`Dataset::shuffle`].
#[derive(Debug, Clone)]
pub struct Dataset {
    src_max_len: usize,
    tgt_max_len: usize,
    input_vocab: Vocabulary,
    output_vocab: Vocabulary,
    pub(crate) data: Vec<EncodedPair>,
    rng: StdRng,
}

impl Dataset {
    /// Build a dataset from a file of TAB-separated pairs
    ///
    /// # Arguments
    /// * `path` - Corpus file, one `source<TAB>target` record per line
    /// * `config` - Length caps and vocabulary sizes
    /// * `src_vocab` - Source vocabulary source
    /// * `tgt_vocab` - Target vocabulary source
    pub fn from_file(
        path: &Path,
        config: &DatasetConfig,
        src_vocab: VocabSource,
        tgt_vocab: VocabSource,
    ) -> DatasetResult<Self> {
        config.validate_lengths()?;
        let pairs = read_pairs(path)?;
        Self::encode(pairs, config, src_vocab, tgt_vocab)
    }

    /// Build a dataset from parallel lists of pre-tokenized sequences
    ///
    /// `src_data[i]` and `tgt_data[i]` form the i-th pair; the lists must
    /// have the same length.
    pub fn from_list<S: AsRef<str>>(
        src_data: &[Vec<S>],
        tgt_data: &[Vec<S>],
        config: &DatasetConfig,
        src_vocab: VocabSource,
        tgt_vocab: VocabSource,
    ) -> DatasetResult<Self> {
        config.validate_lengths()?;
        let pairs = pairs_from_lists(src_data, tgt_data)?;
        Self::encode(pairs, config, src_vocab, tgt_vocab)
    }

    fn encode(
        pairs: Vec<RawPair>,
        config: &DatasetConfig,
        src_vocab: VocabSource,
        tgt_vocab: VocabSource,
    ) -> DatasetResult<Self> {
        let total = pairs.len();
        let pairs = filter_pairs(pairs, config.src_max_len, config.tgt_max_len);

        // Both vocabularies are final before any pair is encoded
        let input_vocab = src_vocab.resolve(
            pairs.iter().map(|p| p.source.as_slice()),
            config.src_max_vocab,
        )?;
        let output_vocab = tgt_vocab.resolve(
            pairs.iter().map(|p| p.target.as_slice()),
            config.tgt_max_vocab,
        )?;

        let data: Vec<EncodedPair> = pairs
            .iter()
            .map(|p| EncodedPair {
                source: input_vocab.indices_from_sequence(&p.source),
                target: output_vocab.indices_from_sequence(&p.target),
            })
            .collect();

        tracing::info!(
            retained = data.len(),
            dropped = total - data.len(),
            src_vocab = input_vocab.len(),
            tgt_vocab = output_vocab.len(),
            "encoded dataset"
        );

        Ok(Self {
            src_max_len: config.src_max_len,
            tgt_max_len: config.tgt_max_len,
            input_vocab,
            output_vocab,
            data,
            rng: StdRng::from_entropy(),
        })
    }

    /// Replace the generator used by [`Dataset::shuffle`]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Permute the pairs in place
    ///
    /// With a seed the owned generator is reseeded first, so the same seed
    /// applied to the same order gives the same permutation. Without one the
    /// generator's stream simply continues; it starts from OS entropy.
    /// Source and target of a pair always move together.
    pub fn shuffle(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.data.shuffle(&mut self.rng);
        tracing::debug!(pairs = self.data.len(), ?seed, "shuffled dataset");
    }

    /// Number of retained pairs
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encoded pairs in current order
    pub fn pairs(&self) -> &[EncodedPair] {
        &self.data
    }

    pub fn input_vocab(&self) -> &Vocabulary {
        &self.input_vocab
    }

    pub fn output_vocab(&self) -> &Vocabulary {
        &self.output_vocab
    }

    pub fn src_max_len(&self) -> usize {
        self.src_max_len
    }

    pub fn tgt_max_len(&self) -> usize {
        self.tgt_max_len
    }
}
