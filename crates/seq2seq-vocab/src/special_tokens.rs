//! Reserved symbol handling

/// Padding symbol
pub const PAD: &str = "<pad>";
/// Start-of-sequence symbol
pub const SOS: &str = "<sos>";
/// End-of-sequence symbol
pub const EOS: &str = "<eos>";
/// Unknown-token symbol
pub const UNK: &str = "<unk>";

/// Reserved symbols in canonical index order
pub const RESERVED: [&str; 4] = [PAD, SOS, EOS, UNK];

/// Number of reserved symbols; they occupy indices `0..NUM_RESERVED`
pub const NUM_RESERVED: usize = RESERVED.len();

/// Reserved symbols that every vocabulary carries at fixed indices
///
/// The discriminant is the index the symbol occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedSymbol {
    /// Padding for batching sequences of different lengths
    Pad = 0,
    /// Marks the start of a decoded sequence
    Sos = 1,
    /// Marks the end of every encoded sequence
    Eos = 2,
    /// Stands in for tokens that are not in the vocabulary
    Unk = 3,
}

impl ReservedSymbol {
    /// All reserved symbols in canonical order
    pub fn all() -> [ReservedSymbol; NUM_RESERVED] {
        [Self::Pad, Self::Sos, Self::Eos, Self::Unk]
    }

    /// Surface form of the symbol
    pub fn as_str(self) -> &'static str {
        RESERVED[self as usize]
    }

    /// Index of the symbol in every vocabulary
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Look up a reserved symbol by its surface form
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.as_str() == token)
    }
}

/// Check if a token is one of the reserved symbols
pub fn is_reserved(token: &str) -> bool {
    RESERVED.contains(&token)
}
