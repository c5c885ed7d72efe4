//! Integration tests for encoding, decoding and vocabulary files

use seq2seq_vocab::{
    load_vocabulary, write_vocabulary, Vocabulary, VocabularyBuilder, VocabularyError,
    NUM_RESERVED,
};
use tempfile::TempDir;

fn build(sequences: &[&[&str]], max_size: usize) -> Vocabulary {
    let mut builder = VocabularyBuilder::new(max_size).expect("Failed to create builder");
    for seq in sequences {
        builder.add_sequence(seq);
    }
    builder.trim()
}

#[test]
fn test_known_and_novel_token() {
    let vocab = build(&[&["hello", "world"]], 100);

    let ids = vocab.indices_from_sequence(&["hello", "stranger"]);
    assert_eq!(ids.len(), 3);
    assert_ne!(ids[0], vocab.unk_index());
    assert_eq!(ids[1], vocab.unk_index());
    assert_eq!(ids[2], vocab.eos_index());
}

#[test]
fn test_encode_decode_roundtrip() {
    let sentence = ["the", "quick", "brown", "fox", "the"];
    let vocab = build(&[&sentence], 100);

    let ids = vocab.indices_from_sequence(&sentence);
    let decoded = vocab.sequence_from_indices(&ids).unwrap();

    assert_eq!(&decoded[..sentence.len()], &sentence[..]);
    assert_eq!(decoded.last(), Some(&"<eos>"));
}

#[test]
fn test_trimmed_tokens_decode_as_unknown() {
    // "rare" appears once and falls off a vocabulary with room for two tokens
    let vocab = build(&[&["a", "a", "b", "b", "rare"]], NUM_RESERVED + 2);

    let ids = vocab.indices_from_sequence(&["a", "rare", "b"]);
    let decoded = vocab.sequence_from_indices(&ids).unwrap();
    assert_eq!(decoded, vec!["a", "<unk>", "b", "<eos>"]);
}

#[test]
fn test_decode_rejects_out_of_range() {
    let vocab = build(&[&["a"]], 10);
    let err = vocab.sequence_from_indices(&[0, 99]).unwrap_err();
    assert!(matches!(err, VocabularyError::IndexNotFound(99)));
}

#[test]
fn test_write_then_load_preserves_order() {
    let vocab = build(&[&["x", "y", "y", "z", "z", "z"]], 20);
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("src.vocab");

    write_vocabulary(&vocab, &path).expect("Failed to write vocabulary");
    let loaded = load_vocabulary(&path, 20).expect("Failed to load vocabulary");

    assert_eq!(loaded, vocab);
}

#[test]
fn test_load_caps_at_max_size() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("ranked.txt");
    std::fs::write(&path, "a\nb\nc\nd\ne\n").expect("Failed to write list");

    let vocab = load_vocabulary(&path, NUM_RESERVED + 3).expect("Failed to load vocabulary");
    let tokens: Vec<&str> = vocab.tokens().skip(NUM_RESERVED).collect();
    assert_eq!(tokens, vec!["a", "b", "c"]);
}
