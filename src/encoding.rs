//! Little-endian conversions between byte blocks and 64-bit words.

/// Bytes in one Threefish-256 block.
pub const BLOCK_BYTES: usize = 32;

/// 64-bit words in one block.
pub const BLOCK_WORDS: usize = 4;

/// Decode a 32-byte block into four little-endian words.
pub fn block_to_words(bytes: &[u8; BLOCK_BYTES]) -> [u64; BLOCK_WORDS] {
    let mut words = [0u64; BLOCK_WORDS];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut le = [0u8; 8];
        le.copy_from_slice(chunk);
        *word = u64::from_le_bytes(le);
    }
    words
}

/// Encode four words as a 32-byte little-endian block.
pub fn words_to_block(words: &[u64; BLOCK_WORDS]) -> [u8; BLOCK_BYTES] {
    let mut bytes = [0u8; BLOCK_BYTES];
    for (chunk, word) in bytes.chunks_exact_mut(8).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    bytes
}

/// Decode a 16-byte tweak into its two stored words.
pub fn tweak_to_words(bytes: &[u8; 16]) -> [u64; 2] {
    let mut lo = [0u8; 8];
    let mut hi = [0u8; 8];
    lo.copy_from_slice(&bytes[..8]);
    hi.copy_from_slice(&bytes[8..]);
    [u64::from_le_bytes(lo), u64::from_le_bytes(hi)]
}
