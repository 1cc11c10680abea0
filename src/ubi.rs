//! Unique Block Iteration: Threefish-256 as a compression function.
//!
//! Tweak layout (128 bits): bits 0..96 hold the byte position, 120..126 the
//! block type, bit 126 marks the first block of a chain and bit 127 the last.

use crate::encoding::BLOCK_WORDS;
use crate::threefish::{encrypt, KeySchedule, Tweak};

pub const FIRST_BLOCK: u64 = 1 << 62;
pub const FINAL_BLOCK: u64 = 1 << 63;

const TYPE_SHIFT: u32 = 56;

/// Chain type tags, listed in the order chains are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BlockType {
    Key = 0,
    Config = 4,
    Personal = 8,
    PublicKey = 12,
    KeyId = 16,
    Nonce = 20,
    Message = 48,
    Output = 63,
}

impl BlockType {
    pub fn tag(self) -> u64 {
        self as u64
    }
}

/// Tweak for the first block of a chain of the given type.
pub fn chain_start(block_type: BlockType) -> Tweak {
    Tweak::new(0, block_type.tag() << TYPE_SHIFT | FIRST_BLOCK)
}

/// Tweak used for every output-chain block: one 8-byte counter, first and final.
pub fn output_tweak() -> Tweak {
    Tweak::new(
        8,
        BlockType::Output.tag() << TYPE_SHIFT | FIRST_BLOCK | FINAL_BLOCK,
    )
}

/// Advance the position field, carrying into the high word.
pub fn advance(tweak: &mut Tweak, bytes: u64) {
    let (t0, carry) = tweak.t0.overflowing_add(bytes);
    tweak.t0 = t0;
    if carry {
        tweak.t1 = tweak.t1.wrapping_add(1);
    }
}

/// Run one UBI step: encrypt `block` keyed by `chain` and feed the plaintext
/// forward, replacing `chain` with the result.
pub fn compress(chain: &mut [u64; BLOCK_WORDS], block: &[u64; BLOCK_WORDS], tweak: &Tweak) {
    let key = KeySchedule::from_words(chain);
    let mut cipher = *block;
    encrypt(&mut cipher, &key, tweak);
    for ((c, x), m) in chain.iter_mut().zip(cipher.iter()).zip(block.iter()) {
        *c = x ^ m;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threefish::decrypt;

    fn block_type(tweak: &Tweak) -> u64 {
        (tweak.t1 >> TYPE_SHIFT) & 0x3F
    }

    fn is_first(tweak: &Tweak) -> bool {
        tweak.t1 & FIRST_BLOCK != 0
    }

    fn is_final(tweak: &Tweak) -> bool {
        tweak.t1 & FINAL_BLOCK != 0
    }

    #[test]
    fn test_chain_start_flags() {
        let tweak = chain_start(BlockType::Message);
        assert_eq!(tweak.t0, 0);
        assert!(is_first(&tweak));
        assert!(!is_final(&tweak));
        assert_eq!(block_type(&tweak), 48);
    }

    #[test]
    fn test_output_tweak() {
        let tweak = output_tweak();
        assert_eq!(tweak.t0, 8);
        assert!(is_first(&tweak));
        assert!(is_final(&tweak));
        assert_eq!(block_type(&tweak), 63);
        assert_eq!(tweak.t1, 0xFF00_0000_0000_0000);
    }

    #[test]
    fn test_advance_carries_into_high_word() {
        let mut tweak = chain_start(BlockType::Nonce);
        tweak.t0 = u64::MAX - 10;
        advance(&mut tweak, 32);
        assert_eq!(tweak.t0, 21);
        assert_eq!(tweak.t1 & 0xFFFF_FFFF, 1);
        assert_eq!(block_type(&tweak), BlockType::Nonce.tag());
        assert!(is_first(&tweak));
    }

    #[test]
    fn test_block_type_order() {
        let order = [
            BlockType::Key,
            BlockType::Config,
            BlockType::Personal,
            BlockType::PublicKey,
            BlockType::KeyId,
            BlockType::Nonce,
            BlockType::Message,
            BlockType::Output,
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_compress_feeds_plaintext_forward() {
        let start = [1u64, 2, 3, 4];
        let block = [0xAAu64, 0xBB, 0xCC, 0xDD];
        let mut tweak = chain_start(BlockType::Message);
        advance(&mut tweak, 32);

        let mut chain = start;
        compress(&mut chain, &block, &tweak);

        // Undo the feed-forward, then the cipher, to get the block back.
        let mut recovered = [0u64; 4];
        for i in 0..4 {
            recovered[i] = chain[i] ^ block[i];
        }
        decrypt(&mut recovered, &KeySchedule::from_words(&start), &tweak);
        assert_eq!(recovered, block);
    }
}
