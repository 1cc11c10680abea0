//! Threefish-256 tweakable block cipher.
//!
//! 72 rounds over a 256-bit block in 18 groups of four. Every group starts
//! with a subkey injection built from the 5-word key schedule, the 3-word
//! tweak and the group counter; a final injection closes the last group.
//!
//! ```text
//! round:  x0 += x1; x1 = rotl(x1, R[r][0]) ^ x0
//!         x2 += x3; x3 = rotl(x3, R[r][1]) ^ x2
//!         swap(x1, x3)
//! ```

use crate::encoding::{block_to_words, tweak_to_words, words_to_block, BLOCK_BYTES, BLOCK_WORDS};

/// Key schedule parity constant.
pub const C240: u64 = 0x1BD1_1BDA_A9FC_1A22;

/// Total rounds for the 256-bit variant.
pub const ROUNDS: usize = 72;

/// Number of subkey injections (one per four rounds, plus the closing one).
pub const SUBKEYS: usize = ROUNDS / 4 + 1;

/// Rotation constants for Threefish-256, cycling every eight rounds.
const ROTATIONS: [[u32; 2]; 8] = [
    [14, 16],
    [52, 57],
    [23, 40],
    [5, 37],
    [25, 33],
    [46, 12],
    [58, 22],
    [32, 32],
];

/// Expanded 256-bit key: four key words plus their parity word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySchedule([u64; 5]);

impl KeySchedule {
    /// Build a schedule from four key words, computing the parity word.
    pub fn from_words(words: &[u64; BLOCK_WORDS]) -> Self {
        let parity = C240 ^ words[0] ^ words[1] ^ words[2] ^ words[3];
        Self([words[0], words[1], words[2], words[3], parity])
    }

    pub fn from_bytes(key: &[u8; BLOCK_BYTES]) -> Self {
        Self::from_words(&block_to_words(key))
    }

    pub fn words(&self) -> &[u64; 5] {
        &self.0
    }
}

/// 128-bit tweak. The third word is derived on demand so it never goes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tweak {
    pub t0: u64,
    pub t1: u64,
}

impl Tweak {
    pub const fn new(t0: u64, t1: u64) -> Self {
        Self { t0, t1 }
    }

    pub fn from_bytes(tweak: &[u8; 16]) -> Self {
        let [t0, t1] = tweak_to_words(tweak);
        Self { t0, t1 }
    }

    /// The three words consumed by the key injection: `t0`, `t1`, `t0 ^ t1`.
    pub fn expanded(&self) -> [u64; 3] {
        [self.t0, self.t1, self.t0 ^ self.t1]
    }
}

#[inline(always)]
fn inject_subkey(x: &mut [u64; BLOCK_WORDS], ks: &[u64; 5], ts: &[u64; 3], s: usize) {
    x[0] = x[0].wrapping_add(ks[s % 5]);
    x[1] = x[1].wrapping_add(ks[(s + 1) % 5]).wrapping_add(ts[s % 3]);
    x[2] = x[2].wrapping_add(ks[(s + 2) % 5]).wrapping_add(ts[(s + 1) % 3]);
    x[3] = x[3].wrapping_add(ks[(s + 3) % 5]).wrapping_add(s as u64);
}

#[inline(always)]
fn remove_subkey(x: &mut [u64; BLOCK_WORDS], ks: &[u64; 5], ts: &[u64; 3], s: usize) {
    x[0] = x[0].wrapping_sub(ks[s % 5]);
    x[1] = x[1].wrapping_sub(ks[(s + 1) % 5]).wrapping_sub(ts[s % 3]);
    x[2] = x[2].wrapping_sub(ks[(s + 2) % 5]).wrapping_sub(ts[(s + 1) % 3]);
    x[3] = x[3].wrapping_sub(ks[(s + 3) % 5]).wrapping_sub(s as u64);
}

/// Encrypt one block of words in place.
pub fn encrypt(block: &mut [u64; BLOCK_WORDS], key: &KeySchedule, tweak: &Tweak) {
    let ks = key.words();
    let ts = tweak.expanded();
    let mut x = *block;

    for s in 0..SUBKEYS - 1 {
        inject_subkey(&mut x, ks, &ts, s);
        for r in 0..4 {
            let [r0, r1] = ROTATIONS[(s % 2) * 4 + r];
            x[0] = x[0].wrapping_add(x[1]);
            x[1] = x[1].rotate_left(r0) ^ x[0];
            x[2] = x[2].wrapping_add(x[3]);
            x[3] = x[3].rotate_left(r1) ^ x[2];
            x.swap(1, 3);
        }
    }
    inject_subkey(&mut x, ks, &ts, SUBKEYS - 1);

    *block = x;
}

/// Decrypt one block of words in place. Exact inverse of [`encrypt`].
pub fn decrypt(block: &mut [u64; BLOCK_WORDS], key: &KeySchedule, tweak: &Tweak) {
    let ks = key.words();
    let ts = tweak.expanded();
    let mut x = *block;

    remove_subkey(&mut x, ks, &ts, SUBKEYS - 1);
    for s in (0..SUBKEYS - 1).rev() {
        for r in (0..4).rev() {
            let [r0, r1] = ROTATIONS[(s % 2) * 4 + r];
            x.swap(1, 3);
            x[1] = (x[1] ^ x[0]).rotate_right(r0);
            x[0] = x[0].wrapping_sub(x[1]);
            x[3] = (x[3] ^ x[2]).rotate_right(r1);
            x[2] = x[2].wrapping_sub(x[3]);
        }
        remove_subkey(&mut x, ks, &ts, s);
    }

    *block = x;
}

/// Byte-oriented Threefish-256 with a fixed key and tweak.
#[derive(Debug, Clone)]
pub struct Threefish256 {
    key: KeySchedule,
    tweak: Tweak,
}

impl Threefish256 {
    pub fn new(key: &[u8; BLOCK_BYTES], tweak: &[u8; 16]) -> Self {
        Self {
            key: KeySchedule::from_bytes(key),
            tweak: Tweak::from_bytes(tweak),
        }
    }

    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_BYTES]) {
        let mut words = block_to_words(block);
        encrypt(&mut words, &self.key, &self.tweak);
        *block = words_to_block(&words);
    }

    pub fn decrypt_block(&self, block: &mut [u8; BLOCK_BYTES]) {
        let mut words = block_to_words(block);
        decrypt(&mut words, &self.key, &self.tweak);
        *block = words_to_block(&words);
    }
}
