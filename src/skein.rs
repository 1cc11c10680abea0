//! Skein-256 streaming hash.
//!
//! Construction runs the configuration chains once:
//!
//! ```text
//! [Key] → Config → [Personal] → [PublicKey] → [KeyId] → [Nonce]
//! ```
//!
//! and snapshots the resulting chaining value. Messages then flow through a
//! Message chain, and the digest is squeezed out of an Output chain keyed by
//! a block counter.

use crate::config::{config_block, Config};
use crate::encoding::{block_to_words, words_to_block, BLOCK_BYTES, BLOCK_WORDS};
use crate::error::{Result, SkeinError};
use crate::threefish::Tweak;
use crate::ubi::{advance, chain_start, compress, output_tweak, BlockType, FINAL_BLOCK, FIRST_BLOCK};
use std::io;

/// Largest digest size whose bit length still fits the config block.
pub const MAX_DIGEST_SIZE: usize = (u64::MAX / 8) as usize;

/// Everything that changes while a chain absorbs input.
#[derive(Debug, Clone, Copy)]
struct ChainState {
    chain: [u64; BLOCK_WORDS],
    tweak: Tweak,
    buffer: [u8; BLOCK_BYTES],
    offset: usize,
}

impl ChainState {
    fn new(chain: [u64; BLOCK_WORDS], block_type: BlockType) -> Self {
        Self {
            chain,
            tweak: chain_start(block_type),
            buffer: [0u8; BLOCK_BYTES],
            offset: 0,
        }
    }

    /// Buffer `data`, compressing a full block only once more input follows it.
    fn absorb(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            if self.offset == BLOCK_BYTES {
                self.compress_buffer(BLOCK_BYTES);
                self.tweak.t1 &= !FIRST_BLOCK;
                self.offset = 0;
            }
            let take = (BLOCK_BYTES - self.offset).min(data.len());
            self.buffer[self.offset..self.offset + take].copy_from_slice(&data[..take]);
            self.offset += take;
            data = &data[take..];
        }
    }

    /// Close the chain: zero-pad the buffer and compress it as the final block.
    fn finish(&mut self) -> [u64; BLOCK_WORDS] {
        self.buffer[self.offset..].fill(0);
        self.tweak.t1 |= FINAL_BLOCK;
        self.compress_buffer(self.offset);
        self.offset = 0;
        self.chain
    }

    fn compress_buffer(&mut self, real_bytes: usize) {
        advance(&mut self.tweak, real_bytes as u64);
        let block = block_to_words(&self.buffer);
        compress(&mut self.chain, &block, &self.tweak);
    }
}

/// Run one complete UBI chain over `data`.
fn run_chain(chain: [u64; BLOCK_WORDS], block_type: BlockType, data: &[u8]) -> [u64; BLOCK_WORDS] {
    let mut state = ChainState::new(chain, block_type);
    state.absorb(data);
    state.finish()
}

/// Incremental Skein-256 hasher with an arbitrary output length.
#[derive(Debug, Clone)]
pub struct Skein256 {
    size: usize,
    state: ChainState,
    /// Chaining value right after configuration; `reset` returns here.
    configured: [u64; BLOCK_WORDS],
}

impl Skein256 {
    /// Create a hasher producing `size` digest bytes.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_config(size, &Config::default())
    }

    /// Create a hasher producing `size` digest bytes under `config`.
    pub fn with_config(size: usize, config: &Config) -> Result<Self> {
        if size == 0 || size > MAX_DIGEST_SIZE {
            return Err(SkeinError::InvalidDigestSize(size));
        }

        let mut chain = [0u64; BLOCK_WORDS];
        if !config.key.is_empty() {
            chain = run_chain(chain, BlockType::Key, &config.key);
        }
        chain = run_chain(chain, BlockType::Config, &config_block(size as u64 * 8));
        for (block_type, data) in config.trailing_chains() {
            chain = run_chain(chain, block_type, data);
        }

        Ok(Self {
            size,
            state: ChainState::new(chain, BlockType::Message),
            configured: chain,
        })
    }

    /// Block size of the underlying cipher in bytes.
    pub fn block_size(&self) -> usize {
        BLOCK_BYTES
    }

    /// Digest size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Absorb message bytes. Always consumes the whole slice.
    pub fn write(&mut self, data: &[u8]) -> usize {
        self.state.absorb(data);
        data.len()
    }

    /// Return to the freshly configured state, keeping the configuration.
    pub fn reset(&mut self) {
        self.state = ChainState::new(self.configured, BlockType::Message);
    }

    /// Digest of everything written so far. The hasher stays usable.
    pub fn finalize(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.size];
        self.squeeze(&mut out);
        out
    }

    /// Append the digest to `prefix` and return it.
    pub fn finalize_append(&self, mut prefix: Vec<u8>) -> Vec<u8> {
        let start = prefix.len();
        prefix.resize(start + self.size, 0);
        self.squeeze(&mut prefix[start..]);
        prefix
    }

    /// Write the digest into `out`, which must be exactly [`size`](Self::size) bytes.
    pub fn finalize_into(&self, out: &mut [u8]) -> Result<()> {
        if out.len() != self.size {
            return Err(SkeinError::OutputSizeMismatch {
                expected: self.size,
                actual: out.len(),
            });
        }
        self.squeeze(out);
        Ok(())
    }

    fn squeeze(&self, out: &mut [u8]) {
        let mut state = self.state;
        let chain = state.finish();
        let tweak = output_tweak();

        for (counter, chunk) in out.chunks_mut(BLOCK_BYTES).enumerate() {
            let block = [counter as u64, 0, 0, 0];
            let mut output = chain;
            compress(&mut output, &block, &tweak);
            chunk.copy_from_slice(&words_to_block(&output)[..chunk.len()]);
        }
    }
}

/// One-shot Skein-256 digest of `data`.
pub fn hash(size: usize, data: &[u8]) -> Result<Vec<u8>> {
    hash_with_config(size, &Config::default(), data)
}

/// One-shot Skein-256 digest of `data` under `config`.
pub fn hash_with_config(size: usize, config: &Config, data: &[u8]) -> Result<Vec<u8>> {
    let mut hasher = Skein256::with_config(size, config)?;
    hasher.write(data);
    Ok(hasher.finalize())
}

impl io::Write for Skein256 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Skein256::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl digest::HashMarker for Skein256 {}

impl digest::Update for Skein256 {
    fn update(&mut self, data: &[u8]) {
        self.write(data);
    }
}

impl digest::Reset for Skein256 {
    fn reset(&mut self) {
        Skein256::reset(self);
    }
}

impl digest::VariableOutput for Skein256 {
    const MAX_OUTPUT_SIZE: usize = MAX_DIGEST_SIZE;

    fn new(output_size: usize) -> std::result::Result<Self, digest::InvalidOutputSize> {
        Skein256::new(output_size).map_err(|_| digest::InvalidOutputSize)
    }

    fn output_size(&self) -> usize {
        self.size
    }

    fn finalize_variable(self, out: &mut [u8]) -> std::result::Result<(), digest::InvalidBufferSize> {
        if out.len() != self.size {
            return Err(digest::InvalidBufferSize);
        }
        self.squeeze(out);
        Ok(())
    }
}

impl digest::VariableOutputReset for Skein256 {
    fn finalize_variable_reset(
        &mut self,
        out: &mut [u8],
    ) -> std::result::Result<(), digest::InvalidBufferSize> {
        if out.len() != self.size {
            return Err(digest::InvalidBufferSize);
        }
        self.squeeze(out);
        Skein256::reset(self);
        Ok(())
    }
}
