use crate::error::{FbsError, Result};
use std::io;

pub const PRIME_1: u32 = 0x9E37_79B1;
pub const PRIME_2: u32 = 0x85EB_CA77;
pub const PRIME_3: u32 = 0xC2B2_AE3D;
pub const PRIME_4: u32 = 0x27D4_EB2F;
pub const PRIME_5: u32 = 0x1656_67B1;

/// Streaming 32-bit xxHash state
///
/// Input is consumed in 16-byte stripes, one little-endian word per lane.
/// Bytes that do not complete a stripe stay in `buf` until the next write
/// or until `digest` folds them into the tail.
#[derive(Debug, Clone)]
pub struct Xxh32 {
    seed: u32,
    acc1: u32,
    acc2: u32,
    acc3: u32,
    acc4: u32,
    buf: [u8; 16],
    /// Number of bytes in `buf` (always < 16)
    buffered: usize,
    total: u32,
}

impl Xxh32 {
    /// Digest size in bytes
    pub const SIZE: usize = 4;
    /// Stripe size in bytes
    pub const BLOCK_SIZE: usize = 16;

    /// Create a hasher with seed 0
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create a hasher with the given seed
    pub fn with_seed(seed: u32) -> Self {
        let mut hasher = Self {
            seed,
            acc1: 0,
            acc2: 0,
            acc3: 0,
            acc4: 0,
            buf: [0u8; 16],
            buffered: 0,
            total: 0,
        };
        hasher.reset();
        hasher
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Replace the seed and reset to the freshly seeded state
    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
        self.reset();
    }

    /// Discard all written input, keeping the seed
    pub fn reset(&mut self) {
        self.acc1 = self.seed.wrapping_add(PRIME_1).wrapping_add(PRIME_2);
        self.acc2 = self.seed.wrapping_add(PRIME_2);
        self.acc3 = self.seed;
        self.acc4 = self.seed.wrapping_sub(PRIME_1);
        self.buf = [0u8; 16];
        self.buffered = 0;
        self.total = 0;
    }

    /// Total number of bytes written since the last reset
    pub fn total_len(&self) -> u32 {
        self.total
    }

    /// Feed bytes into the hash, returning how many were consumed
    ///
    /// Splitting input across several writes yields the same digest as one
    /// write of the concatenation. Fails without touching the state if the
    /// running byte count would no longer fit in 32 bits.
    pub fn write(&mut self, input: &[u8]) -> Result<usize> {
        let needed = input.len();
        let total = u32::try_from(needed)
            .ok()
            .and_then(|n| self.total.checked_add(n))
            .ok_or(FbsError::InputTooLarge {
                total: self.total,
                additional: needed,
            })?;
        self.total = total;

        let mut input = input;

        // Not enough to complete the pending stripe
        let remaining = Self::BLOCK_SIZE - self.buffered;
        if needed < remaining {
            self.buf[self.buffered..self.buffered + needed].copy_from_slice(input);
            self.buffered += needed;
            return Ok(needed);
        }

        if self.buffered > 0 {
            self.buf[self.buffered..].copy_from_slice(&input[..remaining]);
            let stripe = self.buf;
            self.consume_stripe(&stripe);
            input = &input[remaining..];
            self.buffered = 0;
        }

        let mut stripes = input.chunks_exact(Self::BLOCK_SIZE);
        for stripe in &mut stripes {
            self.consume_stripe(stripe);
        }

        let tail = stripes.remainder();
        self.buf[..tail.len()].copy_from_slice(tail);
        self.buffered = tail.len();

        Ok(needed)
    }

    /// Current digest; does not modify the state
    pub fn digest(&self) -> u32 {
        let mut acc = self.total;
        if self.total < Self::BLOCK_SIZE as u32 {
            acc = acc.wrapping_add(self.acc3.wrapping_add(PRIME_5));
        } else {
            acc = acc.wrapping_add(
                self.acc1
                    .rotate_left(1)
                    .wrapping_add(self.acc2.rotate_left(7))
                    .wrapping_add(self.acc3.rotate_left(12))
                    .wrapping_add(self.acc4.rotate_left(18)),
            );
        }

        let tail = &self.buf[..self.buffered];
        let mut words = tail.chunks_exact(4);
        for word in &mut words {
            acc = acc.wrapping_add(read_u32_le(word).wrapping_mul(PRIME_3));
            acc = acc.rotate_left(17).wrapping_mul(PRIME_4);
        }
        for &byte in words.remainder() {
            acc = acc.wrapping_add((byte as u32).wrapping_mul(PRIME_5));
            acc = acc.rotate_left(11).wrapping_mul(PRIME_1);
        }

        avalanche(acc)
    }

    /// Digest as big-endian bytes
    pub fn digest_bytes(&self) -> [u8; 4] {
        self.digest().to_be_bytes()
    }

    /// Append the big-endian digest to `out`
    pub fn append_digest(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.digest_bytes());
    }

    fn consume_stripe(&mut self, stripe: &[u8]) {
        self.acc1 = round(self.acc1, read_u32_le(&stripe[0..4]));
        self.acc2 = round(self.acc2, read_u32_le(&stripe[4..8]));
        self.acc3 = round(self.acc3, read_u32_le(&stripe[8..12]));
        self.acc4 = round(self.acc4, read_u32_le(&stripe[12..16]));
    }
}

impl Default for Xxh32 {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for Xxh32 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Xxh32::write(self, buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One-shot digest of `input` with `seed`
pub fn hash32(input: &[u8], seed: u32) -> Result<u32> {
    let mut hasher = Xxh32::with_seed(seed);
    hasher.write(input)?;
    Ok(hasher.digest())
}

/// One-shot digest with seed 0, the form used for key derivation
pub fn checksum(input: &[u8]) -> Result<u32> {
    hash32(input, 0)
}

#[inline]
fn round(acc: u32, word: u32) -> u32 {
    acc.wrapping_add(word.wrapping_mul(PRIME_2))
        .rotate_left(13)
        .wrapping_mul(PRIME_1)
}

#[inline]
fn avalanche(mut acc: u32) -> u32 {
    acc ^= acc >> 15;
    acc = acc.wrapping_mul(PRIME_2);
    acc ^= acc >> 13;
    acc = acc.wrapping_mul(PRIME_3);
    acc ^ (acc >> 16)
}

#[inline]
fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
