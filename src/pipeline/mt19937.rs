const N: usize = 624;
const M: usize = 397;
const INIT_MULTIPLIER: u32 = 1_812_433_253;
const MATRIX_A: u32 = 0x9908_B0DF;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;

/// 32-bit Mersenne Twister (MT19937)
///
/// The state is twisted lazily: the cursor starts at 0, so the first output
/// (and every 624th after it) triggers a full twist.
#[derive(Clone)]
pub struct Mt19937 {
    state: [u32; N],
    index: usize,
}

impl Mt19937 {
    /// Seed the generator with the reference `init_genrand` recurrence
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { state, index: 0 }
    }

    /// Next tempered 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        if self.index == 0 {
            self.twist();
        }

        let mut y = self.state[self.index];
        y ^= y >> 11;
        y ^= (y << 7) & 0x9D2C_5680;
        y ^= (y << 15) & 0xEFC6_0000;
        y ^= y >> 18;

        self.index = (self.index + 1) % N;
        y
    }

    /// Next output with the top bit shifted out, always in `0..2^31`
    pub fn next_u31(&mut self) -> u32 {
        self.next_u32() >> 1
    }

    /// Fill `dest` from the 31-bit output stream
    ///
    /// Each 4-byte chunk is one `next_u31` value, least-significant byte
    /// first; a short final chunk keeps only the low bytes. Every fourth byte
    /// therefore has its high bit clear. Key derivation depends on this exact
    /// layout, so it must not be swapped for the full 32-bit word.
    pub fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let value = self.next_u31().to_le_bytes();
            chunk.copy_from_slice(&value[..chunk.len()]);
        }
    }

    /// Produce `length` bytes from the 31-bit output stream
    ///
    /// # Panics
    ///
    /// Panics if `length` is 0. Callers taking lengths from user input
    /// validate them first.
    pub fn next_bytes(&mut self, length: usize) -> Vec<u8> {
        assert!(length > 0, "invalid bytes length: {}", length);
        let mut buf = vec![0u8; length];
        self.fill_bytes(&mut buf);
        buf
    }

    fn twist(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            self.state[i] = self.state[(i + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                self.state[i] ^= MATRIX_A;
            }
        }
    }
}

impl std::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
