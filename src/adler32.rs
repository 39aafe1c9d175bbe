//! Adler-32 checksum (RFC 1950) used for zlib framing.

const MOD_ADLER: u32 = 65_521;

/// Largest number of bytes that can be folded in before the sums must be
/// reduced to avoid 32-bit overflow.
const NMAX: usize = 5552;

/// Rolling Adler-32 checksum.
///
/// Defers modulo operations to chunk boundaries (NMAX = 5552), so feeding
/// bytes incrementally costs the same as a one-shot pass.
#[derive(Debug, Clone)]
pub struct Adler32 {
    s1: u32,
    s2: u32,
}

impl Adler32 {
    /// Create a checksum in its initial state (value 1).
    pub fn new() -> Self {
        Self { s1: 1, s2: 0 }
    }

    /// Fold `data` into the running checksum.
    pub fn update(&mut self, data: &[u8]) {
        for chunk in data.chunks(NMAX) {
            for &b in chunk {
                self.s1 += b as u32;
                self.s2 += self.s1;
            }
            self.s1 %= MOD_ADLER;
            self.s2 %= MOD_ADLER;
        }
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        self.s1 = 1;
        self.s2 = 0;
    }

    /// Current checksum value.
    pub fn value(&self) -> u32 {
        (self.s2 << 16) | self.s1
    }
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}
