//! Bit-level output buffering for DEFLATE block emission.

/// Pending output buffer that packs bits into bytes, LSB first.
///
/// All encoded output funnels through this buffer. The engine checks
/// [`is_flushed`](PendingBuffer::is_flushed) before producing more tokens,
/// and the caller drains completed bytes between `deflate` calls. A partial
/// trailing byte stays in the accumulator until
/// [`align_to_byte`](PendingBuffer::align_to_byte) pads it out.
#[derive(Debug)]
pub struct PendingBuffer {
    buffer: Vec<u8>,
    current_byte: u8,
    bit_position: u8,
}

impl PendingBuffer {
    /// Create a new pending buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a new pending buffer with specified byte capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            current_byte: 0,
            bit_position: 0,
        }
    }

    /// Write bits to the stream, LSB first.
    ///
    /// # Arguments
    /// * `value` - The value to write (only lower `num_bits` are used)
    /// * `num_bits` - Number of bits to write (1-32)
    #[inline]
    pub fn write_bits(&mut self, value: u32, num_bits: u8) {
        debug_assert!(num_bits <= 32);

        let mut value = value;
        let mut remaining = num_bits;

        while remaining > 0 {
            let available = 8 - self.bit_position;
            let to_write = remaining.min(available);

            // Extract the bits we want to write
            let mask = (1u32 << to_write) - 1;
            let bits = (value & mask) as u8;

            // Add to current byte at the correct position
            self.current_byte |= bits << self.bit_position;

            self.bit_position += to_write;
            value >>= to_write;
            remaining -= to_write;

            // If byte is full, flush it
            if self.bit_position == 8 {
                self.buffer.push(self.current_byte);
                self.current_byte = 0;
                self.bit_position = 0;
            }
        }
    }

    /// Pad the partial byte with zero bits up to the next byte boundary.
    pub fn align_to_byte(&mut self) {
        if self.bit_position > 0 {
            self.buffer.push(self.current_byte);
            self.current_byte = 0;
            self.bit_position = 0;
        }
    }

    /// Append raw bytes. Must be byte-aligned.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        debug_assert_eq!(self.bit_position, 0, "Must be byte-aligned");
        self.buffer.extend_from_slice(bytes);
    }

    /// True when no completed bytes are awaiting drain.
    pub fn is_flushed(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of completed bytes awaiting drain (not counting the partial
    /// byte).
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// Bits in the partial trailing byte (0-7).
    pub fn bits_pending(&self) -> u8 {
        self.bit_position
    }

    /// Move all completed bytes into `out`, returning how many were moved.
    pub fn drain_into(&mut self, out: &mut Vec<u8>) -> usize {
        let n = self.buffer.len();
        out.extend_from_slice(&self.buffer);
        self.buffer.clear();
        n
    }

    /// Discard all buffered output and return to the initial state.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.current_byte = 0;
        self.bit_position = 0;
    }
}

impl Default for PendingBuffer {
    fn default() -> Self {
        Self::new()
    }
}
