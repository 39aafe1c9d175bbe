//! The streaming DEFLATE compression engine.
//!
//! [`Deflater`] owns the LZ77 sliding window, the hash chains used for the
//! match search, and the block encoder. Callers attach input regions with
//! [`set_input`](Deflater::set_input), drive compression with
//! [`deflate`](Deflater::deflate), and drain the produced bytes with
//! [`drain_output`](Deflater::drain_output) between calls.

mod drivers;
mod matching;
mod window;

use crate::adler32::Adler32;
use crate::bits::PendingBuffer;
use crate::error::{Error, Result};
use crate::huffman::HuffmanCoder;

/// Size of the active half of the sliding window.
pub(crate) const WSIZE: usize = 32768;

/// Ring mask for the `prev` chain table.
pub(crate) const WMASK: usize = WSIZE - 1;

/// Shortest match worth encoding.
pub(crate) const MIN_MATCH: usize = 3;

/// Longest match DEFLATE can encode.
pub(crate) const MAX_MATCH: usize = 258;

/// Lookahead needed for a full match search plus the inserts that follow it.
pub(crate) const MIN_LOOKAHEAD: usize = MAX_MATCH + MIN_MATCH + 1;

/// Largest back-reference distance the engine will emit.
pub(crate) const MAX_DIST: usize = WSIZE - MIN_LOOKAHEAD;

const HASH_BITS: usize = 15;
const HASH_SIZE: usize = 1 << HASH_BITS;
const HASH_MASK: usize = HASH_SIZE - 1;

/// Shift per byte of the rolling hash; MIN_MATCH steps cover HASH_BITS.
const HASH_SHIFT: usize = (HASH_BITS + MIN_MATCH - 1) / MIN_MATCH;

/// Largest stored-block payload.
pub(crate) const MAX_BLOCK_SIZE: usize = 65535;

/// Matches of minimum length this far back cost more bits than they save.
pub(crate) const TOO_FAR: usize = 4096;

/// Match-acceptance policy applied during the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Accept any match the search finds.
    #[default]
    Default,
    /// Discard short matches aggressively; pays off on filtered data such
    /// as PNG rows, where small matches are mostly noise.
    Filtered,
    /// Never emit back-references; entropy-code literals only.
    HuffmanOnly,
}

/// Block-production mode, selected by the compression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Pass bytes through in stored blocks.
    Store,
    /// Greedy matching, emit as soon as a match is found.
    Fast,
    /// Lazy matching, defer one position to pick the better match.
    Slow,
}

/// Per-level tunables.
struct Config {
    good_length: usize,
    max_lazy: usize,
    nice_length: usize,
    max_chain: usize,
    mode: Mode,
}

#[rustfmt::skip]
const CONFIGS: [Config; 10] = [
    Config { good_length: 0,  max_lazy: 0,   nice_length: 0,   max_chain: 0,    mode: Mode::Store },
    Config { good_length: 4,  max_lazy: 4,   nice_length: 8,   max_chain: 4,    mode: Mode::Fast },
    Config { good_length: 4,  max_lazy: 5,   nice_length: 16,  max_chain: 8,    mode: Mode::Fast },
    Config { good_length: 4,  max_lazy: 6,   nice_length: 32,  max_chain: 32,   mode: Mode::Fast },
    Config { good_length: 4,  max_lazy: 4,   nice_length: 16,  max_chain: 16,   mode: Mode::Slow },
    Config { good_length: 8,  max_lazy: 16,  nice_length: 32,  max_chain: 32,   mode: Mode::Slow },
    Config { good_length: 8,  max_lazy: 16,  nice_length: 128, max_chain: 128,  mode: Mode::Slow },
    Config { good_length: 32, max_lazy: 32,  nice_length: 128, max_chain: 256,  mode: Mode::Slow },
    Config { good_length: 32, max_lazy: 128, nice_length: 258, max_chain: 1024, mode: Mode::Slow },
    Config { good_length: 32, max_lazy: 258, nice_length: 258, max_chain: 4096, mode: Mode::Slow },
];

/// Streaming DEFLATE compression engine.
///
/// The engine is single-threaded and exclusively owned; all tables are
/// allocated once at construction and reused across [`reset`](Deflater::reset).
///
/// # Example
///
/// ```rust
/// use flato::Deflater;
///
/// let mut engine = Deflater::new(6).unwrap();
/// engine.set_input(b"Hello, Hello, Hello.", 0, 20).unwrap();
///
/// let mut compressed = Vec::new();
/// while engine.deflate(true, true) {
///     engine.drain_output(&mut compressed);
/// }
/// engine.drain_output(&mut compressed);
/// assert!(compressed.len() < 20);
/// ```
pub struct Deflater {
    /// Sliding window: active half plus staging half. Valid bytes are
    /// `[0, strstart + lookahead)`.
    window: Vec<u8>,
    /// `head[h]` is the most recent window index with hash `h`; 0 is empty
    /// (positions start at 1, so 0 never names a real position).
    head: Vec<u16>,
    /// `prev[i & WMASK]` chains window index `i` to the previous index with
    /// the same hash.
    prev: Vec<u16>,
    /// Rolling hash over the MIN_MATCH bytes at `strstart`.
    ins_h: usize,
    /// Next window position to process.
    strstart: usize,
    /// Valid bytes ahead of `strstart`.
    lookahead: usize,
    /// Window index where the current block began. Signed: a slide can move
    /// the block origin below index zero while its tokens are still buffered.
    block_start: isize,
    /// Start of the best match found by the last search. Signed for the same
    /// reason as `block_start`.
    match_start: isize,
    /// Length of the best match; below MIN_MATCH means "no current match".
    match_len: usize,
    /// Lazy mode: a literal at `strstart - 1` awaits the match-vs-literal
    /// decision.
    prev_available: bool,
    strategy: Strategy,
    mode: Mode,
    level: u32,
    good_length: usize,
    max_lazy: usize,
    nice_length: usize,
    max_chain: usize,
    /// Attached input not yet copied into the window.
    input: Vec<u8>,
    input_off: usize,
    /// Bytes admitted into the window over the stream's lifetime.
    total_in: u64,
    adler: Adler32,
    huffman: HuffmanCoder,
    pending: PendingBuffer,
}

impl Deflater {
    /// Create an engine for the given compression level (0-9).
    pub fn new(level: u32) -> Result<Self> {
        let mut engine = Self {
            window: vec![0; 2 * WSIZE],
            head: vec![0; HASH_SIZE],
            prev: vec![0; WSIZE],
            ins_h: 0,
            strstart: 1,
            lookahead: 0,
            block_start: 1,
            match_start: 0,
            match_len: MIN_MATCH - 1,
            prev_available: false,
            strategy: Strategy::Default,
            mode: Mode::Store,
            level: 0,
            good_length: 0,
            max_lazy: 0,
            nice_length: 0,
            max_chain: 0,
            input: Vec::new(),
            input_off: 0,
            total_in: 0,
            adler: Adler32::new(),
            huffman: HuffmanCoder::new(),
            pending: PendingBuffer::new(),
        };
        engine.set_level(level)?;
        Ok(engine)
    }

    /// Attach an input region for the engine to consume.
    ///
    /// Fails with [`Error::InputPending`] if previously attached input has
    /// not been fully consumed, and with [`Error::RegionOutOfBounds`] if
    /// `offset + count` overflows or exceeds `buffer`. On error the engine
    /// state is unchanged.
    pub fn set_input(&mut self, buffer: &[u8], offset: usize, count: usize) -> Result<()> {
        if self.input_off < self.input.len() {
            return Err(Error::InputPending);
        }
        let end = offset.checked_add(count).ok_or(Error::RegionOutOfBounds {
            offset,
            count,
            buffer_len: buffer.len(),
        })?;
        if end > buffer.len() {
            return Err(Error::RegionOutOfBounds {
                offset,
                count,
                buffer_len: buffer.len(),
            });
        }
        self.input.clear();
        self.input.extend_from_slice(&buffer[offset..end]);
        self.input_off = 0;
        Ok(())
    }

    /// True when the attached input has been fully consumed.
    pub fn needs_input(&self) -> bool {
        self.input_off == self.input.len()
    }

    /// Change the compression level mid-stream.
    ///
    /// If the block-production mode changes, the current block is closed
    /// first so output up to this point stays decodable, which may leave
    /// bytes in the pending buffer.
    pub fn set_level(&mut self, level: u32) -> Result<()> {
        let config = CONFIGS
            .get(level as usize)
            .ok_or(Error::InvalidLevel(level))?;

        if config.mode != self.mode {
            match self.mode {
                Mode::Store => {
                    if self.strstart as isize > self.block_start {
                        let start = self.block_start as usize;
                        self.huffman.flush_stored_block(
                            &self.window[start..self.strstart],
                            false,
                            &mut self.pending,
                        );
                        self.block_start = self.strstart as isize;
                    }
                    if self.lookahead >= MIN_MATCH {
                        self.update_hash();
                    }
                }
                Mode::Fast => {
                    if self.strstart as isize > self.block_start {
                        let len = (self.strstart as isize - self.block_start) as usize;
                        self.flush_huffman_block(len, false);
                        self.block_start = self.strstart as isize;
                    }
                }
                Mode::Slow => {
                    if self.prev_available {
                        self.huffman.tally_lit(self.window[self.strstart - 1]);
                    }
                    if self.strstart as isize > self.block_start {
                        let len = (self.strstart as isize - self.block_start) as usize;
                        self.flush_huffman_block(len, false);
                        self.block_start = self.strstart as isize;
                    }
                    self.prev_available = false;
                    self.match_len = MIN_MATCH - 1;
                }
            }
            self.mode = config.mode;
        }

        self.level = level;
        self.good_length = config.good_length;
        self.max_lazy = config.max_lazy;
        self.nice_length = config.nice_length;
        self.max_chain = config.max_chain;
        Ok(())
    }

    /// Current compression level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Change the match-acceptance strategy; takes effect on subsequent
    /// search decisions.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Return the engine to its initial state, keeping level, strategy, and
    /// allocations.
    pub fn reset(&mut self) {
        self.huffman.reset();
        self.adler.reset();
        self.pending.reset();
        self.head.fill(0);
        self.prev.fill(0);
        self.ins_h = 0;
        self.strstart = 1;
        self.lookahead = 0;
        self.block_start = 1;
        self.match_start = 0;
        self.match_len = MIN_MATCH - 1;
        self.prev_available = false;
        self.input.clear();
        self.input_off = 0;
        self.total_in = 0;
    }

    /// Reset only the checksum (used by container writers between members).
    pub fn reset_adler(&mut self) {
        self.adler.reset();
    }

    /// Adler-32 of every byte admitted into the window so far.
    pub fn adler(&self) -> u32 {
        self.adler.value()
    }

    /// Total bytes admitted into the window over the stream's lifetime.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Drive compression forward.
    ///
    /// Consumes attached input and produces tokens/blocks until input runs
    /// out for this call or output accumulates in the pending buffer.
    /// Returns whether progress was made (tokens emitted or the window
    /// advanced). With `flush`, the current block is closed once input is
    /// consumed; with `finish`, the final block carries the last-block
    /// marker once the lookahead drains, after which the stream is complete
    /// and `deflate` returns false.
    pub fn deflate(&mut self, flush: bool, finish: bool) -> bool {
        let mut progress;
        loop {
            self.fill_window();
            let can_flush = flush && self.needs_input();
            progress = match self.mode {
                Mode::Store => self.deflate_stored(can_flush, finish),
                Mode::Fast => self.deflate_fast(can_flush, finish),
                Mode::Slow => self.deflate_slow(can_flush, finish),
            };
            if !(self.pending.is_flushed() && progress) {
                break;
            }
        }
        progress
    }

    /// Move completed output bytes into `out`, returning how many were moved.
    pub fn drain_output(&mut self, out: &mut Vec<u8>) -> usize {
        self.pending.drain_into(out)
    }

    /// Completed output bytes currently awaiting drain.
    pub fn pending_output(&self) -> usize {
        self.pending.pending_len()
    }

    /// Flush a Huffman-coded block covering `len` window bytes ending at
    /// `strstart` (minus the pending literal in lazy mode). The stored
    /// fallback is only offered while the block's bytes are all still in
    /// the window.
    fn flush_huffman_block(&mut self, len: usize, last: bool) {
        if self.block_start >= 0 {
            let start = self.block_start as usize;
            self.huffman
                .flush_block(Some(&self.window[start..start + len]), last, &mut self.pending);
        } else {
            self.huffman.flush_block(None, last, &mut self.pending);
        }
    }
}
