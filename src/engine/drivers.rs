//! The three block-production drivers.
//!
//! All three share the window and hash state and differ only in emission
//! policy: stored passes bytes through, fast commits every match greedily,
//! and slow defers each match by one position to see whether the next
//! position holds a longer one.

use super::{Deflater, Strategy, MAX_BLOCK_SIZE, MAX_DIST, MIN_LOOKAHEAD, MIN_MATCH, TOO_FAR, WSIZE};

impl Deflater {
    /// Absorb the lookahead into the current stored block, emitting it when
    /// the block fills, would slide out of the window, or a flush is due.
    ///
    /// Returns `!last` when a block was emitted, otherwise whether any
    /// bytes were consumed.
    pub(crate) fn deflate_stored(&mut self, flush: bool, finish: bool) -> bool {
        if !flush && self.lookahead == 0 {
            return false;
        }

        self.strstart += self.lookahead;
        self.lookahead = 0;

        debug_assert!(self.block_start >= 0, "stored block slid out of window");
        let stored_len = (self.strstart as isize - self.block_start) as usize;

        if stored_len >= MAX_BLOCK_SIZE
            || (self.block_start < WSIZE as isize && stored_len >= MAX_DIST)
            || flush
        {
            // A size-triggered emit can fire while input is still attached;
            // the absorbed lookahead alone says nothing about that.
            let mut last = finish && self.needs_input();
            let mut len = stored_len;
            if len >= MAX_BLOCK_SIZE {
                // A capped block is never the last one, even at an exact
                // fit: the closing empty block follows separately.
                len = MAX_BLOCK_SIZE;
                last = false;
            }

            let start = self.block_start as usize;
            self.huffman
                .flush_stored_block(&self.window[start..start + len], last, &mut self.pending);
            self.block_start += len as isize;
            return !last;
        }

        true
    }

    /// Greedy matching: take the first acceptable match at each position.
    pub(crate) fn deflate_fast(&mut self, flush: bool, finish: bool) -> bool {
        if self.lookahead < MIN_LOOKAHEAD && !flush {
            return false;
        }

        while self.lookahead >= MIN_LOOKAHEAD || flush {
            if self.lookahead == 0 {
                // Everything tallied; close out the block.
                let len = (self.strstart as isize - self.block_start) as usize;
                self.flush_huffman_block(len, finish);
                self.block_start = self.strstart as isize;
                return false;
            }

            if self.strstart > 2 * WSIZE - MIN_LOOKAHEAD {
                // Only reachable while flushing with a nearly full window,
                // but the match search needs the headroom.
                self.slide_window();
            }

            let mut hash_head = 0;
            if self.lookahead >= MIN_MATCH {
                hash_head = self.insert_string();
            }

            let bflush;
            if hash_head != 0
                && self.strategy != Strategy::HuffmanOnly
                && self.strstart - hash_head <= MAX_DIST
                && self.find_longest_match(hash_head)
            {
                let distance = (self.strstart as isize - self.match_start) as usize;
                bflush = self.huffman.tally_dist(distance, self.match_len);

                self.lookahead -= self.match_len;

                // Chaining every matched position only pays off for short
                // matches; long ones advance in one step and reseed the hash.
                if self.match_len <= self.max_lazy && self.lookahead >= MIN_MATCH {
                    for _ in 1..self.match_len {
                        self.strstart += 1;
                        self.insert_string();
                    }
                    self.strstart += 1;
                } else {
                    self.strstart += self.match_len;
                    if self.lookahead >= MIN_MATCH - 1 {
                        self.update_hash();
                    }
                }
                self.match_len = MIN_MATCH - 1;
            } else {
                bflush = self.huffman.tally_lit(self.window[self.strstart]);
                self.strstart += 1;
                self.lookahead -= 1;
            }

            if bflush {
                let last = finish && self.lookahead == 0;
                let len = (self.strstart as isize - self.block_start) as usize;
                self.flush_huffman_block(len, last);
                self.block_start = self.strstart as isize;
                return !last;
            }
        }

        true
    }

    /// Lazy matching: hold each match for one position and emit the better
    /// of the match here and the match one byte later.
    pub(crate) fn deflate_slow(&mut self, flush: bool, finish: bool) -> bool {
        if self.lookahead < MIN_LOOKAHEAD && !flush {
            return false;
        }

        while self.lookahead >= MIN_LOOKAHEAD || flush {
            if self.lookahead == 0 {
                if self.prev_available {
                    self.huffman.tally_lit(self.window[self.strstart - 1]);
                }
                self.prev_available = false;

                let len = (self.strstart as isize - self.block_start) as usize;
                self.flush_huffman_block(len, finish);
                self.block_start = self.strstart as isize;
                return false;
            }

            if self.strstart >= 2 * WSIZE - MIN_LOOKAHEAD {
                self.slide_window();
            }

            let prev_match = self.match_start;
            let prev_len = self.match_len;

            if self.lookahead >= MIN_MATCH {
                let hash_head = self.insert_string();
                if self.strategy != Strategy::HuffmanOnly
                    && hash_head != 0
                    && self.strstart - hash_head <= MAX_DIST
                    && self.find_longest_match(hash_head)
                {
                    // Discard short matches that are unlikely to pay for
                    // their distance bits.
                    if self.match_len <= 5
                        && (self.strategy == Strategy::Filtered
                            || (self.match_len == MIN_MATCH
                                && self.strstart as isize - self.match_start > TOO_FAR as isize))
                    {
                        self.match_len = MIN_MATCH - 1;
                    }
                }
            }

            if prev_len >= MIN_MATCH && self.match_len <= prev_len {
                // The match at strstart-1 wins; tally it and step past it,
                // chaining the covered positions (strstart-1 and strstart
                // are already in the table).
                let distance = (self.strstart as isize - 1 - prev_match) as usize;
                self.huffman.tally_dist(distance, prev_len);

                for _ in 2..prev_len {
                    self.strstart += 1;
                    self.lookahead -= 1;
                    if self.lookahead >= MIN_MATCH {
                        self.insert_string();
                    }
                }
                self.strstart += 1;
                self.lookahead -= 1;
                self.prev_available = false;
                self.match_len = MIN_MATCH - 1;
            } else {
                if self.prev_available {
                    self.huffman.tally_lit(self.window[self.strstart - 1]);
                }
                self.prev_available = true;
                self.strstart += 1;
                self.lookahead -= 1;
            }

            if self.huffman.is_full() {
                // The pending literal stays out of this block and opens the
                // next one.
                let mut len = (self.strstart as isize - self.block_start) as usize;
                if self.prev_available {
                    len -= 1;
                }
                let last = finish && self.lookahead == 0 && !self.prev_available;
                self.flush_huffman_block(len, last);
                self.block_start += len as isize;
                return !last;
            }
        }

        true
    }
}
