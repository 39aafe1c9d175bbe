//! Sliding-window and hash-table maintenance.
//!
//! The window, the hash head table, and the prev chain table move as a
//! unit: a slide shifts the upper half of the window down by WSIZE and
//! rebases every table entry by the same amount.

use super::{Deflater, HASH_MASK, HASH_SHIFT, MAX_DIST, MIN_LOOKAHEAD, MIN_MATCH, WMASK, WSIZE};

impl Deflater {
    /// Top up the lookahead from the attached input.
    ///
    /// Slides the window first if the cursor has entered the region where a
    /// further advance could push match distances out of range. After the
    /// call, either `lookahead >= MIN_LOOKAHEAD` or the input is exhausted.
    pub(crate) fn fill_window(&mut self) {
        if self.strstart >= WSIZE + MAX_DIST {
            self.slide_window();
        }

        while self.lookahead < MIN_LOOKAHEAD && self.input_off < self.input.len() {
            let free = 2 * WSIZE - self.lookahead - self.strstart;
            let more = (self.input.len() - self.input_off).min(free);

            let dst = self.strstart + self.lookahead;
            self.window[dst..dst + more]
                .copy_from_slice(&self.input[self.input_off..self.input_off + more]);
            self.adler
                .update(&self.input[self.input_off..self.input_off + more]);

            self.input_off += more;
            self.total_in += more as u64;
            self.lookahead += more;
        }

        if self.lookahead >= MIN_MATCH {
            self.update_hash();
        }
    }

    /// Shift the window down by WSIZE and rebase every position-bearing
    /// index. Entries pointing into the discarded half become 0 (empty).
    pub(crate) fn slide_window(&mut self) {
        self.window.copy_within(WSIZE..2 * WSIZE, 0);
        self.match_start -= WSIZE as isize;
        self.strstart -= WSIZE;
        self.block_start -= WSIZE as isize;

        for m in self.head.iter_mut() {
            *m = if *m >= WSIZE as u16 { *m - WSIZE as u16 } else { 0 };
        }
        for m in self.prev.iter_mut() {
            *m = if *m >= WSIZE as u16 { *m - WSIZE as u16 } else { 0 };
        }
    }

    /// Prime the rolling hash from the two bytes at `strstart`.
    pub(crate) fn update_hash(&mut self) {
        self.ins_h =
            ((self.window[self.strstart] as usize) << HASH_SHIFT) ^ self.window[self.strstart + 1] as usize;
    }

    /// Roll the third byte at `strstart` into the hash, link `strstart` into
    /// its chain, and return the previous chain head (0 = no predecessor).
    pub(crate) fn insert_string(&mut self) -> usize {
        let hash = ((self.ins_h << HASH_SHIFT)
            ^ self.window[self.strstart + MIN_MATCH - 1] as usize)
            & HASH_MASK;
        let head = self.head[hash];
        self.prev[self.strstart & WMASK] = head;
        self.head[hash] = self.strstart as u16;
        self.ins_h = hash;
        head as usize
    }
}
