//! Chained-hash longest-match search.

use super::{Deflater, MAX_DIST, MAX_MATCH, MIN_MATCH, WMASK};

impl Deflater {
    /// Walk the hash chain starting at `cur_match` for the longest match at
    /// `strstart`, bounded by `max_chain` candidates and MAX_DIST backward.
    ///
    /// A candidate only replaces the current best on a strictly longer
    /// match, so ties keep the earlier (nearer) candidate. Updates
    /// `match_start` and `match_len`; returns true when the capped length
    /// is at least MIN_MATCH.
    pub(crate) fn find_longest_match(&mut self, mut cur_match: usize) -> bool {
        let scan = self.strstart;
        let limit = scan.saturating_sub(MAX_DIST);
        let mut chain_length = self.max_chain;
        let nice_length = self.nice_length.min(self.lookahead);
        let mut best_len = self.match_len.max(MIN_MATCH - 1);

        debug_assert!(
            scan + MAX_MATCH <= self.window.len(),
            "window too close to its end for a full match scan"
        );

        // A search that starts with a good enough match gets a quarter of
        // the chain budget.
        if best_len >= self.good_length {
            chain_length >>= 2;
        }

        loop {
            // Cheap rejection first: a candidate that cannot beat the
            // current best must differ at the would-be new end, and any
            // candidate must agree on the first two bytes. The third byte
            // needs no check: equal hash plus equal first two bytes pins it.
            let window = &self.window;
            if window[cur_match + best_len] == window[scan + best_len]
                && window[cur_match + best_len - 1] == window[scan + best_len - 1]
                && window[cur_match] == window[scan]
                && window[cur_match + 1] == window[scan + 1]
            {
                let len = match_extent(window, scan, cur_match);
                if len > best_len {
                    self.match_start = cur_match as isize;
                    best_len = len;
                    if best_len >= nice_length {
                        break;
                    }
                }
            }

            cur_match = self.prev[cur_match & WMASK] as usize;
            if cur_match <= limit {
                break;
            }
            chain_length -= 1;
            if chain_length == 0 {
                break;
            }
        }

        self.match_len = best_len.min(self.lookahead);
        self.match_len >= MIN_MATCH
    }
}

/// Length of the common prefix of `window[scan..]` and `window[pos..]`,
/// capped at MAX_MATCH. The first two bytes are already known equal.
#[inline]
fn match_extent(window: &[u8], scan: usize, pos: usize) -> usize {
    let mut len = 2;

    // Compare 8 bytes at a time, locating the first differing byte by XOR.
    // 2 + 8k lands on MAX_MATCH exactly, so the cap needs no extra check.
    while len + 8 <= MAX_MATCH {
        let a = u64::from_le_bytes(window[scan + len..scan + len + 8].try_into().unwrap());
        let b = u64::from_le_bytes(window[pos + len..pos + len + 8].try_into().unwrap());
        let diff = a ^ b;
        if diff != 0 {
            return len + (diff.trailing_zeros() / 8) as usize;
        }
        len += 8;
    }

    len
}
