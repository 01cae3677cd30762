//! Fuzzy partial ratio: best-aligned substring similarity on a 0–100 scale.
//!
//! The similarity of two strings is the normalized Indel score
//! `2·LCS(a, b) / (|a| + |b|)`. `partial_ratio` slides the shorter string over
//! the longer one and keeps the best score, including windows clipped at either
//! end of the longer string.
//!
//! A window is only scored when the character it gains is one the shorter string
//! contains; any other window scores no better than a neighbour already scored.
//!
//! Patterns of up to 64 chars use the bit-parallel LCS of Hyyrö (one machine
//! word per window position), so a window costs O(m) word operations instead of
//! an O(m²) table. Longer patterns fall back to the row DP.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

const WORD_BITS: usize = u64::BITS as usize;

/// Best Indel similarity between the shorter input and any aligned window of the longer.
pub fn partial_ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    if short.len() <= WORD_BITS {
        let masks = BitPattern::new(&short).masks_for(&long);
        best_window(
            short.len(),
            long.len(),
            |i| masks[i] != 0,
            |range| bit_parallel_lcs(&masks[range], short.len()),
        )
    } else {
        let alphabet: HashSet<char> = short.iter().copied().collect();
        best_window(
            short.len(),
            long.len(),
            |i| alphabet.contains(&long[i]),
            |range| lcs_len(&short, &long[range]),
        )
    }
}

/// Scans the left-clipped, full-length and right-clipped windows of a text of
/// length `n` for a pattern of length `m <= n`.
fn best_window(
    m: usize,
    n: usize,
    in_alphabet: impl Fn(usize) -> bool,
    lcs: impl Fn(Range<usize>) -> usize,
) -> f64 {
    let mut best = 0.0_f64;

    // Windows clipped at the left edge: long[..end]
    for end in 1..m {
        if in_alphabet(end - 1) {
            best = best.max(indel_ratio(lcs(0..end), m + end));
        }
    }

    // Full-length windows
    for start in 0..=(n - m) {
        if start == 0 || in_alphabet(start + m - 1) {
            best = best.max(indel_ratio(lcs(start..start + m), 2 * m));
            if best >= 100.0 {
                return 100.0;
            }
        }
    }

    // Windows clipped at the right edge: long[start..]
    for start in (n - m + 1)..n {
        if in_alphabet(start) {
            best = best.max(indel_ratio(lcs(start..n), m + n - start));
        }
    }

    best
}

/// `2·lcs / total_len` on 0–100. Two empty inputs are identical.
fn indel_ratio(lcs: usize, total_len: usize) -> f64 {
    if total_len == 0 {
        return 100.0;
    }
    200.0 * lcs as f64 / total_len as f64
}

/// Per-character position masks of a pattern of at most 64 chars.
struct BitPattern {
    positions: HashMap<char, u64>,
}

impl BitPattern {
    fn new(pattern: &[char]) -> Self {
        debug_assert!(pattern.len() <= WORD_BITS);
        let mut positions: HashMap<char, u64> = HashMap::new();
        for (i, &c) in pattern.iter().enumerate() {
            *positions.entry(c).or_default() |= 1 << i;
        }
        Self { positions }
    }

    /// Mask of pattern positions holding each text char; 0 when absent.
    fn masks_for(&self, text: &[char]) -> Vec<u64> {
        text.iter()
            .map(|c| self.positions.get(c).copied().unwrap_or(0))
            .collect()
    }
}

/// LCS length of a `width`-char pattern and the text whose masks are given.
fn bit_parallel_lcs(text_masks: &[u64], width: usize) -> usize {
    let mut v = u64::MAX;
    for &mask in text_masks {
        let u = v & mask;
        v = v.wrapping_add(u) | (v - u);
    }
    let valid = if width >= WORD_BITS {
        u64::MAX
    } else {
        (1 << width) - 1
    };
    (!v & valid).count_ones() as usize
}

/// Length of the longest common subsequence, single-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ac in a {
        let mut diag = 0;
        for (j, &bc) in b.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if ac == bc { diag + 1 } else { up.max(row[j]) };
            diag = up;
        }
    }
    row[b.len()]
}
