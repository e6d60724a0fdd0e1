//! Bloom filter over packed position keys.
//!
//! Sized the classic way for `n` expected insertions at false-positive
//! probability `p`:
//!
//! - bits: `m = -n·ln(p) / ln(2)²`
//! - hash functions: `k = max(1, round(m/n · ln 2))`
//!
//! Probe positions use double hashing (`h1 + i·h2`) over a SplitMix64 mix of
//! the key, so the filter is deterministic across runs.

/// Lower bound on the accepted false-positive probability.
const MIN_FPP: f64 = 1e-12;

/// Upper bound on the accepted false-positive probability.
const MAX_FPP: f64 = 0.999;

#[derive(Debug, Clone)]
pub(crate) struct BloomFilter {
    words: Vec<u64>,
    bit_count: u64,
    hash_count: u32,
}

impl BloomFilter {
    /// Creates a filter for `expected_insertions` keys at `fpp`.
    ///
    /// Out-of-range parameters are clamped: at least one insertion, and a
    /// probability within `[1e-12, 0.999]` (NaN falls back to 1%).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub(crate) fn new(expected_insertions: usize, fpp: f64) -> Self {
        let n = expected_insertions.max(1) as f64;
        let p = if fpp.is_nan() {
            0.01
        } else {
            fpp.clamp(MIN_FPP, MAX_FPP)
        };

        let ln2 = std::f64::consts::LN_2;
        let bits = (-n * p.ln() / (ln2 * ln2)).ceil().max(1.0) as u64;
        let word_count = bits.div_ceil(64).max(1);
        let bit_count = word_count * 64;
        let hash_count = ((bits as f64 / n) * ln2).round().max(1.0) as u32;

        Self {
            words: vec![0; word_count as usize],
            bit_count,
            hash_count,
        }
    }

    /// Records `key`.
    pub(crate) fn insert(&mut self, key: i64) {
        let (h1, h2) = Self::hashes(key);
        for i in 0..u64::from(self.hash_count) {
            let bit = h1.wrapping_add(i.wrapping_mul(h2)) % self.bit_count;
            self.words[Self::word(bit)] |= 1 << (bit % 64);
        }
    }

    /// Returns `false` if `key` was definitely never inserted.
    pub(crate) fn might_contain(&self, key: i64) -> bool {
        let (h1, h2) = Self::hashes(key);
        (0..u64::from(self.hash_count)).all(|i| {
            let bit = h1.wrapping_add(i.wrapping_mul(h2)) % self.bit_count;
            self.words[Self::word(bit)] & (1 << (bit % 64)) != 0
        })
    }

    #[cfg(test)]
    pub(crate) const fn hash_count(&self) -> u32 {
        self.hash_count
    }

    #[cfg(test)]
    pub(crate) const fn bit_count(&self) -> u64 {
        self.bit_count
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn word(bit: u64) -> usize {
        (bit / 64) as usize
    }

    #[allow(clippy::cast_sign_loss)]
    fn hashes(key: i64) -> (u64, u64) {
        let h1 = splitmix64(key as u64);
        let h2 = splitmix64(h1) | 1;
        (h1, h2)
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizing_matches_formula() {
        // n = 1000, p = 0.01 → m ≈ 9586 bits, k ≈ 7
        let filter = BloomFilter::new(1000, 0.01);
        assert_eq!(filter.hash_count(), 7);
        assert!(filter.bit_count() >= 9586);
        assert!(filter.bit_count() < 9586 + 64);
    }

    #[test]
    fn test_no_false_negatives() {
        let mut filter = BloomFilter::new(500, 0.01);
        for key in (-250_i64..250).map(|k| k * 7919) {
            filter.insert(key);
        }
        for key in (-250_i64..250).map(|k| k * 7919) {
            assert!(filter.might_contain(key));
        }
    }

    #[test]
    fn test_false_positive_rate_is_near_target() {
        let mut filter = BloomFilter::new(1000, 0.01);
        for key in 0..1000_i64 {
            filter.insert(key);
        }
        let false_positives = (1_000_000..1_010_000_i64)
            .filter(|&key| filter.might_contain(key))
            .count();
        // 1% of 10 000 is 100; allow generous slack.
        assert!(false_positives < 300, "{false_positives} false positives");
    }

    #[test]
    fn test_degenerate_parameters_are_clamped() {
        let mut filter = BloomFilter::new(0, f64::NAN);
        filter.insert(3);
        assert!(filter.might_contain(3));
        assert!(filter.hash_count() >= 1);

        let filter = BloomFilter::new(10, 5.0);
        assert!(filter.hash_count() >= 1);
        assert!(filter.bit_count() >= 64);
    }

    #[test]
    fn test_empty_filter_contains_nothing() {
        let filter = BloomFilter::new(100, 0.01);
        assert!((0..100).all(|k| !filter.might_contain(k)));
    }
}
