//! Synthetic trend data for degraded operation
//!
//! When the provider cannot supply real numbers the pipeline still answers
//! with plausible values. All randomness flows through [`SyntheticSource`],
//! which can be seeded so fallback output is reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::RangeInclusive;
use std::sync::Mutex;

use super::palette::assign_color;
use crate::models::TrendEntry;

/// Static keyword list served in mock mode, in display order
pub const MOCK_KEYWORDS: [&str; 20] = [
    "Indonesia",
    "Jakarta",
    "Bali",
    "Surabaya",
    "Bandung",
    "Yogyakarta",
    "Medan",
    "Semarang",
    "Palembang",
    "Makassar",
    "Depok",
    "Tangerang",
    "Bekasi",
    "Bogor",
    "Malang",
    "Denpasar",
    "Batam",
    "Pekanbaru",
    "Banjarmasin",
    "Manado",
];

/// Keywords of the full fallback set, used when no keyword list is available
pub fn fallback_keywords() -> &'static [&'static str] {
    &MOCK_KEYWORDS[..15]
}

/// Value ranges for one kind of synthetic entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticBounds {
    pub interest: RangeInclusive<u8>,
    pub max_interest: RangeInclusive<u8>,
}

impl SyntheticBounds {
    /// A single keyword whose series could not be fetched
    pub fn keyword_fallback() -> Self {
        Self {
            interest: 10..=100,
            max_interest: 50..=100,
        }
    }

    /// The whole keyword list is missing
    pub fn full_fallback() -> Self {
        Self {
            interest: 20..=100,
            max_interest: 50..=100,
        }
    }

    /// Mock-mode entries
    pub fn mock() -> Self {
        Self::full_fallback()
    }
}

/// Injectable random source behind every synthetic value and color
#[derive(Debug)]
pub struct SyntheticSource {
    rng: Mutex<ChaCha8Rng>,
}

impl SyntheticSource {
    /// Source seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Deterministic source; same seed, same sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Build from an optional seed
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut *rng)
    }

    /// One palette color
    pub fn color(&self) -> String {
        self.with_rng(|rng| assign_color(rng).to_string())
    }

    /// Entry with independently drawn metrics and color
    pub fn entry(&self, keyword: &str, bounds: &SyntheticBounds) -> TrendEntry {
        self.with_rng(|rng| {
            let interest = rng.gen_range(bounds.interest.clone());
            let max_interest = rng.gen_range(bounds.max_interest.clone());
            let color = assign_color(rng);
            TrendEntry::new(keyword, interest, max_interest, color)
        })
    }

    /// Full fallback set: one synthetic entry per fallback keyword
    pub fn fallback_set(&self) -> Vec<TrendEntry> {
        let bounds = SyntheticBounds::full_fallback();
        fallback_keywords()
            .iter()
            .map(|kw| self.entry(kw, &bounds))
            .collect()
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::palette::is_palette_color;

    #[test]
    fn test_fallback_keywords_are_first_fifteen() {
        let keywords = fallback_keywords();
        assert_eq!(keywords.len(), 15);
        assert_eq!(keywords[0], "Indonesia");
        assert_eq!(keywords[14], "Malang");
    }

    #[test]
    fn test_entry_respects_bounds() {
        let source = SyntheticSource::seeded(1);
        let bounds = SyntheticBounds::keyword_fallback();
        for _ in 0..500 {
            let entry = source.entry("Bali", &bounds);
            assert!((10..=100).contains(&entry.interest));
            assert!((50..=100).contains(&entry.max_interest));
            assert!(is_palette_color(&entry.color));
        }
    }

    #[test]
    fn test_seeded_sources_agree() {
        let a = SyntheticSource::seeded(99);
        let b = SyntheticSource::seeded(99);
        assert_eq!(a.fallback_set(), b.fallback_set());
        assert_eq!(a.color(), b.color());
    }

    #[test]
    fn test_fallback_set_shape() {
        let set = SyntheticSource::seeded(5).fallback_set();
        assert_eq!(set.len(), 15);
        assert!(set.iter().all(|e| e.interest >= 20));
        let names: Vec<_> = set.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(names, fallback_keywords());
    }

    #[test]
    fn test_new_without_seed_still_draws() {
        let source = SyntheticSource::new(None);
        let entry = source.entry("Bali", &SyntheticBounds::mock());
        assert!(entry.max_interest >= 50);
        assert!(is_palette_color(&source.color()));
    }
}
