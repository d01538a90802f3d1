//! Letter statistics of English text.

/// Relative frequency of A..Z in English prose
pub const ENGLISH_FREQUENCIES: [f64; 26] = [
    0.082, 0.015, 0.028, 0.043, 0.127, 0.022, 0.020, 0.061, 0.070, 0.002, 0.008, 0.040, 0.024,
    0.067, 0.075, 0.019, 0.001, 0.060, 0.063, 0.091, 0.028, 0.010, 0.024, 0.002, 0.020, 0.001,
];

/// Index of coincidence of English letters
pub const ENGLISH_IOC: f64 = 0.0667;

/// Index of coincidence of uniformly random letters (1/26)
pub const RANDOM_IOC: f64 = 1.0 / 26.0;

/// Letters of `text` as values 0..26, case folded, everything else dropped
pub fn letters(text: &str) -> Vec<u8> {
    text.bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_uppercase() - b'A')
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterCounts {
    pub counts: [usize; 26],
    pub total: usize,
}

impl LetterCounts {
    /// Count letter values, reading each one as `(value - shift) mod 26`
    pub fn shifted(letters: &[u8], shift: u8) -> Self {
        let mut counts = [0usize; 26];
        for &letter in letters {
            counts[((letter + 26 - shift % 26) % 26) as usize] += 1;
        }
        Self {
            counts,
            total: letters.len(),
        }
    }

    pub fn of(letters: &[u8]) -> Self {
        Self::shifted(letters, 0)
    }

    pub fn index_of_coincidence(&self) -> f64 {
        if self.total < 2 {
            return 0.0;
        }
        let pairs: usize = self.counts.iter().map(|&c| c * c.saturating_sub(1)).sum();
        pairs as f64 / (self.total * (self.total - 1)) as f64
    }

    /// Pearson χ² of the observed counts against English expectations.
    /// Lower means more English-like.
    pub fn chi_squared_english(&self) -> f64 {
        if self.total == 0 {
            return f64::INFINITY;
        }
        let total = self.total as f64;
        self.counts
            .iter()
            .zip(ENGLISH_FREQUENCIES.iter())
            .map(|(&observed, &frequency)| {
                let expected = total * frequency;
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    pub fn percent(&self, index: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.counts[index] as f64 * 100.0 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_folds_case_and_drops_symbols() {
        assert_eq!(letters("Ab, z!"), vec![0, 1, 25]);
        assert!(letters("123 ...").is_empty());
    }

    #[test]
    fn test_index_of_coincidence() {
        assert_eq!(LetterCounts::of(&letters("AAAA")).index_of_coincidence(), 1.0);
        assert_eq!(LetterCounts::of(&letters("ABCD")).index_of_coincidence(), 0.0);
        assert_eq!(LetterCounts::of(&letters("A")).index_of_coincidence(), 0.0);
    }

    #[test]
    fn test_shifted_counts_undo_a_shift() {
        // "DEF" read back by 3 counts as "ABC"
        let counts = LetterCounts::shifted(&letters("DEF"), 3);
        assert_eq!(&counts.counts[..3], &[1, 1, 1]);
        let wrapped = LetterCounts::shifted(&letters("A"), 1);
        assert_eq!(wrapped.counts[25], 1);
    }

    #[test]
    fn test_english_scores_lower_than_gibberish() {
        let english = LetterCounts::of(&letters("the quick brown fox jumps over the lazy dog again and again"));
        let noise = LetterCounts::of(&letters("qzxj qzxj vkqz jxqz zzxq kjvq xzqj qqzx vvkj xxzq"));
        assert!(english.chi_squared_english() < noise.chi_squared_english());
        assert!(LetterCounts::of(&[]).chi_squared_english().is_infinite());
    }
}
