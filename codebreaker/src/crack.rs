//! Ciphertext-only attacks on the Caesar and Vigenère ciphers.
//!
//! Caesar shifts are ranked by how English the decryption looks (χ² against
//! English letter frequencies). For Vigenère the key length is estimated from
//! the average index of coincidence of the ciphertext columns, then each
//! column is solved as its own Caesar cipher.

use crate::english::{letters, LetterCounts};
use anyhow::{bail, Result};
use cybertools::cipher::{caesar, vigenere};
use std::collections::HashMap;

/// Key lengths tried when none is given
pub const DEFAULT_MAX_KEY_LENGTH: usize = 12;

/// A length within this fraction of the best column IoC counts as a match,
/// so the shortest period wins over its multiples
const IOC_TOLERANCE: f64 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct CaesarCandidate {
    /// Shift used to encrypt
    pub shift: u8,
    pub chi_squared: f64,
    pub plaintext: String,
}

/// Try every shift, best candidate first
pub fn rank_caesar(ciphertext: &str) -> Result<Vec<CaesarCandidate>> {
    let values = letters(ciphertext);
    if values.is_empty() {
        bail!("Ciphertext contains no letters");
    }

    let mut candidates = Vec::with_capacity(caesar::MAX_SHIFT as usize);
    for shift in caesar::MIN_SHIFT..=caesar::MAX_SHIFT {
        let shift = shift as u8;
        candidates.push(CaesarCandidate {
            shift,
            chi_squared: LetterCounts::shifted(&values, shift).chi_squared_english(),
            plaintext: caesar::decrypt(ciphertext, shift as i32)?,
        });
    }
    candidates.sort_by(|a, b| a.chi_squared.total_cmp(&b.chi_squared));
    Ok(candidates)
}

pub fn render_caesar(candidates: &[CaesarCandidate], limit: usize) -> String {
    let mut output = String::new();
    output.push_str("Caesar Brute Force (ranked by chi-squared vs English)\n");
    output.push_str("=====================================================\n\n");
    for (rank, candidate) in candidates.iter().take(limit).enumerate() {
        output.push_str(&format!(
            "#{:<2} shift {:>2}  chi² {:>9.2}  {}\n",
            rank + 1,
            candidate.shift,
            candidate.chi_squared,
            preview(&candidate.plaintext, 60)
        ));
    }
    if let Some(best) = candidates.first() {
        output.push_str(&format!("\nBest guess (shift {}):\n{}\n", best.shift, best.plaintext));
    }
    output
}

/// Average index of coincidence over the columns of a key length guess
pub fn column_ioc(values: &[u8], key_length: usize) -> f64 {
    if key_length == 0 {
        return 0.0;
    }
    let total: f64 = (0..key_length)
        .map(|offset| {
            let column: Vec<u8> = values.iter().skip(offset).step_by(key_length).copied().collect();
            LetterCounts::of(&column).index_of_coincidence()
        })
        .sum();
    total / key_length as f64
}

/// Factors of the distances between repeated trigrams, most common first
pub fn kasiski_factors(values: &[u8], max_factor: usize) -> Vec<(usize, usize)> {
    let mut positions: HashMap<&[u8], Vec<usize>> = HashMap::new();
    for (index, window) in values.windows(3).enumerate() {
        positions.entry(window).or_default().push(index);
    }

    let mut factors: HashMap<usize, usize> = HashMap::new();
    for seen in positions.values().filter(|p| p.len() > 1) {
        for pair in seen.windows(2) {
            let distance = pair[1] - pair[0];
            for factor in 2..=distance.min(max_factor) {
                if distance % factor == 0 {
                    *factors.entry(factor).or_insert(0) += 1;
                }
            }
        }
    }

    let mut ranked: Vec<(usize, usize)> = factors.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Pick the key length from `(length, column IoC)` scores
pub fn pick_key_length(scores: &[(usize, f64)]) -> Option<usize> {
    let best = scores.iter().map(|&(_, ioc)| ioc).fold(f64::NAN, f64::max);
    if !best.is_finite() || best <= 0.0 {
        return None;
    }
    scores
        .iter()
        .find(|&&(_, ioc)| ioc >= best * IOC_TOLERANCE)
        .map(|&(length, _)| length)
}

/// Solve each column as a Caesar cipher and spell the key
pub fn recover_key(values: &[u8], key_length: usize) -> String {
    (0..key_length)
        .map(|offset| {
            let column: Vec<u8> = values.iter().skip(offset).step_by(key_length).copied().collect();
            let shift = (0..26u8)
                .min_by(|&a, &b| {
                    let chi_a = LetterCounts::shifted(&column, a).chi_squared_english();
                    let chi_b = LetterCounts::shifted(&column, b).chi_squared_english();
                    chi_a.total_cmp(&chi_b)
                })
                .unwrap_or(0);
            (b'A' + shift) as char
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct VigenereSolution {
    pub key_length: usize,
    pub key: String,
    pub plaintext: String,
    /// Average column IoC per key length tried
    pub scores: Vec<(usize, f64)>,
    pub kasiski: Vec<(usize, usize)>,
}

/// Recover key and plaintext. `key_length` skips the estimate when given.
pub fn crack_vigenere(
    ciphertext: &str,
    max_key_length: usize,
    key_length: Option<usize>,
) -> Result<VigenereSolution> {
    let values = letters(ciphertext);
    if values.len() < 4 {
        bail!("Ciphertext is too short to analyze ({} letters)", values.len());
    }

    // Every column needs at least two letters for an IoC
    let max_key_length = max_key_length.clamp(1, values.len() / 2);
    let scores: Vec<(usize, f64)> = (1..=max_key_length)
        .map(|length| (length, column_ioc(&values, length)))
        .collect();
    let kasiski = kasiski_factors(&values, max_key_length);

    let key_length = match key_length {
        Some(0) => bail!("Key length must be at least 1"),
        Some(length) if length > values.len() / 2 => bail!(
            "Key length {} is too long for {} letters (at most {})",
            length,
            values.len(),
            values.len() / 2
        ),
        Some(length) => length,
        None => match pick_key_length(&scores) {
            Some(length) => length,
            None => bail!("Could not estimate a key length"),
        },
    };

    let key = recover_key(&values, key_length);
    let plaintext = vigenere::decrypt(ciphertext, &key)?;

    Ok(VigenereSolution {
        key_length,
        key,
        plaintext,
        scores,
        kasiski,
    })
}

pub fn render_vigenere(solution: &VigenereSolution) -> String {
    let mut output = String::new();
    output.push_str("Vigenère Cryptanalysis\n");
    output.push_str("======================\n\n");

    output.push_str("Key length scores (average column index of coincidence):\n");
    for &(length, ioc) in &solution.scores {
        let marker = if length == solution.key_length { "  <==" } else { "" };
        output.push_str(&format!("  {:>2}: {:.4}{}\n", length, ioc, marker));
    }

    let kasiski = if solution.kasiski.is_empty() {
        "no repeated trigrams".to_string()
    } else {
        solution
            .kasiski
            .iter()
            .take(5)
            .map(|(factor, count)| format!("{} ({}×)", factor, count))
            .collect::<Vec<_>>()
            .join(", ")
    };
    output.push_str(&format!("Kasiski factors: {}\n\n", kasiski));

    output.push_str(&format!("Key length: {}\n", solution.key_length));
    output.push_str(&format!("Key: {}\n\n", solution.key));
    output.push_str("Plaintext:\n");
    output.push_str(&solution.plaintext);
    output.push('\n');
    output
}

fn preview(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= width {
        flat
    } else {
        let cut: String = flat.chars().take(width).collect();
        format!("{}...", cut)
    }
}
