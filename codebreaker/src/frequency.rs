use crate::english::{letters, LetterCounts, ENGLISH_FREQUENCIES, ENGLISH_IOC, RANDOM_IOC};
use anyhow::{bail, Result};
use std::collections::HashMap;

const BAR_WIDTH: usize = 30;

/// Letter frequency table, index of coincidence and common n-grams
pub fn frequency_report(text: &str) -> Result<String> {
    let values = letters(text);
    if values.is_empty() {
        bail!("No letters to analyze");
    }
    let counts = LetterCounts::of(&values);

    let mut output = String::new();
    output.push_str("Letter Frequency Analysis\n");
    output.push_str("=========================\n\n");
    output.push_str(&format!("Letters analyzed: {}\n\n", counts.total));

    let max_count = counts.counts.iter().copied().max().unwrap_or(1).max(1);
    output.push_str("     Count  Observed  English\n");
    for (index, &count) in counts.counts.iter().enumerate() {
        let bar = "#".repeat(count * BAR_WIDTH / max_count);
        output.push_str(&format!(
            "{}: {:>6}  {:>6.2}%  {:>6.2}%  {}\n",
            (b'A' + index as u8) as char,
            count,
            counts.percent(index),
            ENGLISH_FREQUENCIES[index] * 100.0,
            bar
        ));
    }

    let ioc = counts.index_of_coincidence();
    output.push_str(&format!(
        "\nIndex of Coincidence: {:.4} (English {:.4}, random {:.4})\n",
        ioc, ENGLISH_IOC, RANDOM_IOC
    ));
    output.push_str(&format!("  Interpretation: {}\n", interpret_ioc(ioc)));
    output.push_str(&format!(
        "Chi-squared vs English: {:.2}\n",
        counts.chi_squared_english()
    ));
    output.push_str(&format!(
        "Top bigrams:  {}\n",
        format_ngrams(&top_ngrams(&values, 2, 5))
    ));
    output.push_str(&format!(
        "Top trigrams: {}\n",
        format_ngrams(&top_ngrams(&values, 3, 5))
    ));

    Ok(output)
}

fn interpret_ioc(ioc: f64) -> &'static str {
    if ioc >= 0.060 {
        "Monoalphabetic (plain text, Caesar or substitution)"
    } else if ioc >= 0.045 {
        "Short-key polyalphabetic or mixed"
    } else {
        "Polyalphabetic or random (try Vigenère)"
    }
}

/// Most frequent letter n-grams, ties broken alphabetically
pub fn top_ngrams(values: &[u8], n: usize, limit: usize) -> Vec<(String, usize)> {
    if n == 0 || values.len() < n {
        return Vec::new();
    }
    let mut map: HashMap<&[u8], usize> = HashMap::new();
    for window in values.windows(n) {
        *map.entry(window).or_insert(0) += 1;
    }
    let mut items: Vec<(String, usize)> = map
        .into_iter()
        .map(|(window, count)| {
            let text = window.iter().map(|&v| (b'A' + v) as char).collect();
            (text, count)
        })
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items.truncate(limit);
    items
}

fn format_ngrams(ngrams: &[(String, usize)]) -> String {
    if ngrams.is_empty() {
        return "n/a".into();
    }
    ngrams
        .iter()
        .map(|(text, count)| format!("{} ({})", text, count))
        .collect::<Vec<_>>()
        .join(", ")
}
