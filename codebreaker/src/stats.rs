use anyhow::{bail, Result};
use std::path::Path;

pub struct StatsOptions {
    /// ANSI colors in the status column
    pub color: bool,
    /// Bytes shown in the hexdump
    pub dump_bytes: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            color: true,
            dump_bytes: 128,
        }
    }
}

/// Byte-level randomness statistics for a file
pub fn run(path: &Path, options: &StatsOptions) -> Result<String> {
    let data = std::fs::read(path)?;
    let mut output = String::new();
    output.push_str("Codebreaker Byte Statistics\n");
    output.push_str("===========================\n\n");
    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Bytes analyzed: {}\n\n", data.len()));
    output.push_str(&analyze_bytes(&data, options)?);
    Ok(output)
}

pub fn analyze_bytes(data: &[u8], options: &StatsOptions) -> Result<String> {
    if data.is_empty() {
        bail!("Not enough bytes to analyze");
    }

    let histogram = histogram(data);
    let mut dashboard = Dashboard::new("Randomness Summary", options.color);

    let entropy = shannon_entropy(&histogram, data.len());
    let min_entropy = min_entropy(&histogram, data.len());
    let mut entropy_section = Section::new("Entropy");
    entropy_section = entropy_section
        .metric(
            "Shannon Entropy",
            format!("{:.4} bits/byte ({:.1}% max)", entropy, entropy / 8.0 * 100.0),
            interpret_entropy(entropy),
            severity_entropy(entropy),
        )
        .metric(
            "Min-Entropy",
            format!("{:.4} bits/byte", min_entropy),
            "Worst-case unpredictability",
            severity_min_entropy(min_entropy),
        );
    dashboard.add_section(entropy_section);

    let chi = chi_square_uniform(&histogram, data.len());
    let p_value = chi_square_p_value(chi, 255);
    let unique = histogram.iter().filter(|&&c| c > 0).count();
    let ascii = ascii_ratio(data);
    let mut fit_section = Section::new("Distribution");
    fit_section = fit_section
        .metric(
            "Chi-Square (df=255)",
            format!("{:.2} (p={})", chi, format_p_value(p_value)),
            interpret_chi_square(p_value),
            severity_p_value(p_value),
        )
        .metric(
            "Unique Bytes",
            format!("{}/256", unique),
            "Distinct byte values present",
            severity_unique(unique, data.len()),
        )
        .metric(
            "Printable ASCII",
            format!("{:.1}%", ascii * 100.0),
            interpret_ascii(ascii),
            severity_ascii(ascii),
        );
    dashboard.add_section(fit_section);

    let bias = monobit_bias(data);
    let correlation = serial_correlation(data);
    let mut bit_section = Section::new("Bits & Order");
    bit_section = bit_section
        .metric(
            "Monobit Bias",
            format!("{:.3}%", bias * 100.0),
            "Deviation from 50/50 bit balance",
            severity_monobit(bias),
        )
        .metric(
            "Serial Correlation",
            format!("{:+.4}", correlation),
            "Adjacent byte dependence",
            severity_correlation(correlation),
        );
    dashboard.add_section(bit_section);

    let mut output = dashboard.render();

    let dump_size = data.len().min(options.dump_bytes);
    if dump_size > 0 {
        output.push_str(&format!("\nHexdump (first {} bytes)\n", dump_size));
        output.push_str("------------------------\n");
        output.push_str(&hexdump(&data[..dump_size]));
    }
    Ok(output)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Severity {
    Pass,
    Warn,
    Fail,
}

impl Severity {
    fn label(&self) -> &'static str {
        match self {
            Severity::Pass => "PASS",
            Severity::Warn => "WARN",
            Severity::Fail => "FAIL",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Severity::Pass => FG_GREEN,
            Severity::Warn => FG_YELLOW,
            Severity::Fail => FG_RED,
        }
    }
}

struct Metric {
    label: String,
    value: String,
    detail: String,
    severity: Severity,
}

struct Section {
    name: String,
    items: Vec<Metric>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            items: Vec::new(),
        }
    }

    fn metric(
        mut self,
        label: &str,
        value: String,
        detail: impl Into<String>,
        severity: Severity,
    ) -> Self {
        self.items.push(Metric {
            label: label.to_string(),
            value,
            detail: detail.into(),
            severity,
        });
        self
    }
}

struct Dashboard {
    title: String,
    sections: Vec<Section>,
    status: Severity,
    color: bool,
}

const RESET: &str = "\x1b[0m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

impl Dashboard {
    fn new(title: &str, color: bool) -> Self {
        Self {
            title: title.to_string(),
            sections: Vec::new(),
            status: Severity::Pass,
            color,
        }
    }

    fn add_section(&mut self, section: Section) {
        for item in &section.items {
            self.status = self.status.max(item.severity);
        }
        self.sections.push(section);
    }

    fn paint(&self, text: &str, severity: Severity) -> String {
        if self.color {
            format!("{}{}{}", severity.color_code(), text, RESET)
        } else {
            text.to_string()
        }
    }

    fn render(&self) -> String {
        let headers = ["Section", "Metric", "Value", "Notes", "Status"];
        let mut widths = headers.map(str::len);
        for section in &self.sections {
            widths[0] = widths[0].max(section.name.chars().count());
            for item in &section.items {
                widths[1] = widths[1].max(item.label.chars().count());
                widths[2] = widths[2].max(item.value.chars().count());
                widths[3] = widths[3].max(item.detail.chars().count());
            }
        }

        let verdict = match self.status {
            Severity::Pass => "(consistent with random data)",
            Severity::Warn => "(some structure detected)",
            Severity::Fail => "(clearly non-random)",
        };
        let mut output = format!(
            "{} {}\n\n",
            self.paint(&format!("[{}] {}", self.status.label(), self.title), self.status),
            verdict
        );

        let rule = horizontal_rule(&widths);
        output.push_str(&rule);
        output.push_str(&table_row(&headers, &widths));
        output.push_str(&rule);
        for section in &self.sections {
            for (index, item) in section.items.iter().enumerate() {
                let name = if index == 0 { section.name.as_str() } else { "" };
                // Pad before painting so escape codes do not count toward the width
                let status = self.paint(&pad(item.severity.label(), widths[4]), item.severity);
                output.push_str(&table_row(
                    &[name, &item.label, &item.value, &item.detail, &status],
                    &widths,
                ));
            }
            output.push_str(&rule);
        }
        output
    }
}

fn horizontal_rule(widths: &[usize; 5]) -> String {
    let mut line = String::from("+");
    for &w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn table_row(cells: &[&str; 5], widths: &[usize; 5]) -> String {
    let mut line = String::from("|");
    for (cell, &width) in cells.iter().zip(widths) {
        line.push_str(&format!(" {} |", pad(cell, width)));
    }
    line.push('\n');
    line
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn histogram(data: &[u8]) -> [u64; 256] {
    let mut freq = [0u64; 256];
    for &byte in data {
        freq[byte as usize] += 1;
    }
    freq
}

/// Shannon entropy in bits per byte
fn shannon_entropy(histogram: &[u64; 256], len: usize) -> f64 {
    let len = len as f64;
    histogram
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

fn min_entropy(histogram: &[u64; 256], len: usize) -> f64 {
    let max_count = histogram.iter().copied().max().unwrap_or(0);
    if max_count == 0 {
        return 0.0;
    }
    -(max_count as f64 / len as f64).log2()
}

/// Pearson χ² against a uniform byte distribution
fn chi_square_uniform(histogram: &[u64; 256], len: usize) -> f64 {
    let expected = len as f64 / 256.0;
    histogram
        .iter()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Upper-tail p-value via the Fisher normal approximation
fn chi_square_p_value(chi_square: f64, df: usize) -> f64 {
    let z = (2.0 * chi_square).sqrt() - (2.0 * df as f64 - 1.0).sqrt();
    0.5 * (1.0 - erf(z / std::f64::consts::SQRT_2))
}

/// Abramowitz and Stegun 7.1.26
fn erf(x: f64) -> f64 {
    const A: [f64; 5] = [0.254829592, -0.284496736, 1.421413741, -1.453152027, 1.061405429];
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = A.iter().rev().fold(0.0, |acc, &a| acc * t + a) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Distance of the fraction of one bits from one half
fn monobit_bias(data: &[u8]) -> f64 {
    let ones: u64 = data.iter().map(|b| b.count_ones() as u64).sum();
    let total = (data.len() * 8) as f64;
    (ones as f64 / total - 0.5).abs()
}

/// Lag-1 correlation coefficient of consecutive bytes
fn serial_correlation(data: &[u8]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let xs: Vec<f64> = data[..data.len() - 1].iter().map(|&b| b as f64).collect();
    let ys: Vec<f64> = data[1..].iter().map(|&b| b as f64).collect();
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(&ys) {
        covariance += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }
    covariance / (var_x.sqrt() * var_y.sqrt())
}

fn ascii_ratio(data: &[u8]) -> f64 {
    let printable = data
        .iter()
        .filter(|&&b| b.is_ascii_graphic() || b == b' ' || b == b'\n' || b == b'\r' || b == b'\t')
        .count();
    printable as f64 / data.len() as f64
}

fn interpret_entropy(entropy: f64) -> &'static str {
    match entropy {
        h if h >= 7.5 => "Very high (encrypted, compressed or random)",
        h if h >= 6.5 => "High (well mixed)",
        h if h >= 5.5 => "Moderate (structured but transformed)",
        h if h >= 4.0 => "Low (plain text or similar)",
        _ => "Very low (highly structured)",
    }
}

fn interpret_chi_square(p: f64) -> &'static str {
    if p < 0.01 || p > 0.99 {
        "Significant deviation from uniform"
    } else if p < 0.05 || p > 0.95 {
        "Marginal deviation from uniform"
    } else {
        "Consistent with uniform bytes"
    }
}

fn interpret_ascii(ratio: f64) -> &'static str {
    if ratio > 0.95 {
        "Almost certainly text"
    } else if ratio > 0.5 {
        "Mostly printable"
    } else {
        "Binary"
    }
}

fn format_p_value(p: f64) -> String {
    if p < 0.001 {
        "< 0.001".to_string()
    } else if p > 0.999 {
        "> 0.999".to_string()
    } else {
        format!("{:.3}", p)
    }
}

fn severity_entropy(entropy: f64) -> Severity {
    match entropy {
        h if h >= 7.0 => Severity::Pass,
        h if h >= 6.0 => Severity::Warn,
        _ => Severity::Fail,
    }
}

fn severity_min_entropy(entropy: f64) -> Severity {
    match entropy {
        h if h >= 6.5 => Severity::Pass,
        h if h >= 5.0 => Severity::Warn,
        _ => Severity::Fail,
    }
}

fn severity_p_value(p: f64) -> Severity {
    if p < 0.01 || p > 0.99 {
        Severity::Fail
    } else if p < 0.05 || p > 0.95 {
        Severity::Warn
    } else {
        Severity::Pass
    }
}

fn severity_unique(unique: usize, len: usize) -> Severity {
    // Short inputs cannot cover all 256 values
    let ratio = unique as f64 / len.min(256) as f64;
    if ratio > 0.6 {
        Severity::Pass
    } else if ratio > 0.3 {
        Severity::Warn
    } else {
        Severity::Fail
    }
}

fn severity_ascii(ratio: f64) -> Severity {
    if ratio < 0.5 {
        Severity::Pass
    } else if ratio < 0.8 {
        Severity::Warn
    } else {
        Severity::Fail
    }
}

fn severity_monobit(bias: f64) -> Severity {
    if bias < 0.02 {
        Severity::Pass
    } else if bias < 0.05 {
        Severity::Warn
    } else {
        Severity::Fail
    }
}

fn severity_correlation(correlation: f64) -> Severity {
    match correlation.abs() {
        c if c < 0.05 => Severity::Pass,
        c if c < 0.15 => Severity::Warn,
        _ => Severity::Fail,
    }
}

fn hexdump(data: &[u8]) -> String {
    let mut output = String::new();
    for (row, chunk) in data.chunks(16).enumerate() {
        output.push_str(&format!("{:08X}  ", row * 16));
        for column in 0..16 {
            match chunk.get(column) {
                Some(byte) => output.push_str(&format!("{:02X} ", byte)),
                None => output.push_str("   "),
            }
            if column == 7 {
                output.push(' ');
            }
        }
        output.push_str(" |");
        output.extend(chunk.iter().map(|&b| {
            if (0x20..=0x7E).contains(&b) {
                b as char
            } else {
                '.'
            }
        }));
        output.push_str("|\n");
    }
    output
}
