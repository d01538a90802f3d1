mod crack;
mod english;
mod frequency;
mod stats;

use clap::{Parser, Subcommand};
use crack::{crack_vigenere, rank_caesar, render_caesar, render_vigenere, DEFAULT_MAX_KEY_LENGTH};
use cybertools::cli::Input;
use frequency::frequency_report;
use stats::{run as run_stats, StatsOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "codebreaker")]
#[command(about = "Ciphertext-only cryptanalysis for the classical ciphers in cybertools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Letter frequencies, index of coincidence and common n-grams
    #[command(alias = "freq")]
    Frequency {
        /// Text to analyze (stdin when omitted)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Rank all Caesar shifts by how English the result looks
    Caesar {
        /// Ciphertext (stdin when omitted)
        text: Option<String>,

        /// Read the ciphertext from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Candidates to list
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Recover a Vigenère key and plaintext
    #[command(alias = "vig")]
    Vigenere {
        /// Ciphertext (stdin when omitted)
        text: Option<String>,

        /// Read the ciphertext from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Longest key length to try
        #[arg(long, default_value_t = DEFAULT_MAX_KEY_LENGTH)]
        max_key_length: usize,

        /// Skip estimation and use this key length
        #[arg(long)]
        key_length: Option<usize>,
    },

    /// Byte-level randomness statistics for a file
    Stats {
        /// File to analyze
        file: PathBuf,

        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,

        /// Bytes to show in the hexdump
        #[arg(long, default_value_t = 128)]
        dump: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Frequency { text, file } => {
            let text = Input::from_args(text, file).read_text()?;
            print!("{}", frequency_report(&text)?);
        }
        Commands::Caesar { text, file, top } => {
            let text = Input::from_args(text, file).read_text()?;
            let candidates = rank_caesar(&text)?;
            print!("{}", render_caesar(&candidates, top));
        }
        Commands::Vigenere {
            text,
            file,
            max_key_length,
            key_length,
        } => {
            let text = Input::from_args(text, file).read_text()?;
            let solution = crack_vigenere(&text, max_key_length, key_length)?;
            print!("{}", render_vigenere(&solution));
        }
        Commands::Stats {
            file,
            no_color,
            dump,
        } => {
            let options = StatsOptions {
                color: !no_color,
                dump_bytes: dump,
            };
            print!("{}", run_stats(&file, &options)?);
        }
    }

    Ok(())
}
