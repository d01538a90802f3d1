use clap::{ArgAction, Args, Parser, Subcommand};
use cybertools::checksum::ChecksumAlgorithm;
use cybertools::cli::{
    checksum_input, decode_input, encode_input, hash_input, mac_input, pbkdf2_input,
    render_checksum, render_exchange, render_hashes, run_caesar, run_exchange, run_otp,
    run_rot13, run_vigenere, CaesarOptions, ChecksumOptions, DecodeOptions, EncodeOptions,
    ExchangeOptions, HashOptions, Input, MacOptions, OtpOptions, PadKey, Pbkdf2Options,
    VigenereOptions,
};
use cybertools::encoding::{Codec, UuencodeOptions};
use cybertools::hashing::{HashAlgorithm, MacAlgorithm};
use cybertools::Result;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Version info from build.rs
const VERSION: &str = env!("CYBERTOOLS_VERSION");
const PROFILE: &str = env!("CYBERTOOLS_PROFILE");
const GIT_HASH: &str = env!("CYBERTOOLS_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "cybertools")]
#[command(author, about = "Classical ciphers, encodings, checksums and key exchange", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Text on the command line, a file, or stdin when neither is given
#[derive(Args)]
struct InputArgs {
    /// Literal input text
    text: Option<String>,

    /// Read input from a file instead
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl InputArgs {
    fn into_input(self) -> Input {
        Input::from_args(self.text, self.file)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode bytes as text
    #[command(alias = "e")]
    Encode {
        /// Codec: base32, base58, uuencode, binary, hex
        #[arg(short, long, default_value = "base32", value_parser = parse_codec)]
        codec: Codec,

        /// File name written into the UUencode header
        #[arg(long, default_value = "file.txt")]
        name: String,

        /// Octal permission bits written into the UUencode header
        #[arg(long, default_value = "644", value_parser = parse_octal)]
        mode: u32,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Decode text back into bytes
    #[command(alias = "d")]
    Decode {
        /// Codec: base32, base58, uuencode, binary, hex
        #[arg(short, long, default_value = "base32", value_parser = parse_codec)]
        codec: Codec,

        /// Write the decoded bytes to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Caesar shift cipher
    #[command(allow_negative_numbers = true)]
    Caesar {
        /// Shift between 1 and 25
        #[arg(short, long, default_value = "3")]
        shift: i32,

        /// Decrypt instead of encrypt
        #[arg(short, long)]
        decrypt: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Vigenère polyalphabetic cipher
    #[command(alias = "vig")]
    Vigenere {
        /// Alphabetic key
        #[arg(short, long, required = true)]
        key: String,

        /// Decrypt instead of encrypt
        #[arg(short, long)]
        decrypt: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// ROT13 (its own inverse)
    Rot13 {
        #[command(flatten)]
        input: InputArgs,
    },

    /// One-time pad (XOR); ciphertext is hex
    Otp {
        /// Pad as text, same length as the message
        #[arg(short, long, conflicts_with = "key_hex")]
        key: Option<String>,

        /// Pad as hex digits
        #[arg(long)]
        key_hex: Option<String>,

        /// Decrypt hex ciphertext
        #[arg(short, long)]
        decrypt: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Non-cryptographic checksum (CRC32, Adler-32)
    #[command(alias = "sum")]
    Checksum {
        /// Algorithm: crc32, adler32
        #[arg(short, long, default_value = "crc32", value_parser = parse_checksum)]
        algorithm: ChecksumAlgorithm,

        /// JSON output
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Cryptographic digests
    Hash {
        /// Algorithm (repeatable); every algorithm when omitted
        #[arg(short, long, value_parser = parse_hash)]
        algorithm: Vec<HashAlgorithm>,

        /// JSON output
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Message authentication code
    Mac {
        /// Algorithm: hmac-sha256, hmac-sha512, hmac-sha3-256, blake3-keyed
        #[arg(short, long, default_value = "hmac-sha256", value_parser = parse_mac)]
        algorithm: MacAlgorithm,

        /// Secret key
        #[arg(short, long, required = true)]
        key: String,

        /// Hex tag to verify
        #[arg(long)]
        verify: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Derive a key from a password with PBKDF2
    Pbkdf2 {
        /// HMAC algorithm: hmac-sha256, hmac-sha512, hmac-sha3-256
        #[arg(short, long, default_value = "hmac-sha256", value_parser = parse_mac)]
        algorithm: MacAlgorithm,

        /// Salt
        #[arg(short, long, required = true)]
        salt: String,

        /// Iteration count
        #[arg(short, long, default_value = "100000")]
        iterations: u32,

        /// Derived key length in bytes
        #[arg(short, long, default_value = "32")]
        length: usize,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Simulate a Diffie-Hellman key exchange
    Dh {
        /// Prime modulus
        #[arg(short, long, default_value = "23")]
        prime: u64,

        /// Generator
        #[arg(short, long, default_value = "5")]
        generator: u64,

        /// Alice's private key (random when omitted)
        #[arg(long)]
        alice: Option<u64>,

        /// Bob's private key (random when omitted)
        #[arg(long)]
        bob: Option<u64>,

        /// JSON output
        #[arg(long)]
        json: bool,
    },
}

fn parse_codec(s: &str) -> std::result::Result<Codec, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_checksum(s: &str) -> std::result::Result<ChecksumAlgorithm, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_hash(s: &str) -> std::result::Result<HashAlgorithm, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_mac(s: &str) -> std::result::Result<MacAlgorithm, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_octal(s: &str) -> std::result::Result<u32, String> {
    u32::from_str_radix(s, 8).map_err(|e| format!("invalid octal mode {}: {}", s, e))
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print decoded bytes: text as a line, anything else raw
fn write_decoded(bytes: &[u8]) -> Result<()> {
    match std::str::from_utf8(bytes) {
        Ok(text) => println!("{}", text),
        Err(_) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Encode {
            codec,
            name,
            mode,
            input,
        } => {
            let options = EncodeOptions {
                codec,
                uuencode: UuencodeOptions {
                    file_name: name,
                    mode,
                },
            };
            let encoded = encode_input(&input.into_input(), &options)?;
            // UUencode output already ends in a newline
            print!("{}", encoded);
            if !encoded.ends_with('\n') {
                println!();
            }
        }

        Commands::Decode {
            codec,
            output,
            input,
        } => {
            let decoded = decode_input(&input.into_input(), &DecodeOptions { codec })?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &decoded)?;
                    println!("Wrote {} bytes to {}", decoded.len(), path.display());
                }
                None => write_decoded(&decoded)?,
            }
        }

        Commands::Caesar {
            shift,
            decrypt,
            input,
        } => {
            let options = CaesarOptions { shift, decrypt };
            println!("{}", run_caesar(&input.into_input(), &options)?);
        }

        Commands::Vigenere {
            key,
            decrypt,
            input,
        } => {
            let options = VigenereOptions { key, decrypt };
            println!("{}", run_vigenere(&input.into_input(), &options)?);
        }

        Commands::Rot13 { input } => {
            println!("{}", run_rot13(&input.into_input())?);
        }

        Commands::Otp {
            key,
            key_hex,
            decrypt,
            input,
        } => {
            let key = match (key, key_hex) {
                (Some(text), _) => PadKey::Text(text),
                (None, Some(hex)) => PadKey::Hex(hex),
                (None, None) => PadKey::Random,
            };
            let outcome = run_otp(&input.into_input(), &OtpOptions { key, decrypt })?;
            println!("{}", outcome.output);
            if let Some(pad) = outcome.generated_key {
                eprintln!("key: {}", pad);
            }
        }

        Commands::Checksum {
            algorithm,
            json,
            input,
        } => {
            let options = ChecksumOptions { algorithm, json };
            let report = checksum_input(&input.into_input(), &options)?;
            println!("{}", render_checksum(&report, options.json)?);
        }

        Commands::Hash {
            algorithm,
            json,
            input,
        } => {
            let options = HashOptions {
                algorithms: algorithm,
                json,
            };
            let report = hash_input(&input.into_input(), &options)?;
            println!("{}", render_hashes(&report, options.json)?);
        }

        Commands::Mac {
            algorithm,
            key,
            verify,
            input,
        } => {
            let options = MacOptions {
                algorithm,
                key,
                verify,
            };
            println!("{}", mac_input(&input.into_input(), &options)?);
        }

        Commands::Pbkdf2 {
            algorithm,
            salt,
            iterations,
            length,
            input,
        } => {
            let options = Pbkdf2Options {
                algorithm,
                salt,
                iterations,
                length,
            };
            println!("{}", pbkdf2_input(&input.into_input(), &options)?);
        }

        Commands::Dh {
            prime,
            generator,
            alice,
            bob,
            json,
        } => {
            let options = ExchangeOptions {
                prime,
                generator,
                alice_private: alice,
                bob_private: bob,
                json,
            };
            let transcript = run_exchange(&options)?;
            println!("{}", render_exchange(&transcript, options.json)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("cybertools {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            let _ = Cli::command().print_help();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    init_logging(cli.verbose);

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
