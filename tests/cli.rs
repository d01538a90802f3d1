use std::error::Error;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn cybertools_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cybertools"))
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(cybertools_cmd().args(args).output()?)
}

fn run_with_stdin(args: &[&str], stdin: &[u8]) -> Result<Output, Box<dyn Error>> {
    let mut child = cybertools_cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .ok_or("stdin not captured")?
        .write_all(stdin)?;
    Ok(child.wait_with_output()?)
}

fn stdout_of(output: Output) -> Result<String, Box<dyn Error>> {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout)?)
}

#[test]
fn version_flag_prints_build_info() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(run(&["-V"])?)?;
    assert!(stdout.starts_with("cybertools "));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn no_command_prints_help() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(run(&[])?)?;
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("vigenere"));
    Ok(())
}

#[test]
fn caesar_encrypts_and_decrypts() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(run(&["caesar", "--shift", "3", "Hello, World!"])?)?;
    assert_eq!(stdout, "Khoor, Zruog!\n");

    let stdout = stdout_of(run(&["caesar", "-s", "3", "-d", "Khoor, Zruog!"])?)?;
    assert_eq!(stdout, "Hello, World!\n");
    Ok(())
}

#[test]
fn caesar_rejects_out_of_range_shift() -> Result<(), Box<dyn Error>> {
    for shift in ["0", "26", "-3"] {
        let output = run(&["caesar", "--shift", shift, "abc"])?;
        assert!(!output.status.success(), "shift {} accepted", shift);
        let stderr = String::from_utf8(output.stderr)?;
        assert!(stderr.starts_with("Error: "), "stderr was {:?}", stderr);
        assert!(stderr.contains("shift"));
    }
    Ok(())
}

#[test]
fn vigenere_roundtrip() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(run(&["vigenere", "--key", "LEMON", "ATTACK AT DAWN"])?)?;
    assert_eq!(stdout, "LXFOPV EF RNHR\n");

    let stdout = stdout_of(run(&["vig", "-k", "lemon", "-d", "LXFOPV EF RNHR"])?)?;
    assert_eq!(stdout, "ATTACK AT DAWN\n");
    Ok(())
}

#[test]
fn vigenere_rejects_bad_key() -> Result<(), Box<dyn Error>> {
    let output = run(&["vigenere", "--key", "K3Y", "text"])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn rot13_reads_stdin() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(run_with_stdin(&["rot13"], b"Hello\n")?)?;
    assert_eq!(stdout, "Uryyb\n");
    Ok(())
}

#[test]
fn encode_and_decode_each_codec() -> Result<(), Box<dyn Error>> {
    let cases = [
        ("base32", "MZXW6YTBOI======"),
        ("base58", "t1Zv2yaZ"),
        ("hex", "666f6f626172"),
        ("binary", "01100110 01101111 01101111 01100010 01100001 01110010"),
    ];
    for (codec, expected) in cases {
        let encoded = stdout_of(run(&["encode", "--codec", codec, "foobar"])?)?;
        assert_eq!(encoded.trim_end(), expected, "encode with {}", codec);

        let decoded = stdout_of(run(&["decode", "--codec", codec, expected])?)?;
        assert_eq!(decoded, "foobar\n", "decode with {}", codec);
    }
    Ok(())
}

#[test]
fn uuencode_file_roundtrip() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("payload.bin");
    let encoded_path = dir.path().join("payload.uu");
    let restored = dir.path().join("restored.bin");
    let payload: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    fs::write(&input, &payload)?;

    let encoded = stdout_of(run(&[
        "encode",
        "-c",
        "uu",
        "--name",
        "payload.bin",
        "--mode",
        "600",
        "--file",
        input.to_str().unwrap(),
    ])?)?;
    assert!(encoded.starts_with("begin 600 payload.bin\n"));
    assert!(encoded.ends_with("`\nend\n"));
    fs::write(&encoded_path, &encoded)?;

    stdout_of(run(&[
        "decode",
        "-c",
        "uuencode",
        "--file",
        encoded_path.to_str().unwrap(),
        "--output",
        restored.to_str().unwrap(),
    ])?)?;
    assert_eq!(fs::read(&restored)?, payload);
    Ok(())
}

#[test]
fn decode_reports_invalid_characters() -> Result<(), Box<dyn Error>> {
    let output = run(&["decode", "--codec", "base32", "MZXW1"])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Base32"));
    assert!(stderr.contains("position 4"));
    Ok(())
}

#[test]
fn unknown_codec_is_rejected() -> Result<(), Box<dyn Error>> {
    let output = run(&["encode", "--codec", "base64", "x"])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn otp_with_random_pad_roundtrip() -> Result<(), Box<dyn Error>> {
    let output = run(&["otp", "attack at dawn"])?;
    assert!(output.status.success());
    let ciphertext = String::from_utf8(output.stdout)?.trim().to_string();
    let stderr = String::from_utf8(output.stderr)?;
    let pad = stderr
        .lines()
        .find_map(|line| line.strip_prefix("key: "))
        .ok_or("pad not reported")?
        .to_string();
    assert_eq!(pad.len(), ciphertext.len());

    let stdout = stdout_of(run(&["otp", "-d", "--key-hex", &pad, &ciphertext])?)?;
    assert_eq!(stdout, "attack at dawn\n");
    Ok(())
}

#[test]
fn otp_rejects_short_pad() -> Result<(), Box<dyn Error>> {
    let output = run(&["otp", "--key", "abc", "HELLO"])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("length"));
    Ok(())
}

#[test]
fn checksum_text_and_json() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(run(&["checksum", "123456789"])?)?;
    assert_eq!(stdout, "crc32: CBF43926\n");

    let stdout = stdout_of(run(&["sum", "-a", "adler32", "--json", "Wikipedia"])?)?;
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["algorithm"], "adler32");
    assert_eq!(value["checksum"], "11E60398");
    Ok(())
}

#[test]
fn checksum_streams_files() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("fox.txt");
    fs::write(&path, "The quick brown fox jumps over the lazy dog")?;

    let stdout = stdout_of(run(&["checksum", "--file", path.to_str().unwrap()])?)?;
    assert_eq!(stdout, "crc32: 414FA339\n");
    Ok(())
}

#[test]
fn hash_selected_algorithms() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(run(&["hash", "-a", "md5", "-a", "ntlm", "password"])?)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("5f4dcc3b5aa765d61d8327deb882cf99"));
    assert!(lines[1].ends_with("8846f7eaee8fb117ad06bdd830b7586c"));
    Ok(())
}

#[test]
fn hash_json_lists_every_algorithm() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(run(&["hash", "--json", "abc"])?)?;
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["bytes"], 3);
    assert_eq!(value["digests"].as_array().map(Vec::len), Some(8));
    Ok(())
}

#[test]
fn mac_sign_and_verify() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(run(&["mac", "--key", "secret", "message"])?)?;
    let tag = stdout
        .trim()
        .strip_prefix("hmac-sha256: ")
        .ok_or("missing algorithm prefix")?
        .to_string();

    let stdout = stdout_of(run(&["mac", "-k", "secret", "--verify", &tag, "message"])?)?;
    assert_eq!(stdout, "valid\n");

    let stdout = stdout_of(run(&["mac", "-k", "secret", "--verify", &tag, "massage"])?)?;
    assert_eq!(stdout, "invalid\n");
    Ok(())
}

#[test]
fn pbkdf2_matches_reference_vector() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(run(&[
        "pbkdf2", "--salt", "salt", "--iterations", "1", "password",
    ])?)?;
    assert_eq!(
        stdout,
        "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b\n"
    );
    Ok(())
}

#[test]
fn dh_textbook_exchange() -> Result<(), Box<dyn Error>> {
    let stdout = stdout_of(run(&["dh", "--alice", "6", "--bob", "15", "--json"])?)?;
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["prime"], 23);
    assert_eq!(value["alice_public"], 8);
    assert_eq!(value["bob_public"], 19);
    assert_eq!(value["alice_secret"], 2);
    assert_eq!(value["bob_secret"], 2);
    Ok(())
}

#[test]
fn dh_rejects_composite_modulus() -> Result<(), Box<dyn Error>> {
    let output = run(&["dh", "--prime", "21"])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("not prime"));
    Ok(())
}
