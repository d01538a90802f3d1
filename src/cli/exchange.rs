use crate::error::Result;
use crate::exchange::{simulate_exchange, DhParams, ExchangeTranscript};

/// Options for the dh command
#[derive(Debug, Clone)]
pub struct ExchangeOptions {
    pub prime: u64,
    pub generator: u64,
    pub alice_private: Option<u64>,
    pub bob_private: Option<u64>,
    pub json: bool,
}

impl Default for ExchangeOptions {
    fn default() -> Self {
        Self {
            prime: 23,
            generator: 5,
            alice_private: None,
            bob_private: None,
            json: false,
        }
    }
}

pub fn run_exchange(options: &ExchangeOptions) -> Result<ExchangeTranscript> {
    let params = DhParams::new(options.prime, options.generator)?;
    simulate_exchange(params, options.alice_private, options.bob_private)
}

pub fn render_exchange(transcript: &ExchangeTranscript, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(transcript)?);
    }

    let mut output = String::new();
    output.push_str("Diffie-Hellman Key Exchange\n");
    output.push_str("===========================\n\n");
    output.push_str(&format!(
        "Public parameters: p = {}, g = {}\n\n",
        transcript.prime, transcript.generator
    ));
    output.push_str(&format!(
        "Alice: private a = {}, public A = g^a mod p = {}\n",
        transcript.alice_private, transcript.alice_public
    ));
    output.push_str(&format!(
        "Bob:   private b = {}, public B = g^b mod p = {}\n\n",
        transcript.bob_private, transcript.bob_public
    ));
    output.push_str(&format!(
        "Alice computes B^a mod p = {}\n",
        transcript.alice_secret
    ));
    output.push_str(&format!(
        "Bob computes   A^b mod p = {}\n\n",
        transcript.bob_secret
    ));
    output.push_str(if transcript.agreed() {
        "Shared secret established"
    } else {
        "Secrets differ"
    });

    Ok(output)
}
