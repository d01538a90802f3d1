//! Modular exponentiation and a toy Diffie–Hellman key agreement.
//!
//! Parameters are `u64`, which is far too small for real key exchange. The
//! module exists to show the arithmetic: both parties end up with
//! `g^(ab) mod p` without ever sending a private exponent.

use crate::error::{CybertoolsError, Result};
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Compute `base^exponent mod modulus` by square-and-multiply.
/// A zero modulus is rejected; modulus 1 always yields 0.
pub fn modpow(base: u64, exponent: u64, modulus: u64) -> Result<u64> {
    if modulus == 0 {
        return Err(CybertoolsError::out_of_range("modulus", 0u64, 1u64, u64::MAX));
    }
    Ok(pow_mod(base, exponent, modulus))
}

fn pow_mod(base: u64, mut exponent: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }

    let mut result = 1u64;
    let mut base = base % modulus;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exponent >>= 1;
    }
    result
}

/// Multiply without overflow by widening to u128
fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    ((a as u128 * b as u128) % modulus as u128) as u64
}

/// Deterministic Miller–Rabin, exact for every `u64`
pub fn is_prime(n: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    if n < 2 {
        return false;
    }
    for &p in &WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for &a in &WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Public group parameters: a prime modulus and a generator.
/// Deserialized values go through the same checks as [`DhParams::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDhParams")]
pub struct DhParams {
    prime: u64,
    generator: u64,
}

#[derive(Deserialize)]
struct RawDhParams {
    prime: u64,
    generator: u64,
}

impl TryFrom<RawDhParams> for DhParams {
    type Error = CybertoolsError;

    fn try_from(raw: RawDhParams) -> Result<Self> {
        Self::new(raw.prime, raw.generator)
    }
}

impl DhParams {
    /// Validate and build parameters. The modulus must be prime and the
    /// generator must lie strictly between 1 and the modulus.
    pub fn new(prime: u64, generator: u64) -> Result<Self> {
        if !is_prime(prime) {
            warn!(prime, "rejecting composite Diffie-Hellman modulus");
            return Err(CybertoolsError::InvalidInput(format!(
                "Diffie-Hellman modulus {} is not prime",
                prime
            )));
        }
        if generator <= 1 || generator >= prime {
            return Err(CybertoolsError::out_of_range(
                "generator",
                generator,
                2u64,
                prime - 1,
            ));
        }
        Ok(Self { prime, generator })
    }

    pub fn prime(&self) -> u64 {
        self.prime
    }

    pub fn generator(&self) -> u64 {
        self.generator
    }

    /// Highest private exponent accepted for this group
    pub fn max_private_key(&self) -> u64 {
        self.prime - 2
    }
}

/// One side of the exchange
#[derive(Debug, Clone)]
pub struct DhParty {
    params: DhParams,
    private_key: u64,
}

impl DhParty {
    /// Use a caller-chosen private exponent in `[1, prime - 2]`
    pub fn new(params: DhParams, private_key: u64) -> Result<Self> {
        if private_key == 0 || private_key > params.max_private_key() {
            return Err(CybertoolsError::out_of_range(
                "private key",
                private_key,
                1u64,
                params.max_private_key(),
            ));
        }
        Ok(Self {
            params,
            private_key,
        })
    }

    /// Draw a private exponent from the OS CSPRNG
    pub fn generate(params: DhParams) -> Self {
        let private_key = OsRng.gen_range(1..=params.max_private_key());
        Self {
            params,
            private_key,
        }
    }

    pub fn private_key(&self) -> u64 {
        self.private_key
    }

    /// `g^private mod p`, safe to publish
    pub fn public_key(&self) -> u64 {
        pow_mod(self.params.generator, self.private_key, self.params.prime)
    }

    /// Combine the peer's public value with our private exponent
    pub fn shared_secret(&self, other_public: u64) -> Result<u64> {
        if other_public == 0 || other_public >= self.params.prime {
            return Err(CybertoolsError::out_of_range(
                "peer public key",
                other_public,
                1u64,
                self.params.prime - 1,
            ));
        }
        Ok(pow_mod(other_public, self.private_key, self.params.prime))
    }
}

/// Everything computed during a simulated exchange between Alice and Bob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTranscript {
    pub prime: u64,
    pub generator: u64,
    pub alice_private: u64,
    pub alice_public: u64,
    pub bob_private: u64,
    pub bob_public: u64,
    pub alice_secret: u64,
    pub bob_secret: u64,
}

impl ExchangeTranscript {
    /// Both sides derived the same secret
    pub fn agreed(&self) -> bool {
        self.alice_secret == self.bob_secret
    }
}

/// Run a full exchange. Private keys that are not supplied are random.
pub fn simulate_exchange(
    params: DhParams,
    alice_private: Option<u64>,
    bob_private: Option<u64>,
) -> Result<ExchangeTranscript> {
    let alice = match alice_private {
        Some(key) => DhParty::new(params, key)?,
        None => DhParty::generate(params),
    };
    let bob = match bob_private {
        Some(key) => DhParty::new(params, key)?,
        None => DhParty::generate(params),
    };

    let alice_public = alice.public_key();
    let bob_public = bob.public_key();
    let alice_secret = alice.shared_secret(bob_public)?;
    let bob_secret = bob.shared_secret(alice_public)?;

    debug!(
        prime = params.prime,
        generator = params.generator,
        alice_public,
        bob_public,
        "simulated Diffie-Hellman exchange"
    );

    Ok(ExchangeTranscript {
        prime: params.prime,
        generator: params.generator,
        alice_private: alice.private_key(),
        alice_public,
        bob_private: bob.private_key(),
        bob_public,
        alice_secret,
        bob_secret,
    })
}
