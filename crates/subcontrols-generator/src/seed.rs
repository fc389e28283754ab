use std::{
    fmt::{self, Display},
    str::FromStr,
};

use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};

/// A 256-bit seed that reproduces a generated secret.
///
/// The text form is 64 lowercase hexadecimal digits.
///
/// # Examples
///
/// ```
/// use subcontrols_generator::SecretSeed;
///
/// let seed: SecretSeed =
///     "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef".parse()?;
/// assert_eq!(seed.to_string().parse::<SecretSeed>()?, seed);
///
/// // Derived seeds are stable and differ per label.
/// assert_eq!(seed.derive("sonar"), seed.derive("sonar"));
/// assert_ne!(seed.derive("sonar"), seed.derive("ballast"));
/// # Ok::<(), subcontrols_generator::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecretSeed([u8; 32]);

impl SecretSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from the thread-local random source.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derives an independent seed for a named sub-stream.
    ///
    /// The result is `SHA-256(seed || label)`, so one session seed fixes the
    /// secrets of every puzzle without correlating them.
    #[must_use]
    pub fn derive(&self, label: &str) -> Self {
        let digest = Sha256::new()
            .chain_update(self.0)
            .chain_update(label.as_bytes())
            .finalize();
        Self(digest.into())
    }

    pub(crate) fn rng(self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl Display for SecretSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`SecretSeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The input is not exactly 64 characters long.
    #[display("seed must be 64 hex digits, got {len} characters")]
    InvalidLength {
        /// Length of the rejected input.
        len: usize,
    },
    /// The input contains a non-hexadecimal character.
    #[display("invalid hex digit {ch:?} at offset {offset}")]
    InvalidDigit {
        /// The offending character.
        ch: char,
        /// Character offset of the offending digit.
        offset: usize,
    },
}

impl FromStr for SecretSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 64 || !s.is_ascii() {
            return Err(ParseSeedError::InvalidLength {
                len: s.chars().count(),
            });
        }
        let mut bytes = [0; 32];
        let mut digits = s.chars().enumerate().map(|(offset, ch)| {
            ch.to_digit(16)
                .and_then(|digit| u8::try_from(digit).ok())
                .ok_or(ParseSeedError::InvalidDigit { ch, offset })
        });
        for byte in &mut bytes {
            // Length was checked above, so both digits are present.
            let high = digits.next().unwrap_or(Ok(0))?;
            let low = digits.next().unwrap_or(Ok(0))?;
            *byte = high << 4 | low;
        }
        Ok(Self(bytes))
    }
}
