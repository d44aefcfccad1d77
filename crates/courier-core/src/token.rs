//! Correlation tokens for in-flight fragments.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

/// A unique correlation token attached to one outbound fragment.
///
/// Tokens render as fixed-width zero-padded decimal, so their lexicographic
/// order equals their numeric order wherever they end up as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(u64);

impl Token {
    /// The raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:020}", self.0)
    }
}

/// Issues strictly increasing tokens from an atomic counter.
///
/// The counter starts at a random offset so tokens from separate runs do
/// not trivially collide in logs or channel-side bookkeeping.
#[derive(Debug)]
pub struct TokenIssuer {
    next: AtomicU64,
}

impl TokenIssuer {
    /// Create an issuer starting at a random offset.
    pub fn new() -> Self {
        Self::starting_at(rand::thread_rng().gen_range(1..=100_000))
    }

    /// Create an issuer starting at a known value.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Issue the next token.
    pub fn next(&self) -> Token {
        Token(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}
