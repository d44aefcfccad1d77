//! Destination peers and peer validation.

use std::fmt;

use crate::error::{CoreError, Result};

/// Why a peer identifier failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPeerReason {
    /// Shorter than the minimum identifier length.
    TooShort,
    /// Longer than the maximum identifier length.
    TooLong,
    /// Contains a non-digit where digits are required.
    NotANumber,
    /// Missing the leading country-code marker.
    NoCountryCode,
}

impl fmt::Display for InvalidPeerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(f, "identifier too short"),
            Self::TooLong => write!(f, "identifier too long"),
            Self::NotANumber => write!(f, "identifier is not a number"),
            Self::NoCountryCode => write!(f, "identifier has no country code"),
        }
    }
}

/// Validates destination identifiers before any fragment is sent.
pub trait PeerValidator: Send + Sync {
    /// Check `identifier`, returning the first failure found.
    fn validate(&self, identifier: &str) -> std::result::Result<(), InvalidPeerReason>;
}

/// Minimum identifier length accepted by [`PhoneNumberValidator`].
pub const MIN_IDENTIFIER_LEN: usize = 3;

/// Maximum identifier length accepted by [`PhoneNumberValidator`].
pub const MAX_IDENTIFIER_LEN: usize = 20;

/// The default validator: international phone numbers of the form
/// `+` followed by digits, within length bounds.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhoneNumberValidator;

impl PeerValidator for PhoneNumberValidator {
    fn validate(&self, identifier: &str) -> std::result::Result<(), InvalidPeerReason> {
        let len = identifier.chars().count();
        if len > MAX_IDENTIFIER_LEN {
            return Err(InvalidPeerReason::TooLong);
        }
        if len < MIN_IDENTIFIER_LEN {
            return Err(InvalidPeerReason::TooShort);
        }
        if !identifier.chars().skip(1).all(|c| c.is_ascii_digit()) {
            return Err(InvalidPeerReason::NotANumber);
        }
        if !identifier.starts_with('+') {
            return Err(InvalidPeerReason::NoCountryCode);
        }
        Ok(())
    }
}

/// An opaque destination identifier with a validity verdict already applied.
///
/// Immutable once constructed; equality, ordering and hashing follow the
/// identifier value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Peer {
    address: String,
}

impl Peer {
    /// Construct a peer, failing with [`CoreError::InvalidPeer`] when the
    /// validator rejects the identifier.
    pub fn new(identifier: impl Into<String>, validator: &dyn PeerValidator) -> Result<Self> {
        let address = identifier.into();
        match validator.validate(&address) {
            Ok(()) => Ok(Self { address }),
            Err(reason) => Err(CoreError::InvalidPeer {
                identifier: address,
                reason,
            }),
        }
    }

    /// Construct a peer from an identifier the caller has already validated.
    pub(crate) fn from_validated(address: String) -> Self {
        Self { address }
    }

    /// The peer's identifier.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}
