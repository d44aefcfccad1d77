//! Message framing strategies.
//!
//! The channel carries arbitrary traffic alongside library messages. A
//! [`FramingStrategy`] stamps outbound wire text so receivers can tell the
//! two apart, and strips the stamp on decode. Exactly one strategy is active
//! at a time; the active choice is persisted by the core as a short tag and
//! resolved through the closed [`StrategyKind`] registry, never through a
//! stored type name.

use std::sync::Arc;

/// Signature character prefixed by the default strategy.
///
/// STX is not produced by keyboards, which keeps accidental collisions with
/// human traffic unlikely.
pub const SIGNATURE: char = '\u{0002}';

/// A pluggable framing scheme.
///
/// Decoding returns `None` for wire text that does not carry this
/// strategy's frame; such traffic is expected on a shared channel and is
/// dropped silently by callers, not treated as an error.
pub trait FramingStrategy: Send + Sync {
    /// Stamp `text` for the wire.
    fn encode(&self, peer_id: &str, text: &str) -> String;

    /// Strip the frame from `wire`, or reject it.
    fn decode(&self, peer_id: &str, wire: &str) -> Option<String>;
}

/// The built-in strategy: prefix the [`SIGNATURE`] character, strip it on
/// decode, reject wire text that does not start with it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignaturePrefix;

impl FramingStrategy for SignaturePrefix {
    fn encode(&self, _peer_id: &str, text: &str) -> String {
        let mut wire = String::with_capacity(text.len() + SIGNATURE.len_utf8());
        wire.push(SIGNATURE);
        wire.push_str(text);
        wire
    }

    fn decode(&self, _peer_id: &str, wire: &str) -> Option<String> {
        wire.strip_prefix(SIGNATURE).map(str::to_string)
    }
}

/// Registry of framing strategies, keyed by a short persistable tag.
///
/// Adding a strategy means adding a variant here and an arm to each match
/// below; there is deliberately no open-ended registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// [`SignaturePrefix`], the default.
    #[default]
    SignaturePrefix,
}

impl StrategyKind {
    /// The tag persisted in the key-value store.
    pub fn tag(self) -> &'static str {
        match self {
            Self::SignaturePrefix => "signature-prefix",
        }
    }

    /// Resolve a persisted tag, `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "signature-prefix" => Some(Self::SignaturePrefix),
            _ => None,
        }
    }

    /// Construct the strategy this tag names.
    pub fn build(self) -> Arc<dyn FramingStrategy> {
        match self {
            Self::SignaturePrefix => Arc::new(SignaturePrefix),
        }
    }
}
