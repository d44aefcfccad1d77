//! The outbound channel seam.
//!
//! The library never talks to a transport directly. The host hands in a
//! [`Channel`]; the core hands each fragment to it together with a
//! [`FragmentRegistration`] through which the host reports the fragment's
//! milestones back.

use std::sync::Arc;

use crate::peer::Peer;
use crate::token::Token;
use crate::tracker::{DeliveredTracker, Outcome, SentTracker};

/// Verdict for the send milestone of one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The channel accepted the fragment.
    Sent,
    /// The channel failed for an unspecified reason.
    GenericFailure,
    /// The fragment produced an empty payload.
    NullPayload,
    /// No service was available.
    NoService,
    /// The channel's outbound quota was exhausted.
    LimitExceeded,
    /// The radio was off.
    RadioOff,
}

impl Outcome for SendOutcome {
    fn is_success(self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Verdict for the delivery milestone of one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The remote peer confirmed receipt.
    Delivered,
    /// The delivery report came back negative.
    DeliveryError,
    /// The report could not be obtained or parsed.
    GenericFailure,
}

impl Outcome for DeliveryOutcome {
    fn is_success(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// The host's handle for acknowledging one fragment.
///
/// Holds the fragment's token and the trackers for whichever milestones the
/// caller subscribed to. Reporting a milestone the caller did not subscribe
/// to is a no-op, as is reporting the same milestone twice.
#[derive(Clone)]
pub struct FragmentRegistration {
    token: Token,
    sent: Option<Arc<SentTracker>>,
    delivered: Option<Arc<DeliveredTracker>>,
}

impl FragmentRegistration {
    pub(crate) fn new(
        token: Token,
        sent: Option<Arc<SentTracker>>,
        delivered: Option<Arc<DeliveredTracker>>,
    ) -> Self {
        Self {
            token,
            sent,
            delivered,
        }
    }

    /// The fragment's correlation token.
    pub fn token(&self) -> Token {
        self.token
    }

    /// Report the send milestone for this fragment.
    pub fn sent(&self, outcome: SendOutcome) {
        if let Some(tracker) = &self.sent {
            tracker.record(self.token, outcome);
        }
    }

    /// Report the delivery milestone for this fragment.
    pub fn delivered(&self, outcome: DeliveryOutcome) {
        if let Some(tracker) = &self.delivered {
            tracker.record(self.token, outcome);
        }
    }
}

impl std::fmt::Debug for FragmentRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentRegistration")
            .field("token", &self.token)
            .field("sent", &self.sent.is_some())
            .field("delivered", &self.delivered.is_some())
            .finish()
    }
}

/// An outbound transport.
pub trait Channel: Send + Sync {
    /// Hand one fragment to the transport.
    ///
    /// The implementation reports the fragment's milestones through
    /// `registration`, in any order and from any thread.
    fn send_fragment(&self, peer: &Peer, wire_text: &str, registration: FragmentRegistration);

    /// Let the transport divide framed wire text itself.
    ///
    /// Returns `None` to use the built-in segmenter. Transports with their
    /// own fragmentation rules override this.
    fn divide_message(&self, wire_text: &str) -> Option<Vec<String>> {
        let _ = wire_text;
        None
    }
}
