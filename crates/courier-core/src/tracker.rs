//! Per-message acknowledgment aggregation.
//!
//! Every send operation fans one message out into fragments, each tagged
//! with a correlation token. An [`AckTracker`] collects the per-fragment
//! acknowledgments for one milestone and fires the caller's listener
//! exactly once: either when every fragment succeeds, or immediately on the
//! first failure. One tracker instance exists per message per milestone and
//! is shared between the fragments through an `Arc`.

use std::fmt;
use std::sync::Mutex;

use courier_protocol::segment;

use crate::channel::{DeliveryOutcome, SendOutcome};
use crate::peer::Peer;
use crate::token::Token;

/// A per-fragment acknowledgment verdict.
pub trait Outcome: Copy + Send + fmt::Debug + 'static {
    /// Whether this verdict counts toward completion.
    fn is_success(self) -> bool;
}

/// One outbound fragment: its wire text, its correlation token, and its
/// position in the original message.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// The fragment's wire text.
    pub text: String,
    /// The correlation token the channel echoes back in acknowledgments.
    pub token: Token,
    /// Zero-based position within the original message.
    pub seq: usize,
}

/// A caller-supplied completion callback, consumed on the first terminal
/// acknowledgment.
pub type Listener<O> = Box<dyn FnOnce(&Peer, String, O) + Send>;

/// Tracks the send milestone of a message.
pub type SentTracker = AckTracker<SendOutcome>;

/// Tracks the delivery milestone of a message.
pub type DeliveredTracker = AckTracker<DeliveryOutcome>;

struct TrackerState<O> {
    /// Parallel to the token-sorted fragment list; slots are write-once.
    outcomes: Vec<Option<O>>,
    remaining: usize,
    terminal: bool,
    listener: Option<Listener<O>>,
}

/// Aggregates per-fragment acknowledgments for one milestone of one message.
///
/// The fragment list is fixed at construction and sorted by token, so
/// acknowledgment lookup is a binary search with no locking. All mutable
/// state sits behind one mutex; the listener is always invoked outside it.
///
/// Acknowledgments after the terminal state, duplicates for a slot already
/// written, and tokens that belong to no fragment are all dropped silently.
pub struct AckTracker<O: Outcome> {
    peer: Peer,
    fragments: Vec<Fragment>,
    state: Mutex<TrackerState<O>>,
}

impl<O: Outcome> AckTracker<O> {
    /// Build a tracker over `fragments`, firing `listener` on completion.
    pub fn new(peer: Peer, mut fragments: Vec<Fragment>, listener: Listener<O>) -> Self {
        fragments.sort_by_key(|f| f.token);
        let remaining = fragments.len();
        Self {
            peer,
            state: Mutex::new(TrackerState {
                outcomes: vec![None; remaining],
                remaining,
                terminal: false,
                listener: Some(listener),
            }),
            fragments,
        }
    }

    /// The message's destination.
    pub fn peer(&self) -> &Peer {
        &self.peer
    }

    /// Number of fragments being tracked.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Whether a terminal acknowledgment has been reached.
    pub fn is_terminal(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).terminal
    }

    /// Record the acknowledgment for `token`.
    ///
    /// On the first failure, or on the success that completes the set, the
    /// listener fires with the text reassembled from the acknowledged
    /// fragments in message order: the full text on success, the
    /// successfully acknowledged prefix-or-gaps on failure.
    pub fn record(&self, token: Token, outcome: O) {
        let Ok(index) = self.fragments.binary_search_by_key(&token, |f| f.token) else {
            tracing::debug!(%token, "dropping acknowledgment for unknown token");
            return;
        };

        let fired = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if state.terminal {
                tracing::debug!(%token, "dropping acknowledgment after terminal state");
                return;
            }
            if state.outcomes[index].is_some() {
                tracing::debug!(%token, "dropping duplicate acknowledgment");
                return;
            }
            state.outcomes[index] = Some(outcome);
            state.remaining -= 1;

            if !outcome.is_success() {
                state.terminal = true;
                let text = self.acknowledged_text(&state.outcomes);
                state.listener.take().map(|listener| (listener, text))
            } else if state.remaining == 0 {
                state.terminal = true;
                let text = self.acknowledged_text(&state.outcomes);
                state.listener.take().map(|listener| (listener, text))
            } else {
                None
            }
        };

        if let Some((listener, text)) = fired {
            listener(&self.peer, text, outcome);
        }
    }

    /// Concatenate the successfully acknowledged fragments in message order.
    fn acknowledged_text(&self, outcomes: &[Option<O>]) -> String {
        let mut acknowledged: Vec<&Fragment> = self
            .fragments
            .iter()
            .zip(outcomes)
            .filter(|(_, slot)| slot.is_some_and(O::is_success))
            .map(|(fragment, _)| fragment)
            .collect();
        acknowledged.sort_by_key(|f| f.seq);
        segment::rebuild(acknowledged.iter().map(|f| f.text.as_str()))
    }
}

impl<O: Outcome> fmt::Debug for AckTracker<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AckTracker")
            .field("peer", &self.peer)
            .field("fragments", &self.fragments.len())
            .field("terminal", &self.is_terminal())
            .finish()
    }
}
