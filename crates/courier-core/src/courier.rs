//! The library surface: sending, receiving, and configuration.

use std::sync::{Arc, RwLock};

use tracing::debug;

use courier_protocol::{segment, StrategyKind};
use courier_store::KeyValueStore;

use crate::channel::{Channel, DeliveryOutcome, FragmentRegistration, SendOutcome};
use crate::codec::MessageCodec;
use crate::error::Result;
use crate::inbound::{self, InboundFragment};
use crate::message::Message;
use crate::peer::{Peer, PeerValidator, PhoneNumberValidator};
use crate::token::TokenIssuer;
use crate::tracker::{AckTracker, Fragment, Listener};

/// Completion callback for the send milestone of a whole message.
pub type SendListener = Listener<SendOutcome>;

/// Completion callback for the delivery milestone of a whole message.
pub type DeliveryListener = Listener<DeliveryOutcome>;

/// Store key under which the registered received-listener id is persisted.
pub const RECEIVED_LISTENER_KEY: &str = "courier.received.listener";

/// Callback for decoded inbound messages.
///
/// The `id` names the listener so the registration survives restarts: the
/// host reads the persisted id at startup and re-registers the matching
/// listener instance.
pub trait ReceivedListener: Send + Sync {
    /// A stable identifier for this listener.
    fn id(&self) -> &str;

    /// Called once per decoded inbound message.
    fn on_message_received(&self, message: Message);
}

/// The messaging core: validates, frames, fragments and sends outbound
/// messages, and aggregates, decodes and dispatches inbound batches.
///
/// All collaborators are injected, so hosts and tests swap transports,
/// stores and validators freely. One instance is intended per channel.
pub struct Courier {
    channel: Arc<dyn Channel>,
    validator: Arc<dyn PeerValidator>,
    tokens: TokenIssuer,
    codec: MessageCodec,
    store: Arc<dyn KeyValueStore>,
    received: RwLock<Option<Arc<dyn ReceivedListener>>>,
}

impl Courier {
    /// Build a courier with the default phone-number peer validator.
    pub fn new(channel: Arc<dyn Channel>, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_validator(channel, store, Arc::new(PhoneNumberValidator))
    }

    /// Build a courier with a custom peer validator.
    pub fn with_validator(
        channel: Arc<dyn Channel>,
        store: Arc<dyn KeyValueStore>,
        validator: Arc<dyn PeerValidator>,
    ) -> Self {
        let codec = MessageCodec::new(Arc::clone(&store));
        Self {
            channel,
            validator,
            tokens: TokenIssuer::new(),
            codec,
            store,
            received: RwLock::new(None),
        }
    }

    /// Validate an identifier into a [`Peer`].
    pub fn peer(&self, identifier: &str) -> Result<Peer> {
        Peer::new(identifier, self.validator.as_ref())
    }

    /// Validate an identifier and text into a [`Message`] in one step.
    pub fn message(&self, identifier: &str, text: impl Into<String>) -> Result<Message> {
        Message::new(self.peer(identifier)?, text)
    }

    /// Frame, fragment and hand `message` to the channel.
    ///
    /// Each optional listener fires exactly once: with the full message text
    /// once every fragment reaches that milestone, or immediately with the
    /// acknowledged portion on the first per-fragment failure. Passing
    /// `None` skips tracking for that milestone entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidContent`](crate::CoreError::InvalidContent)
    /// when the framed wire text exceeds the channel capacity. The frame
    /// costs one unit, so text at the exact unframed maximum is rejected
    /// here rather than at [`Message::new`].
    pub fn send_message(
        &self,
        message: Message,
        on_sent: Option<SendListener>,
        on_delivered: Option<DeliveryListener>,
    ) -> Result<()> {
        let wire = self.codec.encode(&message);
        // An empty division would leave trackers with nothing to ever
        // complete against, so it falls back to the built-in segmenter.
        let parts = match self.channel.divide_message(&wire) {
            Some(parts) if !parts.is_empty() => parts,
            _ => segment::split(&wire)?,
        };
        let fragments: Vec<Fragment> = parts
            .into_iter()
            .enumerate()
            .map(|(seq, text)| Fragment {
                text,
                token: self.tokens.next(),
                seq,
            })
            .collect();

        let sent = on_sent.map(|listener| {
            Arc::new(AckTracker::new(
                message.peer().clone(),
                fragments.clone(),
                self.unframing(listener),
            ))
        });
        let delivered = on_delivered.map(|listener| {
            Arc::new(AckTracker::new(
                message.peer().clone(),
                fragments.clone(),
                self.unframing(listener),
            ))
        });

        debug!(
            peer = %message.peer(),
            fragments = fragments.len(),
            "sending message"
        );
        for fragment in &fragments {
            let registration =
                FragmentRegistration::new(fragment.token, sent.clone(), delivered.clone());
            self.channel
                .send_fragment(message.peer(), &fragment.text, registration);
        }
        Ok(())
    }

    /// Wrap a listener so the reassembled wire text is handed back without
    /// its frame. On a partial result that lost the framed fragment, the
    /// text passes through untouched.
    fn unframing<O: crate::tracker::Outcome>(&self, listener: Listener<O>) -> Listener<O> {
        let strategy = self.codec.strategy();
        Box::new(move |peer, wire, outcome| {
            let text = strategy.decode(peer.address(), &wire).unwrap_or(wire);
            listener(peer, text, outcome);
        })
    }

    /// Aggregate, decode and dispatch one inbound batch.
    ///
    /// Fragments from invalid senders and text carrying no frame are
    /// dropped. Without a registered listener the whole batch is dropped.
    pub fn handle_inbound(&self, batch: &[InboundFragment]) {
        let listener = self
            .received
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let Some(listener) = listener else {
            debug!("dropping inbound batch: no received listener registered");
            return;
        };

        for (sender, text) in inbound::aggregate(batch) {
            let peer = match Peer::new(sender, self.validator.as_ref()) {
                Ok(peer) => peer,
                Err(err) => {
                    debug!(%err, "dropping inbound text from invalid sender");
                    continue;
                }
            };
            match self.codec.decode(&peer, &text) {
                Some(message) => listener.on_message_received(message),
                None => debug!(%peer, "dropping unframed inbound text"),
            }
        }
    }

    /// Register the inbound listener and persist its id.
    pub fn set_received_listener(&self, listener: Arc<dyn ReceivedListener>) -> Result<()> {
        self.store
            .set_string(RECEIVED_LISTENER_KEY, listener.id())?;
        *self.received.write().unwrap_or_else(|e| e.into_inner()) = Some(listener);
        Ok(())
    }

    /// Unregister the inbound listener and clear the persisted id.
    pub fn remove_received_listener(&self) -> Result<()> {
        self.store.remove(RECEIVED_LISTENER_KEY)?;
        *self.received.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }

    /// The persisted id of the registered inbound listener, if any.
    pub fn received_listener_id(&self) -> Option<String> {
        self.store.get_string(RECEIVED_LISTENER_KEY)
    }

    /// The active framing strategy's registry entry.
    pub fn strategy_kind(&self) -> StrategyKind {
        self.codec.strategy_kind()
    }

    /// Activate a framing strategy and persist the choice.
    pub fn set_strategy(&self, kind: StrategyKind) -> Result<()> {
        self.codec.set_strategy(kind)
    }

    /// Revert to the default framing strategy.
    pub fn reset_strategy(&self) -> Result<()> {
        self.codec.reset_strategy()
    }
}

impl std::fmt::Debug for Courier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Courier")
            .field("strategy", &self.strategy_kind())
            .field("received_listener", &self.received_listener_id())
            .finish()
    }
}
