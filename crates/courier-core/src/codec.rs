//! Wire codec: the active framing strategy and its persistence.

use std::sync::{Arc, RwLock};

use tracing::warn;

use courier_protocol::{FramingStrategy, StrategyKind};
use courier_store::KeyValueStore;

use crate::error::Result;
use crate::message::Message;
use crate::peer::Peer;

/// Store key under which the active strategy's tag is persisted.
pub const STRATEGY_KEY: &str = "courier.framing.strategy";

/// Applies the active [`FramingStrategy`] to outbound and inbound traffic.
///
/// The active choice is loaded from the store at construction and persisted
/// on every change, so it survives process restarts. An unknown persisted
/// tag falls back to the default rather than failing startup.
pub struct MessageCodec {
    store: Arc<dyn KeyValueStore>,
    active: RwLock<(StrategyKind, Arc<dyn FramingStrategy>)>,
}

impl MessageCodec {
    /// Build a codec, restoring the persisted strategy choice.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let kind = match store.get_string(STRATEGY_KEY) {
            Some(tag) => StrategyKind::from_tag(&tag).unwrap_or_else(|| {
                warn!(%tag, "unknown persisted framing strategy tag, using default");
                StrategyKind::default()
            }),
            None => StrategyKind::default(),
        };
        Self {
            store,
            active: RwLock::new((kind, kind.build())),
        }
    }

    /// The active strategy's registry entry.
    pub fn strategy_kind(&self) -> StrategyKind {
        self.active.read().unwrap_or_else(|e| e.into_inner()).0
    }

    /// A handle to the active strategy.
    pub fn strategy(&self) -> Arc<dyn FramingStrategy> {
        Arc::clone(&self.active.read().unwrap_or_else(|e| e.into_inner()).1)
    }

    /// Activate `kind` and persist its tag.
    pub fn set_strategy(&self, kind: StrategyKind) -> Result<()> {
        self.store.set_string(STRATEGY_KEY, kind.tag())?;
        *self.active.write().unwrap_or_else(|e| e.into_inner()) = (kind, kind.build());
        Ok(())
    }

    /// Revert to the default strategy and clear the persisted tag.
    pub fn reset_strategy(&self) -> Result<()> {
        self.store.remove(STRATEGY_KEY)?;
        let kind = StrategyKind::default();
        *self.active.write().unwrap_or_else(|e| e.into_inner()) = (kind, kind.build());
        Ok(())
    }

    /// Stamp a message's text for the wire.
    pub fn encode(&self, message: &Message) -> String {
        self.strategy()
            .encode(message.peer().address(), message.text())
    }

    /// Decode combined inbound text, `None` when it carries no frame.
    pub fn decode(&self, peer: &Peer, wire: &str) -> Option<Message> {
        self.strategy()
            .decode(peer.address(), wire)
            .map(|text| Message::from_parts(peer.clone(), text))
    }
}

impl std::fmt::Debug for MessageCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageCodec")
            .field("strategy", &self.strategy_kind())
            .finish()
    }
}
