//! # courier-core
//!
//! The stateful heart of the courier messaging library: it turns validated
//! messages into framed, token-tagged fragments for an injected [`Channel`],
//! aggregates per-fragment acknowledgments back into one exactly-once
//! completion per message per milestone, and reassembles inbound batches
//! into decoded [`Message`]s for a registered listener.
//!
//! Pure protocol logic (capacity, segmentation, framing) lives in
//! `courier-protocol`; durable configuration lives behind the
//! `courier-store` key-value seam. Everything here is injected, nothing is
//! global.
//!
//! ```
//! use std::sync::Arc;
//!
//! use courier_core::{Channel, Courier, FragmentRegistration, Peer, SendOutcome};
//! use courier_store::MemoryStore;
//!
//! struct Echo;
//!
//! impl Channel for Echo {
//!     fn send_fragment(&self, _peer: &Peer, _wire: &str, registration: FragmentRegistration) {
//!         registration.sent(SendOutcome::Sent);
//!     }
//! }
//!
//! let courier = Courier::new(Arc::new(Echo), Arc::new(MemoryStore::new()));
//! let message = courier.message("+15555215554", "hello").unwrap();
//! courier
//!     .send_message(
//!         message,
//!         Some(Box::new(|peer, text, _outcome| {
//!             println!("sent to {peer}: {text}");
//!         })),
//!         None,
//!     )
//!     .unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod codec;
pub mod courier;
pub mod error;
pub mod inbound;
pub mod message;
pub mod peer;
pub mod token;
pub mod tracker;

pub use channel::{Channel, DeliveryOutcome, FragmentRegistration, SendOutcome};
pub use codec::{MessageCodec, STRATEGY_KEY};
pub use courier::{
    Courier, DeliveryListener, ReceivedListener, SendListener, RECEIVED_LISTENER_KEY,
};
pub use error::{CoreError, Result};
pub use inbound::{aggregate, InboundFragment};
pub use message::Message;
pub use peer::{InvalidPeerReason, Peer, PeerValidator, PhoneNumberValidator};
pub use token::{Token, TokenIssuer};
pub use tracker::{AckTracker, DeliveredTracker, Fragment, Listener, Outcome, SentTracker};
