//! Messages: a validated destination plus capacity-checked text.

use courier_protocol::charset;

use crate::error::Result;
use crate::peer::Peer;

/// A message accepted for sending or produced by decoding inbound traffic.
///
/// Construction through [`Message::new`] guarantees the text fits the
/// channel's total capacity in whichever encoding its repertoire forces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    peer: Peer,
    text: String,
}

impl Message {
    /// Build a message, rejecting text that exceeds the channel capacity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidContent`](crate::CoreError::InvalidContent)
    /// when the text is too long for the encoding it requires.
    pub fn new(peer: Peer, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        charset::check(&text)?;
        Ok(Self { peer, text })
    }

    /// Build a message from already-decoded inbound text, skipping the
    /// capacity check. Inbound traffic was sized by the sender.
    pub(crate) fn from_parts(peer: Peer, text: String) -> Self {
        Self { peer, text }
    }

    /// The destination (or origin, for inbound messages).
    pub fn peer(&self) -> &Peer {
        &self.peer
    }

    /// The message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the message, yielding its parts.
    pub fn into_parts(self) -> (Peer, String) {
        (self.peer, self.text)
    }
}
