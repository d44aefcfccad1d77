//! Inbound batch aggregation.
//!
//! Channels deliver inbound traffic in batches of raw fragments, possibly
//! interleaving several senders. Aggregation combines each sender's
//! fragments in arrival order into one candidate text per sender before the
//! codec decides whether it is library traffic.

/// One raw inbound fragment as handed over by the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundFragment {
    /// The originating identifier, not yet validated.
    pub sender: String,
    /// The fragment's raw text.
    pub text: String,
}

impl InboundFragment {
    /// Build a fragment.
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// Combine a batch into one `(sender, text)` pair per sender.
///
/// Senders appear in first-seen order; each sender's fragments concatenate
/// in arrival order. Form feeds, which some channels substitute for line
/// breaks, normalize back to `\n`.
pub fn aggregate(batch: &[InboundFragment]) -> Vec<(String, String)> {
    let mut combined: Vec<(String, String)> = Vec::new();
    for fragment in batch {
        match combined.iter_mut().find(|(sender, _)| *sender == fragment.sender) {
            Some((_, text)) => text.push_str(&fragment.text),
            None => combined.push((fragment.sender.clone(), fragment.text.clone())),
        }
    }
    for (_, text) in &mut combined {
        if text.contains('\u{000C}') {
            *text = text.replace('\u{000C}', "\n");
        }
    }
    combined
}
