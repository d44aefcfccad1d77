//! # courier-protocol
//!
//! Pure protocol logic for the courier messaging library:
//!
//! - **Capacity classification**: whether text fits the channel in the
//!   encoding its character repertoire forces ([`charset`])
//! - **Segmentation**: splitting oversized text into ordered,
//!   capacity-sized segments and reassembling them ([`segment`])
//! - **Framing**: stamping and stripping the signature that separates
//!   library traffic from arbitrary channel traffic ([`framing`])
//!
//! Everything here is synchronous, bounded-time computation with no I/O;
//! the stateful send/receive machinery lives in `courier-core`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod charset;
pub mod error;
pub mod framing;
pub mod limits;
pub mod segment;

#[cfg(test)]
mod proptests;

pub use charset::{classify, ContentState, Encoding};
pub use error::{ProtocolError, Result};
pub use framing::{FramingStrategy, SignaturePrefix, StrategyKind, SIGNATURE};
