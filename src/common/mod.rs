//! Helpers shared by both parties of the protocol.
pub mod digest;
