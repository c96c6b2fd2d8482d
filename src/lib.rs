//! # ot
//!
//! A 1-out-of-2 oblivious transfer engine after Chou and Orlandi
//! [https://eprint.iacr.org/2015/267.pdf], built on the Ristretto group of
//! `curve25519-dalek`.
//!
//! The engine does no I/O. Each party is a small state machine that consumes
//! and produces opaque byte strings; moving these between the parties is up
//! to the caller:
//!
//! ```text
//! sender.init(rng)                      -> public
//! receiver.init(rng)
//! receiver.query(public, selection)     -> query
//! sender.reply(query, m0, m1)           -> (c0, c1)
//! receiver.elect(public, selection, c0, c1) -> m_selection
//! ```
#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;

pub mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    error_chain! {
        errors {
            InvalidPoint {
                description("received point is invalid")
                display("received point is invalid")
            }
            InvalidScalar {
                description("received scalar is invalid")
                display("received scalar is invalid")
            }
            InvalidKey {
                description("sender public key is invalid")
                display("sender public key is invalid")
            }
            InvalidQuery {
                description("receiver query is invalid")
                display("receiver query is invalid")
            }
            InvalidSelection(v: u8) {
                description("selection bit must be 0 or 1")
                display("selection bit must be 0 or 1, got {}", v)
            }
            ProtocolState(op: &'static str, state: &'static str) {
                description("operation invoked out of sequence")
                display("cannot {} while {}", op, state)
            }
            SelectionMismatch(expected: u8, given: u8) {
                description("selection differs from the one used for the query")
                display("selection {} differs from the one used for the query ({})", given, expected)
            }
            Decryption {
                description("ciphertext failed authentication")
                display("ciphertext failed authentication")
            }
            Crypto(msg: &'static str) {
                description("symmetric cipher failure")
                display("symmetric cipher failure: {}", msg)
            }
        }
    }
}

pub mod base_ot;
pub mod common;
pub mod crypto;
pub mod group;
pub mod kdf;

pub use crate::base_ot::receiver::{ChouOrlandiOTReceiver, ReceiverState};
pub use crate::base_ot::sender::{ChouOrlandiOTSender, SenderState};
pub use crate::base_ot::{Reply, Selection};
pub use crate::errors::{Error, ErrorKind, Result};
