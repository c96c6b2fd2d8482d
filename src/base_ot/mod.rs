//! # Base OT
//!
//! Chou and Orlandi's 1-out-of-2 oblivious transfer
//! [https://eprint.iacr.org/2015/267.pdf]. For all following explanations
//! consider the paper as source, with the sender's secret called `x` and the
//! receiver's `y`:
//!
//! - sender: `X = x·G`
//! - receiver with selection `c`: `R = c·X + y·G`
//! - sender keys: `k_j = H(X, R, j, x·R - j·x·X)`
//! - receiver key: `k_c = H(X, R, c, y·X)`
//!
//! As `x·R - c·x·X = x·y·G = y·X`, only `k_c` is known to the receiver, and as
//! `y·G` masks `c·X` the sender cannot tell which key that is.
//!
//! Both parties are plain state machines without any I/O; 1-out-of-n or
//! batched transfers would be further types next to these.
use crate::errors::*;
use curve25519_dalek::scalar::Scalar;
use std::fmt;

pub mod receiver;
pub mod sender;

/// The receiver's choice of message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Zero = 0,
    One = 1,
}

impl Selection {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn other(self) -> Selection {
        match self {
            Selection::Zero => Selection::One,
            Selection::One => Selection::Zero,
        }
    }

    pub(crate) fn to_scalar(self) -> Scalar {
        Scalar::from(self.as_u8())
    }
}

impl From<bool> for Selection {
    fn from(bit: bool) -> Self {
        if bit {
            Selection::One
        } else {
            Selection::Zero
        }
    }
}

impl From<Selection> for bool {
    fn from(s: Selection) -> bool {
        s == Selection::One
    }
}

impl TryFrom<u8> for Selection {
    type Error = Error;

    fn try_from(v: u8) -> Result<Self> {
        match v {
            0 => Ok(Selection::Zero),
            1 => Ok(Selection::One),
            v => Err(ErrorKind::InvalidSelection(v).into()),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// The sender's answer to a query: both messages, each encrypted under the
/// key for its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub c0: Vec<u8>,
    pub c1: Vec<u8>,
}

impl Reply {
    pub fn new(c0: Vec<u8>, c1: Vec<u8>) -> Self {
        Reply { c0, c1 }
    }

    pub fn get(&self, index: Selection) -> &[u8] {
        match index {
            Selection::Zero => &self.c0,
            Selection::One => &self.c1,
        }
    }

    /// The same ciphertexts in swapped order.
    pub fn reversed(self) -> Reply {
        Reply {
            c0: self.c1,
            c1: self.c0,
        }
    }

    pub fn into_pair(self) -> (Vec<u8>, Vec<u8>) {
        (self.c0, self.c1)
    }
}

impl From<(Vec<u8>, Vec<u8>)> for Reply {
    fn from((c0, c1): (Vec<u8>, Vec<u8>)) -> Self {
        Reply { c0, c1 }
    }
}

/// Short hex prefix of a public wire value for log lines.
pub(crate) fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(4)])
}
