use super::{fingerprint, Reply, Selection};
use crate::crypto::{AesCryptoProvider, SymmetricCrypt};
use crate::errors::*;
use crate::group::{decode_point, encode_point, random_scalar, Backend, DefaultBackend, POINT_LEN};
use crate::kdf::derive_key;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, warn};
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderState {
    Uninitialized,
    Initialized,
    Replied,
}

impl SenderState {
    fn as_str(self) -> &'static str {
        match self {
            SenderState::Uninitialized => "uninitialized",
            SenderState::Initialized => "initialized",
            SenderState::Replied => "replied",
        }
    }
}

enum Inner {
    Uninitialized,
    Initialized {
        x: Zeroizing<Scalar>,
        public: RistrettoPoint,
        // x·X, subtracted from x·R to get the key point for index 1
        t: Zeroizing<RistrettoPoint>,
    },
    Replied {
        public: RistrettoPoint,
    },
}

/// Sending side of a single transfer. Create one per transfer and discard it
/// after `reply`; the secret scalar is wiped as soon as the reply is built.
pub struct ChouOrlandiOTSender<B = DefaultBackend, C = AesCryptoProvider>
where
    B: Backend,
    C: SymmetricCrypt,
{
    crypt: C,
    inner: Inner,
    backend: PhantomData<B>,
}

impl ChouOrlandiOTSender {
    pub fn new() -> Self {
        Self::with_crypt(AesCryptoProvider::default())
    }
}

impl Default for ChouOrlandiOTSender {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend, C: SymmetricCrypt> ChouOrlandiOTSender<B, C> {
    pub fn with_crypt(crypt: C) -> Self {
        ChouOrlandiOTSender {
            crypt,
            inner: Inner::Uninitialized,
            backend: PhantomData,
        }
    }

    pub fn state(&self) -> SenderState {
        match self.inner {
            Inner::Uninitialized => SenderState::Uninitialized,
            Inner::Initialized { .. } => SenderState::Initialized,
            Inner::Replied { .. } => SenderState::Replied,
        }
    }

    /// The public point `X`, once initialized.
    pub fn public(&self) -> Option<[u8; POINT_LEN]> {
        match &self.inner {
            Inner::Uninitialized => None,
            Inner::Initialized { public, .. } | Inner::Replied { public } => {
                Some(encode_point(public))
            }
        }
    }

    /// Draws the secret `x` and returns `X = x·G` for the receiver.
    pub fn init<R>(&mut self, rng: &mut R) -> Result<[u8; POINT_LEN]>
    where
        R: RngCore + CryptoRng,
    {
        if let Inner::Initialized { .. } | Inner::Replied { .. } = self.inner {
            return Err(ErrorKind::ProtocolState("init", self.state().as_str()).into());
        }
        let x = Zeroizing::new(random_scalar(rng));
        let public = B::mul_base(&x);
        let t = Zeroizing::new(B::mul(&public, &x));
        let bytes = encode_point(&public);
        debug!(backend = B::NAME, public = %fingerprint(&bytes), "ot sender initialized");
        self.inner = Inner::Initialized { x, public, t };
        Ok(bytes)
    }

    /// Encrypts `msg0` and `msg1` against the receiver's `query`.
    ///
    /// The key for index `j` comes from `x·R - j·x·X`; this reduces to `y·X`
    /// for the index the receiver chose, but as `y` is only known to the
    /// receiver (provided the discrete logarithm problem is hard in our group)
    /// the sender cannot tell which one that is.
    pub fn reply(&mut self, query: &[u8], msg0: &[u8], msg1: &[u8]) -> Result<Reply> {
        let (x, public, t) = match &self.inner {
            Inner::Initialized { x, public, t } => (x, public, t),
            _ => return Err(ErrorKind::ProtocolState("reply", self.state().as_str()).into()),
        };
        let r = match decode_point(query) {
            Ok(r) => r,
            Err(e) => {
                warn!(query = %fingerprint(query), "ot sender rejected query");
                return Err(e).chain_err(|| ErrorKind::InvalidQuery);
            }
        };

        let xr = Zeroizing::new(B::mul(&r, x));
        let s0 = Zeroizing::new(*xr - Selection::Zero.to_scalar() * **t);
        let s1 = Zeroizing::new(*xr - Selection::One.to_scalar() * **t);
        let k0 = derive_key(public, &r, Selection::Zero, &s0);
        let k1 = derive_key(public, &r, Selection::One, &s1);

        let c0 = self.crypt.encrypt(&k0, msg0.to_vec())?;
        let c1 = self.crypt.encrypt(&k1, msg1.to_vec())?;

        debug!(
            query = %fingerprint(query),
            len0 = c0.len(),
            len1 = c1.len(),
            "ot sender replied"
        );
        let public = *public;
        // drops x and t, wiping them
        self.inner = Inner::Replied { public };
        Ok(Reply { c0, c1 })
    }
}

impl<B: Backend, C: SymmetricCrypt> fmt::Debug for ChouOrlandiOTSender<B, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ChouOrlandiOTSender")
            .field("backend", &B::NAME)
            .field("state", &self.state())
            .finish()
    }
}
