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
use std::mem;
use tracing::{debug, warn};
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverState {
    Uninitialized,
    /// `y` is drawn, waiting for the sender's public point.
    Ready,
    Queried,
    Elected,
}

impl ReceiverState {
    fn as_str(self) -> &'static str {
        match self {
            ReceiverState::Uninitialized => "uninitialized",
            ReceiverState::Ready => "ready",
            ReceiverState::Queried => "queried",
            ReceiverState::Elected => "elected",
        }
    }
}

/// Everything `elect` needs from the query step.
struct Transcript {
    y: Zeroizing<Scalar>,
    public: RistrettoPoint,
    query: RistrettoPoint,
    selection: Selection,
}

enum Inner {
    Uninitialized,
    Ready { y: Zeroizing<Scalar> },
    Queried(Transcript),
    Elected(Transcript),
}

/// Receiving side of a single transfer.
///
/// `elect` is a pure function of the query transcript and its arguments: it
/// may be repeated (also after a successful election) and yields the same
/// result for the same inputs. A failing `elect` leaves the state untouched.
pub struct ChouOrlandiOTReceiver<B = DefaultBackend, C = AesCryptoProvider>
where
    B: Backend,
    C: SymmetricCrypt,
{
    crypt: C,
    inner: Inner,
    backend: PhantomData<B>,
}

impl ChouOrlandiOTReceiver {
    pub fn new() -> Self {
        Self::with_crypt(AesCryptoProvider::default())
    }
}

impl Default for ChouOrlandiOTReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend, C: SymmetricCrypt> ChouOrlandiOTReceiver<B, C> {
    pub fn with_crypt(crypt: C) -> Self {
        ChouOrlandiOTReceiver {
            crypt,
            inner: Inner::Uninitialized,
            backend: PhantomData,
        }
    }

    pub fn state(&self) -> ReceiverState {
        match self.inner {
            Inner::Uninitialized => ReceiverState::Uninitialized,
            Inner::Ready { .. } => ReceiverState::Ready,
            Inner::Queried(_) => ReceiverState::Queried,
            Inner::Elected(_) => ReceiverState::Elected,
        }
    }

    /// Draws the secret `y`.
    pub fn init<R>(&mut self, rng: &mut R) -> Result<()>
    where
        R: RngCore + CryptoRng,
    {
        if let Inner::Uninitialized = self.inner {
            self.inner = Inner::Ready {
                y: Zeroizing::new(random_scalar(rng)),
            };
            debug!(backend = B::NAME, "ot receiver initialized");
            Ok(())
        } else {
            Err(ErrorKind::ProtocolState("init", self.state().as_str()).into())
        }
    }

    /// Builds the query `R = c·X + y·G` for `selection = c`.
    ///
    /// `c·X` is a full scalar multiplication for both values of `c` so neither
    /// timing nor the result's shape depends on the selection.
    pub fn query(&mut self, sender_public: &[u8], selection: Selection) -> Result<[u8; POINT_LEN]> {
        let y = match &self.inner {
            Inner::Ready { y } => y,
            _ => return Err(ErrorKind::ProtocolState("query", self.state().as_str()).into()),
        };
        let public = decode_sender_public(sender_public)?;
        let query = B::mul(&public, &selection.to_scalar()) + B::mul_base(y);
        let bytes = encode_point(&query);

        self.inner = match mem::replace(&mut self.inner, Inner::Uninitialized) {
            Inner::Ready { y } => Inner::Queried(Transcript {
                y,
                public,
                query,
                selection,
            }),
            other => other,
        };
        debug!(
            public = %fingerprint(sender_public),
            query = %fingerprint(&bytes),
            "ot receiver built query"
        );
        Ok(bytes)
    }

    /// Decrypts the ciphertext at index `selection` with the key `H(X, R, c, y·X)`.
    ///
    /// `selection` and `sender_public` must be the ones used for `query`. The
    /// other ciphertext is never touched: if the selected one does not
    /// authenticate this fails with `ErrorKind::Decryption`.
    pub fn elect(
        &mut self,
        sender_public: &[u8],
        selection: Selection,
        cipher0: &[u8],
        cipher1: &[u8],
    ) -> Result<Vec<u8>> {
        let transcript = match &self.inner {
            Inner::Queried(t) | Inner::Elected(t) => t,
            _ => return Err(ErrorKind::ProtocolState("elect", self.state().as_str()).into()),
        };
        if selection != transcript.selection {
            return Err(
                ErrorKind::SelectionMismatch(transcript.selection.as_u8(), selection.as_u8()).into(),
            );
        }
        let public = decode_sender_public(sender_public)?;
        if public != transcript.public {
            warn!(public = %fingerprint(sender_public), "ot receiver got a foreign public point");
            return Err(ErrorKind::InvalidKey.into());
        }

        let shared = Zeroizing::new(B::mul(&public, &transcript.y));
        let key = derive_key(&public, &transcript.query, selection, &shared);
        let cipher = match selection {
            Selection::Zero => cipher0,
            Selection::One => cipher1,
        };
        let plain = match self.crypt.decrypt(&key, cipher.to_vec()) {
            Ok(plain) => plain,
            Err(e) => {
                warn!(len = cipher.len(), "ot receiver could not authenticate ciphertext");
                return Err(e);
            }
        };

        self.inner = match mem::replace(&mut self.inner, Inner::Uninitialized) {
            Inner::Queried(t) => {
                debug!(len = plain.len(), "ot receiver elected");
                Inner::Elected(t)
            }
            other => other,
        };
        Ok(plain)
    }

    /// `elect` on a [`Reply`].
    pub fn elect_reply(
        &mut self,
        sender_public: &[u8],
        selection: Selection,
        reply: &Reply,
    ) -> Result<Vec<u8>> {
        self.elect(sender_public, selection, &reply.c0, &reply.c1)
    }
}

fn decode_sender_public(bytes: &[u8]) -> Result<RistrettoPoint> {
    match decode_point(bytes) {
        Ok(p) => Ok(p),
        Err(e) => {
            warn!(public = %fingerprint(bytes), "ot receiver rejected sender public point");
            Err(e).chain_err(|| ErrorKind::InvalidKey)
        }
    }
}

impl<B: Backend, C: SymmetricCrypt> fmt::Debug for ChouOrlandiOTReceiver<B, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ChouOrlandiOTReceiver")
            .field("backend", &B::NAME)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_ot::sender::ChouOrlandiOTSender;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn sender_public(seed: u64) -> [u8; POINT_LEN] {
        let mut sender = ChouOrlandiOTSender::new();
        sender.init(&mut ChaCha20Rng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn query_before_init() {
        let mut receiver = ChouOrlandiOTReceiver::new();
        match receiver.query(&sender_public(1), Selection::One) {
            Err(Error(ErrorKind::ProtocolState("query", "uninitialized"), _)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn elect_before_query() {
        let mut receiver = ChouOrlandiOTReceiver::new();
        receiver.init(&mut ChaCha20Rng::seed_from_u64(2)).unwrap();
        match receiver.elect(&sender_public(3), Selection::Zero, &[0; 20], &[0; 20]) {
            Err(Error(ErrorKind::ProtocolState("elect", "ready"), _)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(receiver.state(), ReceiverState::Ready);
    }

    #[test]
    fn init_and_query_only_once() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let mut receiver = ChouOrlandiOTReceiver::new();
        receiver.init(&mut rng).unwrap();
        assert!(receiver.init(&mut rng).is_err());
        let public = sender_public(5);
        receiver.query(&public, Selection::Zero).unwrap();
        assert_eq!(receiver.state(), ReceiverState::Queried);
        match receiver.query(&public, Selection::Zero) {
            Err(Error(ErrorKind::ProtocolState("query", "queried"), _)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_invalid_sender_public() {
        let mut receiver = ChouOrlandiOTReceiver::new();
        receiver.init(&mut ChaCha20Rng::seed_from_u64(6)).unwrap();
        for bad in [&[0u8; 32][..], &[0xffu8; 32][..], &[7u8; 33][..]].iter() {
            match receiver.query(bad, Selection::One) {
                Err(Error(ErrorKind::InvalidKey, _)) => {}
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(receiver.state(), ReceiverState::Ready);
    }

    #[test]
    fn query_with_selection_zero_is_y_g() {
        let mut receiver = ChouOrlandiOTReceiver::new();
        receiver.init(&mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        let q = receiver.query(&sender_public(10), Selection::Zero).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let y = random_scalar(&mut rng);
        assert_eq!(q, encode_point(&DefaultBackend::mul_base(&y)));
    }

    #[test]
    fn selection_is_bound_to_query() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut sender = ChouOrlandiOTSender::new();
        let public = sender.init(&mut rng).unwrap();
        let mut receiver = ChouOrlandiOTReceiver::new();
        receiver.init(&mut rng).unwrap();
        let query = receiver.query(&public, Selection::One).unwrap();
        let reply = sender.reply(&query, b"zero", b"one").unwrap();

        match receiver.elect_reply(&public, Selection::Zero, &reply) {
            Err(Error(ErrorKind::SelectionMismatch(1, 0), _)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(receiver.state(), ReceiverState::Queried);
        assert_eq!(receiver.elect_reply(&public, Selection::One, &reply).unwrap(), b"one");
        assert_eq!(receiver.state(), ReceiverState::Elected);
    }

    #[test]
    fn foreign_sender_public_is_rejected() {
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let mut sender = ChouOrlandiOTSender::new();
        let public = sender.init(&mut rng).unwrap();
        let mut receiver = ChouOrlandiOTReceiver::new();
        receiver.init(&mut rng).unwrap();
        let query = receiver.query(&public, Selection::Zero).unwrap();
        let reply = sender.reply(&query, b"zero", b"one").unwrap();

        match receiver.elect_reply(&sender_public(13), Selection::Zero, &reply) {
            Err(Error(ErrorKind::InvalidKey, _)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
