//! RSA key handling, encryption, decryption, signing and verification
//! delegated to a platform cryptographic engine.
//!
//! Nearly all cryptographic work goes through an opaque key-reference
//! handle obtained from a [`CryptoEngine`] implementation. What this
//! crate implements itself is the byte-level plumbing around that
//! boundary:
//!
//! - a minimal [ASN.1 DER](asn1) decoder for the handful of node kinds
//!   an RSA key encoding can contain;
//! - [X.509 `SubjectPublicKeyInfo`](x509) header detection, stripping
//!   and reconstruction, so keys can move between the headerless form
//!   engines import and the wrapped form other tools publish;
//! - [PEM](pem) armor framing;
//! - [key](key), [message](message) and signature types gluing the
//!   above to the engine.
//!
//! Keys are imported header-free: [`PublicKey`] strips any X.509
//! wrapper before handing bytes to [`CryptoEngine::import_key`], and
//! re-attaches it on export.
//!
//! Everything here is synchronous, allocation-light and free of shared
//! state; values can be used from multiple threads as long as the engine
//! implementation allows it.

pub mod asn1;
pub mod engine;
pub mod error;
pub mod hashes;
pub mod key;
pub mod message;
pub mod pem;
pub mod x509;

pub use engine::{CryptoEngine, KeyClass, KeyPair, Padding};
pub use error::Error;
pub use hashes::DigestType;
pub use key::{generate_key_pair, PrivateKey, PublicKey};
pub use message::{ClearMessage, EncryptedMessage, Message, Signature};
