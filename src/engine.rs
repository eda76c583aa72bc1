//! Capability interface to the host's cryptographic services.
//!
//! Everything that touches actual RSA math sits behind [`CryptoEngine`].
//! The crate strips and attaches key headers, chunks messages and
//! computes digests; the engine owns the key material and performs the
//! primitive operations on it, reachable only through the opaque
//! [`KeyRef`](CryptoEngine::KeyRef) handle it hands out.

use crate::error::Error;
use crate::hashes::DigestType;

/// Class of a key held by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Public,
    Private,
}

/// Padding scheme the engine applies around each encrypted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// Raw RSA. Chunks span the whole block.
    None,
    /// PKCS#1 v1.5. Costs 11 bytes of every block.
    Pkcs1,
    /// OAEP. Costs 42 bytes of every block.
    Oaep,
}

impl Padding {
    /// Bytes of a block the scheme reserves for itself.
    pub(crate) fn overhead(self) -> usize {
        match self {
            Padding::None => 0,
            Padding::Pkcs1 => 11,
            Padding::Oaep => 42,
        }
    }
}

/// A freshly generated pair of key handles.
pub struct KeyPair<R> {
    pub private: R,
    pub public: R,
}

/// Host cryptographic engine.
///
/// Implementations wrap a platform keychain, an HSM, or a software
/// backend. All key material lives on the engine's side of this trait;
/// the crate only ever holds the `KeyRef` handles.
pub trait CryptoEngine {
    /// Opaque reference to a key held by the engine.
    type KeyRef;

    /// Imports DER key bytes and returns a handle to the stored key.
    ///
    /// Public keys must be handed over without their X.509 header;
    /// callers go through [`crate::x509::strip_key_header`] first.
    fn import_key(&self, der: &[u8], class: KeyClass) -> Result<Self::KeyRef, Error>;

    /// Generates a fresh RSA key pair with the given modulus size.
    fn generate_key_pair(&self, size_in_bits: usize) -> Result<KeyPair<Self::KeyRef>, Error>;

    /// The engine's byte representation of the key: headerless DER.
    fn key_data(&self, key: &Self::KeyRef) -> Result<Vec<u8>, Error>;

    /// Class the engine recorded for the key.
    fn key_class(&self, key: &Self::KeyRef) -> KeyClass;

    /// RSA block size of the key in bytes, i.e. the modulus size.
    fn block_size(&self, key: &Self::KeyRef) -> usize;

    /// Encrypts one chunk into one block.
    fn encrypt_block(
        &self,
        key: &Self::KeyRef,
        padding: Padding,
        chunk: &[u8],
    ) -> Result<Vec<u8>, Error>;

    /// Decrypts one block back into its chunk.
    fn decrypt_block(
        &self,
        key: &Self::KeyRef,
        padding: Padding,
        block: &[u8],
    ) -> Result<Vec<u8>, Error>;

    /// Signs a precomputed message digest.
    fn sign_digest(
        &self,
        key: &Self::KeyRef,
        digest_type: DigestType,
        digest: &[u8],
    ) -> Result<Vec<u8>, Error>;

    /// Checks `signature` over a precomputed digest. `Ok(false)` means
    /// well-formed input whose signature simply does not match.
    fn verify_digest(
        &self,
        key: &Self::KeyRef,
        digest_type: DigestType,
        digest: &[u8],
        signature: &[u8],
    ) -> Result<bool, Error>;
}
