//! Clear and encrypted messages, and signatures over them.
//!
//! The types here hold bytes and drive the engine block by block; no
//! cryptography happens on this side of the [`CryptoEngine`] boundary
//! beyond digest computation (see [`crate::hashes`]).

use crate::engine::{CryptoEngine, Padding};
use crate::error::Error;
use crate::hashes::DigestType;
use crate::key::{PrivateKey, PublicKey};

/// Common behavior of the byte-holding message types.
pub trait Message: Sized {
    fn from_data(data: Vec<u8>) -> Self;
    fn data(&self) -> &[u8];

    /// Builds the message from base64 text.
    fn from_base64(base64_string: &str) -> Result<Self, Error> {
        Ok(Self::from_data(base64::decode(base64_string)?))
    }

    /// Base64 representation of the message bytes.
    fn base64_string(&self) -> String {
        base64::encode(self.data())
    }
}

/// Plaintext message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearMessage {
    data: Vec<u8>,
}

/// RSA-encrypted message: a whole number of engine blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedMessage {
    data: Vec<u8>,
}

/// RSA signature over a digested message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    data: Vec<u8>,
}

impl Message for ClearMessage {
    fn from_data(data: Vec<u8>) -> Self {
        ClearMessage { data }
    }
    fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Message for EncryptedMessage {
    fn from_data(data: Vec<u8>) -> Self {
        EncryptedMessage { data }
    }
    fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Message for Signature {
    fn from_data(data: Vec<u8>) -> Self {
        Signature { data }
    }
    fn data(&self) -> &[u8] {
        &self.data
    }
}

impl ClearMessage {
    pub fn new(data: Vec<u8>) -> Self {
        ClearMessage { data }
    }

    /// Builds a clear message from UTF-8 text.
    pub fn from_string(string: &str) -> Self {
        ClearMessage::new(string.as_bytes().to_vec())
    }

    /// Decodes the message bytes as UTF-8 text.
    pub fn string(&self) -> Result<String, Error> {
        Ok(String::from_utf8(self.data.clone())?)
    }

    /// Encrypts the message chunk by chunk with the recipient's public
    /// key.
    ///
    /// Each chunk of at most `block size - padding overhead` bytes
    /// becomes one full block of output. A failed chunk reports its
    /// starting byte offset.
    pub fn encrypted<E>(
        &self,
        engine: &E,
        key: &PublicKey<E::KeyRef>,
        padding: Padding,
    ) -> Result<EncryptedMessage, Error>
    where
        E: CryptoEngine,
    {
        let block_size = engine.block_size(key.reference());
        let max_chunk_size = block_size - padding.overhead();

        let mut encrypted = Vec::new();
        let mut index = 0;
        while index < self.data.len() {
            let end = usize::min(index + max_chunk_size, self.data.len());
            let block = engine
                .encrypt_block(key.reference(), padding, &self.data[index..end])
                .map_err(|_| Error::ChunkEncryptFailed { index })?;
            encrypted.extend(block);
            index = end;
        }

        Ok(EncryptedMessage::new(encrypted))
    }

    /// Hashes the message and signs the digest with the private key.
    pub fn signed<E>(
        &self,
        engine: &E,
        key: &PrivateKey<E::KeyRef>,
        digest_type: DigestType,
    ) -> Result<Signature, Error>
    where
        E: CryptoEngine,
    {
        let digest = digest_type.digest(&self.data);
        let block_size = engine.block_size(key.reference());
        let max_chunk_size = block_size - Padding::Pkcs1.overhead();

        if digest.len() > max_chunk_size {
            return Err(Error::InvalidDigestSize {
                digest_size: digest.len(),
                max_chunk_size,
            });
        }

        let signature = engine.sign_digest(key.reference(), digest_type, &digest)?;
        Ok(Signature::new(signature))
    }

    /// Verifies a signature over the message with the signer's public
    /// key. `Ok(false)` means the signature does not match.
    pub fn verify<E>(
        &self,
        engine: &E,
        key: &PublicKey<E::KeyRef>,
        signature: &Signature,
        digest_type: DigestType,
    ) -> Result<bool, Error>
    where
        E: CryptoEngine,
    {
        let digest = digest_type.digest(&self.data);
        engine.verify_digest(key.reference(), digest_type, &digest, signature.data())
    }
}

impl EncryptedMessage {
    pub fn new(data: Vec<u8>) -> Self {
        EncryptedMessage { data }
    }

    /// Decrypts the message block by block with the recipient's private
    /// key.
    pub fn decrypted<E>(
        &self,
        engine: &E,
        key: &PrivateKey<E::KeyRef>,
        padding: Padding,
    ) -> Result<ClearMessage, Error>
    where
        E: CryptoEngine,
    {
        let block_size = engine.block_size(key.reference());

        let mut decrypted = Vec::new();
        let mut index = 0;
        while index < self.data.len() {
            let end = usize::min(index + block_size, self.data.len());
            let chunk = engine
                .decrypt_block(key.reference(), padding, &self.data[index..end])
                .map_err(|_| Error::ChunkDecryptFailed { index })?;
            decrypted.extend(chunk);
            index = end;
        }

        Ok(ClearMessage::new(decrypted))
    }
}

impl Signature {
    pub fn new(data: Vec<u8>) -> Self {
        Signature { data }
    }
}
