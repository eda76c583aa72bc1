//! Error types for the `native-rsa` crate.

use crate::asn1::ParserError;
use base64::DecodeError as Base64Error;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Error type for `native-rsa`.
///
/// Engine-side failures carry the engine's native status code. No failure
/// is retried or suppressed inside the crate; every operation surfaces
/// its error to the immediate caller.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// PEM input had no base64 payload between its armor lines
    #[error("Couldn't get data from PEM key: no data available after stripping armor")]
    PemDoesNotContainKey,
    /// ASN.1 decoding failed; the key bytes are truncated or corrupt
    #[error("Couldn't parse the ASN.1 key data: {0}")]
    Asn1ParsingFailed(#[from] ParserError),
    /// Decoding succeeded but the root node is not a sequence
    #[error("Root ASN.1 node of the provided key is not a sequence")]
    InvalidAsn1RootNode,
    /// Well-formed DER that matches neither recognized key shape
    #[error("Provided key has an unexpected ASN.1 structure")]
    InvalidAsn1Structure,
    /// X.509 wrapper construction was handed unusable input
    #[error("Couldn't construct an X.509 header around the provided key bytes")]
    X509HeaderConstructionFailed,
    /// Engine rejected the key bytes on import
    #[error("Couldn't import key data into the engine: status {status}")]
    KeyImportFailed { status: i32 },
    /// Engine failed to generate a key pair
    #[error("Couldn't generate an RSA key pair: status {status}")]
    KeyGenerationFailed { status: i32 },
    /// Engine failed to export a key's byte representation
    #[error("Couldn't retrieve key data from the engine: status {status}")]
    KeyRepresentationFailed { status: i32 },
    /// Provided key reference is not a public key
    #[error("Provided key reference is not an RSA public key")]
    NotAPublicKey,
    /// Provided key reference is not a private key
    #[error("Provided key reference is not an RSA private key")]
    NotAPrivateKey,
    /// Encryption of the chunk starting at byte `index` failed
    #[error("Couldn't encrypt chunk at index {index}")]
    ChunkEncryptFailed { index: usize },
    /// Decryption of the block starting at byte `index` failed
    #[error("Couldn't decrypt chunk at index {index}")]
    ChunkDecryptFailed { index: usize },
    /// Digest does not fit into one PKCS#1 block of the key
    #[error("Digest size {digest_size} is bigger than the key's maximum chunk size {max_chunk_size}")]
    InvalidDigestSize {
        digest_size: usize,
        max_chunk_size: usize,
    },
    /// Engine failed to produce a signature
    #[error("Couldn't sign the provided digest: status {status}")]
    SignatureCreateFailed { status: i32 },
    /// Engine failed while checking a signature
    #[error("Couldn't verify the signature of the provided data: status {status}")]
    SignatureVerifyFailed { status: i32 },
    /// Error decoding Base64
    #[error(transparent)]
    Base64(#[from] Base64Error),
    /// Error decoding message bytes as UTF-8 text
    #[error(transparent)]
    FromUtf8(#[from] FromUtf8Error),
}
