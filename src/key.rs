//! Public and private RSA key handles.
//!
//! A key owns the opaque engine reference plus the DER bytes it was
//! built from. Public keys are header-stripped before import (see
//! [`crate::x509`]); the stripped form is kept alongside the original so
//! either can be exported without another engine round trip.

use lazy_static::lazy_static;
use regex::Regex;
use zeroize::Zeroize;

use crate::engine::{CryptoEngine, KeyClass};
use crate::error::Error;
use crate::pem;
use crate::x509;

lazy_static! {
    static ref PUBLIC_KEY_PEM: Regex =
        Regex::new("(?s)-----BEGIN PUBLIC KEY-----.+?-----END PUBLIC KEY-----").unwrap();
}

/// RSA public key backed by an engine key reference.
#[derive(Debug)]
pub struct PublicKey<R> {
    reference: R,
    data: Vec<u8>,
    headerless_data: Vec<u8>,
}

impl<R> PublicKey<R> {
    /// Imports a public key from DER bytes, stripping any X.509 header
    /// before the engine sees them.
    pub fn from_der<E>(engine: &E, der: &[u8]) -> Result<Self, Error>
    where
        E: CryptoEngine<KeyRef = R>,
    {
        let headerless_data = x509::strip_key_header(der)?;
        let reference = engine.import_key(&headerless_data, KeyClass::Public)?;
        Ok(PublicKey {
            reference,
            data: der.to_vec(),
            headerless_data,
        })
    }

    /// Imports a public key from base64-encoded DER bytes.
    pub fn from_base64<E>(engine: &E, base64_string: &str) -> Result<Self, Error>
    where
        E: CryptoEngine<KeyRef = R>,
    {
        let der = base64::decode(base64_string)?;
        Self::from_der(engine, &der)
    }

    /// Imports a public key from a PEM block.
    pub fn from_pem<E>(engine: &E, pem_string: &str) -> Result<Self, Error>
    where
        E: CryptoEngine<KeyRef = R>,
    {
        let der = pem::decode(pem_string)?;
        Self::from_der(engine, &der)
    }

    /// Wraps an existing engine reference, exporting its byte
    /// representation.
    pub fn from_reference<E>(engine: &E, reference: R) -> Result<Self, Error>
    where
        E: CryptoEngine<KeyRef = R>,
    {
        if engine.key_class(&reference) != KeyClass::Public {
            return Err(Error::NotAPublicKey);
        }
        let data = engine.key_data(&reference)?;
        Ok(PublicKey {
            reference,
            headerless_data: data.clone(),
            data,
        })
    }

    /// Collects every well-formed public key in a PEM blob. Candidate
    /// blocks that fail to parse are skipped.
    pub fn all_from_pem<E>(engine: &E, pem_string: &str) -> Vec<Self>
    where
        E: CryptoEngine<KeyRef = R>,
    {
        PUBLIC_KEY_PEM
            .find_iter(pem_string)
            .filter_map(|block| Self::from_pem(engine, block.as_str()).ok())
            .collect()
    }

    /// Opaque engine reference to the key.
    pub fn reference(&self) -> &R {
        &self.reference
    }

    /// DER bytes as provided at construction.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// DER bytes with the X.509 header stripped. May differ from
    /// [`data`](Self::data) when the key arrived wrapped.
    pub fn headerless_data(&self) -> &[u8] {
        &self.headerless_data
    }

    /// DER bytes wrapped in the X.509 header, the form other tools expect
    /// inside a `PUBLIC KEY` PEM block.
    pub fn x509_data(&self) -> Result<Vec<u8>, Error> {
        x509::prepend_x509_key_header(&self.headerless_data)
    }

    /// Base64 representation of the key bytes.
    pub fn base64_string(&self) -> String {
        base64::encode(&self.data)
    }

    /// PEM representation of the key, X.509-wrapped.
    pub fn pem_string(&self) -> Result<String, Error> {
        Ok(pem::encode(&self.x509_data()?, "PUBLIC KEY"))
    }
}

/// RSA private key backed by an engine key reference.
///
/// The DER buffer is zeroized when the key is dropped.
#[derive(Debug)]
pub struct PrivateKey<R> {
    reference: R,
    data: Vec<u8>,
}

impl<R> PrivateKey<R> {
    /// Imports a private key from DER bytes.
    pub fn from_der<E>(engine: &E, der: &[u8]) -> Result<Self, Error>
    where
        E: CryptoEngine<KeyRef = R>,
    {
        let reference = engine.import_key(der, KeyClass::Private)?;
        Ok(PrivateKey {
            reference,
            data: der.to_vec(),
        })
    }

    /// Imports a private key from base64-encoded DER bytes.
    pub fn from_base64<E>(engine: &E, base64_string: &str) -> Result<Self, Error>
    where
        E: CryptoEngine<KeyRef = R>,
    {
        let der = base64::decode(base64_string)?;
        Self::from_der(engine, &der)
    }

    /// Imports a private key from a PEM block.
    pub fn from_pem<E>(engine: &E, pem_string: &str) -> Result<Self, Error>
    where
        E: CryptoEngine<KeyRef = R>,
    {
        let der = pem::decode(pem_string)?;
        Self::from_der(engine, &der)
    }

    /// Wraps an existing engine reference, exporting its byte
    /// representation.
    pub fn from_reference<E>(engine: &E, reference: R) -> Result<Self, Error>
    where
        E: CryptoEngine<KeyRef = R>,
    {
        if engine.key_class(&reference) != KeyClass::Private {
            return Err(Error::NotAPrivateKey);
        }
        let data = engine.key_data(&reference)?;
        Ok(PrivateKey { reference, data })
    }

    /// Opaque engine reference to the key.
    pub fn reference(&self) -> &R {
        &self.reference
    }

    /// DER bytes of the key.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Base64 representation of the key bytes.
    pub fn base64_string(&self) -> String {
        base64::encode(&self.data)
    }

    /// PEM representation of the key.
    pub fn pem_string(&self) -> String {
        pem::encode(&self.data, "RSA PRIVATE KEY")
    }
}

impl<R> Drop for PrivateKey<R> {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

/// Generates a fresh RSA key pair through the engine.
pub fn generate_key_pair<E>(
    engine: &E,
    size_in_bits: usize,
) -> Result<(PrivateKey<E::KeyRef>, PublicKey<E::KeyRef>), Error>
where
    E: CryptoEngine,
{
    let pair = engine.generate_key_pair(size_in_bits)?;
    let private = PrivateKey::from_reference(engine, pair.private)?;
    let public = PublicKey::from_reference(engine, pair.public)?;
    Ok((private, public))
}
