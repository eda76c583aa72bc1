//! Message digests backing RSA signatures.

use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

/// Digest algorithm a message is hashed with before signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestType {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestType {
    /// Hashes `data` with the selected algorithm.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            DigestType::Sha1 => Sha1::digest(data).to_vec(),
            DigestType::Sha224 => Sha224::digest(data).to_vec(),
            DigestType::Sha256 => Sha256::digest(data).to_vec(),
            DigestType::Sha384 => Sha384::digest(data).to_vec(),
            DigestType::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// Digest output length in bytes.
    pub fn length(self) -> usize {
        match self {
            DigestType::Sha1 => 20,
            DigestType::Sha224 => 28,
            DigestType::Sha256 => 32,
            DigestType::Sha384 => 48,
            DigestType::Sha512 => 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digests_match_known_vectors() {
        assert_eq!(
            hex::encode(DigestType::Sha1.digest(b"abc")),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            hex::encode(DigestType::Sha256.digest(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn lengths_match_output() {
        for &digest_type in &[
            DigestType::Sha1,
            DigestType::Sha224,
            DigestType::Sha256,
            DigestType::Sha384,
            DigestType::Sha512,
        ] {
            assert_eq!(digest_type.digest(b"").len(), digest_type.length());
        }
    }
}
