//! X.509 `SubjectPublicKeyInfo` handling around raw RSA keys.
//!
//! Two byte layouts are recognized:
//!
//! Headerless ([RFC 8017] A.1.1, and the multi-integer private-key forms):
//! ```text
//! SEQUENCE
//!     INTEGER -- modulus
//!     INTEGER -- public exponent
//! ```
//!
//! With X.509 header:
//! ```text
//! SEQUENCE
//!     SEQUENCE
//!         OBJECT IDENTIFIER 1.2.840.113549.1.1.1
//!         NULL
//!     BIT STRING
//!         SEQUENCE
//!             INTEGER -- modulus
//!             INTEGER -- public exponent
//! ```
//!
//! Platform engines import the headerless form; most other tools publish
//! the wrapped one. The routines here translate between the two.
//!
//! [RFC 8017]: https://datatracker.ietf.org/doc/html/rfc8017#appendix-A.1.1

use crate::asn1::{self, Node};
use crate::error::Error;

/// DER encoding of `SEQUENCE { OBJECT IDENTIFIER 1.2.840.113549.1.1.1, NULL }`,
/// the rsaEncryption AlgorithmIdentifier.
const RSA_ALGORITHM_IDENTIFIER: [u8; 15] = [
    0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01, 0x05, 0x00,
];

/// Strips the X.509 header from DER key bytes.
///
/// Bytes that are already headerless are returned unchanged. For wrapped
/// keys the payload of the trailing BIT STRING is returned; a trailing
/// OCTET STRING is accepted too, for the private-key containers that use
/// it.
pub fn strip_key_header(key_data: &[u8]) -> Result<Vec<u8>, Error> {
    let nodes = match asn1::parse(key_data)? {
        Node::Sequence(nodes) => nodes,
        _ => return Err(Error::InvalidAsn1RootNode),
    };

    if only_integers(&nodes) {
        return Ok(key_data.to_vec());
    }

    match nodes.last() {
        Some(Node::BitString(inner)) | Some(Node::OctetString(inner)) => Ok(inner.clone()),
        _ => Err(Error::InvalidAsn1Structure),
    }
}

/// Wraps headerless public key bytes in the X.509 `SubjectPublicKeyInfo`
/// sequence. Bytes that already carry the header are returned unchanged.
pub fn prepend_x509_key_header(key_data: &[u8]) -> Result<Vec<u8>, Error> {
    if key_data.is_empty() {
        return Err(Error::X509HeaderConstructionFailed);
    }

    let nodes = match asn1::parse(key_data)? {
        Node::Sequence(nodes) => nodes,
        _ => return Err(Error::InvalidAsn1RootNode),
    };

    if !only_integers(&nodes) {
        // Already wrapped.
        return Ok(key_data.to_vec());
    }

    Ok(wrap_headerless_key(key_data))
}

/// Checks whether DER key bytes carry the X.509 wrapper.
///
/// A shape mismatch reports `Ok(false)`; bytes that fail to decode at all
/// are an error, so corrupt input is never mistaken for a headerless key.
pub fn has_x509_header(key_data: &[u8]) -> Result<bool, Error> {
    let nodes = match asn1::parse(key_data)? {
        Node::Sequence(nodes) => nodes,
        _ => return Ok(false),
    };

    // AlgorithmIdentifier sequence followed by the wrapped key.
    if nodes.len() != 2 {
        return Ok(false);
    }

    let algorithm = match &nodes[0] {
        Node::Sequence(children) => children,
        _ => return Ok(false),
    };
    if algorithm.len() != 2 {
        return Ok(false);
    }
    if !matches!(algorithm[0], Node::ObjectIdentifier(_)) || !matches!(algorithm[1], Node::Null) {
        return Ok(false);
    }

    match &nodes[1] {
        Node::BitString(inner) => is_headerless_key(inner),
        _ => Ok(false),
    }
}

/// True iff the bytes decode to a sequence whose every immediate child is
/// an integer.
pub fn is_headerless_key(key_data: &[u8]) -> Result<bool, Error> {
    match asn1::parse(key_data)? {
        Node::Sequence(nodes) => Ok(only_integers(&nodes)),
        _ => Ok(false),
    }
}

fn only_integers(nodes: &[Node]) -> bool {
    nodes.iter().all(|node| matches!(node, Node::Integer(_)))
}

fn wrap_headerless_key(key: &[u8]) -> Vec<u8> {
    // Length octets of the BIT STRING content: the key plus its
    // unused-bits byte.
    let bit_string_length = encoded_octets(key.len() + 1);

    // Outer content: AlgorithmIdentifier, BIT STRING tag and unused-bits
    // byte, its length octets, and the key itself.
    let content_length =
        RSA_ALGORITHM_IDENTIFIER.len() + 2 + bit_string_length.len() + key.len();

    let mut wrapped = Vec::with_capacity(content_length + 4);
    wrapped.push(0x30);
    wrapped.extend(encoded_octets(content_length));
    wrapped.extend_from_slice(&RSA_ALGORITHM_IDENTIFIER);
    wrapped.push(0x03);
    wrapped.extend(bit_string_length);
    wrapped.push(0x00);
    wrapped.extend_from_slice(key);
    wrapped
}

/// DER length octets for `value`: one byte below 128 (short form),
/// otherwise a count byte `0x80 | k` followed by the `k` big-endian value
/// bytes (long form). Left inverse of the scanner's length decoding.
pub(crate) fn encoded_octets(value: usize) -> Vec<u8> {
    if value < 128 {
        return vec![value as u8];
    }

    let mut value_bytes = Vec::new();
    let mut remaining = value;
    while remaining > 0 {
        value_bytes.push((remaining & 0xff) as u8);
        remaining >>= 8;
    }
    value_bytes.reverse();

    let mut octets = Vec::with_capacity(value_bytes.len() + 1);
    octets.push(0x80 | value_bytes.len() as u8);
    octets.extend(value_bytes);
    octets
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::asn1::Scanner;

    /// Headerless 2048-bit public key, `SEQUENCE(INTEGER, INTEGER)`.
    pub(crate) const HEADERLESS_KEY_HEX: &str = "3082010A0282010100C1A0DFA367FBC2A5FD6ED5A071E02A4B0617E19C6B5AD11BB61192E78D212F10A7620084A3CED660894134D4E475BAD7786FA1D40878683FD1B7A1AD9C0542B7A666457A270159DAC40CE25B2EAE7CCD807D31AE725CA394F90FBB5C5BA500545B99C545A9FE08EFF00A5F23457633E1DB84ED5E908EF748A90F8DFCCAFF319CB0334705EA012AF15AA090D17A9330159C9AFC9275C610BB9B7C61317876DC7386C723885C100F774C19830F475AD1E9A9925F9CA9A69CE0181A214DF2EB75FD13E6A546B8C8ED699E33A8521242B7E42711066AEC22D25DD45D56F94D3170D6F2C25164D2DACED31C73963BA885ADCB706F40866B8266433ED5161DC50E4B3B0203010001";

    /// A 1024-bit public key with its X.509 header attached.
    pub(crate) const X509_KEY_HEX: &str = "30819F300D06092A864886F70D010101050003818D0030818902818100D0674615A252ED3D75D2A3073A0A8A445F3188FD3BEB8BA8584F7299E391BDEC3427F287327414174997D147DD8CA62647427D73C9DA5504E0A3EED5274A1D50A1237D688486FADB8B82061675ABFA5E55B624095DB8790C6DBCAE83D6A8588C9A6635D7CF257ED1EDE18F04217D37908FD0CBB86B2C58D5F762E6207FF7B92D0203010001";

    fn headerless_key() -> Vec<u8> {
        hex::decode(HEADERLESS_KEY_HEX).unwrap()
    }

    fn x509_key() -> Vec<u8> {
        hex::decode(X509_KEY_HEX).unwrap()
    }

    #[test]
    fn strip_of_headerless_key_is_identity() {
        let key = headerless_key();
        let stripped = strip_key_header(&key).unwrap();
        assert_eq!(stripped, key);
        // Stripping again changes nothing.
        assert_eq!(strip_key_header(&stripped).unwrap(), stripped);
    }

    #[test]
    fn strip_returns_bit_string_payload() {
        let stripped = strip_key_header(&x509_key()).unwrap();
        // Same bytes as the BIT STRING payload of a direct parse.
        let inner = match asn1::parse(&x509_key()).unwrap() {
            Node::Sequence(nodes) => match nodes.last() {
                Some(Node::BitString(inner)) => inner.clone(),
                other => panic!("expected bit string, got {:?}", other),
            },
            other => panic!("expected sequence, got {:?}", other),
        };
        assert_eq!(stripped, inner);
        assert!(is_headerless_key(&stripped).unwrap());
    }

    #[test]
    fn strip_returns_octet_string_payload() {
        // Private-key container shape: SEQUENCE(INTEGER, OCTET STRING).
        let data = [0x30, 0x08, 0x02, 0x01, 0x00, 0x04, 0x03, 0xaa, 0xbb, 0xcc];
        assert_eq!(strip_key_header(&data).unwrap(), vec![0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn strip_rejects_non_sequence_root() {
        let data = [0x02, 0x01, 0x05];
        assert!(matches!(
            strip_key_header(&data),
            Err(Error::InvalidAsn1RootNode)
        ));
    }

    #[test]
    fn strip_rejects_unrecognized_shape() {
        // SEQUENCE(INTEGER, NULL): neither headerless nor wrapped.
        let data = [0x30, 0x05, 0x02, 0x01, 0x00, 0x05, 0x00];
        assert!(matches!(
            strip_key_header(&data),
            Err(Error::InvalidAsn1Structure)
        ));
    }

    #[test]
    fn strip_surfaces_parse_failures() {
        let mut data = x509_key();
        data.pop();
        assert!(matches!(
            strip_key_header(&data),
            Err(Error::Asn1ParsingFailed(_))
        ));
    }

    #[test]
    fn prepend_then_strip_round_trips() {
        let key = headerless_key();
        let wrapped = prepend_x509_key_header(&key).unwrap();
        assert_ne!(wrapped, key);
        assert_eq!(strip_key_header(&wrapped).unwrap(), key);
    }

    #[test]
    fn prepend_rebuilds_the_known_wrapper() {
        // Stripping the fixture and re-wrapping must reproduce it byte
        // for byte.
        let wrapped = x509_key();
        let stripped = strip_key_header(&wrapped).unwrap();
        assert_eq!(prepend_x509_key_header(&stripped).unwrap(), wrapped);
    }

    #[test]
    fn prepend_of_wrapped_key_is_identity() {
        let wrapped = x509_key();
        assert_eq!(prepend_x509_key_header(&wrapped).unwrap(), wrapped);
    }

    #[test]
    fn prepend_of_empty_input_fails() {
        assert!(matches!(
            prepend_x509_key_header(&[]),
            Err(Error::X509HeaderConstructionFailed)
        ));
    }

    #[test]
    fn detects_wrapped_and_headerless_keys() {
        let key = headerless_key();
        let wrapped = prepend_x509_key_header(&key).unwrap();

        assert!(is_headerless_key(&key).unwrap());
        assert!(!is_headerless_key(&wrapped).unwrap());
        assert!(has_x509_header(&wrapped).unwrap());
        assert!(!has_x509_header(&key).unwrap());
        assert!(has_x509_header(&x509_key()).unwrap());
    }

    #[test]
    fn structural_mismatch_detects_as_false_not_error() {
        // Right child count, but the first child is an integer instead of
        // the AlgorithmIdentifier sequence.
        assert!(!has_x509_header(&headerless_key()).unwrap());
        // Non-sequence root.
        assert!(!has_x509_header(&[0x02, 0x01, 0x05]).unwrap());
        assert!(!is_headerless_key(&[0x02, 0x01, 0x05]).unwrap());
    }

    #[test]
    fn detection_surfaces_parse_failures() {
        let mut data = x509_key();
        data.pop();
        assert!(matches!(
            has_x509_header(&data),
            Err(Error::Asn1ParsingFailed(_))
        ));
    }

    #[test]
    fn encoded_octets_known_values() {
        assert_eq!(encoded_octets(0), vec![0x00]);
        assert_eq!(encoded_octets(127), vec![0x7f]);
        assert_eq!(encoded_octets(128), vec![0x81, 0x80]);
        assert_eq!(encoded_octets(256), vec![0x82, 0x01, 0x00]);
    }

    #[test]
    fn encoded_octets_round_trip_through_scanner() {
        for &value in &[0usize, 1, 127, 128, 129, 255, 256, 65535, 65536] {
            let octets = encoded_octets(value);
            let mut scanner = Scanner::new(&octets);
            assert_eq!(scanner.consume_length().unwrap(), value);
            assert!(scanner.is_complete());
        }
    }
}
