//! Minimal ASN.1 DER decoding for RSA key material.
//!
//! This is not a general-purpose [ASN.1] implementation: it recognizes
//! exactly the node kinds an RSA key encoding and its optional X.509
//! wrapper can contain, and nothing else. DER is deterministic (definite
//! lengths only, one encoding per value), so a short recursive descent
//! over length-delimited slices is enough; there is no backtracking and
//! no tagged/contextual machinery.
//!
//! [ASN.1]: https://www.itu.int/rec/T-REC-X.690-202102-I/en
//!
// http://luca.ntop.org/Teaching/Appunti/asn1.html
// https://tls.mbed.org/kb/cryptography/asn1-key-structures-in-der-and-pem

use thiserror::Error;

/// Error type for DER decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// Asked to consume bytes past the end of the buffer
    #[error("Asked to consume bytes past the end of the buffer")]
    OutOfBounds,
    /// A tag byte outside the recognized set was encountered
    #[error("Unrecognized ASN.1 tag byte {0:#04x}")]
    InvalidType(u8),
    /// Long-form length octets encode a value beyond 32 bits
    #[error("DER length octets encode a length beyond 32 bits")]
    LengthTooLarge,
}

/// Cursor over an immutable byte buffer with bounds-checked consumption.
///
/// Every consume either advances the position by exactly the requested
/// length or fails without mutating it.
pub(crate) struct Scanner<'a> {
    data: &'a [u8],
    index: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Scanner { data, index: 0 }
    }

    /// Whether there is no more data to consume.
    pub(crate) fn is_complete(&self) -> bool {
        self.index >= self.data.len()
    }

    /// Consumes `length` bytes and returns them.
    pub(crate) fn consume(&mut self, length: usize) -> Result<&'a [u8], ParserError> {
        if length == 0 {
            return Ok(&[]);
        }
        if self.index + length > self.data.len() {
            return Err(ParserError::OutOfBounds);
        }
        let subdata = &self.data[self.index..self.index + length];
        self.index += length;
        Ok(subdata)
    }

    /// Consumes a primitive, definite ASN.1 length and returns its value.
    ///
    /// Short form: one octet, bit 8 clear, bits 7-1 give the length.
    /// Long form: bit 8 of the first octet set, bits 7-1 give the number
    /// of following length octets, which hold the length base 256, most
    /// significant digit first.
    pub(crate) fn consume_length(&mut self) -> Result<usize, ParserError> {
        let length_byte = self.consume(1)?[0];

        if length_byte < 0x80 {
            return Ok(usize::from(length_byte));
        }

        let octet_count = usize::from(length_byte & 0x7f);
        let octets = self.consume(octet_count)?;

        let mut length: u64 = 0;
        for &octet in octets {
            length = length << 8 | u64::from(octet);
            // RSA key encodings stay a few kilobytes; a length that does
            // not fit 32 bits is corrupt input, not a huge key.
            if length > u64::from(u32::MAX) {
                return Err(ParserError::LengthTooLarge);
            }
        }
        Ok(length as usize)
    }
}

/// An ASN.1 node. A `Sequence` owns its children; the tree is built
/// bottom-up in one decode pass and never shares or cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// ASN.1 SEQUENCE (tag `0x30`)
    Sequence(Vec<Node>),
    /// ASN.1 INTEGER (tag `0x02`), payload kept verbatim big-endian
    Integer(Vec<u8>),
    /// ASN.1 OBJECT IDENTIFIER (tag `0x06`), payload kept undecoded
    ObjectIdentifier(Vec<u8>),
    /// ASN.1 NULL (tag `0x05`)
    Null,
    /// ASN.1 BIT STRING (tag `0x03`), minus its leading unused-bits byte
    BitString(Vec<u8>),
    /// ASN.1 OCTET STRING (tag `0x04`)
    OctetString(Vec<u8>),
}

/// Parses DER bytes and returns the root node.
///
/// Sequences are parsed recursively. Integer payloads are returned
/// verbatim: no sign normalization, no leading-zero stripping. Object
/// identifiers are not decoded into dotted-number form; callers compare
/// raw payload bytes instead.
pub fn parse(data: &[u8]) -> Result<Node, ParserError> {
    let mut scanner = Scanner::new(data);
    parse_node(&mut scanner)
}

/// Parses a single node at the scanner's position, advancing it.
fn parse_node(scanner: &mut Scanner) -> Result<Node, ParserError> {
    let first_byte = scanner.consume(1)?[0];

    match first_byte {
        // Sequence
        0x30 => {
            let length = scanner.consume_length()?;
            let data = scanner.consume(length)?;
            let nodes = parse_sequence(data)?;
            Ok(Node::Sequence(nodes))
        }
        // Integer
        0x02 => {
            let length = scanner.consume_length()?;
            let data = scanner.consume(length)?;
            Ok(Node::Integer(data.to_vec()))
        }
        // Object identifier
        0x06 => {
            let length = scanner.consume_length()?;
            let data = scanner.consume(length)?;
            Ok(Node::ObjectIdentifier(data.to_vec()))
        }
        // Null, followed by its single length octet
        0x05 => {
            scanner.consume(1)?;
            Ok(Node::Null)
        }
        // Bit string. The first content byte is the unused-bits count,
        // zero for every key in scope; discard it.
        0x03 => {
            let length = scanner.consume_length()?;
            scanner.consume(1)?;
            let data = scanner.consume(length.saturating_sub(1))?;
            Ok(Node::BitString(data.to_vec()))
        }
        // Octet string
        0x04 => {
            let length = scanner.consume_length()?;
            let data = scanner.consume(length)?;
            Ok(Node::OctetString(data.to_vec()))
        }
        tag => Err(ParserError::InvalidType(tag)),
    }
}

/// Parses a sequence body as a flat list of sibling nodes.
///
/// The body slice is exactly the sequence's declared content, so a child
/// cannot read past it; trailing bytes that do not align to a node
/// boundary fail inside the next `parse_node` call.
fn parse_sequence(data: &[u8]) -> Result<Vec<Node>, ParserError> {
    let mut scanner = Scanner::new(data);
    let mut nodes = Vec::new();
    while !scanner.is_complete() {
        nodes.push(parse_node(&mut scanner)?);
    }
    Ok(nodes)
}
