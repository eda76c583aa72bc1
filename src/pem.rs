//! PEM text framing around DER key bytes.
//!
//! Only the framing lives here: armor line filtering, base64 decoding of
//! the body and 64-column folding on output ([RFC 7468]). The binary
//! payload is never interpreted.
//!
//! [RFC 7468]: https://tools.ietf.org/html/rfc7468

use crate::error::Error;

/// Collects the base64 payload of a PEM block, dropping armor and blank
/// lines.
pub fn base64_string(pem_string: &str) -> Result<String, Error> {
    let lines: Vec<&str> = pem_string
        .lines()
        .filter(|line| {
            !line.starts_with("-----BEGIN") && !line.starts_with("-----END") && !line.is_empty()
        })
        .collect();

    if lines.is_empty() {
        return Err(Error::PemDoesNotContainKey);
    }

    Ok(lines.concat())
}

/// Decodes the DER payload of a PEM block.
pub fn decode(pem_string: &str) -> Result<Vec<u8>, Error> {
    let base64_body = base64_string(pem_string)?;
    Ok(base64::decode(&base64_body)?)
}

/// Armors DER bytes under the given PEM label, folding the body at 64
/// columns.
pub fn encode(der: &[u8], label: &str) -> String {
    let encoded = base64::encode(der);

    let mut body = String::with_capacity(encoded.len() + encoded.len() / 64 + 1);
    let mut rest = encoded.as_str();
    while rest.len() > 64 {
        let (line, tail) = rest.split_at(64);
        body.push_str(line);
        body.push('\n');
        rest = tail;
    }
    body.push_str(rest);

    format!(
        "-----BEGIN {}-----\n{}\n-----END {}-----",
        label, body, label
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x509::tests::X509_KEY_HEX;

    #[test]
    fn decode_strips_armor_and_blank_lines() {
        let der = hex::decode(X509_KEY_HEX).unwrap();
        let pem = encode(&der, "PUBLIC KEY");
        assert_eq!(decode(&pem).unwrap(), der);
    }

    #[test]
    fn encode_folds_body_at_64_columns() {
        let der = hex::decode(X509_KEY_HEX).unwrap();
        let pem = encode(&der, "PUBLIC KEY");

        let mut lines = pem.lines();
        assert_eq!(lines.next(), Some("-----BEGIN PUBLIC KEY-----"));
        let body: Vec<&str> = pem
            .lines()
            .filter(|line| !line.starts_with("-----"))
            .collect();
        assert!(!body.is_empty());
        for line in &body[..body.len() - 1] {
            assert_eq!(line.len(), 64);
        }
        assert!(body[body.len() - 1].len() <= 64);
        assert_eq!(pem.lines().last(), Some("-----END PUBLIC KEY-----"));
    }

    #[test]
    fn armor_only_input_is_rejected() {
        let pem = "-----BEGIN PUBLIC KEY-----\n-----END PUBLIC KEY-----";
        assert!(matches!(decode(pem), Err(Error::PemDoesNotContainKey)));
        assert!(matches!(decode(""), Err(Error::PemDoesNotContainKey)));
    }

    #[test]
    fn garbage_body_is_a_base64_error() {
        let pem = "-----BEGIN PUBLIC KEY-----\nnot!base64!\n-----END PUBLIC KEY-----";
        assert!(matches!(decode(pem), Err(Error::Base64(_))));
    }
}
