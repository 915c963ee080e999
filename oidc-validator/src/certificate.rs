/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Turning an `x5c` certificate into a PEM-encoded RSA public key.
//!
//! The raw value is reframed as a canonical PEM certificate, parsed in memory
//! with `x509-parser`, and its `(n, e)` components are re-exported as a
//! SubjectPublicKeyInfo PEM that `jsonwebtoken` accepts.

use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::{BigUint, RsaPublicKey};
use x509_parser::pem::parse_x509_pem;
use x509_parser::public_key::PublicKey;

use crate::error::ValidatorError;

const PEM_CERT_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const PEM_CERT_END: &str = "-----END CERTIFICATE-----";
const PEM_LINE_WIDTH: usize = 64;

/// Reframe a base64 certificate (bare or already PEM-wrapped) as a canonical
/// PEM certificate with 64-character lines and a trailing newline.
pub fn format_certificate(raw: &str) -> String {
    let payload: String = raw
        .replace(PEM_CERT_BEGIN, "")
        .replace(PEM_CERT_END, "")
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let mut pem = String::with_capacity(payload.len() + payload.len() / PEM_LINE_WIDTH + 64);
    pem.push_str(PEM_CERT_BEGIN);
    pem.push('\n');
    // The payload is base64, so splitting on byte boundaries is safe.
    for line in payload.as_bytes().chunks(PEM_LINE_WIDTH) {
        pem.push_str(&String::from_utf8_lossy(line));
        pem.push('\n');
    }
    pem.push_str(PEM_CERT_END);
    pem.push('\n');
    pem
}

/// Derive the PEM "PUBLIC KEY" of the RSA key embedded in a certificate.
pub fn to_public_key_pem(raw_certificate: &str) -> Result<String, ValidatorError> {
    let pem = format_certificate(raw_certificate);

    let (_, pem) = parse_x509_pem(pem.as_bytes())
        .map_err(|e| ValidatorError::CertificateParse(format!("invalid PEM: {e}")))?;
    let cert = pem
        .parse_x509()
        .map_err(|e| ValidatorError::CertificateParse(format!("invalid X.509: {e}")))?;

    let public_key = cert
        .public_key()
        .parsed()
        .map_err(|e| ValidatorError::CertificateParse(format!("invalid public key: {e}")))?;

    let rsa_key = match public_key {
        PublicKey::RSA(rsa_key) => rsa_key,
        _ => {
            return Err(ValidatorError::CertificateParse(
                "certificate does not carry an RSA public key".to_string(),
            ))
        }
    };

    let n = BigUint::from_bytes_be(rsa_key.modulus);
    let e = BigUint::from_bytes_be(rsa_key.exponent);
    let key = RsaPublicKey::new(n, e)
        .map_err(|e| ValidatorError::CertificateParse(format!("invalid RSA components: {e}")))?;

    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| ValidatorError::CertificateParse(format!("PEM export failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const PROVIDER_X5C: &str = include_str!("../tests/fixtures/provider.x5c");
    const PROVIDER_CRT: &str = include_str!("../tests/fixtures/provider.crt");
    const PROVIDER_PUB: &str = include_str!("../tests/fixtures/provider.pub");

    #[test]
    fn wraps_at_64_columns() {
        let raw = "A".repeat(150);
        let pem = format_certificate(&raw);
        let lines: Vec<&str> = pem.lines().collect();

        assert_eq!(lines.first(), Some(&PEM_CERT_BEGIN));
        assert_eq!(lines.last(), Some(&PEM_CERT_END));
        assert_eq!(lines[1].len(), 64);
        assert_eq!(lines[2].len(), 64);
        assert_eq!(lines[3].len(), 22);
        assert!(pem.ends_with("-----END CERTIFICATE-----\n"));
    }

    #[test]
    fn existing_framing_is_stripped() {
        let pem = format_certificate(PROVIDER_CRT);
        assert_eq!(pem, format_certificate(PROVIDER_X5C));
        assert_eq!(pem.matches(PEM_CERT_BEGIN).count(), 1);
    }

    #[test]
    fn reformatting_a_real_certificate_is_stable() {
        assert_eq!(format_certificate(PROVIDER_X5C), PROVIDER_CRT);
    }

    #[test]
    fn derives_the_certificate_public_key() {
        let pem = to_public_key_pem(PROVIDER_X5C).expect("certificate should parse");
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));
        assert_eq!(pem, PROVIDER_PUB);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = to_public_key_pem("not-a-certificate").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CertificateParse);
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        let err = to_public_key_pem("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CertificateParse);
    }

    #[test]
    fn truncated_certificate_is_a_parse_error() {
        let truncated = &PROVIDER_X5C[..PROVIDER_X5C.len() / 2];
        let err = to_public_key_pem(truncated).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CertificateParse);
    }
}
