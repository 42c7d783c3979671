use hmac::{Mac, SimpleHmac};
use sha2::Sha256;
use tracing::warn;

use super::errors::CryptoError;

/// Prefix of the `X-Hub-Signature-256` header value.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Hex-encoded HMAC-SHA256 signature.
pub struct Signature<'a>(pub &'a str);

impl<'a> Signature<'a> {
    /// Parse a signature from a raw header value, stripping the `sha256=` prefix.
    pub fn from_header(header: &'a str) -> Result<Self, CryptoError> {
        header
            .strip_prefix(SIGNATURE_PREFIX)
            .map(Self)
            .ok_or_else(|| CryptoError::InvalidSignatureFormat {
                sig: header.to_string(),
            })
    }

    /// Check if a signature is valid, in constant time.
    pub fn is_valid(&self, body: &[u8], secret: &str) -> Result<bool, CryptoError> {
        let decoded_signature =
            &hex::decode(self.0).map_err(|_| CryptoError::InvalidSignatureFormat {
                sig: self.0.to_string(),
            })?;
        let mut hmac = SimpleHmac::<Sha256>::new_from_slice(secret.as_bytes())
            .map_err(|_| CryptoError::InvalidSecretKeyLength)?;

        hmac.update(body);
        Ok(hmac.verify_slice(decoded_signature).is_ok())
    }
}

/// Verify a webhook body against its `X-Hub-Signature-256` header.
///
/// An empty secret disables verification.
/// A missing header, a missing prefix or a malformed hex value is rejected.
pub fn verify_webhook_signature(header: Option<&str>, body: &[u8], secret: &str) -> bool {
    if secret.is_empty() {
        warn!("Webhook secret is empty, skipping signature verification");
        return true;
    }

    let Some(header) = header else {
        return false;
    };

    Signature::from_header(header)
        .and_then(|sig| sig.is_valid(body, secret))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"secret": "hello"}"#;
    const SECRET: &str = "iAmAsEcReTkEy";
    const VALID: &str = "a2b41e3bb9a09babb36b42e145eacc38916d078ba378d60db679f6ac79cd1408";
    const TAMPERED: &str = "a2b41e3bb9a09babb36b42e145eacc38916d078ba378d60db679f6ac79cd1409";

    #[test]
    fn raw_signature() {
        assert!(Signature(VALID).is_valid(BODY, SECRET).unwrap());
        assert!(!Signature(TAMPERED).is_valid(BODY, SECRET).unwrap());
        assert!(matches!(
            Signature("zz").is_valid(BODY, SECRET),
            Err(CryptoError::InvalidSignatureFormat { .. })
        ));
    }

    #[test]
    fn header_signature() {
        let valid = format!("sha256={VALID}");
        let tampered = format!("sha256={TAMPERED}");

        assert!(verify_webhook_signature(Some(&valid), BODY, SECRET));
        assert!(!verify_webhook_signature(Some(&tampered), BODY, SECRET));
        assert!(!verify_webhook_signature(Some(VALID), BODY, SECRET));
        assert!(!verify_webhook_signature(Some("sha256=nothex"), BODY, SECRET));
        assert!(!verify_webhook_signature(None, BODY, SECRET));
    }

    #[test]
    fn header_signature_modified_body() {
        let valid = format!("sha256={VALID}");
        assert!(!verify_webhook_signature(
            Some(&valid),
            br#"{"secret": "hellO"}"#,
            SECRET
        ));
    }

    #[test]
    fn empty_secret_skips_verification() {
        assert!(verify_webhook_signature(None, BODY, ""));
        assert!(verify_webhook_signature(Some("garbage"), BODY, ""));
    }
}
