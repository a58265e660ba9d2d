//! Signed session cookie codec
//!
//! The cookie value is `<session_id>.<signature>` where the signature is
//! the base64url-encoded HMAC-SHA256 of the session ID under the configured
//! session secret. A client can read its session ID but cannot mint or
//! alter one without the secret.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign a session ID, producing the full cookie value.
pub fn sign_session_id(session_id: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(session_id.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    format!("{}.{}", session_id, signature)
}

/// Verify a signed cookie value, returning the session ID when the
/// signature checks out.
///
/// Verification is constant-time on the MAC comparison. Any structural
/// problem (missing separator, bad base64, wrong signature) yields `None`.
pub fn verify_signed_value(value: &str, secret: &str) -> Option<String> {
    let (session_id, signature) = value.rsplit_once('.')?;
    if session_id.is_empty() {
        return None;
    }

    let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(session_id.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(session_id.to_string())
}

/// Build the `Set-Cookie` value that transmits a new session to the client.
///
/// HttpOnly always; Secure only when serving production traffic over TLS.
pub fn build_session_cookie(
    cookie_name: &str,
    signed_value: &str,
    max_age_secs: i64,
    secure: bool,
) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; Max-Age={}; SameSite=Lax",
        cookie_name, signed_value, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(cookie_name: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; Max-Age=0; SameSite=Lax",
        cookie_name
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_sign_verify_roundtrip() {
        let signed = sign_session_id("abc-123", SECRET);
        assert_eq!(verify_signed_value(&signed, SECRET), Some("abc-123".to_string()));
    }

    #[test]
    fn test_tampered_session_id_rejected() {
        let signed = sign_session_id("abc-123", SECRET);
        let tampered = signed.replacen("abc", "xyz", 1);
        assert_eq!(verify_signed_value(&tampered, SECRET), None);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let signed = sign_session_id("abc-123", SECRET);
        let mut tampered = signed.clone();
        tampered.pop();
        tampered.push('A');
        // Either the base64 breaks or the MAC mismatches; both reject
        assert!(verify_signed_value(&tampered, SECRET).is_none() || tampered == signed);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signed = sign_session_id("abc-123", SECRET);
        assert_eq!(verify_signed_value(&signed, "other-secret"), None);
    }

    #[test]
    fn test_unsigned_value_rejected() {
        assert_eq!(verify_signed_value("abc-123", SECRET), None);
        assert_eq!(verify_signed_value("", SECRET), None);
        assert_eq!(verify_signed_value(".", SECRET), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = build_session_cookie("user_session", "v", 3600, false);
        assert!(cookie.starts_with("user_session=v;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(!cookie.contains("Secure"));

        let secure = build_session_cookie("user_session", "v", 3600, true);
        assert!(secure.contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_zeroes_max_age() {
        let cookie = clear_session_cookie("user_session", false);
        assert!(cookie.contains("Max-Age=0"));
    }
}
