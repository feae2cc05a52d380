use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Recompute the gateway signature, HMAC-SHA256 over
/// `"{order_id}|{payment_id}"`, hex digest, and compare it against the
/// client-supplied value in constant time.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    supplied_signature: &str,
    secret: &str,
) -> bool {
    let expected = compute_signature(order_id, payment_id, secret);
    expected.as_bytes().ct_eq(supplied_signature.as_bytes()).into()
}

pub fn compute_signature(order_id: &str, payment_id: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_signature_verifies() {
        let sig = compute_signature("order_abc", "pay_def", "secret");
        assert!(verify_payment_signature("order_abc", "pay_def", &sig, "secret"));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let mut sig = compute_signature("order_abc", "pay_def", "secret");
        // Flip the last hex character
        let last = sig.pop().unwrap();
        sig.push(if last == '0' { '1' } else { '0' });
        assert!(!verify_payment_signature("order_abc", "pay_def", &sig, "secret"));
    }

    #[test]
    fn test_signature_binds_order_and_payment() {
        let sig = compute_signature("order_abc", "pay_def", "secret");
        assert!(!verify_payment_signature("order_xyz", "pay_def", &sig, "secret"));
        assert!(!verify_payment_signature("order_abc", "pay_xyz", &sig, "secret"));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let sig = compute_signature("order_abc", "pay_def", "secret");
        assert!(!verify_payment_signature("order_abc", "pay_def", &sig, "other"));
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let sig = compute_signature("o", "p", "s");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
