//! Gateway payment signature computation and verification.
//!
//! After a checkout completes in the browser, the gateway hands the client
//! an order id, a payment id, and a signature. The signature is the
//! HMAC-SHA256 of `"{order_id}|{payment_id}"` keyed with the merchant's key
//! secret, hex-encoded. A mismatch is an authoritative rejection.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn payment_mac(secret: &str, order_id: &str, payment_id: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac
}

/// Compute the hex-encoded signature the gateway issues for a payment.
pub fn compute_payment_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let result = payment_mac(secret, order_id, payment_id).finalize();
    hex::encode(result.into_bytes())
}

/// Check a client-supplied signature in constant time.
///
/// Only the exact lowercase hex form the gateway issues is accepted.
pub fn verify_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let Some(supplied) = hex::decode_lower(signature) else {
        return false;
    };
    payment_mac(secret, order_id, payment_id)
        .verify_slice(&supplied)
        .is_ok()
}

// ---------------------------------------------------------------------------
// hex encoding helper (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a lowercase hex string. `None` on odd length, uppercase, or
    /// any other non-hex byte.
    pub fn decode_lower(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 {
            return None;
        }
        s.as_bytes()
            .chunks(2)
            .map(|pair| Some(nibble(pair[0])? << 4 | nibble(pair[1])?))
            .collect()
    }

    fn nibble(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            _ => None,
        }
    }
}
