use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Verifies the detached Ed25519 signature a webhook delivery carries in
/// its `X-Signature-Ed25519` header. The signed message is the timestamp
/// header concatenated with the raw request body, no separator.
///
/// Returns `false` on malformed hex input or a failed verification; this
/// never errors, callers branch on the boolean.
pub fn verify_signature(
    body: &[u8],
    timestamp: &str,
    signature_hex: &str,
    public_key_hex: &str,
) -> bool {
    let Ok(key_bytes) = hex::decode(public_key_hex) else {
        return false;
    };
    let Ok(key_bytes) = <[u8; 32]>::try_from(key_bytes) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };

    let Ok(signature_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(signature_bytes) = <[u8; 64]>::try_from(signature_bytes) else {
        return false;
    };
    let signature = Signature::from_bytes(&signature_bytes);

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    verifying_key.verify(&message, &signature).is_ok()
}
