//! Detached ed25519 package signatures.
//!
//! A signed package carries a `.codedrop.sig` file at its root holding the
//! hex-encoded signature of the package's content hash.

use std::fs;
use std::path::Path;

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use super::error::{PlatformError, PlatformResult};

/// Signature file name inside a package.
pub const SIGNATURE_FILENAME: &str = ".codedrop.sig";

/// Verify the signature shipped in `package_dir` against `content_hash`.
pub fn verify_package_signature(
    package_dir: &Path,
    content_hash: &str,
    public_key_hex: &str,
) -> PlatformResult<()> {
    let path = package_dir.join(SIGNATURE_FILENAME);
    let encoded = fs::read_to_string(&path).map_err(|e| PlatformError::io(&path, e))?;

    let signature: [u8; 64] = decode_fixed(encoded.trim(), "signature")?;
    let public_key: [u8; 32] = decode_fixed(public_key_hex.trim(), "public key")?;

    let key = VerifyingKey::from_bytes(&public_key)
        .map_err(|_| PlatformError::Signature("invalid public key".to_string()))?;
    let signature = Signature::from_bytes(&signature);
    key.verify(content_hash.as_bytes(), &signature)
        .map_err(|_| PlatformError::Signature("signature does not match content".to_string()))
}

fn decode_fixed<const N: usize>(encoded: &str, what: &str) -> PlatformResult<[u8; N]> {
    let bytes = hex::decode(encoded)
        .map_err(|e| PlatformError::Signature(format!("{} is not hex: {}", what, e)))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        PlatformError::Signature(format!("{} has {} bytes, expected {}", what, bytes.len(), N))
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use tempfile::TempDir;

    pub(crate) fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    pub(crate) fn public_key_hex() -> String {
        hex::encode(signing_key().verifying_key().to_bytes())
    }

    pub(crate) fn sign_into(dir: &Path, content_hash: &str) {
        let signature = signing_key().sign(content_hash.as_bytes());
        fs::write(dir.join(SIGNATURE_FILENAME), hex::encode(signature.to_bytes())).unwrap();
    }

    #[test]
    fn test_valid_signature() {
        let temp = TempDir::new().unwrap();
        sign_into(temp.path(), "abc123");
        verify_package_signature(temp.path(), "abc123", &public_key_hex()).unwrap();
    }

    #[test]
    fn test_signature_over_other_hash_rejected() {
        let temp = TempDir::new().unwrap();
        sign_into(temp.path(), "abc123");
        let result = verify_package_signature(temp.path(), "tampered", &public_key_hex());
        assert!(matches!(result, Err(PlatformError::Signature(_))));
    }

    #[test]
    fn test_missing_signature_file() {
        let temp = TempDir::new().unwrap();
        let result = verify_package_signature(temp.path(), "abc123", &public_key_hex());
        assert!(matches!(result, Err(PlatformError::Io { .. })));
    }

    #[test]
    fn test_truncated_signature() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SIGNATURE_FILENAME), "abcd").unwrap();
        let result = verify_package_signature(temp.path(), "abc123", &public_key_hex());
        assert!(matches!(result, Err(PlatformError::Signature(_))));
    }
}
