use sha2::{Digest, Sha256};

/// SHA-256 digest of `content`, lowercase hex.
///
/// Pure function of the content bytes; shown to the user as the item's
/// digital signature.
#[must_use]
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(fingerprint("you will regret this"), fingerprint("you will regret this"));
    }

    #[test]
    fn test_fingerprint_differs_by_content() {
        assert_ne!(fingerprint("test"), fingerprint("test "));
    }

    #[test]
    fn test_fingerprint_known_vector() {
        assert_eq!(
            fingerprint("test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
        assert_eq!(fingerprint("").len(), 64);
    }
}
