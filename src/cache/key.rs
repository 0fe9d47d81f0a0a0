//! Cache key hashing using SHA-256

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Number of hex characters used for the shard directory.
const SHARD_LEN: usize = 2;

/// Hash an arbitrary cache key into a 64-character lowercase hex digest.
///
/// Keys are usually full request paths including the query string, so two
/// requests that differ only in filters or page number hash differently.
pub fn digest(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Location of the entry for `key` under `root`: `<root>/<xx>/<digest>`,
/// where `xx` is the first two characters of the digest.
pub fn entry_path(root: &Path, key: &str) -> PathBuf {
    let hexed = digest(key);
    root.join(&hexed[..SHARD_LEN]).join(hexed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let key = "repos/org/repo/actions/workflows?per_page=100&page=1";
        assert_eq!(digest(key), digest(key));
    }

    #[test]
    fn test_digest_is_64_hex_chars() {
        let hexed = digest("anything");
        assert_eq!(hexed.len(), 64);
        assert!(hexed.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_digest_differs_by_query() {
        let page1 = digest("repos/org/repo/actions/runs/1/jobs?per_page=100&page=1");
        let page2 = digest("repos/org/repo/actions/runs/1/jobs?per_page=100&page=2");
        assert_ne!(page1, page2);
    }

    #[test]
    fn test_entry_path_is_sharded() {
        let root = Path::new("/tmp/cache-root");
        let path = entry_path(root, "key");
        let hexed = digest("key");

        assert_eq!(path.parent().unwrap(), root.join(&hexed[..2]));
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), hexed);
    }
}
