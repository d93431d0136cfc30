use std::sync::OnceLock;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::models::permission::{PermissionMatrix, PermissionRow};
use crate::models::role::{Role, RoleDefinition, ROLE_DEFINITIONS};

#[derive(Serialize)]
struct CatalogSnapshot<'a> {
    roles: &'a [RoleDefinition],
    permissions: Vec<(Role, &'a PermissionRow)>,
}

/// SHA-256 (hex) over the serialized role registry and permission matrix.
///
/// Stable for the life of the process; changes whenever the static catalog does.
pub fn fingerprint() -> &'static str {
    static FINGERPRINT: OnceLock<String> = OnceLock::new();
    FINGERPRINT.get_or_init(|| {
        let snapshot = CatalogSnapshot {
            roles: &ROLE_DEFINITIONS,
            permissions: PermissionMatrix::defaults().rows().collect(),
        };
        // serializing static data of known shape cannot fail
        let payload = serde_json::to_vec(&snapshot).unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(&payload);
        hex::encode(hasher.finalize())
    })
}

/// Strong validator for HTTP caching of catalog responses.
pub fn etag() -> String {
    format!("\"{}\"", fingerprint())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = fingerprint();
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp, fingerprint());
    }

    #[test]
    fn test_etag_is_quoted() {
        let tag = etag();
        assert!(tag.starts_with('"') && tag.ends_with('"'));
        assert_eq!(&tag[1..65], fingerprint());
    }
}
