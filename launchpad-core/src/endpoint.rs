//! Endpoint construction
//!
//! Every URL the launcher requests is built here from a server address.
//! One trailing slash is stripped from the address before a path is appended,
//! so `base + "/api/v1/..."` never doubles the separator.

pub const APPLICATIONS_PATH: &str = "/api/v1/applications";
pub const STATUS_PATH: &str = "/api/v1/status";
pub const ADMIN_MANIFEST_PATH: &str = "/api/admin/manifest";
pub const ADMIN_CONFIG_PATH: &str = "/api/admin/server/config";
pub const ADMIN_RESTART_PATH: &str = "/api/admin/server/restart";

/// Path the admin surface is served under
pub const ADMIN_UI_PATH: &str = "/admin/";

/// Strips a single trailing slash
pub fn strip_base(server_address: &str) -> &str {
    server_address.strip_suffix('/').unwrap_or(server_address)
}

/// `GET` endpoint listing the catalog
pub fn catalog_url(server_address: &str) -> String {
    format!("{}{}", strip_base(server_address), APPLICATIONS_PATH)
}

/// `GET` endpoint for one entry's artifact
///
/// The name is percent-encoded as a single path component, so names holding
/// `/`, spaces or other reserved characters still address exactly one entry.
pub fn artifact_url(server_address: &str, entry_name: &str) -> String {
    format!(
        "{}{}/{}/artifact",
        strip_base(server_address),
        APPLICATIONS_PATH,
        urlencoding::encode(entry_name)
    )
}

/// `GET` endpoint for a script staged directly under the server root
pub fn staged_file_url(server_address: &str, filename: &str) -> String {
    format!(
        "{}/{}",
        strip_base(server_address),
        filename.trim_start_matches('/')
    )
}

pub fn status_url(server_address: &str) -> String {
    format!("{}{}", strip_base(server_address), STATUS_PATH)
}

pub fn admin_manifest_url(server_address: &str) -> String {
    format!("{}{}", strip_base(server_address), ADMIN_MANIFEST_PATH)
}

pub fn admin_config_url(server_address: &str) -> String {
    format!("{}{}", strip_base(server_address), ADMIN_CONFIG_PATH)
}

pub fn admin_restart_url(server_address: &str) -> String {
    format!("{}{}", strip_base(server_address), ADMIN_RESTART_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped_once() {
        assert_eq!(
            catalog_url("http://localhost:8080/"),
            "http://localhost:8080/api/v1/applications"
        );
        assert_eq!(
            catalog_url("http://localhost:8080"),
            "http://localhost:8080/api/v1/applications"
        );
        // only one slash is stripped
        assert_eq!(
            catalog_url("http://localhost:8080//"),
            "http://localhost:8080//api/v1/applications"
        );
    }

    #[test]
    fn test_single_separator_for_every_endpoint() {
        let base = "http://example.com:9000/";
        for url in [
            catalog_url(base),
            artifact_url(base, "demo"),
            status_url(base),
            admin_manifest_url(base),
            admin_config_url(base),
            admin_restart_url(base),
            staged_file_url(base, "hello.py"),
        ] {
            let path = url.strip_prefix("http://example.com:9000").unwrap();
            assert!(path.starts_with('/') && !path.starts_with("//"), "{url}");
        }
    }

    #[test]
    fn test_artifact_name_is_one_encoded_segment() {
        let url = artifact_url("http://host", "tools/my app?v=1#x");
        assert_eq!(
            url,
            "http://host/api/v1/applications/tools%2Fmy%20app%3Fv%3D1%23x/artifact"
        );

        let segment = url
            .strip_prefix("http://host/api/v1/applications/")
            .and_then(|rest| rest.strip_suffix("/artifact"))
            .unwrap();
        assert!(!segment.contains('/'));
        assert_eq!(urlencoding::decode(segment).unwrap(), "tools/my app?v=1#x");
    }

    #[test]
    fn test_artifact_name_unicode_round_trips() {
        let name = "données été";
        let url = artifact_url("http://host/", name);
        let segment = url
            .strip_prefix("http://host/api/v1/applications/")
            .and_then(|rest| rest.strip_suffix("/artifact"))
            .unwrap();
        assert_eq!(urlencoding::decode(segment).unwrap(), name);
    }

    #[test]
    fn test_staged_file_url() {
        assert_eq!(
            staged_file_url("http://localhost:8080/", "/scripts/hello.py"),
            "http://localhost:8080/scripts/hello.py"
        );
    }
}
