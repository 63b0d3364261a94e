//! Applications whose clipboard writes are never recorded.
//!
//! Pure domain logic - no I/O, no platform dependencies.

/// Bundle IDs of credential managers ignored by default.
pub const DEFAULT_IGNORED_APPS: &[&str] = &[
    "com.apple.keychainaccess",
    "com.agilebits.onepassword7",
    "com.1password.1password",
    "org.keepassx.keepassxc",
];

/// Check whether `bundle_id` appears in `ignored`.
///
/// Matching is exact; bundle IDs are case-sensitive on macOS.
pub fn is_ignored_app<S: AsRef<str>>(bundle_id: &str, ignored: &[S]) -> bool {
    ignored.iter().any(|id| id.as_ref() == bundle_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list_contains_password_managers() {
        assert!(is_ignored_app("com.1password.1password", DEFAULT_IGNORED_APPS));
        assert!(is_ignored_app("org.keepassx.keepassxc", DEFAULT_IGNORED_APPS));
    }

    #[test]
    fn test_regular_apps_not_ignored() {
        assert!(!is_ignored_app("com.apple.Safari", DEFAULT_IGNORED_APPS));
        assert!(!is_ignored_app("com.1Password.1Password", DEFAULT_IGNORED_APPS));
    }

    #[test]
    fn test_custom_list() {
        let ignored = vec!["com.example.Vault".to_string()];
        assert!(is_ignored_app("com.example.Vault", &ignored));
        assert!(!is_ignored_app("com.apple.keychainaccess", &ignored));
    }
}
