//! Allow-list check for authenticated emails.

use crate::google::GoogleOAuthConfig;

/// Decide whether an authenticated email may use the dashboard.
///
/// - Empty email is never allowed.
/// - If neither list is configured, every account is allowed (open mode).
/// - An exact match on `allowed_emails` always wins.
/// - Otherwise, if `allowed_email_domains` is configured, the email's
///   domain decides.
/// - A non-empty email list with no match and no domain list denies.
#[must_use]
pub fn is_allowed(cfg: &GoogleOAuthConfig, email: &str) -> bool {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return false;
    }

    if cfg.allowed_emails.iter().any(|e| e == &email) {
        return true;
    }

    if !cfg.allowed_email_domains.is_empty() {
        let domain = email.rsplit('@').next().unwrap_or_default();
        return cfg.allowed_email_domains.iter().any(|d| d == domain);
    }

    cfg.allowed_emails.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(emails: &[&str], domains: &[&str]) -> GoogleOAuthConfig {
        GoogleOAuthConfig {
            client_id: "id".into(),
            client_secret: "secret".into(),
            app_base_url: "https://app.example".into(),
            allowed_emails: emails.iter().map(|s| (*s).to_string()).collect(),
            allowed_email_domains: domains.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn open_mode_allows_everyone() {
        assert!(is_allowed(&cfg(&[], &[]), "anyone@anywhere.io"));
    }

    #[test]
    fn empty_email_is_never_allowed() {
        assert!(!is_allowed(&cfg(&[], &[]), "   "));
    }

    #[test]
    fn exact_email_list_allows_only_members() {
        let cfg = cfg(&["me@example.com"], &[]);
        assert!(is_allowed(&cfg, "me@example.com"));
        assert!(is_allowed(&cfg, " Me@Example.COM "));
        assert!(!is_allowed(&cfg, "other@example.com"));
    }

    #[test]
    fn domain_list_alone_matches_domain() {
        let cfg = cfg(&[], &["example.com"]);
        assert!(is_allowed(&cfg, "anyone@example.com"));
        assert!(!is_allowed(&cfg, "anyone@elsewhere.com"));
    }

    #[test]
    fn email_miss_falls_back_to_domain_list() {
        let cfg = cfg(&["vip@other.org"], &["example.com"]);
        assert!(is_allowed(&cfg, "vip@other.org"));
        assert!(is_allowed(&cfg, "new@example.com"));
        assert!(!is_allowed(&cfg, "new@other.org"));
    }
}
