//! Rule tables and patterns for NSF document validation
//!
//! Read-only reference data: prohibited and allowlisted link domains,
//! required section headings per document type, and the compiled patterns
//! shared by the validator passes.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Email addresses anywhere in proposal text
    pub static ref EMAIL_PATTERN: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex");

    /// http/https URLs
    pub static ref URL_PATTERN: Regex =
        Regex::new(r#"https?://[^\s)>\]"']+"#).expect("valid url regex");

    /// Dollar-amount tokens like "$50,000" or "$ 500"
    pub static ref DOLLAR_PATTERN: Regex =
        Regex::new(r"\$\s?\d").expect("valid dollar regex");
}

/// Personal file-sharing domains prohibited in proposal links: (domain, display name)
pub const PROHIBITED_LINK_DOMAINS: &[(&str, &str)] = &[
    ("dropbox.com", "Dropbox"),
    ("drive.google.com", "Google Drive"),
    ("docs.google.com", "Google Docs"),
    ("onedrive.live.com", "OneDrive"),
    ("1drv.ms", "OneDrive"),
    ("box.com", "Box"),
    ("wetransfer.com", "WeTransfer"),
];

/// Domains always acceptable in proposal links (code hosting, DOI resolvers,
/// data repositories); `.gov` hosts are additionally allowlisted by suffix
pub const ALLOWED_LINK_DOMAINS: &[&str] = &[
    "github.com",
    "gitlab.com",
    "bitbucket.org",
    "doi.org",
    "osf.io",
    "zenodo.org",
];

/// Narrative sections every full proposal must address
pub const PROPOSAL_SECTIONS: &[&str] = &["Intellectual Merit", "Broader Impacts"];

/// Required biographical sketch sections; omissions are hard failures
pub const BIOSKETCH_SECTIONS: &[&str] = &[
    "Professional Preparation",
    "Appointments",
    "Publications",
    "Synergistic Activities",
    "Collaborators",
];

/// Cost categories a budget narrative is expected to discuss
pub const BUDGET_NARRATIVE_CATEGORIES: &[&str] = &[
    "Senior Personnel",
    "Other Personnel",
    "Fringe Benefits",
    "Equipment",
    "Travel",
    "Participant Support",
    "Other Direct Costs",
];

/// Extract the host portion of a URL, without any port
pub fn url_host(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("https://").or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next()?;
    Some(host.split(':').next().unwrap_or(host))
}

/// Check whether a host is allowlisted (known-good domain or any .gov site)
pub fn is_allowed_host(host: &str) -> bool {
    let host = host.to_lowercase();
    if host.ends_with(".gov") {
        return true;
    }
    ALLOWED_LINK_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

/// Look up the display name of a prohibited file-sharing host, if it is one
pub fn prohibited_host(host: &str) -> Option<&'static str> {
    let host = host.to_lowercase();
    PROHIBITED_LINK_DOMAINS
        .iter()
        .find(|(domain, _)| host == *domain || host.ends_with(&format!(".{}", domain)))
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(EMAIL_PATTERN.is_match("Contact test@example.com today"));
        assert!(!EMAIL_PATTERN.is_match("no email here"));
    }

    #[test]
    fn test_url_host_extraction() {
        assert_eq!(url_host("https://dropbox.com/s/abc123"), Some("dropbox.com"));
        assert_eq!(
            url_host("https://drive.google.com/file/d/xyz"),
            Some("drive.google.com")
        );
        assert_eq!(url_host("http://census.gov:8080/data"), Some("census.gov"));
        assert_eq!(url_host("ftp://example.com"), None);
    }

    #[test]
    fn test_allowlist() {
        assert!(is_allowed_host("github.com"));
        assert!(is_allowed_host("www.github.com"));
        assert!(is_allowed_host("doi.org"));
        assert!(is_allowed_host("census.gov"));
        assert!(is_allowed_host("data.nsf.gov"));
        assert!(!is_allowed_host("dropbox.com"));
    }

    #[test]
    fn test_prohibited_lookup() {
        assert_eq!(prohibited_host("dropbox.com"), Some("Dropbox"));
        assert_eq!(prohibited_host("www.dropbox.com"), Some("Dropbox"));
        assert_eq!(prohibited_host("drive.google.com"), Some("Google Drive"));
        assert_eq!(prohibited_host("example.com"), None);
    }

    #[test]
    fn test_dollar_pattern() {
        assert!(DOLLAR_PATTERN.is_match("PI: $50,000"));
        assert!(DOLLAR_PATTERN.is_match("$ 500 per trip"));
        assert!(!DOLLAR_PATTERN.is_match("fifty thousand dollars"));
    }
}
