//! Static domain tables and registrable-domain extraction for emails and links.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use url::{Host, Url};

const FREE_EMAIL_PROVIDERS: [&str; 13] = [
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "proton.me",
    "protonmail.com",
    "icloud.com",
    "yandex.com",
    "zoho.com",
    "gmx.com",
    "mail.com",
    "aol.com",
    "rediffmail.com",
];

const TRUSTED_POSTING_PLATFORMS: [&str; 7] = [
    "linkedin.com",
    "internshala.com",
    "naukri.com",
    "glassdoor.com",
    "indeed.com",
    "wellfound.com",
    "angel.co",
];

const SUSPICIOUS_TLDS: [&str; 10] = [
    "xyz", "top", "work", "click", "fit", "shop", "link", "cam", "site", "info",
];

static STANDARD_TABLES: Lazy<DomainTables> = Lazy::new(|| {
    DomainTables::new(
        FREE_EMAIL_PROVIDERS,
        TRUSTED_POSTING_PLATFORMS,
        SUSPICIOUS_TLDS,
    )
});

/// Read-only lookup sets consulted by the email and link signals.
#[derive(Debug, Clone)]
pub struct DomainTables {
    free_email: HashSet<String>,
    trusted_platforms: Vec<String>,
    suspicious_tlds: HashSet<String>,
}

impl DomainTables {
    pub fn new<F, T, S>(free_email: F, trusted_platforms: T, suspicious_tlds: S) -> Self
    where
        F: IntoIterator,
        F::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        fn normalize<I>(values: I) -> impl Iterator<Item = String>
        where
            I: IntoIterator,
            I::Item: AsRef<str>,
        {
            values
                .into_iter()
                .map(|value| value.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|value| !value.is_empty())
        }

        let mut trusted: Vec<String> = normalize(trusted_platforms).collect();
        trusted.dedup();

        Self {
            free_email: normalize(free_email).collect(),
            trusted_platforms: trusted,
            suspicious_tlds: normalize(suspicious_tlds).collect(),
        }
    }

    /// The built-in tables, shared process-wide.
    pub fn standard() -> &'static DomainTables {
        &STANDARD_TABLES
    }

    pub fn is_free_email(&self, domain: &str) -> bool {
        self.free_email.contains(domain)
    }

    /// Substring match, so regional variants such as `in.linkedin.com` still count.
    pub fn is_trusted_platform(&self, domain: &str) -> bool {
        self.trusted_platforms
            .iter()
            .any(|platform| domain.contains(platform.as_str()))
    }

    /// Returns the final label when it is on the suspicious list.
    pub fn suspicious_tld<'a>(&self, domain: &'a str) -> Option<&'a str> {
        let tld = domain.rsplit('.').next()?;
        self.suspicious_tlds.contains(tld).then_some(tld)
    }
}

/// Registrable domain (`domain.suffix`, lowercased) of an email address or URL.
///
/// Emails use everything after the first `@`. Hosts whose suffix is not on the public suffix
/// list collapse to their last label. Inputs without a usable host, including IP literals,
/// yield `None`.
pub fn extract_domain(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let candidate = match value.split_once('@') {
        Some((_, rest)) => rest,
        None => value,
    };

    let host = domain_host(candidate)?;
    registrable_domain(&host)
}

/// Path component of a link, used for the random-path heuristic.
pub(crate) fn link_path(link: &str) -> Option<String> {
    parse_lenient(link.trim()).map(|url| url.path().to_string())
}

fn parse_lenient(value: &str) -> Option<Url> {
    if value.contains("://") {
        Url::parse(value).ok()
    } else {
        Url::parse(&format!("http://{value}")).ok()
    }
}

fn domain_host(value: &str) -> Option<String> {
    let url = parse_lenient(value)?;
    match url.host()? {
        Host::Domain(domain) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            (!domain.is_empty()).then_some(domain)
        }
        Host::Ipv4(_) | Host::Ipv6(_) => None,
    }
}

fn registrable_domain(host: &str) -> Option<String> {
    let suffix = psl::suffix(host.as_bytes())?;

    if suffix.is_known() {
        let domain = psl::domain(host.as_bytes())?;
        return std::str::from_utf8(domain.as_bytes())
            .ok()
            .map(str::to_string);
    }

    host.rsplit('.')
        .next()
        .filter(|label| !label.is_empty())
        .map(str::to_string)
}
