use once_cell::sync::Lazy;
use regex::Regex;

use super::super::classifier::{extract_domain, link_path, DomainTables};
use super::super::rules::ScamRule;
use super::{ScoreComponent, SignalKind};

// A segment opening with 20+ alphanumerics reads as a generated tracking slug.
static RANDOM_PATH_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[A-Za-z0-9]{20,}")
        .unwrap_or_else(|err| panic!("BUG: invalid random path pattern: {err}"))
});

const FREE_EMAIL_PENALTY: i32 = -15;
const CORPORATE_EMAIL_BONUS: i32 = 5;
const TRUSTED_PLATFORM_BONUS: i32 = 10;
const SUSPICIOUS_TLD_PENALTY: i32 = -10;
const RANDOM_PATH_PENALTY: i32 = -5;
const CLEAN_DESCRIPTION_BONUS: i32 = 5;
const MISSING_DESCRIPTION_PENALTY: i32 = -10;

pub(crate) fn email_signal(email: Option<&str>, tables: &DomainTables) -> Option<ScoreComponent> {
    let Some(email) = email else {
        return Some(ScoreComponent::new(
            SignalKind::Email,
            0,
            "No contact email provided.",
        ));
    };

    let domain = extract_domain(email)?;
    let component = if tables.is_free_email(&domain) {
        ScoreComponent::new(
            SignalKind::Email,
            FREE_EMAIL_PENALTY,
            format!("Contact email uses free provider ({domain})."),
        )
    } else {
        ScoreComponent::new(
            SignalKind::Email,
            CORPORATE_EMAIL_BONUS,
            format!("Contact email domain looks corporate ({domain})."),
        )
    };
    Some(component)
}

pub(crate) fn link_signals(link: Option<&str>, tables: &DomainTables) -> Vec<ScoreComponent> {
    let Some((link, domain)) = link.and_then(|link| Some((link, extract_domain(link)?))) else {
        return vec![ScoreComponent::new(
            SignalKind::Link,
            0,
            "No link provided; relying on text analysis.",
        )];
    };

    let mut components = Vec::new();

    if tables.is_trusted_platform(&domain) {
        components.push(ScoreComponent::new(
            SignalKind::Link,
            TRUSTED_PLATFORM_BONUS,
            format!("Posted on a known platform ({domain})."),
        ));
    }

    if let Some(tld) = tables.suspicious_tld(&domain) {
        components.push(ScoreComponent::new(
            SignalKind::Link,
            SUSPICIOUS_TLD_PENALTY,
            format!("Suspicious top-level domain (.{tld})."),
        ));
    }

    let random_path = link_path(link)
        .map(|path| RANDOM_PATH_SEGMENT.is_match(&path))
        .unwrap_or(false);
    if random_path {
        components.push(ScoreComponent::new(
            SignalKind::Link,
            RANDOM_PATH_PENALTY,
            "URL contains long random-looking path.",
        ));
    }

    components
}

pub(crate) fn keyword_signals(description: Option<&str>, rules: &[ScamRule]) -> Vec<ScoreComponent> {
    let Some(description) = description else {
        return vec![ScoreComponent::new(
            SignalKind::Description,
            MISSING_DESCRIPTION_PENALTY,
            "No description text provided.",
        )];
    };

    let text = description.to_lowercase();
    let mut components: Vec<ScoreComponent> = rules
        .iter()
        .filter(|rule| {
            let keyword = rule.keyword.trim().to_lowercase();
            !keyword.is_empty() && text.contains(&keyword)
        })
        .map(|rule| ScoreComponent::new(SignalKind::Keyword, rule.weight, rule.explanation()))
        .collect();

    if components.is_empty() {
        components.push(ScoreComponent::new(
            SignalKind::Description,
            CLEAN_DESCRIPTION_BONUS,
            "No scam phrases detected in description.",
        ));
    }

    components
}
