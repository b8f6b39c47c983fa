use super::common::*;
use crate::verification::classifier::DomainTables;
use crate::verification::domain::{CredibilityStatus, InternshipPosting, PaidStatus};
use crate::verification::scoring::{ScoringEngine, SignalKind};

fn engine() -> ScoringEngine {
    ScoringEngine::standard()
}

#[test]
fn free_email_without_description_is_fake() {
    let posting = InternshipPosting {
        email: Some("x@gmail.com".to_string()),
        ..InternshipPosting::default()
    };

    let result = engine().score(&posting, &seeded_rules());

    assert_eq!(result.credibility, 25);
    assert_eq!(result.status, CredibilityStatus::Fake);
    assert_eq!(result.paid, PaidStatus::Unknown);
    assert_eq!(
        result.explanations,
        vec![
            "Contact email uses free provider (gmail.com).",
            "No link provided; relying on text analysis.",
            "No description text provided.",
        ]
    );
}

#[test]
fn trusted_link_alone_stays_neutral() {
    let posting = InternshipPosting {
        link: Some("https://www.linkedin.com/jobs/view/123".to_string()),
        ..InternshipPosting::default()
    };

    let result = engine().score(&posting, &seeded_rules());

    assert_eq!(result.credibility, 50);
    assert_eq!(result.status, CredibilityStatus::Suspicious);
    assert_eq!(
        result.explanations,
        vec![
            "No contact email provided.",
            "Posted on a known platform (linkedin.com).",
            "No description text provided.",
        ]
    );
}

#[test]
fn fee_and_promise_phrases_drive_score_to_zero() {
    let posting = InternshipPosting {
        description: Some(
            "Pay ₹500 registration fee, guaranteed placement, no stipend".to_string(),
        ),
        ..InternshipPosting::default()
    };

    let breakdown = engine().breakdown(&posting, &seeded_rules());
    assert_eq!(breakdown.raw_total(), 0);

    let result = breakdown.into_result();
    assert_eq!(result.credibility, 0);
    assert_eq!(result.status, CredibilityStatus::Fake);
    assert_eq!(result.paid, PaidStatus::Unpaid);
    assert!(result
        .explanations
        .contains(&"Asks for an upfront registration fee.".to_string()));
    assert!(result
        .explanations
        .contains(&"Unrealistic guarantee of job/placement.".to_string()));
    assert!(result
        .explanations
        .contains(&"Explicitly mentions no stipend.".to_string()));
}

#[test]
fn scam_posting_clamps_at_zero() {
    let breakdown = engine().breakdown(&scam_posting(), &seeded_rules());

    assert_eq!(breakdown.raw_total(), -65);
    let result = breakdown.into_result();
    assert_eq!(result.credibility, 0);
    assert_eq!(result.status, CredibilityStatus::Fake);
    assert_eq!(result.paid, PaidStatus::Paid);
    assert_eq!(
        result.explanations,
        vec![
            "Contact email uses free provider (gmail.com).",
            "Suspicious top-level domain (.xyz).",
            "URL contains long random-looking path.",
            "Asks for an upfront registration fee.",
            "Mandatory paid training before internship.",
            "Payment required to apply.",
            "Only Telegram contact; no official email/site.",
        ]
    );
}

#[test]
fn clean_posting_on_known_platform_is_suspicious_at_most() {
    let result = engine().score(&posting(), &seeded_rules());

    assert_eq!(result.credibility, 70);
    assert_eq!(result.status, CredibilityStatus::Suspicious);
    assert_eq!(result.paid, PaidStatus::Paid);
    assert_eq!(
        result.explanations.last().map(String::as_str),
        Some("No scam phrases detected in description.")
    );
}

#[test]
fn positive_rules_can_lift_a_posting_to_real() {
    let rules = vec![rule(
        1,
        "offer letter on company letterhead",
        10,
        Some("Mentions a formal offer letter."),
    )];
    let mut posting = posting();
    posting.description = Some(
        "Selected candidates receive an Offer Letter on Company Letterhead.".to_string(),
    );

    let result = engine().score(&posting, &rules);

    assert_eq!(result.credibility, 75);
    assert_eq!(result.status, CredibilityStatus::Real);
    assert!(!result
        .explanations
        .contains(&"No scam phrases detected in description.".to_string()));
}

#[test]
fn heavy_bonuses_clamp_at_one_hundred() {
    let rules = vec![rule(1, "stipend", 200, None)];
    let result = engine().score(&posting(), &rules);

    assert_eq!(result.credibility, 100);
    assert_eq!(result.status, CredibilityStatus::Real);
}

#[test]
fn shared_rule_descriptions_are_reported_once() {
    let rules = vec![
        rule(1, "telegram", -5, Some("Off-platform messaging only.")),
        rule(2, "whatsapp", -5, Some("Off-platform messaging only.")),
    ];
    let posting = InternshipPosting {
        description: Some("Reach us on Telegram or WhatsApp".to_string()),
        ..InternshipPosting::default()
    };

    let breakdown = engine().breakdown(&posting, &rules);
    let keyword_deltas: i32 = breakdown
        .components
        .iter()
        .filter(|component| component.signal == SignalKind::Keyword)
        .map(|component| component.delta)
        .sum();
    assert_eq!(keyword_deltas, -10);

    let result = breakdown.into_result();
    let occurrences = result
        .explanations
        .iter()
        .filter(|explanation| explanation.as_str() == "Off-platform messaging only.")
        .count();
    assert_eq!(occurrences, 1);
}

#[test]
fn blank_fields_score_like_missing_ones() {
    let blank = InternshipPosting {
        title: Some(" ".to_string()),
        company_name: Some(String::new()),
        description: Some("\n\n".to_string()),
        link: Some("   ".to_string()),
        email: Some("\t".to_string()),
    };

    let rules = seeded_rules();
    assert_eq!(
        engine().score(&blank, &rules),
        engine().score(&InternshipPosting::default(), &rules)
    );
    assert_eq!(engine().score(&blank, &rules).credibility, 40);
}

#[test]
fn identical_inputs_yield_identical_results() {
    let rules = seeded_rules();
    let first = engine().score(&scam_posting(), &rules);
    let second = engine().score(&scam_posting(), &rules);
    assert_eq!(first, second);
}

#[test]
fn custom_tables_change_domain_classification() {
    let tables = DomainTables::new(["acmerobotics.io"], ["careers.example"], ["io"]);
    let engine = ScoringEngine::new(tables);
    let posting = InternshipPosting {
        email: Some("talent@acmerobotics.io".to_string()),
        link: Some("https://jobs.acmerobotics.io/apply".to_string()),
        ..InternshipPosting::default()
    };

    let breakdown = engine.breakdown(&posting, &[]);
    let deltas: Vec<i32> = breakdown
        .components
        .iter()
        .map(|component| component.delta)
        .collect();

    assert_eq!(deltas, vec![-15, -10, -10]);
}

#[test]
fn credibility_and_status_stay_consistent_across_postings() {
    let rules = seeded_rules();
    let descriptions = [
        None,
        Some("Security deposit and certificate fee apply; DM for details"),
        Some("Volunteer opportunity, whatsapp only"),
        Some("Paid internship with monthly stipend"),
    ];
    let emails = [None, Some("team@startup.dev"), Some("someone@yahoo.com")];
    let links = [
        None,
        Some("https://internshala.com/internship/detail/abc"),
        Some("https://offers.click/aaaaaaaaaaaaaaaaaaaaaaaaa"),
    ];

    for description in descriptions {
        for email in emails {
            for link in links {
                let posting = InternshipPosting {
                    description: description.map(str::to_string),
                    email: email.map(str::to_string),
                    link: link.map(str::to_string),
                    ..InternshipPosting::default()
                };
                let result = engine().score(&posting, &rules);

                assert!(result.credibility <= 100);
                let expected = if result.credibility >= 75 {
                    CredibilityStatus::Real
                } else if result.credibility <= 40 {
                    CredibilityStatus::Fake
                } else {
                    CredibilityStatus::Suspicious
                };
                assert_eq!(result.status, expected);

                let mut unique = result.explanations.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), result.explanations.len());
            }
        }
    }
}
