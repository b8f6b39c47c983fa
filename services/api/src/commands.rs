use crate::infra::open_seeded_store;
use clap::{Args, Subcommand};
use intern_check::config::AppConfig;
use intern_check::error::AppError;
use intern_check::verification::{
    CheckOutcome, CheckResponse, InMemoryInternshipRepository, InMemoryRuleStore,
    InternshipPosting, InternshipRecord, InternshipRepository, NewScamRule, PaidStatus, RuleStore,
    ScamRule, SqliteStore, VerificationService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct CheckArgs {
    /// Posting title
    #[arg(long)]
    pub(crate) title: Option<String>,
    /// Company offering the internship
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Link to the posting
    #[arg(long)]
    pub(crate) link: Option<String>,
    /// Contact email listed on the posting
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// Posting description text
    #[arg(long, conflicts_with = "description_file")]
    pub(crate) description: Option<String>,
    /// Read the description from a file instead
    #[arg(long)]
    pub(crate) description_file: Option<PathBuf>,
    /// Score with the default rules only; nothing is written to the database
    #[arg(long)]
    pub(crate) in_memory: bool,
    /// Print the verdict as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum RulesCommand {
    /// List the scam patterns in the database
    List,
    /// Insert the default scam patterns when the table is empty
    Seed,
    /// Add a custom scam pattern
    Add(AddRuleArgs),
}

#[derive(Args, Debug)]
pub(crate) struct AddRuleArgs {
    /// Phrase matched case-insensitively against descriptions
    #[arg(long)]
    pub(crate) keyword: String,
    /// Score delta applied when the phrase matches
    #[arg(long, default_value_t = -10, allow_negative_numbers = true)]
    pub(crate) weight: i32,
    /// Explanation reported when the phrase matches
    #[arg(long)]
    pub(crate) description: Option<String>,
    /// Short category label
    #[arg(long)]
    pub(crate) tag: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct HistoryArgs {
    /// Maximum number of checks to list
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let json = args.json;
    let outcome = check_posting(args)?;

    if json {
        println!("{}", render_json(outcome)?);
    } else {
        render_outcome(&outcome);
    }
    Ok(())
}

fn check_posting(args: CheckArgs) -> Result<CheckOutcome, AppError> {
    let CheckArgs {
        title,
        company,
        link,
        email,
        description,
        description_file,
        in_memory,
        json: _,
    } = args;

    let description = match description_file {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => description,
    };
    let posting = InternshipPosting {
        title,
        company_name: company,
        description,
        link,
        email,
    };

    if in_memory {
        let service = VerificationService::new(
            Arc::new(InMemoryRuleStore::with_defaults()),
            Arc::new(InMemoryInternshipRepository::default()),
        );
        let mut outcome = service.check(posting)?;
        outcome.saved = None;
        return Ok(outcome);
    }

    let config = AppConfig::load()?;
    let store = open_seeded_store(&config)?;
    Ok(VerificationService::new(store.clone(), store).check(posting)?)
}

fn render_json(outcome: CheckOutcome) -> Result<String, AppError> {
    let response = CheckResponse::from(outcome);
    let rendered = serde_json::to_string_pretty(&response).map_err(std::io::Error::from)?;
    Ok(rendered)
}

pub(crate) fn run_rules(command: RulesCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    match command {
        RulesCommand::List => {
            let store = open_seeded_store(&config)?;
            let rules = store.all_rules()?;
            println!("{} scam patterns", rules.len());
            for rule in &rules {
                println!("{}", format_rule(rule));
            }
        }
        RulesCommand::Seed => {
            let store = SqliteStore::open(config.database.sqlite_path())?;
            match store.seed_defaults_if_empty()? {
                0 => println!("Scam patterns already present; nothing seeded"),
                inserted => println!("Seeded {inserted} default scam patterns"),
            }
        }
        RulesCommand::Add(args) => {
            let store = open_seeded_store(&config)?;
            let mut rule = NewScamRule::new(args.keyword).with_weight(args.weight);
            if let Some(description) = args.description {
                rule = rule.with_description(description);
            }
            if let Some(tag) = args.tag {
                rule = rule.with_tag(tag);
            }
            let stored = store.add_rule(rule)?;
            println!("Added {}", format_rule(&stored));
        }
    }

    Ok(())
}

pub(crate) fn run_history(args: HistoryArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = open_seeded_store(&config)?;
    let records = store.recent(args.limit)?;

    if records.is_empty() {
        println!("No checks recorded yet");
        return Ok(());
    }

    println!("Most recent {} checks", records.len());
    for record in &records {
        println!("{}", format_record(record));
    }
    Ok(())
}

fn render_outcome(outcome: &CheckOutcome) {
    let result = &outcome.result;
    println!(
        "Verdict: {} (credibility {}/100)",
        result.status.label(),
        result.credibility
    );
    println!("Compensation: {}", paid_label(result.paid));
    println!("Signals:");
    for explanation in &result.explanations {
        println!("  - {explanation}");
    }
    if let Some(id) = outcome.record_id() {
        println!("Recorded as check #{id}");
    }
}

fn paid_label(paid: PaidStatus) -> &'static str {
    match paid {
        PaidStatus::Paid => "paid",
        PaidStatus::Unpaid => "unpaid",
        PaidStatus::Unknown => "unknown",
    }
}

fn format_rule(rule: &ScamRule) -> String {
    let mut line = format!("#{} \"{}\" ({:+})", rule.id, rule.keyword, rule.weight);
    if let Some(tag) = &rule.tag {
        line.push_str(&format!(" [{tag}]"));
    }
    line.push_str(&format!(" {}", rule.explanation()));
    line
}

fn format_record(record: &InternshipRecord) -> String {
    let label = record
        .title
        .as_deref()
        .or(record.company_name.as_deref())
        .unwrap_or("(untitled)");
    let score = record
        .credibility_score
        .map(|score| score.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "#{} {} {} {}/100 {}",
        record.id,
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.status.as_deref().unwrap_or("?"),
        score,
        label
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use intern_check::verification::{NewInternshipRecord, ScoringEngine};

    #[test]
    fn rules_render_with_sign_and_tag() {
        let rule = ScamRule {
            id: 3,
            keyword: "telegram only".to_string(),
            description: Some("Only Telegram contact; no official email/site.".to_string()),
            weight: -15,
            tag: Some("vague".to_string()),
        };
        assert_eq!(
            format_rule(&rule),
            "#3 \"telegram only\" (-15) [vague] Only Telegram contact; no official email/site."
        );

        let bonus = ScamRule {
            id: 4,
            keyword: "offer letter".to_string(),
            description: None,
            weight: 5,
            tag: None,
        };
        assert_eq!(
            format_rule(&bonus),
            "#4 \"offer letter\" (+5) Matched pattern: offer letter"
        );
    }

    #[test]
    fn records_fall_back_to_company_name() {
        let posting = InternshipPosting {
            company_name: Some("Northwind".to_string()),
            ..InternshipPosting::default()
        };
        let result = ScoringEngine::standard().score(&posting, &[]);
        let history = InMemoryInternshipRepository::default();
        let record = history
            .record(NewInternshipRecord::from_evaluation(&posting, &result))
            .expect("recorded");

        let line = format_record(&record);
        assert!(line.starts_with("#1 "));
        assert!(line.ends_with(" Fake 40/100 Northwind"));
    }

    #[test]
    fn in_memory_check_reads_description_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("posting.txt");
        std::fs::write(&path, "Registration fee required").expect("write description");

        let args = CheckArgs {
            description: None,
            description_file: Some(path),
            in_memory: true,
            json: true,
            ..CheckArgs::default()
        };
        let outcome = check_posting(args).expect("check runs");
        let rendered = render_json(outcome).expect("renders");
        let payload: serde_json::Value = serde_json::from_str(&rendered).expect("json output");

        assert_eq!(payload["credibility"], 25);
        assert_eq!(payload["status"], "Fake");
        assert_eq!(payload["paid"], serde_json::Value::Null);
        assert!(payload["explanations"]
            .as_array()
            .expect("explanations")
            .contains(&serde_json::json!("Asks for an upfront registration fee.")));
        assert!(payload.get("id").is_none());
    }
}
