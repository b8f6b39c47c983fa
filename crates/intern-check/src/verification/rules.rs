use serde::{Deserialize, Serialize};

/// Weight applied when a rule is created without one.
pub const DEFAULT_RULE_WEIGHT: i32 = -10;

const MAX_KEYWORD_LEN: usize = 128;
const MAX_TAG_LEN: usize = 32;

/// Persisted scam pattern. Keywords are matched case-insensitively as substrings of the
/// posting description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScamRule {
    pub id: i64,
    pub keyword: String,
    pub description: Option<String>,
    pub weight: i32,
    pub tag: Option<String>,
}

impl ScamRule {
    /// Explanation emitted when this rule matches.
    pub fn explanation(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => format!("Matched pattern: {}", self.keyword),
        }
    }
}

/// Rule awaiting insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScamRule {
    pub keyword: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_weight")]
    pub weight: i32,
    #[serde(default)]
    pub tag: Option<String>,
}

fn default_weight() -> i32 {
    DEFAULT_RULE_WEIGHT
}

impl NewScamRule {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            description: None,
            weight: DEFAULT_RULE_WEIGHT,
            tag: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Trims and lowercases the keyword, rejecting blanks and over-long columns.
    pub fn normalized(mut self) -> Result<Self, RuleStoreError> {
        let keyword = self.keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(RuleStoreError::InvalidRule(
                "keyword must not be empty".to_string(),
            ));
        }
        if keyword.chars().count() > MAX_KEYWORD_LEN {
            return Err(RuleStoreError::InvalidRule(format!(
                "keyword longer than {MAX_KEYWORD_LEN} characters"
            )));
        }

        self.tag = self
            .tag
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty());
        if let Some(tag) = &self.tag {
            if tag.chars().count() > MAX_TAG_LEN {
                return Err(RuleStoreError::InvalidRule(format!(
                    "tag longer than {MAX_TAG_LEN} characters"
                )));
            }
        }

        self.keyword = keyword;
        Ok(self)
    }
}

/// The rule set installed on first use of an empty store.
pub fn default_rules() -> Vec<NewScamRule> {
    [
        ("registration fee", "Asks for an upfront registration fee.", -25, "fee"),
        ("security deposit", "Asks for a refundable deposit for internship.", -25, "fee"),
        ("certificate fee", "Charges for certificate/completion letter.", -20, "fee"),
        ("training fee", "Mandatory paid training before internship.", -20, "fee"),
        ("guaranteed placement", "Unrealistic guarantee of job/placement.", -20, "promise"),
        ("pay to apply", "Payment required to apply.", -25, "fee"),
        ("dm for details", "Vague DM-only instructions; no official channel.", -10, "vague"),
        ("telegram only", "Only Telegram contact; no official email/site.", -15, "vague"),
        ("whatsapp only", "Only WhatsApp contact; no official email/site.", -15, "vague"),
        ("no stipend", "Explicitly mentions no stipend.", -5, "unpaid"),
        ("unpaid internship", "Unpaid internship.", -5, "unpaid"),
    ]
    .into_iter()
    .map(|(keyword, description, weight, tag)| {
        NewScamRule::new(keyword)
            .with_description(description)
            .with_weight(weight)
            .with_tag(tag)
    })
    .collect()
}

/// Source of scam patterns for the scoring engine.
pub trait RuleStore: Send + Sync {
    /// Every rule currently stored, ordered by id.
    fn all_rules(&self) -> Result<Vec<ScamRule>, RuleStoreError>;

    /// Inserts [`default_rules`] only when the store holds no rules. Returns how many rules
    /// were inserted, which is zero on every call after the first.
    fn seed_defaults_if_empty(&self) -> Result<usize, RuleStoreError>;

    /// Administrative extension of the rule set.
    fn add_rule(&self, rule: NewScamRule) -> Result<ScamRule, RuleStoreError>;
}

/// Rule store failures.
#[derive(Debug, thiserror::Error)]
pub enum RuleStoreError {
    #[error("rule with keyword '{0}' already exists")]
    Conflict(String),
    #[error("invalid rule: {0}")]
    InvalidRule(String),
    #[error("rule store unavailable: {0}")]
    Unavailable(String),
}
