/// Canonical high-level category for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    /// Type-annotation modernization (PEP 585 / PEP 604).
    Typing,
    /// Pydantic v1 API migration.
    Pydantic,
    /// Standard-library modernization.
    Stdlib,
    /// General style modernization.
    Style,
}

impl RuleCategory {
    /// Returns the canonical display form for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleCategory::Typing => "Typing",
            RuleCategory::Pydantic => "Pydantic",
            RuleCategory::Stdlib => "Stdlib",
            RuleCategory::Style => "Style",
        }
    }
}

/// Default severity for a rule when no override applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSeverity {
    /// High severity.
    High,
    /// Medium severity.
    Medium,
    /// Low severity.
    Low,
}

impl RuleSeverity {
    /// Returns the canonical display form for this severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleSeverity::High => "HIGH",
            RuleSeverity::Medium => "MEDIUM",
            RuleSeverity::Low => "LOW",
        }
    }
}

/// Strongly typed rule metadata.
///
/// Descriptors are the data half of a rule: the detection predicate lives in
/// `crate::rules`, keyed by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleDescriptor {
    /// Stable rule identifier (for example `PM101`).
    pub id: &'static str,
    /// Short human-readable rule name.
    pub name: &'static str,
    /// Rule category.
    pub category: RuleCategory,
    /// Default severity for the rule.
    pub default_severity: RuleSeverity,
    /// One-line description of the outdated construct.
    pub summary: &'static str,
    /// Recommended modern replacement.
    pub replacement: &'static str,
    /// Documentation URL/path for end-user guidance.
    pub docs_url: &'static str,
}

pub(super) const fn rule(
    id: &'static str,
    name: &'static str,
    category: RuleCategory,
    default_severity: RuleSeverity,
    summary: &'static str,
    replacement: &'static str,
    docs_url: &'static str,
) -> RuleDescriptor {
    RuleDescriptor {
        id,
        name,
        category,
        default_severity,
        summary,
        replacement,
        docs_url,
    }
}
