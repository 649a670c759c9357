use regex::Regex;
use std::sync::OnceLock;

/// Returns the compiled suppression-comment regex.
///
/// Capture group 1 holds the rule-ID list of a `noqa` comment, when present.
pub fn get_suppression_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?i)#\s*(?:pragma:\s*no\s*pymodern|noqa(?::\s*([^#\n]+))?)")
            .expect("Invalid suppression regex pattern")
    })
}

/// Returns the compiled regex validating rule identifiers (`PM` + 3 digits).
pub fn get_rule_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^PM\d{3}$").expect("Invalid rule id regex pattern"))
}
