//! Typed metadata registry for all rule IDs, with subset selection.

mod catalog;
mod types;

pub use catalog::{CATALOG, DOC_PYDANTIC, DOC_STDLIB, DOC_STYLE, DOC_TYPING};
pub use types::{RuleCategory, RuleDescriptor, RuleSeverity};

use crate::errors::ConfigurationError;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::OnceLock;

/// Returns the id-keyed view of the builtin catalog.
fn catalog_by_id() -> &'static FxHashMap<&'static str, &'static RuleDescriptor> {
    static MAP: OnceLock<FxHashMap<&'static str, &'static RuleDescriptor>> = OnceLock::new();
    MAP.get_or_init(|| CATALOG.iter().map(|d| (d.id, d)).collect())
}

/// Returns every builtin rule descriptor, in identifier order.
#[must_use]
pub fn all_rule_descriptors() -> &'static [RuleDescriptor] {
    CATALOG
}

/// Looks up a single rule descriptor by id.
#[must_use]
pub fn get_rule_descriptor(id: &str) -> Option<&'static RuleDescriptor> {
    catalog_by_id().get(id).copied()
}

/// A validated view over the builtin catalog: the set of rules an audit runs.
#[derive(Debug, Clone)]
pub struct Registry {
    descriptors: Vec<&'static RuleDescriptor>,
}

impl Registry {
    /// Returns a registry with no rules enabled.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Builds a registry containing every builtin rule.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::DuplicateRuleId` if the catalog carries
    /// two entries with the same identifier.
    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::with_selection(None, &[])
    }

    /// Builds a registry from an optional enable-list and a disable-list.
    ///
    /// `enabled = None` means "all rules"; ids in `disabled` are removed
    /// afterwards. Catalog order is preserved regardless of selection order,
    /// which keeps reports deterministic under configuration reordering.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::DuplicateRuleId` for a duplicated catalog
    /// id, or `ConfigurationError::UnknownRuleId` if a selection names an id
    /// the catalog does not contain.
    pub fn with_selection(
        enabled: Option<&[String]>,
        disabled: &[String],
    ) -> Result<Self, ConfigurationError> {
        let mut seen: FxHashSet<&'static str> = FxHashSet::default();
        for descriptor in CATALOG {
            if !seen.insert(descriptor.id) {
                return Err(ConfigurationError::DuplicateRuleId(descriptor.id.to_owned()));
            }
        }

        let enabled_set = match enabled {
            Some(ids) => Some(Self::normalize_selection(ids)?),
            None => None,
        };
        let disabled_set = Self::normalize_selection(disabled)?;

        let descriptors = CATALOG
            .iter()
            .filter(|d| enabled_set.as_ref().is_none_or(|set| set.contains(d.id)))
            .filter(|d| !disabled_set.contains(d.id))
            .collect();

        Ok(Self { descriptors })
    }

    fn normalize_selection(ids: &[String]) -> Result<FxHashSet<String>, ConfigurationError> {
        let mut set = FxHashSet::default();
        for id in ids {
            let id = id.trim().to_uppercase();
            if id.is_empty() {
                continue;
            }
            if get_rule_descriptor(&id).is_none() {
                return Err(ConfigurationError::UnknownRuleId(id));
            }
            set.insert(id);
        }
        Ok(set)
    }

    /// Returns the enabled descriptors, in catalog order.
    #[must_use]
    pub fn descriptors(&self) -> &[&'static RuleDescriptor] {
        &self.descriptors
    }

    /// Returns whether the given rule id is enabled.
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.descriptors.iter().any(|d| d.id == id)
    }

    /// Returns the number of enabled rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns whether no rules are enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RULE_ID_RE;

    #[test]
    fn test_catalog_ids_are_unique_and_well_formed() {
        let mut seen = FxHashSet::default();
        for descriptor in CATALOG {
            assert!(
                RULE_ID_RE().is_match(descriptor.id),
                "malformed rule id: {}",
                descriptor.id
            );
            assert!(seen.insert(descriptor.id), "duplicate id: {}", descriptor.id);
            assert!(!descriptor.replacement.is_empty());
        }
    }

    #[test]
    fn test_registry_contains_known_rule_with_metadata() {
        let descriptor =
            get_rule_descriptor("PM201").expect("expected legacy-config rule to be present");
        assert_eq!(descriptor.category, RuleCategory::Pydantic);
        assert_eq!(descriptor.default_severity, RuleSeverity::High);
        assert_eq!(descriptor.docs_url, DOC_PYDANTIC);
    }

    #[test]
    fn test_subset_selection_preserves_catalog_order() {
        let registry = Registry::with_selection(
            Some(&["PM401".to_owned(), "PM101".to_owned()]),
            &[],
        )
        .expect("selection should be valid");
        let ids: Vec<&str> = registry.descriptors().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["PM101", "PM401"]);
    }

    #[test]
    fn test_unknown_rule_id_is_configuration_error() {
        let err = Registry::with_selection(Some(&["PM999".to_owned()]), &[])
            .expect_err("PM999 is not in the catalog");
        assert!(matches!(
            err,
            crate::errors::ConfigurationError::UnknownRuleId(ref id) if id == "PM999"
        ));
    }

    #[test]
    fn test_disable_list_removes_rules() {
        let registry = Registry::with_selection(None, &["PM101".to_owned()])
            .expect("disable selection should be valid");
        assert!(!registry.is_enabled("PM101"));
        assert!(registry.is_enabled("PM102"));
        assert_eq!(registry.len(), CATALOG.len() - 1);
    }

    #[test]
    fn test_selection_is_case_insensitive() {
        let registry = Registry::with_selection(Some(&["pm101".to_owned()]), &[])
            .expect("lowercase ids should normalize");
        assert!(registry.is_enabled("PM101"));
        assert_eq!(registry.len(), 1);
    }
}
