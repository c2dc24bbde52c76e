use crate::catalog::{Catalog, CatalogError, RuleSet, PHASE_COUNT};

/// Checks that a catalog can drive a full conversation.
///
/// FAIL conditions:
/// - No questions, or a blank question
/// - No active-listening phrases
/// - Phase count other than 4
/// - A rule with no usable keyword
/// - A category with an empty fallback (output must never be empty)
/// - Career limit of zero
/// - Summary without top paths
///
/// All problems are reported together.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut problems = Vec::new();

    if catalog.questions.is_empty() {
        problems.push("at least one question is required".to_string());
    }
    for (idx, question) in catalog.questions.iter().enumerate() {
        if question.trim().is_empty() {
            problems.push(format!("question {idx} is blank"));
        }
    }

    if catalog.active_listening.is_empty() {
        problems.push("at least one active-listening phrase is required".to_string());
    }

    if catalog.phases.len() != PHASE_COUNT {
        problems.push(format!(
            "expected {PHASE_COUNT} phases, found {}",
            catalog.phases.len()
        ));
    }

    check_rule_set("drivers", &catalog.drivers, &mut problems);
    check_rule_set("strengths", &catalog.strengths, &mut problems);
    check_rule_set("careers", &catalog.careers.set, &mut problems);
    check_rule_set("profiles", &catalog.profiles, &mut problems);

    if catalog.careers.limit == 0 {
        problems.push("careers.limit must be at least 1".to_string());
    }

    if catalog.summary.top_paths.is_empty() {
        problems.push("summary.top_paths must not be empty".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::Invalid(problems.join("; ")))
    }
}

fn check_rule_set<T>(name: &str, set: &RuleSet<T>, problems: &mut Vec<String>) {
    if set.fallback.is_empty() {
        problems.push(format!("{name}.fallback must not be empty"));
    }
    for (idx, rule) in set.rules.iter().enumerate() {
        if rule.keywords.iter().all(|k| k.trim().is_empty()) {
            problems.push(format!("{name}.rules[{idx}] has no keywords"));
        }
    }
}
