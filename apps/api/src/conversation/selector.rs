//! Content Selector — picks drivers, strengths, careers and a profile label from the
//! user's answers by literal keyword matching.
//!
//! Matching is plain substring search over the lower-cased corpus: "art" fires inside
//! "cart". No scoring, no stemming. Every fired rule contributes its output in rule
//! order; when nothing fires the category's fallback is used, so no category is ever
//! empty.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Recommendation, RuleSet};
use crate::models::conversation::Response;

/// All response texts, lower-cased and joined by a single space in the order they
/// were recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus(String);

impl Corpus {
    pub fn from_responses(responses: &[Response]) -> Self {
        let joined = responses
            .iter()
            .map(|r| r.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        Corpus(joined)
    }

    /// True if any non-empty keyword occurs anywhere in the corpus.
    pub fn contains_any(&self, keywords: &[String]) -> bool {
        keywords
            .iter()
            .any(|k| !k.is_empty() && self.0.contains(k.as_str()))
    }
}

impl From<&str> for Corpus {
    fn from(text: &str) -> Self {
        Corpus(text.to_lowercase())
    }
}

/// Outputs of every rule that fires, in rule order.
pub fn fired<'a, T>(set: &'a RuleSet<T>, corpus: &Corpus) -> Vec<&'a T> {
    set.rules
        .iter()
        .filter(|rule| corpus.contains_any(&rule.keywords))
        .map(|rule| &rule.output)
        .collect()
}

/// Fired outputs, or the whole fallback list when nothing fired.
pub fn select<'a, T>(set: &'a RuleSet<T>, corpus: &Corpus) -> Vec<&'a T> {
    let hits = fired(set, corpus);
    if hits.is_empty() {
        set.fallback.iter().collect()
    } else {
        hits
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub core_drivers: Vec<String>,
    pub strengths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub profile: String,
    pub top_paths: Vec<String>,
}

pub fn analyze(catalog: &Catalog, corpus: &Corpus) -> Analysis {
    Analysis {
        core_drivers: select(&catalog.drivers, corpus)
            .into_iter()
            .cloned()
            .collect(),
        strengths: select(&catalog.strengths, corpus)
            .into_iter()
            .cloned()
            .collect(),
    }
}

/// Career candidates in rule order, first fired first kept, capped at the catalog limit.
pub fn recommend(catalog: &Catalog, corpus: &Corpus) -> Vec<Recommendation> {
    select(&catalog.careers.set, corpus)
        .into_iter()
        .take(catalog.careers.limit)
        .cloned()
        .collect()
}

/// Single profile label: the first rule that fires wins.
pub fn profile_label(catalog: &Catalog, corpus: &Corpus) -> String {
    select(&catalog.profiles, corpus)
        .first()
        .map(|label| label.to_string())
        .unwrap_or_default()
}

pub fn summarize(catalog: &Catalog, corpus: &Corpus) -> Summary {
    Summary {
        profile: profile_label(catalog, corpus),
        top_paths: catalog.summary.top_paths.clone(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn catalog() -> Catalog {
        Catalog::bundled().unwrap()
    }

    fn response(text: &str) -> Response {
        Response {
            phase: 1,
            question_index: 0,
            text: text.to_string(),
            timestamp: Utc::now(),
        }
    }

    fn titles(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_corpus_joins_lowercased_in_order() {
        let corpus = Corpus::from_responses(&[response("I like DESIGN"), response("And Data")]);
        assert_eq!(corpus, Corpus::from("i like design and data"));
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        let corpus = Corpus::from("anything");
        assert!(!corpus.contains_any(&[String::new()]));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let analysis = analyze(&catalog(), &Corpus::from("Creative"));
        assert!(analysis
            .core_drivers
            .contains(&"Creative expression and innovation".to_string()));

        let analysis = analyze(&catalog(), &Corpus::from("creative work"));
        assert!(analysis
            .core_drivers
            .contains(&"Creative expression and innovation".to_string()));
    }

    #[test]
    fn test_matching_is_substring_not_word_boundary() {
        let analysis = analyze(&catalog(), &Corpus::from("I push a shopping cart"));
        assert_eq!(
            analysis.core_drivers,
            vec!["Creative expression and innovation".to_string()]
        );
    }

    #[test]
    fn test_no_match_falls_back_to_defaults() {
        let analysis = analyze(&catalog(), &Corpus::from("zzz"));
        assert_eq!(
            analysis.core_drivers,
            vec![
                "Professional growth and meaningful work".to_string(),
                "Building expertise in your field".to_string(),
            ]
        );
        assert_eq!(
            analysis.strengths,
            vec![
                "Adaptability and learning agility".to_string(),
                "Strong work ethic and dedication".to_string(),
            ]
        );
        assert_eq!(
            titles(&recommend(&catalog(), &Corpus::from("zzz"))),
            vec!["Product Manager", "Marketing Coordinator"]
        );
        assert_eq!(
            profile_label(&catalog(), &Corpus::from("zzz")),
            "Professional seeking meaningful work that leverages your unique strengths"
        );
    }

    #[test]
    fn test_empty_corpus_still_produces_every_category() {
        let corpus = Corpus::default();
        let analysis = analyze(&catalog(), &corpus);
        assert!(!analysis.core_drivers.is_empty());
        assert!(!analysis.strengths.is_empty());
        assert!(!recommend(&catalog(), &corpus).is_empty());
        assert!(!profile_label(&catalog(), &corpus).is_empty());
    }

    #[test]
    fn test_helping_people_in_teams() {
        let corpus = Corpus::from("I love helping people and working in teams");
        let analysis = analyze(&catalog(), &corpus);

        assert!(analysis
            .core_drivers
            .contains(&"Making a positive impact on others".to_string()));
        assert!(analysis
            .strengths
            .contains(&"Collaboration and interpersonal skills".to_string()));
        assert_eq!(titles(&recommend(&catalog(), &corpus)), vec!["Project Manager"]);
        assert_eq!(
            profile_label(&catalog(), &corpus),
            "People-focused professional with natural leadership qualities"
        );
    }

    #[test]
    fn test_multiple_rules_fire_in_rule_order() {
        let corpus = Corpus::from("I solve problems with my team and need balance");
        let analysis = analyze(&catalog(), &corpus);
        assert_eq!(
            analysis.core_drivers,
            vec![
                "Making a positive impact on others".to_string(),
                "Problem-solving and analytical thinking".to_string(),
                "Work-life balance and stability".to_string(),
            ]
        );
    }

    #[test]
    fn test_careers_keep_rule_order() {
        // "team" is mentioned first, but rule order decides
        let corpus = Corpus::from("my team does data work and design");
        assert_eq!(
            titles(&recommend(&catalog(), &corpus)),
            vec!["UX/UI Designer", "Data Analyst", "Project Manager"]
        );
    }

    #[test]
    fn test_careers_capped_at_limit() {
        let mut catalog = catalog();
        let extra = catalog.careers.set.rules[0].clone();
        catalog.careers.set.rules.push(extra);

        let corpus = Corpus::from("creative data people");
        let recs = recommend(&catalog, &corpus);
        assert_eq!(recs.len(), 3);
        assert_eq!(
            titles(&recs),
            vec!["UX/UI Designer", "Data Analyst", "Project Manager"]
        );
    }

    #[test]
    fn test_profile_first_fired_wins() {
        let corpus = Corpus::from("creative people who love data");
        assert_eq!(
            profile_label(&catalog(), &corpus),
            "Creative professional with strong problem-solving abilities"
        );
    }

    #[test]
    fn test_summary_has_three_top_paths() {
        let summary = summarize(&catalog(), &Corpus::from("technical"));
        assert_eq!(
            summary.profile,
            "Analytically-minded professional with technical aptitude"
        );
        assert_eq!(summary.top_paths.len(), 3);
    }
}
