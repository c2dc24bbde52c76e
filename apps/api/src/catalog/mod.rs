//! Content catalog — every scripted line the coach can say, plus the keyword rules
//! that pick among them.
//!
//! The bundled catalog is compiled into the binary. `CATALOG_PATH` replaces it with a
//! JSON file of the same shape at startup. Both paths go through the same
//! normalization and validation.

pub mod validation;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::catalog::validation::validate_catalog;

const BUNDLED_CATALOG: &str = include_str!("default_catalog.json");

/// Number of phases in the guided conversation.
pub const PHASE_COUNT: usize = 4;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A static career-profile template. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub fit_reason: String,
    pub responsibilities: String,
    pub current_skills: String,
    pub skills_to_develop: String,
    pub growth_path: String,
    pub challenges: String,
}

/// Fires when the corpus contains any of `keywords` as a substring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule<T> {
    pub keywords: Vec<String>,
    pub output: T,
}

/// Ordered rules for one category plus the content used when none fire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet<T> {
    pub rules: Vec<KeywordRule<T>>,
    pub fallback: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerRules {
    /// Maximum number of recommendations shown.
    #[serde(default = "default_career_limit")]
    pub limit: usize,
    #[serde(flatten)]
    pub set: RuleSet<Recommendation>,
}

fn default_career_limit() -> usize {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseScript {
    pub title: String,
    /// Text that precedes the phase's structured content. Phase 1 has none.
    #[serde(default)]
    pub intro: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUps {
    pub analysis: String,
    pub recommendations: String,
    pub closing: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisText {
    pub heading: String,
    pub ideal_environment: String,
    pub growth_opportunities: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub label: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    pub heading: String,
    pub timelines: Vec<Timeline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryText {
    pub heading: String,
    pub top_paths: Vec<String>,
    pub next_step: String,
    pub thirty_day_goal: String,
}

/// The full content catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Greeting shown before the first question.
    pub opening: String,
    /// Phase-1 questions. `questions[0]` is asked inside the opening message.
    pub questions: Vec<String>,
    pub active_listening: Vec<String>,
    pub phases: Vec<PhaseScript>,
    pub follow_ups: FollowUps,
    pub drivers: RuleSet<String>,
    pub strengths: RuleSet<String>,
    pub careers: CareerRules,
    pub profiles: RuleSet<String>,
    pub analysis: AnalysisText,
    pub action_plan: ActionPlan,
    pub summary: SummaryText,
}

// ────────────────────────────────────────────────────────────────────────────
// Loading
// ────────────────────────────────────────────────────────────────────────────

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Loads the catalog from `path`, or the bundled one when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let Some(path) = path else {
            let catalog = Self::bundled()?;
            info!(
                questions = catalog.questions.len(),
                "Loaded bundled content catalog"
            );
            return Ok(catalog);
        };

        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            questions = catalog.questions.len(),
            "Loaded content catalog override"
        );
        Ok(catalog)
    }

    /// Parses, normalizes and validates a catalog document.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let mut catalog: Catalog = serde_json::from_str(raw)?;
        catalog.normalize_keywords();
        validate_catalog(&catalog)?;
        Ok(catalog)
    }

    /// Keywords are matched against a lower-cased corpus, so they are stored
    /// lower-cased too.
    fn normalize_keywords(&mut self) {
        fn lower<T>(set: &mut RuleSet<T>) {
            for rule in &mut set.rules {
                for keyword in &mut rule.keywords {
                    *keyword = keyword.trim().to_lowercase();
                }
            }
        }

        lower(&mut self.drivers);
        lower(&mut self.strengths);
        lower(&mut self.careers.set);
        lower(&mut self.profiles);
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, index: usize) -> Option<&str> {
        self.questions.get(index).map(String::as_str)
    }

    /// Script for a 1-based phase number.
    pub fn phase(&self, phase: u8) -> Option<&PhaseScript> {
        usize::from(phase)
            .checked_sub(1)
            .and_then(|idx| self.phases.get(idx))
    }

    /// Intro line for a phase, empty when the phase has none.
    pub fn phase_intro(&self, phase: u8) -> &str {
        self.phase(phase)
            .and_then(|p| p.intro.as_deref())
            .unwrap_or_default()
    }

    /// Greeting followed by the first question in bold.
    pub fn opening_message(&self) -> String {
        match self.question(0) {
            Some(first) => format!("{} **{}**", self.opening, first),
            None => self.opening.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
