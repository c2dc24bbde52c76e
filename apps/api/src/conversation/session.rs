//! Session state machine for the four-phase questionnaire.
//!
//! ```text
//! Phase1Question(0) → … → Phase1Question(N-1) → Phase2 → Phase3 → Phase4 → Complete
//! ```
//!
//! Every transition returns a reply script (`Vec<Step>`) describing what the coach
//! says and where it pauses. Playing the script with real delays is the coach's job;
//! nothing here sleeps or spawns.

use std::fmt;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::conversation::render;
use crate::conversation::selector::{analyze, recommend, summarize, Corpus};
use crate::models::conversation::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "question_index", rename_all = "snake_case")]
pub enum Stage {
    Phase1Question(usize),
    Phase2,
    Phase3,
    Phase4,
    Complete,
}

impl Stage {
    /// Phase number 1–4. `Complete` stays on phase 4.
    pub fn phase(&self) -> u8 {
        match self {
            Stage::Phase1Question(_) => 1,
            Stage::Phase2 => 2,
            Stage::Phase3 => 3,
            Stage::Phase4 | Stage::Complete => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Phase1Question(i) => write!(f, "phase1_question({i})"),
            Stage::Phase2 => f.write_str("phase2"),
            Stage::Phase3 => f.write_str("phase3"),
            Stage::Phase4 => f.write_str("phase4"),
            Stage::Complete => f.write_str("complete"),
        }
    }
}

/// Something the coach says.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain multi-line text with `**bold**` markers.
    Text(String),
    /// Pre-rendered HTML shown as-is.
    Special(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    PhaseChange,
    AnalysisFollowUp,
    RecommendationsFollowUp,
    ActionPlanHold,
    Closing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Pause(Pause),
    Say(Reply),
    /// Apply `Session::finish` and continue with the script it returns.
    Finish,
}

#[derive(Debug, Clone)]
pub struct Session {
    stage: Stage,
    responses: Vec<Response>,
    question_count: usize,
}

impl Session {
    pub fn new(question_count: usize) -> Self {
        Self {
            stage: Stage::Phase1Question(0),
            responses: Vec::new(),
            question_count,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn current_phase(&self) -> u8 {
        self.stage.phase()
    }

    /// Index of the phase-1 question being answered. Equals the question count once
    /// phase 1 is over.
    pub fn current_question_index(&self) -> usize {
        match self.stage {
            Stage::Phase1Question(i) => i,
            _ => self.question_count,
        }
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    pub fn corpus(&self) -> Corpus {
        Corpus::from_responses(&self.responses)
    }

    /// Records an answer and advances the state machine.
    ///
    /// The caller trims input and drops empty text beforehand. In `Complete` the
    /// answer is not recorded and the script is empty.
    pub fn record_response<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Vec<Step> {
        if self.is_complete() {
            debug!("Response ignored, conversation already complete");
            return Vec::new();
        }

        self.responses.push(Response {
            phase: self.current_phase(),
            question_index: self.current_question_index(),
            text: text.to_string(),
            timestamp: Utc::now(),
        });

        let from = self.stage;
        let steps = match self.stage {
            Stage::Phase1Question(i) if i + 1 < self.question_count => {
                self.stage = Stage::Phase1Question(i + 1);
                let question = catalog.question(i + 1).unwrap_or_default();
                let prompt = match catalog.active_listening.choose(rng) {
                    Some(phrase) => format!("{phrase} {question}"),
                    None => question.to_string(),
                };
                vec![Step::Say(Reply::Text(prompt))]
            }
            Stage::Phase1Question(_) => {
                self.stage = Stage::Phase2;
                let analysis = analyze(catalog, &self.corpus());
                vec![
                    Step::Pause(Pause::PhaseChange),
                    Step::Say(Reply::Special(render::with_intro(
                        catalog.phase_intro(2),
                        &render::analysis_html(&catalog.analysis, &analysis),
                    ))),
                    Step::Pause(Pause::AnalysisFollowUp),
                    Step::Say(Reply::Text(catalog.follow_ups.analysis.clone())),
                ]
            }
            Stage::Phase2 => {
                self.stage = Stage::Phase3;
                let recommendations = recommend(catalog, &self.corpus());
                vec![
                    Step::Pause(Pause::PhaseChange),
                    Step::Say(Reply::Special(render::with_intro(
                        catalog.phase_intro(3),
                        &render::recommendations_html(&recommendations),
                    ))),
                    Step::Pause(Pause::RecommendationsFollowUp),
                    Step::Say(Reply::Text(catalog.follow_ups.recommendations.clone())),
                ]
            }
            Stage::Phase3 => {
                self.stage = Stage::Phase4;
                vec![
                    Step::Pause(Pause::PhaseChange),
                    Step::Say(Reply::Special(render::with_intro(
                        catalog.phase_intro(4),
                        &render::action_plan_html(&catalog.action_plan),
                    ))),
                    Step::Pause(Pause::ActionPlanHold),
                    Step::Finish,
                ]
            }
            Stage::Phase4 => {
                self.stage = Stage::Complete;
                let mut steps = vec![Step::Pause(Pause::PhaseChange)];
                steps.extend(self.completion_steps(catalog));
                steps
            }
            Stage::Complete => Vec::new(),
        };

        debug!(
            from = %from,
            to = %self.stage,
            responses = self.responses.len(),
            "Session advanced"
        );
        steps
    }

    /// Completes the conversation from phase 4 without a new answer. No-op elsewhere.
    pub fn finish(&mut self, catalog: &Catalog) -> Vec<Step> {
        if self.stage != Stage::Phase4 {
            return Vec::new();
        }
        self.stage = Stage::Complete;
        debug!(responses = self.responses.len(), "Session completed");
        self.completion_steps(catalog)
    }

    /// Back to the first question with no responses. Cannot be undone.
    pub fn restart(&mut self) {
        self.stage = Stage::Phase1Question(0);
        self.responses.clear();
    }

    fn completion_steps(&self, catalog: &Catalog) -> Vec<Step> {
        let summary = summarize(catalog, &self.corpus());
        vec![
            Step::Say(Reply::Special(render::summary_html(
                &catalog.summary,
                &summary,
            ))),
            Step::Pause(Pause::Closing),
            Step::Say(Reply::Text(catalog.follow_ups.closing.clone())),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
