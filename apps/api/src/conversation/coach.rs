//! Coach — the one in-memory conversation behind the HTTP API.
//!
//! Owns the session, the transcript, the randomness source and the reply scheduler,
//! all behind one async mutex. A submission advances the session immediately and
//! hands the resulting reply script to the scheduler, which reveals it message by
//! message with typing delays. While a script is playing the coach is busy and new
//! input is refused.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::rngs::StdRng;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::conversation::pacing::Pacing;
use crate::conversation::progress::Progress;
use crate::conversation::scheduler::ReplyScheduler;
use crate::conversation::session::{Reply, Session, Stage, Step};
use crate::errors::AppError;
use crate::models::conversation::{Message, Response};

/// Why a submission was dropped without touching the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Empty or whitespace-only text.
    Empty,
    /// The conversation is over; only a restart continues it.
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Accepted { phase: u8, question_index: usize },
    Ignored(IgnoreReason),
}

/// Everything a client needs to draw the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationView {
    pub stage: Stage,
    pub phase: u8,
    pub question_index: usize,
    pub busy: bool,
    pub typing: bool,
    pub progress: Progress,
    pub responses: Vec<Response>,
    pub messages: Vec<Message>,
}

struct CoachState {
    session: Session,
    transcript: Vec<Message>,
    rng: StdRng,
    scheduler: ReplyScheduler,
    typing: bool,
}

#[derive(Clone)]
pub struct Coach {
    inner: Arc<Mutex<CoachState>>,
    catalog: Arc<Catalog>,
    pacing: Pacing,
}

impl Coach {
    pub fn new(catalog: Arc<Catalog>, pacing: Pacing, rng: StdRng) -> Self {
        let state = CoachState {
            session: Session::new(catalog.question_count()),
            transcript: vec![opening(&catalog)],
            rng,
            scheduler: ReplyScheduler::new(),
            typing: false,
        };

        Self {
            inner: Arc::new(Mutex::new(state)),
            catalog,
            pacing,
        }
    }

    pub async fn snapshot(&self) -> ConversationView {
        let state = self.inner.lock().await;
        let phase = state.session.current_phase();

        ConversationView {
            stage: state.session.stage(),
            phase,
            question_index: state.session.current_question_index(),
            busy: state.scheduler.is_pending(),
            typing: state.typing,
            progress: Progress::for_phase(phase, &self.catalog),
            responses: state.session.responses().to_vec(),
            messages: state.transcript.clone(),
        }
    }

    /// Input boundary. Trims `text`; empty input is a silent no-op.
    ///
    /// Returns `AppError::Conflict` while the previous reply is still playing.
    pub async fn submit(&self, text: &str) -> Result<Submission, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Submission::Ignored(IgnoreReason::Empty));
        }

        let mut guard = self.inner.lock().await;
        let state = &mut *guard;

        if state.scheduler.is_pending() {
            return Err(AppError::Conflict(
                "The coach is still replying to the previous message".to_string(),
            ));
        }
        if state.session.is_complete() {
            debug!("Submission after completion ignored");
            return Ok(Submission::Ignored(IgnoreReason::Complete));
        }

        state.transcript.push(Message::user(text));
        let steps = state
            .session
            .record_response(text, &self.catalog, &mut state.rng);

        let phase = state.session.current_phase();
        let question_index = state.session.current_question_index();
        info!(
            phase,
            question_index,
            responses = state.session.responses().len(),
            "Response recorded"
        );

        let epoch = state.scheduler.epoch();
        let coach = self.clone();
        state.scheduler.schedule(coach.play(epoch, steps));

        Ok(Submission::Accepted {
            phase,
            question_index,
        })
    }

    /// Restart boundary. Without confirmation nothing happens. With it, pending
    /// output is cancelled, the session is cleared and the transcript goes back to
    /// the opening message.
    pub async fn restart(&self, confirm: bool) -> bool {
        if !confirm {
            debug!("Restart not confirmed");
            return false;
        }

        let mut state = self.inner.lock().await;
        let cancelled = state.scheduler.cancel();
        state.session.restart();
        state.typing = false;
        state.transcript = vec![opening(&self.catalog)];

        info!(cancelled, "Conversation restarted");
        true
    }

    /// Plays a reply script. Stops silently once the scheduler epoch moves on.
    async fn play(self, epoch: u64, steps: Vec<Step>) {
        let mut queue: VecDeque<Step> = steps.into();
        sleep(self.pacing.processing).await;

        while let Some(step) = queue.pop_front() {
            match step {
                Step::Pause(pause) => sleep(self.pacing.pause(pause)).await,
                Step::Say(reply) => {
                    let delay = {
                        let mut state = self.inner.lock().await;
                        if state.scheduler.epoch() != epoch {
                            return;
                        }
                        state.typing = true;
                        self.pacing.typing_delay(&mut state.rng)
                    };
                    sleep(delay).await;

                    let mut state = self.inner.lock().await;
                    if state.scheduler.epoch() != epoch {
                        return;
                    }
                    state.typing = false;
                    state.transcript.push(Message::coach(reply));
                }
                Step::Finish => {
                    let mut state = self.inner.lock().await;
                    if state.scheduler.epoch() != epoch {
                        return;
                    }
                    let more = state.session.finish(&self.catalog);
                    info!(stage = %state.session.stage(), "Conversation finished");
                    for step in more.into_iter().rev() {
                        queue.push_front(step);
                    }
                }
            }
        }
    }
}

fn opening(catalog: &Catalog) -> Message {
    Message::coach(Reply::Text(catalog.opening_message()))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
