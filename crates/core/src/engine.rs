//! One turn of the interview: append the student's question, ask the
//! backend for the patient's reply, append it.

use crate::backend::{BackendError, ResponderBackend};
use crate::case::CaseId;
use crate::fallback::FallbackResponder;
use crate::session::Session;
use crate::transcript::Turn;
use std::sync::Arc;
use tracing::{debug, warn};

/// How many trailing transcript turns are sent to the backend. Older turns
/// are dropped from model context only; they stay in the stored transcript
/// for display and scoring.
pub const HISTORY_WINDOW: usize = 12;

/// Outcome of a question submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A student turn and a patient turn were appended.
    Answered,
    /// Blank input, or a submission outside the interview stage; the
    /// transcript is unchanged.
    Ignored,
}

/// Orchestrates a single dialogue turn against the configured backend, with
/// the deterministic fallback as the degraded path.
pub struct DialogueEngine {
    backend: Arc<dyn ResponderBackend>,
}

impl DialogueEngine {
    pub fn new(backend: Arc<dyn ResponderBackend>) -> Self {
        Self { backend }
    }

    /// Runs one interview turn.
    ///
    /// Blank input (after trimming) is ignored rather than treated as an
    /// error. Every backend failure degrades to the fallback responder; no
    /// error text reaches the transcript and no retry is attempted — each
    /// submission is exactly one backend call.
    pub async fn submit_question(&self, session: &mut Session, question: &str) -> SubmitOutcome {
        let question = question.trim();
        if question.is_empty() {
            return SubmitOutcome::Ignored;
        }

        session.transcript_mut().push(Turn::student(question));

        let instruction = system_instruction(session.case());
        let window = session.transcript().window(HISTORY_WINDOW);
        let reply = match self.backend.generate(&instruction, window).await {
            Ok(text) => text.trim().to_string(),
            Err(BackendError::NoCredential) => {
                debug!("no backend credential; answering from the fallback table");
                FallbackResponder::for_case(session.case())
                    .reply(question)
                    .to_string()
            }
            Err(err) => {
                warn!(error = %err, "backend call failed; answering from the fallback table");
                FallbackResponder::for_case(session.case())
                    .reply(question)
                    .to_string()
            }
        };

        session.transcript_mut().push(Turn::patient(reply));
        SubmitOutcome::Answered
    }
}

/// The role-play instruction sent ahead of the conversation window.
pub fn system_instruction(case: CaseId) -> String {
    format!(
        "You are a real patient taking part in a clinical simulation for medical students. \
         Answer briefly and naturally, and stay consistent with the case. \
         Do not volunteer information that was not asked for; only answer what the student requests. \
         If you do not know, say 'I don't know' or 'I don't remember'.\n\
         Complaint visible to the student: {}",
        case.chief_complaint()
    )
}
