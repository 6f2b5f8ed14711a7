//! The session state machine: Start → Interview → Evaluation, cyclic via
//! restart and repeat.

use crate::case::CaseId;
use crate::engine::{DialogueEngine, SubmitOutcome};
use crate::scorer::{self, ScoreReport};
use crate::transcript::{Transcript, Turn};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Where the student currently is in the interview flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    Interview,
    Evaluation,
}

/// All state owned by one interview-and-evaluation interaction.
///
/// Lives for the duration of one process session and is reset on explicit
/// restart; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    stage: Stage,
    student_name: Option<String>,
    case: CaseId,
    transcript: Transcript,
}

impl Session {
    pub fn new() -> Self {
        Self {
            stage: Stage::Start,
            student_name: None,
            case: CaseId::default(),
            transcript: Transcript::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn case(&self) -> CaseId {
        self.case
    }

    pub fn student_name(&self) -> Option<&str> {
        self.student_name.as_deref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Mediates every stage transition and dialogue turn for one session.
///
/// The session value is mutated only behind `&mut self`, with the stage
/// written last, so a reader never observes a partially updated session.
/// Any transition not listed on a method is rejected as a no-op and logged.
pub struct SessionController {
    session: Session,
    engine: DialogueEngine,
}

impl SessionController {
    pub fn new(engine: DialogueEngine) -> Self {
        Self {
            session: Session::new(),
            engine,
        }
    }

    pub fn stage(&self) -> Stage {
        self.session.stage()
    }

    pub fn selected_case(&self) -> CaseId {
        self.session.case()
    }

    pub fn student_name(&self) -> Option<&str> {
        self.session.student_name()
    }

    /// Read-only ordered view of the transcript.
    pub fn transcript(&self) -> &[Turn] {
        self.session.transcript().turns()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start → Interview: records the case selection and an optional
    /// student name, starting from an empty transcript.
    pub fn begin_interview(&mut self, case: CaseId, student_name: Option<String>) -> bool {
        if self.session.stage != Stage::Start {
            warn!(stage = ?self.session.stage, "begin_interview rejected");
            return false;
        }
        self.session.case = case;
        self.session.student_name = student_name.filter(|name| !name.trim().is_empty());
        self.session.transcript.clear();
        self.session.stage = Stage::Interview;
        true
    }

    /// One dialogue turn; only valid during the interview. Outside it the
    /// submission is ignored, like blank input.
    pub async fn submit_question(&mut self, question: &str) -> SubmitOutcome {
        if self.session.stage != Stage::Interview {
            warn!(stage = ?self.session.stage, "submit_question rejected outside interview");
            return SubmitOutcome::Ignored;
        }
        self.engine.submit_question(&mut self.session, question).await
    }

    /// Interview → Evaluation. The transcript is left untouched.
    pub fn finish_interview(&mut self) -> bool {
        if self.session.stage != Stage::Interview {
            warn!(stage = ?self.session.stage, "finish_interview rejected");
            return false;
        }
        self.session.stage = Stage::Evaluation;
        true
    }

    /// Back to Start from any stage, clearing the transcript. The case
    /// selection is retained until the next `begin_interview` overwrites it.
    pub fn restart(&mut self) -> bool {
        self.session.transcript.clear();
        self.session.stage = Stage::Start;
        true
    }

    /// Evaluation → Interview with the same case and a fresh transcript.
    pub fn repeat_case(&mut self) -> bool {
        if self.session.stage != Stage::Evaluation {
            warn!(stage = ?self.session.stage, "repeat_case rejected");
            return false;
        }
        self.session.transcript.clear();
        self.session.stage = Stage::Interview;
        true
    }

    /// Coverage report for the current transcript, recomputed on every call.
    pub fn compute_score_report(&self) -> ScoreReport {
        scorer::score(&self.session.transcript)
    }
}
