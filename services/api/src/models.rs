//! API Models
//!
//! Request and response shapes for the HTTP surface, kept separate from the
//! core types so the wire format can evolve independently. Doubles as the
//! source for the OpenAPI schema via `utoipa`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vosce_core::case::CaseId;
use vosce_core::scorer::ScoreReport;
use vosce_core::session::{SessionController, Stage};
use vosce_core::transcript::{Speaker, Turn};

/// Starts an interview for one of the catalog cases.
#[derive(Deserialize, ToSchema)]
pub struct StartInterviewPayload {
    #[schema(value_type = String, example = "uti")]
    pub case: CaseId,
    #[schema(example = "Ana Souza")]
    pub student_name: Option<String>,
}

/// One question typed by the student.
#[derive(Deserialize, ToSchema)]
pub struct QuestionPayload {
    #[schema(example = "How long have you had this?")]
    pub text: String,
}

#[derive(Serialize, ToSchema)]
pub struct TurnView {
    #[schema(example = "student")]
    pub speaker: String,
    pub text: String,
}

impl From<&Turn> for TurnView {
    fn from(turn: &Turn) -> Self {
        Self {
            speaker: turn.speaker.to_string(),
            text: turn.text.clone(),
        }
    }
}

/// Snapshot of the session as the presentation layer renders it.
#[derive(Serialize, ToSchema)]
pub struct SessionView {
    #[schema(value_type = String, example = "interview")]
    pub stage: Stage,
    #[schema(value_type = String, example = "uti")]
    pub case: CaseId,
    #[schema(example = "burning when urinating")]
    pub chief_complaint: String,
    pub student_name: Option<String>,
    pub transcript: Vec<TurnView>,
}

impl SessionView {
    pub fn from_controller(controller: &SessionController) -> Self {
        Self {
            stage: controller.stage(),
            case: controller.selected_case(),
            chief_complaint: controller.selected_case().chief_complaint().to_string(),
            student_name: controller.student_name().map(str::to_string),
            transcript: controller.transcript().iter().map(TurnView::from).collect(),
        }
    }
}

/// The evaluation screen: heuristic score plus the raw material behind it.
#[derive(Serialize, ToSchema)]
pub struct ScoreReportView {
    #[schema(example = 6.0)]
    pub score: f64,
    pub topics_hit: usize,
    pub topics_total: usize,
    /// Everything the patient said, joined, as the case summary.
    pub patient_summary: String,
    /// The questions the student asked, in order.
    pub questions: Vec<String>,
}

impl ScoreReportView {
    pub fn new(report: ScoreReport, controller: &SessionController) -> Self {
        let questions = controller
            .transcript()
            .iter()
            .filter(|turn| turn.speaker == Speaker::Student)
            .map(|turn| turn.text.clone())
            .collect();
        Self {
            score: report.score,
            topics_hit: report.topics_hit,
            topics_total: report.topics_total,
            patient_summary: controller.session().transcript().patient_text(),
            questions,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vosce_core::backend::OpenAiResponder;
    use vosce_core::engine::DialogueEngine;

    fn fallback_controller() -> SessionController {
        let backend = Arc::new(OpenAiResponder::new(None, "gpt-3.5-turbo"));
        SessionController::new(DialogueEngine::new(backend))
    }

    #[test]
    fn test_start_payload_deserialization() {
        let json = r#"{"case": "renal_colic", "student_name": "Ana"}"#;
        let payload: StartInterviewPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.case, CaseId::RenalColic);
        assert_eq!(payload.student_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_start_payload_name_is_optional() {
        let json = r#"{"case": "uti"}"#;
        let payload: StartInterviewPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.case, CaseId::Uti);
        assert!(payload.student_name.is_none());
    }

    #[test]
    fn test_question_payload_missing_field() {
        let result: Result<QuestionPayload, _> = serde_json::from_str(r#"{}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_session_view_serialization() {
        let mut controller = fallback_controller();
        controller.begin_interview(CaseId::Hematuria, Some("Leo".to_string()));

        let view = SessionView::from_controller(&controller);
        let json = serde_json::to_string(&view).unwrap();

        assert!(json.contains("\"interview\""));
        assert!(json.contains("\"hematuria\""));
        assert!(json.contains("blood in the urine"));
        assert!(json.contains("Leo"));
    }

    #[tokio::test]
    async fn test_score_report_view_collects_summary_and_questions() {
        let mut controller = fallback_controller();
        controller.begin_interview(CaseId::Uti, None);
        controller.submit_question("How long have you had this?").await;
        controller.finish_interview();

        let view = ScoreReportView::new(controller.compute_score_report(), &controller);

        assert_eq!(view.score, 2.0);
        assert_eq!(view.topics_hit, 1);
        assert_eq!(view.topics_total, 5);
        assert_eq!(view.questions, vec!["How long have you had this?"]);
        assert_eq!(view.patient_summary, "It started about three days ago.");
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            message: "Interview has not started".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&error).unwrap(),
            r#"{"message":"Interview has not started"}"#
        );
    }
}
