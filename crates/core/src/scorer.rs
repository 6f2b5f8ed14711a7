use crate::transcript::Transcript;
use serde::{Deserialize, Serialize};

/// One rubric topic and the trigger keywords that count as covering it.
struct RubricTopic {
    name: &'static str,
    keywords: &'static [&'static str],
}

/// The coverage rubric: five history-taking topics a complete urological
/// anamnesis should touch. A topic is hit when any trigger keyword appears
/// as a substring of the student's concatenated, lower-cased questions.
const RUBRIC: &[RubricTopic] = &[
    RubricTopic {
        name: "pain",
        keywords: &["pain", "burn", "hurt", "sting"],
    },
    RubricTopic {
        name: "duration",
        keywords: &["how long", "since when", "days", "started", "begin"],
    },
    RubricTopic {
        name: "urine-characteristics",
        keywords: &["urine", "color", "odor", "smell", "blood", "hematuria"],
    },
    RubricTopic {
        name: "fever",
        keywords: &["fever", "chill"],
    },
    RubricTopic {
        name: "associated-symptoms",
        keywords: &["nausea", "vomit", "appetite"],
    },
];

/// Heuristic coverage assessment of one transcript.
///
/// Derived on demand and never stored; a fresh report replaces the previous
/// one at each evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: f64,
    pub topics_hit: usize,
    pub topics_total: usize,
}

/// Scores how much of the rubric the student's questions covered.
///
/// This is a coverage proxy, not semantic understanding: substring matching
/// admits false positives, and several distinct questions on the same topic
/// still count once.
pub fn score(transcript: &Transcript) -> ScoreReport {
    let student_text = transcript.student_text().to_lowercase();
    let mut topics_hit = 0;
    for topic in RUBRIC {
        let hit = topic
            .keywords
            .iter()
            .any(|keyword| student_text.contains(keyword));
        tracing::trace!(topic = topic.name, hit, "rubric check");
        if hit {
            topics_hit += 1;
        }
    }
    let topics_total = RUBRIC.len();
    let raw = (topics_hit as f64 / topics_total as f64) * 10.0;
    ScoreReport {
        score: (raw.min(10.0) * 10.0).round() / 10.0,
        topics_hit,
        topics_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Turn;

    fn transcript_of(student_questions: &[&str]) -> Transcript {
        let mut transcript = Transcript::new();
        for question in student_questions {
            transcript.push(Turn::student(*question));
            transcript.push(Turn::patient("I don't know, doctor."));
        }
        transcript
    }

    #[test]
    fn test_single_duration_question_scores_two() {
        let transcript = transcript_of(&["How long have you had this?"]);
        let report = score(&transcript);

        assert_eq!(report.topics_hit, 1);
        assert_eq!(report.topics_total, 5);
        assert_eq!(report.score, 2.0);
    }

    #[test]
    fn test_three_topics_score_six() {
        let transcript = transcript_of(&[
            "Do you feel pain?",
            "Any fever?",
            "Is there blood in urine?",
        ]);
        let report = score(&transcript);

        assert_eq!(report.topics_hit, 3);
        assert_eq!(report.score, 6.0);
    }

    #[test]
    fn test_empty_transcript_scores_zero() {
        let report = score(&Transcript::new());
        assert_eq!(report.topics_hit, 0);
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn test_full_coverage_caps_at_ten() {
        let transcript = transcript_of(&[
            "Where is the pain?",
            "How long has it lasted?",
            "What color is the urine?",
            "Did you have fever or chills?",
            "Any nausea or vomiting?",
        ]);
        let report = score(&transcript);

        assert_eq!(report.topics_hit, 5);
        assert_eq!(report.score, 10.0);
    }

    #[test]
    fn test_patient_turns_do_not_count() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::student("Hello."));
        transcript.push(Turn::patient("I have pain, fever and blood in my urine."));
        let report = score(&transcript);

        assert_eq!(report.topics_hit, 0);
    }

    #[test]
    fn test_repeated_topic_counts_once() {
        let one = score(&transcript_of(&["Any pain?"]));
        let many = score(&transcript_of(&["Any pain?", "Does it hurt?", "A burning pain?"]));

        assert_eq!(one.topics_hit, 1);
        assert_eq!(many.topics_hit, 1);
        assert_eq!(one.score, many.score);
    }

    #[test]
    fn test_score_is_monotone_in_hits() {
        let two = score(&transcript_of(&["Any pain?", "Any fever?"]));
        let three = score(&transcript_of(&["Any pain?", "Any fever?", "Any nausea?"]));

        assert_eq!(two.topics_hit, 2);
        assert_eq!(three.topics_hit, 3);
        assert!(three.score >= two.score);
    }

    #[test]
    fn test_report_is_pure() {
        let transcript = transcript_of(&["Any fever?"]);
        assert_eq!(score(&transcript), score(&transcript));
    }
}
