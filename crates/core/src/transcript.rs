use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a turn: the interviewing student or the virtual patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Student,
    Patient,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Student => write!(f, "student"),
            Speaker::Patient => write!(f, "patient"),
        }
    }
}

/// One utterance in the interview. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn student(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Student,
            text: text.into(),
        }
    }

    pub fn patient(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Patient,
            text: text.into(),
        }
    }
}

/// The chronological record of one interview.
///
/// Turns are only ever appended; insertion order is the semantic order and
/// is never reordered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The last `n` turns, oldest first. The whole transcript when shorter.
    pub fn window(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Every student utterance joined with spaces, for keyword scoring.
    pub fn student_text(&self) -> String {
        self.speaker_text(Speaker::Student)
    }

    /// Every patient utterance joined with spaces, for the evaluation summary.
    pub fn patient_text(&self) -> String {
        self.speaker_text(Speaker::Patient)
    }

    fn speaker_text(&self, speaker: Speaker) -> String {
        self.turns
            .iter()
            .filter(|turn| turn.speaker == speaker)
            .map(|turn| turn.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub(crate) fn clear(&mut self) {
        self.turns.clear();
    }
}
