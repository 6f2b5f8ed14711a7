use serde::{Deserialize, Serialize};

/// One entry in the fixed catalog of interview cases.
///
/// Only the chief complaint is visible to the student at selection time;
/// everything else about the case has to be drawn out through questioning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseId {
    #[default]
    Uti,
    RenalColic,
    Hematuria,
    VoidingDysfunction,
}

impl CaseId {
    /// Every case, in catalog order.
    pub const ALL: [CaseId; 4] = [
        CaseId::Uti,
        CaseId::RenalColic,
        CaseId::Hematuria,
        CaseId::VoidingDysfunction,
    ];

    /// The complaint shown to the student when the case is selected.
    pub fn chief_complaint(&self) -> &'static str {
        match self {
            CaseId::Uti => "burning when urinating",
            CaseId::RenalColic => "intense lower back pain coming in waves",
            CaseId::Hematuria => "blood in the urine",
            CaseId::VoidingDysfunction => "weak urinary stream and straining",
        }
    }

    /// Display label for the case-selection screen.
    pub fn label(&self) -> &'static str {
        match self {
            CaseId::Uti => "UTI: burning when urinating",
            CaseId::RenalColic => "Renal colic: intense lower back pain coming in waves",
            CaseId::Hematuria => "Hematuria: blood in the urine",
            CaseId::VoidingDysfunction => "Voiding dysfunction: weak stream and straining",
        }
    }
}
