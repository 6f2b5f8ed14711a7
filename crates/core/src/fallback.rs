use crate::case::CaseId;

/// One fallback rule: if any keyword occurs in the lower-cased question,
/// the canned reply is returned.
#[derive(Debug, Clone, Copy)]
pub struct FallbackRule {
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

/// Reply used when no rule matches the question.
pub const DEFAULT_REPLY: &str = "I don't know, doctor.";

/// Shared rule table, evaluated top to bottom: pain, duration, urine
/// appearance, fever, blood. Rule order is the tie-break when keywords from
/// several rules co-occur in one question.
///
/// There is deliberately no nausea rule here even though the scoring rubric
/// has an associated-symptoms topic; questions outside the table get the
/// default reply.
const BASE_RULES: &[FallbackRule] = &[
    FallbackRule {
        keywords: &["pain", "burn", "hurt", "sting"],
        reply: "It feels like a burning at the end of urination.",
    },
    FallbackRule {
        keywords: &["how long", "since when", "days", "started", "begin"],
        reply: "It started about three days ago.",
    },
    FallbackRule {
        keywords: &["urine", "color", "colour", "odor", "smell"],
        reply: "My urine has been darker than usual, with a strong smell.",
    },
    FallbackRule {
        keywords: &["fever", "chill", "temperature"],
        reply: "I had a low fever yesterday.",
    },
    FallbackRule {
        keywords: &["blood", "bleed"],
        reply: "I noticed a little blood once, I think.",
    },
];

const RENAL_COLIC_RULES: &[FallbackRule] = &[FallbackRule {
    keywords: &["pain", "hurt", "ache"],
    reply: "It's a sharp cramp in my lower back that comes and goes in waves.",
}];

const HEMATURIA_RULES: &[FallbackRule] = &[FallbackRule {
    keywords: &["blood", "bleed", "urine", "color", "colour"],
    reply: "The urine looks reddish, like there is blood mixed in.",
}];

const VOIDING_DYSFUNCTION_RULES: &[FallbackRule] = &[FallbackRule {
    keywords: &["stream", "flow", "strain", "weak"],
    reply: "The stream is weak and I have to push to get it going.",
}];

/// Deterministic responder used when no backend credential is configured or
/// when a backend call fails.
///
/// Case-specific rules are consulted before the shared table; the first
/// matching rule wins.
#[derive(Debug, Clone)]
pub struct FallbackResponder {
    rules: Vec<FallbackRule>,
}

impl FallbackResponder {
    pub fn for_case(case: CaseId) -> Self {
        let case_rules: &[FallbackRule] = match case {
            CaseId::Uti => &[],
            CaseId::RenalColic => RENAL_COLIC_RULES,
            CaseId::Hematuria => HEMATURIA_RULES,
            CaseId::VoidingDysfunction => VOIDING_DYSFUNCTION_RULES,
        };
        Self {
            rules: case_rules.iter().chain(BASE_RULES).copied().collect(),
        }
    }

    /// Canned reply for the student's latest question. Pure and
    /// deterministic.
    pub fn reply(&self, last_question: &str) -> &'static str {
        let question = last_question.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| question.contains(keyword)))
            .map(|rule| rule.reply)
            .unwrap_or(DEFAULT_REPLY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_question_matches_in_every_case() {
        for case in CaseId::ALL {
            let responder = FallbackResponder::for_case(case);
            assert_eq!(
                responder.reply("How long have you had this?"),
                "It started about three days ago.",
                "case {:?}",
                case
            );
        }
    }

    #[test]
    fn test_unmatched_question_gets_default_reply() {
        let responder = FallbackResponder::for_case(CaseId::Uti);
        assert_eq!(responder.reply("Do you have nausea?"), DEFAULT_REPLY);
    }

    #[test]
    fn test_rule_priority_when_keywords_co_occur() {
        let responder = FallbackResponder::for_case(CaseId::Uti);
        // Pain outranks urine appearance in the base table.
        assert_eq!(
            responder.reply("Does the urine burn?"),
            "It feels like a burning at the end of urination."
        );
        // Urine appearance outranks fever.
        assert_eq!(
            responder.reply("Any fever, and what does the urine look like?"),
            "My urine has been darker than usual, with a strong smell."
        );
    }

    #[test]
    fn test_case_specific_rules_take_precedence() {
        let uti = FallbackResponder::for_case(CaseId::Uti);
        let colic = FallbackResponder::for_case(CaseId::RenalColic);

        assert_eq!(
            uti.reply("Where is the pain?"),
            "It feels like a burning at the end of urination."
        );
        assert_eq!(
            colic.reply("Where is the pain?"),
            "It's a sharp cramp in my lower back that comes and goes in waves."
        );
    }

    #[test]
    fn test_hematuria_blood_reply() {
        let responder = FallbackResponder::for_case(CaseId::Hematuria);
        assert_eq!(
            responder.reply("Have you seen blood?"),
            "The urine looks reddish, like there is blood mixed in."
        );
    }

    #[test]
    fn test_voiding_dysfunction_stream_reply() {
        let responder = FallbackResponder::for_case(CaseId::VoidingDysfunction);
        assert_eq!(
            responder.reply("Is the stream weak?"),
            "The stream is weak and I have to push to get it going."
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let responder = FallbackResponder::for_case(CaseId::Uti);
        assert_eq!(responder.reply("ANY FEVER?"), "I had a low fever yesterday.");
    }
}
