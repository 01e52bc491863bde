// Résumé analysis: document → text → {contact details, skills}.
// Extraction failures are hard errors; missing email/phone/skills are not.

pub mod contact;
pub mod document;
pub mod handlers;
pub mod skills;

use serde::Serialize;

use crate::resume::contact::{ContactExtractor, ContactRecord};
use crate::resume::skills::{SkillMatcher, SkillSet, SkillVocabulary};

/// Everything read out of one résumé's text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeProfile {
    pub contact: ContactRecord,
    pub skills: SkillSet,
}

/// Runs contact and skill extraction over already-extracted résumé text.
pub fn analyze_text(
    text: &str,
    contacts: &ContactExtractor,
    matcher: &dyn SkillMatcher,
    vocabulary: &SkillVocabulary,
) -> ResumeProfile {
    ResumeProfile {
        contact: contacts.extract(text),
        skills: matcher.matches(text, vocabulary),
    }
}
