//! Skill extraction — matches a skill vocabulary against résumé text.
//!
//! Default: `SubstringMatcher` (case-insensitive substring containment).
//! Substring matching over-matches: a vocabulary entry embedded inside an unrelated
//! word is reported (`Java` inside `JavaScript`). This is an accepted precision
//! trade-off; a tokenizing matcher can replace it behind the `SkillMatcher` trait.
//!
//! `AppState` holds an `Arc<dyn SkillMatcher>` and an `Arc<SkillVocabulary>`.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Canonical skill names found in a document. Ordered, so output is deterministic.
pub type SkillSet = BTreeSet<String>;

/// Built-in vocabulary used when no `SKILL_VOCABULARY_PATH` is configured.
const DEFAULT_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "C++",
    "Machine Learning",
    "Deep Learning",
    "Data Science",
    "SQL",
    "React",
    "Node.js",
    "Django",
    "Flask",
    "TensorFlow",
    "Keras",
    "NLP",
    "Pandas",
    "NumPy",
    "Git",
    "AWS",
    "JavaScript",
    "TypeScript",
    "HTML",
    "CSS",
    "MongoDB",
    "NextJs",
    "PostgreSQL",
    "Prisma",
    "CI/CD",
    "VS Code",
    "Google Cloud Platform",
    "Cloudflare",
    "Turbo Repo",
    "Docker",
    "Next Auth",
    "JWT",
    "Recoil",
    "Aceternity UI",
    "Mongoose",
    "TailwindCSS",
    "Excel",
];

/// One vocabulary entry: the name reported to callers and the case-folded key searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    pub canonical: String,
    pub key: String,
}

/// Immutable mapping of canonical skill name → lookup key.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    entries: Vec<SkillEntry>,
}

/// On-disk vocabulary: either a list of names or an explicit `{canonical: key}` map.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VocabularyFile {
    Names(Vec<String>),
    Keyed(BTreeMap<String, String>),
}

impl SkillVocabulary {
    /// Builds a vocabulary where each name is its own lookup key.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_pairs(names.into_iter().map(|name| {
            let name = name.into();
            (name.clone(), name)
        }))
    }

    /// Builds a vocabulary from `(canonical, key)` pairs. Keys are case-folded; a repeated
    /// key keeps its first canonical name. Blank keys are dropped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut seen = HashSet::new();
        let entries = pairs
            .into_iter()
            .filter_map(|(canonical, key)| {
                let key = key.trim().to_lowercase();
                if key.is_empty() || !seen.insert(key.clone()) {
                    return None;
                }
                Some(SkillEntry {
                    canonical: canonical.trim().to_string(),
                    key,
                })
            })
            .collect();
        Self { entries }
    }

    /// The built-in vocabulary.
    pub fn builtin() -> Self {
        Self::from_names(DEFAULT_SKILLS.iter().copied())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: VocabularyFile =
            serde_json::from_str(json).context("Skill vocabulary must be a JSON array or object")?;
        Ok(match file {
            VocabularyFile::Names(names) => Self::from_names(names),
            VocabularyFile::Keyed(map) => Self::from_pairs(map),
        })
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read skill vocabulary '{}'", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Invalid skill vocabulary '{}'", path.display()))
    }

    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Matches a vocabulary against text. Implement this to swap matching strategies
/// without touching the upload handler.
pub trait SkillMatcher: Send + Sync {
    fn matches(&self, text: &str, vocabulary: &SkillVocabulary) -> SkillSet;
}

/// Case-insensitive substring containment. No tokenization or word boundaries.
pub struct SubstringMatcher;

impl SkillMatcher for SubstringMatcher {
    fn matches(&self, text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
        if text.is_empty() {
            return SkillSet::new();
        }
        let haystack = text.to_lowercase();
        vocabulary
            .entries()
            .iter()
            .filter(|entry| haystack.contains(entry.key.as_str()))
            .map(|entry| entry.canonical.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
        SubstringMatcher.matches(text, vocabulary)
    }

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resume_line_scenario() {
        let text = "Contact me at jane.doe@example.com or 987-654-3210. Skills: Python, React, Excel.";
        let skills = extract_skills(text, &SkillVocabulary::builtin());
        assert!(skills.is_superset(&set(&["Python", "React", "Excel"])));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let vocab = SkillVocabulary::from_names(["PostgreSQL", "Docker"]);
        let skills = extract_skills("worked with POSTGRESQL and docker compose", &vocab);
        assert_eq!(skills, set(&["Docker", "PostgreSQL"]));
    }

    #[test]
    fn test_empty_text_or_no_match_is_empty() {
        let vocab = SkillVocabulary::builtin();
        assert!(extract_skills("", &vocab).is_empty());
        assert!(extract_skills("Gardening, woodwork, sailing", &vocab).is_empty());
    }

    #[test]
    fn test_substring_false_positive_is_accepted() {
        // "Java" is reported even though only "JavaScript" appears.
        let vocab = SkillVocabulary::from_names(["Java", "JavaScript"]);
        let skills = extract_skills("Frontend work in JavaScript", &vocab);
        assert_eq!(skills, set(&["Java", "JavaScript"]));

        // "Git" is found inside "digital".
        let vocab = SkillVocabulary::from_names(["Git"]);
        assert_eq!(extract_skills("digital marketing", &vocab), set(&["Git"]));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let vocab = SkillVocabulary::builtin();
        let text = "Built REST APIs in Node.js and Flask; deployed on AWS with Docker and CI/CD.";
        assert_eq!(extract_skills(text, &vocab), extract_skills(text, &vocab));
    }

    #[test]
    fn test_extraction_is_monotonic_in_vocabulary() {
        let text = "Data Science with Pandas, NumPy and TensorFlow; some SQL.";
        let small = SkillVocabulary::from_names(["Pandas", "SQL"]);
        let large = SkillVocabulary::from_names(["Pandas", "SQL", "NumPy", "Keras", "TensorFlow"]);
        let from_small = extract_skills(text, &small);
        let from_large = extract_skills(text, &large);
        assert!(from_large.is_superset(&from_small));
        assert_eq!(from_large, set(&["NumPy", "Pandas", "SQL", "TensorFlow"]));
    }

    #[test]
    fn test_every_result_is_in_vocabulary() {
        let vocab = SkillVocabulary::builtin();
        let skills = extract_skills("python react html css git aws jwt", &vocab);
        let canon: HashSet<_> = vocab.entries().iter().map(|e| e.canonical.as_str()).collect();
        assert!(!skills.is_empty());
        assert!(skills.iter().all(|s| canon.contains(s.as_str())));
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let vocab = SkillVocabulary::from_names(["React", "react", " REACT "]);
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.entries()[0].canonical, "React");
    }

    #[test]
    fn test_keyed_vocabulary_reports_canonical_name() {
        let vocab =
            SkillVocabulary::from_json_str(r#"{"Kubernetes": "k8s", "Go": "golang"}"#).unwrap();
        let skills = extract_skills("Operated K8S clusters; services in Golang", &vocab);
        assert_eq!(skills, set(&["Go", "Kubernetes"]));
    }

    #[test]
    fn test_load_vocabulary_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["Rust", "Tokio", "Axum"]"#).unwrap();

        let vocab = SkillVocabulary::from_json_file(file.path()).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(
            extract_skills("async Rust services on tokio + axum", &vocab),
            set(&["Axum", "Rust", "Tokio"])
        );
    }

    #[test]
    fn test_invalid_vocabulary_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "skills: [rust]").unwrap();
        assert!(SkillVocabulary::from_json_file(file.path()).is_err());

        let missing = Path::new("/nonexistent/skills.json");
        assert!(SkillVocabulary::from_json_file(missing).is_err());
    }

    #[test]
    fn test_builtin_vocabulary_is_nonempty() {
        assert!(!SkillVocabulary::builtin().is_empty());
    }
}
