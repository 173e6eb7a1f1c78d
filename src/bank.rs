use crate::engine::{DifficultyTier, QuestionProvider};
use crate::models::Question;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_BANK: &str = include_str!("../questions/default.json");
pub const BUILTIN_BANK_NAME: &str = "Built-in";

#[derive(Debug, Error)]
pub enum BankError {
    #[error("Failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid question bank: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Questions keyed by tier name, as in `{"easy": [...], "hard": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    tiers: BTreeMap<DifficultyTier, Vec<Question>>,
}

impl QuestionBank {
    pub fn parse(json: &str) -> Result<Self, BankError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, BankError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn builtin() -> Result<Self, BankError> {
        Self::parse(BUILTIN_BANK)
    }

    pub fn questions(&self, tier: DifficultyTier) -> &[Question] {
        self.tiers.get(&tier).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self, tier: DifficultyTier) -> usize {
        self.questions(tier).len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.values().all(Vec::is_empty)
    }
}

impl QuestionProvider for QuestionBank {
    fn questions_for(&self, tier: DifficultyTier) -> Vec<Question> {
        self.questions(tier).to_vec()
    }
}

/// Wraps a provider and shuffles the question order of every round.
#[derive(Debug, Clone)]
pub struct Shuffled<P>(pub P);

impl<P: QuestionProvider> QuestionProvider for Shuffled<P> {
    fn questions_for(&self, tier: DifficultyTier) -> Vec<Question> {
        shuffle_with(self.0.questions_for(tier), &mut rand::thread_rng())
    }
}

pub fn shuffle_with<R: Rng + ?Sized>(mut questions: Vec<Question>, rng: &mut R) -> Vec<Question> {
    questions.shuffle(rng);
    questions
}

/// Where a bank comes from: compiled in, or a `*.json` file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankSource {
    Builtin,
    File(PathBuf),
}

impl BankSource {
    pub fn name(&self) -> String {
        match self {
            BankSource::Builtin => BUILTIN_BANK_NAME.to_string(),
            BankSource::File(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    pub fn load(&self) -> Result<QuestionBank, BankError> {
        match self {
            BankSource::Builtin => QuestionBank::builtin(),
            BankSource::File(path) => QuestionBank::load(path),
        }
    }
}

pub fn get_bank_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

/// The built-in bank followed by every bank file found in `dir`.
pub fn discover_banks(dir: &Path) -> Vec<BankSource> {
    std::iter::once(BankSource::Builtin)
        .chain(get_bank_files(dir).into_iter().map(BankSource::File))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SMALL_BANK: &str = r#"{
        "easy": [
            {"question": "1 + 1?", "answers": ["1", "2", "3"], "correct": ["2"]},
            {"question": "Pick a vowel", "answers": ["a", "b", "e"], "correct": ["a", "e"]}
        ],
        "hardcore": []
    }"#;

    #[test]
    fn test_builtin_bank_covers_every_tier() {
        let bank = QuestionBank::builtin().unwrap();
        for tier in DifficultyTier::ALL {
            assert!(bank.len(tier) > 0, "built-in bank has no {tier} questions");
            for question in bank.questions(tier) {
                assert!(!question.correct.is_empty(), "{}", question.prompt);
                assert!(
                    question.correct.iter().all(|c| question.choices.contains(c)),
                    "{}",
                    question.prompt
                );
            }
        }
    }

    #[test]
    fn test_parse_bank() {
        let bank = QuestionBank::parse(SMALL_BANK).unwrap();
        assert_eq!(bank.len(DifficultyTier::Easy), 2);
        assert_eq!(bank.len(DifficultyTier::Hardcore), 0);
        assert_eq!(bank.len(DifficultyTier::Normal), 0);
        assert!(!bank.is_empty());

        let vowels = &bank.questions(DifficultyTier::Easy)[1];
        assert_eq!(vowels.choices, vec!["a", "b", "e"]);
        assert!(vowels.is_correct("a"));
        assert!(vowels.is_correct("e"));
    }

    #[test]
    fn test_parse_rejects_unknown_tier() {
        let err = QuestionBank::parse(r#"{"custom": []}"#).unwrap_err();
        assert!(matches!(err, BankError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = QuestionBank::parse("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("Invalid question bank"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = QuestionBank::load(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, BankError::Io(_)));
    }

    #[test]
    fn test_provider_keeps_bank_order() {
        let bank = QuestionBank::parse(SMALL_BANK).unwrap();
        let questions = bank.questions_for(DifficultyTier::Easy);
        assert_eq!(questions[0].prompt, "1 + 1?");
        assert_eq!(questions[1].prompt, "Pick a vowel");
    }

    #[test]
    fn test_shuffle_keeps_every_question() {
        let bank = QuestionBank::builtin().unwrap();
        let original = bank.questions_for(DifficultyTier::Easy);
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = shuffle_with(original.clone(), &mut rng);

        assert_eq!(shuffled.len(), original.len());
        for question in &original {
            assert!(shuffled.contains(question));
        }
    }

    #[test]
    fn test_shuffled_provider_keeps_choice_order() {
        let bank = QuestionBank::parse(SMALL_BANK).unwrap();
        let shuffled = Shuffled(bank).questions_for(DifficultyTier::Easy);
        let vowels = shuffled.iter().find(|q| q.prompt == "Pick a vowel").unwrap();
        assert_eq!(vowels.choices, vec!["a", "b", "e"]);
    }

    #[test]
    fn test_discover_banks() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("b_geo.json"), SMALL_BANK).unwrap();
        fs::write(temp_dir.path().join("a_math.json"), SMALL_BANK).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = discover_banks(temp_dir.path());
        let names: Vec<String> = banks.iter().map(BankSource::name).collect();
        assert_eq!(names, vec![BUILTIN_BANK_NAME, "a_math", "b_geo"]);

        let loaded = banks[1].load().unwrap();
        assert_eq!(loaded.len(DifficultyTier::Easy), 2);
    }

    #[test]
    fn test_discover_banks_without_directory() {
        let banks = discover_banks(Path::new("definitely/not/here"));
        assert_eq!(banks, vec![BankSource::Builtin]);
    }
}
