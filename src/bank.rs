// Question catalog - read-only once loaded, shared across games

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::{ensure, WrapErr};
use rand::Rng;
use serde::Deserialize;

use crate::errors::GameError;

/// Input record for the catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionSeed {
    pub level: usize,
    pub text: String,
    pub answers: [String; 4],
    /// Index of the correct answer within `answers`.
    pub correct: usize,
}

/// A catalog entry. `id` is assigned at load time and only used to keep a
/// single game from seeing the same question twice.
#[derive(Debug)]
pub struct Question {
    pub id: u64,
    pub level: usize,
    pub text: String,
    pub answers: [String; 4],
    pub correct: usize,
}

#[derive(Debug, Default)]
pub struct QuestionBank {
    by_level: HashMap<usize, Vec<Arc<Question>>>,
}

impl QuestionBank {
    pub fn new(seeds: Vec<QuestionSeed>) -> color_eyre::Result<Self> {
        let mut by_level: HashMap<usize, Vec<Arc<Question>>> = HashMap::new();
        for (idx, seed) in seeds.into_iter().enumerate() {
            ensure!(
                seed.correct < 4,
                "question {idx}: correct index {} out of range",
                seed.correct
            );
            ensure!(
                seed.answers.iter().all(|answer| !answer.is_empty()),
                "question {idx}: empty answer text"
            );
            by_level.entry(seed.level).or_default().push(Arc::new(Question {
                id: idx as u64,
                level: seed.level,
                text: seed.text,
                answers: seed.answers,
                correct: seed.correct,
            }));
        }
        Ok(Self { by_level })
    }

    pub fn questions_by_level(&self, level: usize) -> &[Arc<Question>] {
        self.by_level
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Picks a uniform random question at `level`, skipping ids already
    /// consumed by the in-progress selection.
    pub fn pick_for_level(
        &self,
        level: usize,
        used: &HashSet<u64>,
        rng: &mut impl Rng,
    ) -> Result<Arc<Question>, GameError> {
        let pool: Vec<&Arc<Question>> = self
            .questions_by_level(level)
            .iter()
            .filter(|question| !used.contains(&question.id))
            .collect();
        if pool.is_empty() {
            return Err(GameError::NoQuestionAvailable(level));
        }
        Ok(Arc::clone(pool[rng.gen_range(0..pool.len())]))
    }
}

/// Loads the catalog from a JSON file of [`QuestionSeed`] records.
pub fn load_bank(path: &Path) -> color_eyre::Result<QuestionBank> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read question bank at {}", path.display()))?;
    let seeds: Vec<QuestionSeed> =
        serde_json::from_str(&raw).wrap_err("could not parse question bank")?;
    QuestionBank::new(seeds)
}
