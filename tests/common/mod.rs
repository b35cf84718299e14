#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use moneyladder::bank::{QuestionBank, QuestionSeed};
use moneyladder::clock::ManualClock;
use moneyladder::config::GameConfig;
use moneyladder::service::GameService;
use moneyladder::store::{InMemoryLedger, InMemoryStore};

/// `per_level` questions for every level `0..=max_level`, correct answer in
/// a rotating slot so shuffled keys vary.
pub fn seed_questions(max_level: usize, per_level: usize) -> Vec<QuestionSeed> {
    let mut seeds = Vec::new();
    for level in 0..=max_level {
        for n in 0..per_level {
            seeds.push(QuestionSeed {
                level,
                text: format!("Question {level}-{n}"),
                answers: [
                    format!("Answer {level}-{n}-0"),
                    format!("Answer {level}-{n}-1"),
                    format!("Answer {level}-{n}-2"),
                    format!("Answer {level}-{n}-3"),
                ],
                correct: (level + n) % 4,
            });
        }
    }
    seeds
}

pub fn test_bank(max_level: usize, per_level: usize) -> QuestionBank {
    QuestionBank::new(seed_questions(max_level, per_level)).expect("valid seeds")
}

pub fn test_config() -> GameConfig {
    GameConfig::default()
}

pub struct Harness {
    pub service: Arc<GameService>,
    pub store: Arc<InMemoryStore>,
    pub ledger: Arc<InMemoryLedger>,
    pub clock: Arc<ManualClock>,
    pub config: GameConfig,
}

pub fn harness() -> Harness {
    harness_with_config(test_config())
}

pub fn harness_with_config(config: GameConfig) -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let ledger = Arc::new(InMemoryLedger::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ));
    let bank = Arc::new(test_bank(config.max_level(), 4));
    let service = Arc::new(GameService::new(
        store.clone(),
        ledger.clone(),
        clock.clone(),
        bank,
        config.clone(),
    ));
    Harness {
        service,
        store,
        ledger,
        clock,
        config,
    }
}
