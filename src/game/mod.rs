//! The game itself: one play-through from creation to a terminal outcome.
//!
//! Status is never stored. It is derived fresh from `finished_at`,
//! `is_failed` and `current_level` on every query, with a fixed precedence:
//! timeout pre-empts failure, failure pre-empts the won/cash-out split.

pub mod help;
pub mod question;

pub use question::{AnswerKey, GameQuestion, HelpHash, HelpKind};

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::bank::QuestionBank;
use crate::config::GameConfig;
use crate::errors::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(Ulid);

impl GameId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for GameId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

/// Opaque player identity. The engine never looks inside beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    Fail,
    Timeout,
    CashedOut,
}

#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    owner: UserId,
    /// One question per level, `questions[i].level() == i`, fixed at
    /// creation.
    questions: Vec<GameQuestion>,
    /// Only increases. `max_level + 1` means the last question was passed.
    current_level: usize,
    created_at: DateTime<Utc>,
    /// Present iff the game is terminal. Once set, neither it nor
    /// `is_failed` ever change.
    finished_at: Option<DateTime<Utc>>,
    is_failed: bool,
    prize: i64,
    fifty_fifty_used: bool,
    audience_help_used: bool,
    friend_call_used: bool,
}

impl Game {
    /// Builds a fresh game with one random question per level. No question
    /// instance repeats within the game.
    pub fn new(
        id: GameId,
        owner: UserId,
        bank: &QuestionBank,
        config: &GameConfig,
        now: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> Result<Self, GameError> {
        let mut used = HashSet::new();
        let mut questions = Vec::with_capacity(config.max_level() + 1);
        for level in 0..=config.max_level() {
            let question = bank.pick_for_level(level, &used, rng)?;
            used.insert(question.id);
            questions.push(GameQuestion::new(question, rng));
        }
        Ok(Self {
            id,
            owner,
            questions,
            current_level: 0,
            created_at: now,
            finished_at: None,
            is_failed: false,
            prize: 0,
            fifty_fifty_used: false,
            audience_help_used: false,
            friend_call_used: false,
        })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn is_failed(&self) -> bool {
        self.is_failed
    }

    pub fn prize(&self) -> i64 {
        self.prize
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn previous_level(&self) -> Option<usize> {
        self.current_level.checked_sub(1)
    }

    pub fn game_questions(&self) -> &[GameQuestion] {
        &self.questions
    }

    /// `None` once the last question has been passed.
    pub fn current_game_question(&self) -> Option<&GameQuestion> {
        self.questions.get(self.current_level)
    }

    pub fn previous_game_question(&self) -> Option<&GameQuestion> {
        self.previous_level()
            .and_then(|level| self.questions.get(level))
    }

    pub fn help_used(&self, kind: HelpKind) -> bool {
        match kind {
            HelpKind::FiftyFifty => self.fifty_fifty_used,
            HelpKind::AudienceHelp => self.audience_help_used,
            HelpKind::FriendCall => self.friend_call_used,
        }
    }

    fn max_level(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    fn timed_out(&self, now: DateTime<Utc>, config: &GameConfig) -> bool {
        now - self.created_at >= config.time_limit
    }

    /// Current status, derived from stored fields alone. For a terminal
    /// game elapsed time is measured against `finished_at`, so the verdict
    /// is frozen at the moment the game ended and never drifts afterwards.
    pub fn status(&self, config: &GameConfig) -> GameStatus {
        let Some(finished_at) = self.finished_at else {
            return GameStatus::InProgress;
        };
        if finished_at - self.created_at >= config.time_limit {
            GameStatus::Timeout
        } else if self.is_failed {
            GameStatus::Fail
        } else if self.current_level > self.max_level() {
            GameStatus::Won
        } else {
            GameStatus::CashedOut
        }
    }

    /// Submits `key` for the current question. Returns the prize to credit
    /// when this call ended the game with money, `None` otherwise.
    pub fn answer_current_question(
        &mut self,
        key: AnswerKey,
        now: DateTime<Utc>,
        config: &GameConfig,
    ) -> Result<Option<i64>, GameError> {
        if self.finished() {
            return Err(GameError::SessionFinished);
        }
        if self.timed_out(now, config) {
            // The level stands; the answer is not graded at all, so a wrong
            // answer past the limit still resolves to a timeout.
            return Ok(self.finish(now, false, self.stop_prize(config)));
        }
        let question = self
            .questions
            .get(self.current_level)
            .ok_or(GameError::SessionFinished)?;
        if !question.answer_correct(key) {
            return Ok(self.finish(now, true, config.fire_proof_prize(self.current_level)));
        }
        self.current_level += 1;
        if self.current_level > self.max_level() {
            return Ok(self.finish(now, false, config.prizes[self.max_level()]));
        }
        Ok(None)
    }

    /// Voluntary cash-out: keeps the prize of the last level passed.
    pub fn take_money(
        &mut self,
        now: DateTime<Utc>,
        config: &GameConfig,
    ) -> Result<Option<i64>, GameError> {
        if self.finished() {
            return Err(GameError::SessionFinished);
        }
        if self.timed_out(now, config) {
            return Ok(self.finish(now, false, self.stop_prize(config)));
        }
        if self.current_level == 0 {
            return Err(GameError::NothingToCash);
        }
        Ok(self.finish(now, false, config.prizes[self.current_level - 1]))
    }

    /// Applies a hint to the current question and marks it used. Repeating
    /// a kind returns the cached payload; the flag flips only once.
    pub fn use_help(
        &mut self,
        kind: HelpKind,
        config: &GameConfig,
        rng: &mut impl Rng,
    ) -> Result<(), GameError> {
        if self.finished() {
            return Err(GameError::SessionFinished);
        }
        let level = self.current_level;
        let question = self
            .questions
            .get_mut(level)
            .ok_or(GameError::SessionFinished)?;
        match kind {
            HelpKind::FiftyFifty => {
                question.add_fifty_fifty(rng);
                self.fifty_fifty_used = true;
            }
            HelpKind::AudienceHelp => {
                question.add_audience_help(rng);
                self.audience_help_used = true;
            }
            HelpKind::FriendCall => {
                question.add_friend_call(&config.friends, config.friend_confidence, rng);
                self.friend_call_used = true;
            }
        }
        Ok(())
    }

    /// Prize for stopping after the levels passed so far: the prize of the
    /// last completed level, nothing at level 0.
    fn stop_prize(&self, config: &GameConfig) -> i64 {
        self.previous_level()
            .map(|level| config.prizes[level])
            .unwrap_or(0)
    }

    fn finish(&mut self, now: DateTime<Utc>, failed: bool, prize: i64) -> Option<i64> {
        self.finished_at = Some(now);
        self.is_failed = failed;
        self.prize = prize;
        (prize > 0).then_some(prize)
    }
}
