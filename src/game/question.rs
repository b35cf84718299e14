use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::help;
use crate::bank::Question;
use crate::errors::GameError;

/// Displayed answer letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        match index {
            0 => AnswerKey::A,
            1 => AnswerKey::B,
            2 => AnswerKey::C,
            _ => AnswerKey::D,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            AnswerKey::A => 'a',
            AnswerKey::B => 'b',
            AnswerKey::C => 'c',
            AnswerKey::D => 'd',
        }
    }

    pub fn as_uppercase(self) -> char {
        self.as_char().to_ascii_uppercase()
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The three one-shot hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpKind {
    FiftyFifty,
    AudienceHelp,
    FriendCall,
}

impl FromStr for HelpKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fifty_fifty" => Ok(HelpKind::FiftyFifty),
            "audience_help" => Ok(HelpKind::AudienceHelp),
            "friend_call" => Ok(HelpKind::FriendCall),
            other => Err(GameError::UnknownHelpKind(other.to_string())),
        }
    }
}

/// Accumulated hint payloads for one question. Each field is written at most
/// once and never cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HelpHash {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_fifty: Option<Vec<AnswerKey>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_help: Option<BTreeMap<AnswerKey, u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_call: Option<String>,
}

/// A bank question bound to one game level: the question itself, the random
/// letter permutation fixed at creation, and the hint payloads gathered so
/// far.
#[derive(Debug, Clone)]
pub struct GameQuestion {
    question: Arc<Question>,
    /// `shuffle[key.index()]` is the answer slot displayed under that key.
    /// Always a full permutation of `0..4`.
    shuffle: [usize; 4],
    help: HelpHash,
}

impl GameQuestion {
    pub fn new(question: Arc<Question>, rng: &mut impl Rng) -> Self {
        let mut shuffle = [0, 1, 2, 3];
        shuffle.shuffle(rng);
        Self {
            question,
            shuffle,
            help: HelpHash::default(),
        }
    }

    pub fn level(&self) -> usize {
        self.question.level
    }

    pub fn text(&self) -> &str {
        &self.question.text
    }

    /// Displayed letter → answer text, in letter order.
    pub fn variants(&self) -> BTreeMap<AnswerKey, &str> {
        AnswerKey::ALL
            .into_iter()
            .map(|key| (key, self.question.answers[self.shuffle[key.index()]].as_str()))
            .collect()
    }

    pub fn correct_answer_key(&self) -> AnswerKey {
        let index = self
            .shuffle
            .iter()
            .position(|&slot| slot == self.question.correct)
            .unwrap_or(0);
        AnswerKey::from_index(index)
    }

    pub fn answer_correct(&self, key: AnswerKey) -> bool {
        key == self.correct_answer_key()
    }

    pub fn help(&self) -> &HelpHash {
        &self.help
    }

    /// Leaves the correct letter plus one random wrong letter. Repeated
    /// calls return the cached pair.
    pub fn add_fifty_fifty(&mut self, rng: &mut impl Rng) -> Vec<AnswerKey> {
        if let Some(existing) = &self.help.fifty_fifty {
            return existing.clone();
        }
        let keys = help::fifty_fifty(self.correct_answer_key(), rng);
        self.help.fifty_fifty = Some(keys.clone());
        keys
    }

    /// Vote distribution biased toward the correct letter. Repeated calls
    /// return the cached distribution.
    pub fn add_audience_help(&mut self, rng: &mut impl Rng) -> BTreeMap<AnswerKey, u32> {
        if let Some(existing) = &self.help.audience_help {
            return existing.clone();
        }
        let votes = help::audience_help(self.correct_answer_key(), rng);
        self.help.audience_help = Some(votes.clone());
        votes
    }

    /// A friend's guess, phrased for display. Repeated calls return the
    /// cached message.
    pub fn add_friend_call(
        &mut self,
        friends: &[String],
        confidence: u32,
        rng: &mut impl Rng,
    ) -> String {
        if let Some(existing) = &self.help.friend_call {
            return existing.clone();
        }
        let message = help::friend_call(self.correct_answer_key(), friends, confidence, rng);
        self.help.friend_call = Some(message.clone());
        message
    }
}
