use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::bank::QuestionBank;
use crate::clock::Clock;
use crate::config::GameConfig;
use crate::errors::GameError;
use crate::game::{AnswerKey, Game, GameId, GameStatus, HelpHash, HelpKind, UserId};
use crate::store::{GameStore, Ledger};

/// What a caller sees after any operation. Ground truth (the correct
/// letter) is never part of it.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub id: GameId,
    pub status: GameStatus,
    pub current_level: usize,
    pub prize: i64,
    pub help: HelpHash,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub text: String,
    pub variants: BTreeMap<AnswerKey, String>,
}

/// The produced surface of the engine: create, answer, hint, cash out,
/// read. One mutating call per game at a time; the store serializes them.
pub struct GameService {
    store: Arc<dyn GameStore>,
    ledger: Arc<dyn Ledger>,
    clock: Arc<dyn Clock>,
    bank: Arc<QuestionBank>,
    config: Arc<GameConfig>,
}

impl GameService {
    pub fn new(
        store: Arc<dyn GameStore>,
        ledger: Arc<dyn Ledger>,
        clock: Arc<dyn Clock>,
        bank: Arc<QuestionBank>,
        config: GameConfig,
    ) -> Self {
        Self {
            store,
            ledger,
            clock,
            bank,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn create_game(&self, owner: UserId) -> Result<GameSnapshot, GameError> {
        let mut rng = StdRng::from_entropy();
        let game = Game::new(
            GameId::new(),
            owner,
            &self.bank,
            &self.config,
            self.clock.now(),
            &mut rng,
        )?;
        let snapshot = self.snapshot(&game);
        tracing::info!("game {} created for {}", game.id(), game.owner());
        self.store.insert(game)?;
        Ok(snapshot)
    }

    pub fn game(&self, id: &GameId) -> Result<GameSnapshot, GameError> {
        let game = self.store.get(id)?;
        Ok(self.snapshot(&game))
    }

    pub fn answer(&self, id: &GameId, key: AnswerKey) -> Result<GameSnapshot, GameError> {
        let now = self.clock.now();
        let config = Arc::clone(&self.config);
        let outcome = self
            .store
            .update(id, &mut |game| game.answer_current_question(key, now, &config))?;
        self.settle(&outcome.game, outcome.awarded)?;
        tracing::debug!(
            "game {id}: answered {key}, level {}, status {:?}",
            outcome.game.current_level(),
            outcome.game.status(&self.config)
        );
        Ok(self.snapshot(&outcome.game))
    }

    pub fn use_help(&self, id: &GameId, kind: HelpKind) -> Result<GameSnapshot, GameError> {
        let config = Arc::clone(&self.config);
        let mut rng = StdRng::from_entropy();
        let outcome = self.store.update(id, &mut |game| {
            game.use_help(kind, &config, &mut rng)?;
            Ok(None)
        })?;
        Ok(self.snapshot(&outcome.game))
    }

    pub fn take_money(&self, id: &GameId) -> Result<GameSnapshot, GameError> {
        let now = self.clock.now();
        let config = Arc::clone(&self.config);
        let outcome = self
            .store
            .update(id, &mut |game| game.take_money(now, &config))?;
        self.settle(&outcome.game, outcome.awarded)?;
        Ok(self.snapshot(&outcome.game))
    }

    /// Credits the prize awarded by a just-committed terminal transition.
    fn settle(&self, game: &Game, awarded: Option<i64>) -> Result<(), GameError> {
        if let Some(amount) = awarded {
            self.ledger.credit(game.owner(), amount)?;
        }
        Ok(())
    }

    fn snapshot(&self, game: &Game) -> GameSnapshot {
        let status = game.status(&self.config);
        let current = game.current_game_question();
        GameSnapshot {
            id: game.id(),
            status,
            current_level: game.current_level(),
            prize: game.prize(),
            help: current.map(|q| q.help().clone()).unwrap_or_default(),
            question: match (status, current) {
                (GameStatus::InProgress, Some(question)) => Some(QuestionView {
                    text: question.text().to_string(),
                    variants: question
                        .variants()
                        .into_iter()
                        .map(|(key, text)| (key, text.to_string()))
                        .collect(),
                }),
                _ => None,
            },
        }
    }
}
