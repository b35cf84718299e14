// Collaborator seams: game persistence and the user balance ledger.
// The in-memory adapters back the binary and the tests; anything that can
// load, save and read-modify-write one game at a time can stand in.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::GameError;
use crate::game::{Game, GameId, UserId};

/// Result of a committed read-modify-write: the stored game after the
/// mutation plus the prize this mutation awarded, if any.
pub struct UpdateOutcome {
    pub game: Game,
    pub awarded: Option<i64>,
}

/// Per-game record store. `update` must apply the closure under mutual
/// exclusion for that game id and commit only when the closure succeeds.
pub trait GameStore: Send + Sync {
    fn insert(&self, game: Game) -> Result<(), GameError>;

    fn get(&self, id: &GameId) -> Result<Game, GameError>;

    fn update(
        &self,
        id: &GameId,
        apply: &mut dyn FnMut(&mut Game) -> Result<Option<i64>, GameError>,
    ) -> Result<UpdateOutcome, GameError>;
}

/// Credits a user's balance. Failures must propagate to the caller; a lost
/// credit is never silently dropped.
pub trait Ledger: Send + Sync {
    fn credit(&self, user: &UserId, amount: i64) -> Result<(), GameError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    games: Mutex<HashMap<GameId, Game>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for InMemoryStore {
    fn insert(&self, game: Game) -> Result<(), GameError> {
        let mut games = self
            .games
            .lock()
            .map_err(|_| GameError::Storage("game store lock poisoned".to_string()))?;
        games.insert(game.id(), game);
        Ok(())
    }

    fn get(&self, id: &GameId) -> Result<Game, GameError> {
        let games = self
            .games
            .lock()
            .map_err(|_| GameError::Storage("game store lock poisoned".to_string()))?;
        games.get(id).cloned().ok_or(GameError::GameNotFound)
    }

    fn update(
        &self,
        id: &GameId,
        apply: &mut dyn FnMut(&mut Game) -> Result<Option<i64>, GameError>,
    ) -> Result<UpdateOutcome, GameError> {
        let mut games = self
            .games
            .lock()
            .map_err(|_| GameError::Storage("game store lock poisoned".to_string()))?;
        let game = games.get_mut(id).ok_or(GameError::GameNotFound)?;
        let awarded = apply(game)?;
        Ok(UpdateOutcome {
            game: game.clone(),
            awarded,
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: Mutex<HashMap<UserId, i64>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, user: &UserId) -> i64 {
        self.balances
            .lock()
            .map(|balances| balances.get(user).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Ledger for InMemoryLedger {
    fn credit(&self, user: &UserId, amount: i64) -> Result<(), GameError> {
        let mut balances = self
            .balances
            .lock()
            .map_err(|_| GameError::Ledger("ledger lock poisoned".to_string()))?;
        *balances.entry(user.clone()).or_insert(0) += amount;
        tracing::info!("credited {amount} to {user}");
        Ok(())
    }
}
