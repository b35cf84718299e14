use chrono::Duration;
use color_eyre::eyre::ensure;

/// All tunables of the game in one explicit object, passed into the engine
/// at construction. Tests swap in deterministic values instead of patching
/// globals.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Money amount per level, strictly increasing. `prizes.len() - 1` is
    /// the top level; passing it wins the maximum prize.
    pub prizes: Vec<i64>,
    /// Ascending zero-based "fireproof" levels. A failure keeps the prize of
    /// the highest fireproof level already completed, or nothing.
    pub fireproof_levels: Vec<usize>,
    /// Wall-clock budget for the whole game.
    pub time_limit: Duration,
    /// Percent chance that the phoned friend names the correct variant.
    pub friend_confidence: u32,
    /// Persona names for the friend-call hint.
    pub friends: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            prizes: vec![
                100, 200, 300, 500, 1_000, 2_000, 4_000, 8_000, 16_000, 32_000, 64_000, 125_000,
                250_000, 500_000, 1_000_000,
            ],
            fireproof_levels: vec![4, 9, 14],
            time_limit: Duration::minutes(35),
            friend_confidence: 75,
            friends: [
                "Александр Друзь",
                "Максим Поташев",
                "Фёдор Двинятин",
                "Анатолий Вассерман",
                "Виктор Сиднев",
                "Борис Бурда",
            ]
            .map(str::to_owned)
            .to_vec(),
        }
    }
}

impl GameConfig {
    /// Highest question level, zero-based.
    pub fn max_level(&self) -> usize {
        self.prizes.len().saturating_sub(1)
    }

    /// Prize retained after a failure at `level`: the prize of the greatest
    /// fireproof level strictly below it, or 0 when none has been completed.
    pub fn fire_proof_prize(&self, level: usize) -> i64 {
        self.fireproof_levels
            .iter()
            .rev()
            .find(|&&fireproof| fireproof < level)
            .map(|&fireproof| self.prizes[fireproof])
            .unwrap_or(0)
    }

    pub fn validate(&self) -> color_eyre::Result<()> {
        ensure!(!self.prizes.is_empty(), "prize table is empty");
        ensure!(
            self.prizes.windows(2).all(|pair| pair[0] < pair[1]),
            "prize table must be strictly increasing"
        );
        ensure!(
            self.fireproof_levels
                .windows(2)
                .all(|pair| pair[0] < pair[1]),
            "fireproof levels must be ascending"
        );
        ensure!(
            self.fireproof_levels
                .iter()
                .all(|&level| level <= self.max_level()),
            "fireproof level outside the prize table"
        );
        ensure!(
            self.friend_confidence <= 100,
            "friend confidence is a percentage"
        );
        ensure!(!self.friends.is_empty(), "friend persona list is empty");
        ensure!(
            self.time_limit > Duration::zero(),
            "time limit must be positive"
        );
        Ok(())
    }
}
