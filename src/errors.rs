/// Failure taxonomy of the game engine.
///
/// Mutating calls on a terminal game are always rejected with
/// `SessionFinished`; the caller treats that as a no-op and re-reads the
/// snapshot. The remaining variants are content/policy failures that are
/// surfaced as-is, never retried by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("game is already finished")]
    SessionFinished,

    #[error("no question available for level {0}")]
    NoQuestionAvailable(usize),

    #[error("unknown help kind `{0}`")]
    UnknownHelpKind(String),

    #[error("no completed level to cash out")]
    NothingToCash,

    #[error("game not found")]
    GameNotFound,

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("ledger failure: {0}")]
    Ledger(String),
}
