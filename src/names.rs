use crate::game::GameId;

pub const GAMES_URL: &str = "/games";

pub fn game_url(id: GameId) -> String {
    format!("/games/{id}")
}

pub fn answer_url(id: GameId) -> String {
    format!("/games/{id}/answer")
}

pub fn help_url(id: GameId) -> String {
    format!("/games/{id}/help")
}

pub fn take_money_url(id: GameId) -> String {
    format!("/games/{id}/take-money")
}
