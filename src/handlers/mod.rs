mod game;

use std::sync::Arc;

use serde::Deserialize;
use warp::Filter;

use crate::game::{AnswerKey, GameId};
use crate::service::GameService;

#[derive(Deserialize)]
struct CreateGameBody {
    user_id: String,
}

#[derive(Deserialize)]
struct AnswerBody {
    letter: AnswerKey,
}

#[derive(Deserialize)]
struct HelpBody {
    kind: String,
}

fn with_service(
    service: Arc<GameService>,
) -> impl Filter<Extract = (Arc<GameService>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || Arc::clone(&service))
}

pub fn route(
    service: Arc<GameService>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let create_game = warp::post()
        .and(with_service(service.clone()))
        .and(warp::path!("games"))
        .and(warp::body::json::<CreateGameBody>())
        .and_then(game::create_game);

    let show_game = warp::get()
        .and(with_service(service.clone()))
        .and(warp::path!("games" / GameId))
        .and_then(game::show_game);

    let answer = warp::post()
        .and(with_service(service.clone()))
        .and(warp::path!("games" / GameId / "answer"))
        .and(warp::body::json::<AnswerBody>())
        .and_then(game::answer);

    let help = warp::post()
        .and(with_service(service.clone()))
        .and(warp::path!("games" / GameId / "help"))
        .and(warp::body::json::<HelpBody>())
        .and_then(game::help);

    let take_money = warp::post()
        .and(with_service(service))
        .and(warp::path!("games" / GameId / "take-money"))
        .and_then(game::take_money);

    create_game
        .or(show_game)
        .or(answer)
        .or(help)
        .or(take_money)
}
