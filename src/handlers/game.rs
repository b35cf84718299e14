use std::sync::Arc;

use crate::game::{GameId, HelpKind, UserId};
use crate::rejections;
use crate::service::GameService;

use super::{AnswerBody, CreateGameBody, HelpBody};

pub(crate) async fn create_game(
    service: Arc<GameService>,
    body: CreateGameBody,
) -> Result<impl warp::Reply, warp::Rejection> {
    let snapshot = service
        .create_game(UserId(body.user_id))
        .map_err(rejections::engine)?;
    Ok(warp::reply::json(&snapshot))
}

pub(crate) async fn show_game(
    service: Arc<GameService>,
    id: GameId,
) -> Result<impl warp::Reply, warp::Rejection> {
    let snapshot = service.game(&id).map_err(rejections::engine)?;
    Ok(warp::reply::json(&snapshot))
}

pub(crate) async fn answer(
    service: Arc<GameService>,
    id: GameId,
    body: AnswerBody,
) -> Result<impl warp::Reply, warp::Rejection> {
    let snapshot = service
        .answer(&id, body.letter)
        .map_err(rejections::engine)?;
    Ok(warp::reply::json(&snapshot))
}

pub(crate) async fn help(
    service: Arc<GameService>,
    id: GameId,
    body: HelpBody,
) -> Result<impl warp::Reply, warp::Rejection> {
    let kind: HelpKind = body.kind.parse().map_err(rejections::engine)?;
    let snapshot = service.use_help(&id, kind).map_err(rejections::engine)?;
    Ok(warp::reply::json(&snapshot))
}

pub(crate) async fn take_money(
    service: Arc<GameService>,
    id: GameId,
) -> Result<impl warp::Reply, warp::Rejection> {
    let snapshot = service.take_money(&id).map_err(rejections::engine)?;
    Ok(warp::reply::json(&snapshot))
}
