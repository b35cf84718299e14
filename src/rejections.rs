use std::convert::Infallible;

use serde::Serialize;
use warp::{
    http::StatusCode,
    reject::{Reject, Rejection},
    reply::Reply,
};

use crate::errors::GameError;

/// Carries a typed engine error through warp's rejection machinery.
#[derive(Debug)]
pub struct EngineError(pub GameError);

impl Reject for EngineError {}

pub fn engine(err: GameError) -> Rejection {
    warp::reject::custom(EngineError(err))
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let label;
    let mut message = String::new();

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        label = "NOT_FOUND";
    } else if let Some(EngineError(game_err)) = err.find() {
        message = game_err.to_string();
        (code, label) = match game_err {
            GameError::SessionFinished => (StatusCode::CONFLICT, "GAME_FINISHED"),
            GameError::NothingToCash => (StatusCode::UNPROCESSABLE_ENTITY, "NOTHING_TO_CASH"),
            GameError::UnknownHelpKind(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_HELP_KIND"),
            GameError::GameNotFound => (StatusCode::NOT_FOUND, "GAME_NOT_FOUND"),
            GameError::NoQuestionAvailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "NO_QUESTION_AVAILABLE")
            }
            GameError::Storage(_) | GameError::Ledger(_) => {
                tracing::error!("collaborator failure: {game_err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };
    } else if err
        .find::<warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        code = StatusCode::BAD_REQUEST;
        label = "BAD_REQUEST";
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        label = "METHOD_NOT_ALLOWED";
    } else {
        tracing::error!("unhandled rejection: {:?}", err);
        code = StatusCode::INTERNAL_SERVER_ERROR;
        label = "UNHANDLED_REJECTION";
    }

    let body = ErrorBody {
        error: label,
        message,
    };
    Ok(warp::reply::with_status(warp::reply::json(&body), code))
}
