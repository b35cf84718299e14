pub mod bank;
pub mod clock;
pub mod config;
pub mod errors;
pub mod game;
pub mod handlers;
pub mod names;
pub mod rejections;
pub mod service;
pub mod store;

use std::sync::Arc;

use warp::Filter;

use service::GameService;

pub fn routes(
    service: Arc<GameService>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    handlers::route(service)
}
