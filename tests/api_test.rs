mod common;

use chrono::Duration;
use moneyladder::game::{GameId, UserId};
use moneyladder::rejections;
use serde_json::{json, Value};
use warp::filters::BoxedFilter;
use warp::Filter;

type Api = BoxedFilter<(warp::reply::Response,)>;

fn api_for(harness: &common::Harness) -> Api {
    moneyladder::routes(harness.service.clone())
        .recover(rejections::handle_rejection)
        .map(warp::reply::Reply::into_response)
        .boxed()
}

async fn create_game(api: &Api, user: &str) -> Value {
    let resp = warp::test::request()
        .method("POST")
        .path(moneyladder::names::GAMES_URL)
        .json(&json!({ "user_id": user }))
        .reply(api)
        .await;
    assert_eq!(resp.status(), 200);
    serde_json::from_slice(resp.body()).expect("snapshot json")
}

fn game_id(snapshot: &Value) -> GameId {
    snapshot["id"]
        .as_str()
        .expect("id string")
        .parse()
        .expect("ulid id")
}

/// Looks up the letter that would be graded correct for the game's current
/// question. Test-only backdoor through the store.
fn correct_letter(harness: &common::Harness, id: &GameId) -> String {
    use moneyladder::store::GameStore;
    let game = harness.store.get(id).expect("stored game");
    game.current_game_question()
        .expect("current question")
        .correct_answer_key()
        .to_string()
}

fn wrong_letter(harness: &common::Harness, id: &GameId) -> String {
    let correct = correct_letter(harness, id);
    ["a", "b", "c", "d"]
        .into_iter()
        .find(|&letter| letter != correct)
        .expect("three wrong letters")
        .to_string()
}

async fn answer(api: &Api, id: GameId, letter: &str) -> (u16, Value) {
    let resp = warp::test::request()
        .method("POST")
        .path(&moneyladder::names::answer_url(id))
        .json(&json!({ "letter": letter }))
        .reply(api)
        .await;
    let body = serde_json::from_slice(resp.body()).expect("json body");
    (resp.status().as_u16(), body)
}

#[tokio::test]
async fn create_game_returns_in_progress_snapshot() {
    let harness = common::harness();
    let api = api_for(&harness);

    let snapshot = create_game(&api, "alice").await;

    assert_eq!(snapshot["status"], "in_progress");
    assert_eq!(snapshot["current_level"], 0);
    assert_eq!(snapshot["prize"], 0);
    assert!(snapshot["question"]["text"].is_string());
    assert_eq!(
        snapshot["question"]["variants"]
            .as_object()
            .expect("variants")
            .len(),
        4
    );
}

#[tokio::test]
async fn correct_answers_climb_to_a_win_and_credit_the_ledger() {
    let harness = common::harness();
    let api = api_for(&harness);
    let snapshot = create_game(&api, "alice").await;
    let id = game_id(&snapshot);

    let top = harness.config.max_level();
    let mut last = snapshot;
    for _ in 0..=top {
        let letter = correct_letter(&harness, &id);
        let (status, body) = answer(&api, id, &letter).await;
        assert_eq!(status, 200);
        last = body;
    }

    let top_prize = *harness.config.prizes.last().unwrap();
    assert_eq!(last["status"], "won");
    assert_eq!(last["current_level"], top + 1);
    assert_eq!(last["prize"], top_prize);
    assert!(last.get("question").is_none());
    assert_eq!(
        harness.ledger.balance(&UserId("alice".to_string())),
        top_prize
    );
}

#[tokio::test]
async fn wrong_answer_fails_with_fireproof_prize() {
    let harness = common::harness();
    let api = api_for(&harness);
    let snapshot = create_game(&api, "bob").await;
    let id = game_id(&snapshot);

    for _ in 0..6 {
        let letter = correct_letter(&harness, &id);
        let (status, _) = answer(&api, id, &letter).await;
        assert_eq!(status, 200);
    }
    let letter = wrong_letter(&harness, &id);
    let (status, body) = answer(&api, id, &letter).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["prize"], harness.config.prizes[4]);
    assert_eq!(
        harness.ledger.balance(&UserId("bob".to_string())),
        harness.config.prizes[4]
    );
}

#[tokio::test]
async fn take_money_cashes_out_and_credits_exactly_once() {
    let harness = common::harness();
    let api = api_for(&harness);
    let snapshot = create_game(&api, "carol").await;
    let id = game_id(&snapshot);

    for _ in 0..2 {
        let letter = correct_letter(&harness, &id);
        answer(&api, id, &letter).await;
    }

    let resp = warp::test::request()
        .method("POST")
        .path(&moneyladder::names::take_money_url(id))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = serde_json::from_slice(resp.body()).expect("json");
    assert_eq!(body["status"], "cashed_out");
    assert_eq!(body["prize"], harness.config.prizes[1]);

    let carol = UserId("carol".to_string());
    assert_eq!(harness.ledger.balance(&carol), harness.config.prizes[1]);

    // A second cash-out is a conflict and must not credit again.
    let resp = warp::test::request()
        .method("POST")
        .path(&moneyladder::names::take_money_url(id))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), 409);
    let body: Value = serde_json::from_slice(resp.body()).expect("json");
    assert_eq!(body["error"], "GAME_FINISHED");
    assert_eq!(harness.ledger.balance(&carol), harness.config.prizes[1]);
}

#[tokio::test]
async fn take_money_before_any_level_is_unprocessable() {
    let harness = common::harness();
    let api = api_for(&harness);
    let snapshot = create_game(&api, "dave").await;
    let id = game_id(&snapshot);

    let resp = warp::test::request()
        .method("POST")
        .path(&moneyladder::names::take_money_url(id))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 422);
    let body: Value = serde_json::from_slice(resp.body()).expect("json");
    assert_eq!(body["error"], "NOTHING_TO_CASH");
    assert_eq!(harness.ledger.balance(&UserId("dave".to_string())), 0);
}

#[tokio::test]
async fn clock_driven_timeout_freezes_the_game() {
    let harness = common::harness();
    let api = api_for(&harness);
    let snapshot = create_game(&api, "erin").await;
    let id = game_id(&snapshot);

    harness
        .clock
        .advance(harness.config.time_limit + Duration::seconds(1));
    let letter = correct_letter(&harness, &id);
    let (status, body) = answer(&api, id, &letter).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "timeout");
    assert_eq!(body["current_level"], 0);
    assert_eq!(body["prize"], 0);

    // Re-reading much later keeps the verdict.
    harness.clock.advance(Duration::days(1));
    let resp = warp::test::request()
        .method("GET")
        .path(&moneyladder::names::game_url(id))
        .reply(&api)
        .await;
    let body: Value = serde_json::from_slice(resp.body()).expect("json");
    assert_eq!(body["status"], "timeout");
}

#[tokio::test]
async fn help_endpoint_is_idempotent_per_question() {
    let harness = common::harness();
    let api = api_for(&harness);
    let snapshot = create_game(&api, "frank").await;
    let id = game_id(&snapshot);

    let request = || {
        warp::test::request()
            .method("POST")
            .path(&moneyladder::names::help_url(id))
            .json(&json!({ "kind": "fifty_fifty" }))
    };

    let first: Value = serde_json::from_slice(request().reply(&api).await.body()).expect("json");
    let second: Value = serde_json::from_slice(request().reply(&api).await.body()).expect("json");

    let pair = first["help"]["fifty_fifty"].as_array().expect("two keys");
    assert_eq!(pair.len(), 2);
    assert_eq!(first["help"]["fifty_fifty"], second["help"]["fifty_fifty"]);
    assert!(pair.contains(&Value::String(correct_letter(&harness, &id))));
}

#[tokio::test]
async fn unknown_help_kind_is_a_bad_request() {
    let harness = common::harness();
    let api = api_for(&harness);
    let snapshot = create_game(&api, "grace").await;
    let id = game_id(&snapshot);

    let resp = warp::test::request()
        .method("POST")
        .path(&moneyladder::names::help_url(id))
        .json(&json!({ "kind": "ask_the_host" }))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 400);
    let body: Value = serde_json::from_slice(resp.body()).expect("json");
    assert_eq!(body["error"], "UNKNOWN_HELP_KIND");
}

#[tokio::test]
async fn missing_game_is_not_found() {
    let harness = common::harness();
    let api = api_for(&harness);

    let resp = warp::test::request()
        .method("GET")
        .path(&moneyladder::names::game_url(GameId::new()))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 404);
    let body: Value = serde_json::from_slice(resp.body()).expect("json");
    assert_eq!(body["error"], "GAME_NOT_FOUND");
}
