use std::sync::Arc;

use clap::Parser;
use moneyladder::bank;
use moneyladder::clock::SystemClock;
use moneyladder::config::GameConfig;
use moneyladder::service::GameService;
use moneyladder::store::{InMemoryLedger, InMemoryStore};
use warp::Filter;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the question bank JSON file.
    #[arg(short, long, env, default_value = "questions.json")]
    bank: std::path::PathBuf,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1515")]
    address: String,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "moneyladder=debug,warp=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let config = GameConfig::default();
    config.validate()?;

    let bank = Arc::new(bank::load_bank(&args.bank)?);
    for level in 0..=config.max_level() {
        let available = bank.questions_by_level(level).len();
        tracing::debug!("level {level}: {available} question(s)");
    }

    let service = Arc::new(GameService::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(InMemoryLedger::new()),
        Arc::new(SystemClock),
        bank,
        config,
    ));

    let routes = moneyladder::routes(service).recover(moneyladder::rejections::handle_rejection);

    let address = args.address.parse::<std::net::SocketAddr>()?;
    tracing::info!("listening on {address}");
    warp::serve(routes).run(address).await;

    Ok(())
}
