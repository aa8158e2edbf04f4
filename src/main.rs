use config::Config;
use logger::init_default_logger;
use scheduler::run_forever;

mod api;
mod checkin;
mod config;
mod constants;
mod error;
mod logger;
mod runner;
mod scheduler;
mod signer;
mod utils;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _guard = init_default_logger();

    let config = Config::read_default().await;

    run_forever(config).await;

    Ok(())
}
