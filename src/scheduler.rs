use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::{config::Config, runner::run_once};

// Each run happens inside its own task: a panicking run is logged and the
// timer chain keeps going.
pub async fn run_forever(config: Config) {
    loop {
        info!("Starting daily check-in run");

        match tokio::spawn(run_once(config.clone())).await {
            Ok(reports) => info!("Check-in run complete: {} account(s) processed", reports.len()),
            Err(err) => error!("Check-in run aborted unexpectedly: {err}"),
        }

        let next_run = next_run_at(&config);
        info!("Next run scheduled at {}", next_run.format("%Y-%m-%d %H:%M:%S"));

        tokio::time::sleep(Duration::from_secs(config.run_interval_secs)).await;
    }
}

fn next_run_at(config: &Config) -> DateTime<Local> {
    Local::now() + chrono::Duration::seconds(config.run_interval_secs as i64)
}
