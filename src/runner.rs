use std::time::Duration;

use tracing::{error, info};

use crate::{
    api::ApiClient,
    checkin::{check_in, CheckInReport},
    config::Config,
    constants::API_BASE_URL,
    utils::{load_credentials, AccountCredential},
};

pub async fn run_once(config: Config) -> Vec<CheckInReport> {
    let accounts = load_credentials().await;

    if accounts.is_empty() {
        error!("No accounts to process, aborting this run");
        return Vec::new();
    }

    run_batch(&accounts, &config).await
}

pub async fn run_batch(accounts: &[AccountCredential], config: &Config) -> Vec<CheckInReport> {
    run_batch_with_base(accounts, config, API_BASE_URL).await
}

// Accounts run strictly one at a time, in file order. Each account gets its
// own task so a panic turns into a failure record instead of killing the run.
async fn run_batch_with_base(
    accounts: &[AccountCredential],
    config: &Config,
    base_url: &str,
) -> Vec<CheckInReport> {
    let total = accounts.len();
    let mut reports = Vec::with_capacity(total);

    for (index, account) in accounts.iter().enumerate() {
        info!("Processing account {}/{total}", index + 1);

        let client = ApiClient::with_base_url(base_url, Some(&account.proxy));
        let report = match tokio::spawn(check_in(client, account.private_key.clone())).await {
            Ok(report) => report,
            Err(err) => {
                error!("Account task aborted unexpectedly: {err}");
                CheckInReport::failure("unknown", format!("unexpected failure: {err}"))
            }
        };

        if report.success {
            let status = if report.signed_in == Some(true) {
                "already signed today"
            } else {
                "signed in"
            };
            info!(
                "{}: {status}, day {}, score {}",
                report.address,
                report.sign_day.unwrap_or_default(),
                report.score.unwrap_or_default()
            );
        } else {
            error!(
                "{}: {}",
                report.address,
                report.error.as_deref().unwrap_or("unknown error")
            );
        }
        reports.push(report);

        if index + 1 < total {
            tokio::time::sleep(Duration::from_secs(config.account_delay_secs)).await;
        }
    }

    let succeeded = reports.iter().filter(|report| report.success).count();
    info!("Batch finished: {succeeded}/{total} account(s) succeeded");

    reports
}
