use std::{future::Future, time::Duration};

use alloy::signers::local::PrivateKeySigner;
use tracing::{error, info, warn};

use crate::{
    api::{ApiClient, LoginData, LoginPayload, ScoreData, SignData},
    constants::{MAX_RETRIES, PROJECT_ID, REF_CODE},
    error::Result,
    signer::{checksummed_address, parse_private_key, sign_auth_message},
    utils::mask_key,
};

#[derive(Debug, Clone)]
pub struct CheckInReport {
    pub address: String,
    pub success: bool,
    pub signed_in: Option<bool>,
    pub sign_day: Option<i64>,
    pub score: Option<i64>,
    pub error: Option<String>,
}

impl CheckInReport {
    fn success(address: String, sign: SignData, score: ScoreData) -> Self {
        Self {
            address,
            success: true,
            signed_in: Some(sign.is_sign != 0),
            sign_day: Some(sign.sign_day),
            score: Some(score.score),
            error: None,
        }
    }

    pub fn failure(address: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            success: false,
            signed_in: None,
            sign_day: None,
            score: None,
            error: Some(error.into()),
        }
    }
}

pub async fn check_in(client: ApiClient, private_key: String) -> CheckInReport {
    let signer = match parse_private_key(&private_key) {
        Ok(signer) => signer,
        Err(err) => {
            error!("Skipping account {}: {err}", mask_key(&private_key));
            return CheckInReport::failure("unknown", err.to_string());
        }
    };

    let address = checksummed_address(&signer);
    info!("Checking in {address}");

    match run_session(&client, &signer, &address).await {
        Ok((sign, score)) => CheckInReport::success(address, sign, score),
        Err(err) => CheckInReport::failure(address, err.to_string()),
    }
}

async fn run_session(
    client: &ApiClient,
    signer: &PrivateKeySigner,
    address: &str,
) -> Result<(SignData, ScoreData)> {
    let login: LoginData = with_retries("login", || async move {
        let signature = sign_auth_message(signer, address).await?;
        client
            .login(&LoginPayload {
                address: address.to_owned(),
                signature,
                ref_code: REF_CODE,
                project_id: PROJECT_ID,
            })
            .await
    })
    .await?;
    info!("Logged in {address}");

    let session = client.session(login.token);

    let sign = with_retries("sign-in", || session.sign_in()).await?;

    let address_lower = address.to_lowercase();
    let score = with_retries("score check", || session.score_detail(&address_lower)).await?;

    Ok((sign, score))
}

// Explicit bounded loop: 4 attempts total, sleeping 2^n seconds before
// retry n (2s, 4s, 8s). Non-retryable errors surface immediately.
async fn with_retries<T, F, Fut>(op: &str, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) => {
                attempt += 1;
                if attempt > MAX_RETRIES {
                    return Err(err);
                }

                let delay = Duration::from_secs(2_u64.pow(attempt));
                warn!(
                    "{op} failed: {err}. Retry {attempt}/{MAX_RETRIES} in {}s",
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
