use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Proxy,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::error;

use crate::{
    constants::{
        LOGIN_ENDPOINT, REQUEST_TIMEOUT_SECS, SCORE_ENDPOINT, SIGN_IN_ENDPOINT, TOKEN_HEADER,
    },
    error::{Error, Result},
};

// Field order matches what the service expects on the wire; serde keeps
// declaration order.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub address: String,
    pub signature: String,
    pub ref_code: &'static str,
    pub project_id: &'static str,
}

#[derive(Serialize, Clone, Debug)]
pub struct ScorePayload {
    pub page: u32,
    pub limit: u32,
    pub address: String,
}

#[derive(Deserialize, Debug)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct ApiEnvelope<T> {
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    debug: Option<T>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LoginData {
    pub token: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SignData {
    pub is_sign: i64,
    pub sign_day: i64,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct ScoreData {
    pub score: i64,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn with_base_url(base_url: impl Into<String>, proxy: Option<&str>) -> Self {
        let mut builder = Client::builder()
            .default_headers(get_headers())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));

        if let Some(proxy_url) = proxy {
            match Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(err) => {
                    error!("Invalid proxy url {proxy_url}: {err}. Falling back to direct connection")
                }
            }
        }

        let http = builder.build().unwrap_or_else(|err| {
            error!("Failed to build an HTTP client: {err}. Falling back to a default one");
            Client::new()
        });

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<LoginData> {
        self.post(LOGIN_ENDPOINT, Some(payload), None).await
    }

    pub fn session(&self, token: String) -> Session<'_> {
        Session {
            client: self,
            token,
        }
    }

    async fn post<B: Serialize, D: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<D> {
        let mut request = self.http.post(format!("{}{path}", self.base_url));

        if let Some(token) = token {
            request = request.header(TOKEN_HEADER, token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let envelope: ApiEnvelope<D> = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if envelope.code != 200 {
            return Err(Error::Api {
                code: envelope.code,
                message: envelope.message.unwrap_or_default(),
            });
        }

        envelope.debug.ok_or(Error::MissingData("debug"))
    }
}

// Token-bearing client state, valid for one account's processing.
pub struct Session<'a> {
    client: &'a ApiClient,
    token: String,
}

impl Session<'_> {
    pub async fn sign_in(&self) -> Result<SignData> {
        self.client
            .post::<serde_json::Value, _>(SIGN_IN_ENDPOINT, None, Some(&self.token))
            .await
    }

    pub async fn score_detail(&self, address: &str) -> Result<ScoreData> {
        let payload = ScorePayload {
            page: 1,
            limit: 10,
            address: address.to_owned(),
        };

        self.client
            .post(SCORE_ENDPOINT, Some(&payload), Some(&self.token))
            .await
    }
}

fn get_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(
        HeaderName::from_static("accept"),
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        HeaderName::from_static("accept-language"),
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(
        HeaderName::from_static("cache-control"),
        HeaderValue::from_static("no-cache"),
    );
    headers.insert(
        HeaderName::from_static("content-type"),
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        HeaderName::from_static("origin"),
        HeaderValue::from_static("https://www.coresky.com"),
    );
    headers.insert(
        HeaderName::from_static("pragma"),
        HeaderValue::from_static("no-cache"),
    );
    headers.insert(
        HeaderName::from_static("priority"),
        HeaderValue::from_static("u=1, i"),
    );
    headers.insert(
        HeaderName::from_static("referer"),
        HeaderValue::from_static("https://www.coresky.com/task-rewards"),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua"),
        HeaderValue::from_static("\"Not?A_Brand\";v=\"99\", \"Chromium\";v=\"130\""),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-mobile"),
        HeaderValue::from_static("?0"),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-platform"),
        HeaderValue::from_static("\"macOS\""),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("empty"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("cors"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        HeaderName::from_static("user-agent"),
        HeaderValue::from_static("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36"),
    );

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_payload_keeps_wire_field_order() {
        let payload = LoginPayload {
            address: "0xAbC".to_owned(),
            signature: "0xSig".to_owned(),
            ref_code: crate::constants::REF_CODE,
            project_id: crate::constants::PROJECT_ID,
        };

        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"address":"0xAbC","signature":"0xSig","refCode":"aeepcd","projectId":"0"}"#
        );
    }

    #[tokio::test]
    async fn login_extracts_the_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/user/login")
            .match_header("content-type", "application/json")
            .match_header(
                "user-agent",
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
            )
            .with_status(200)
            .with_body(r#"{"code":200,"message":"success","debug":{"token":"tok-abc"}}"#)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url(), None);
        let login = client
            .login(&LoginPayload {
                address: "0xAbC".to_owned(),
                signature: "0xSig".to_owned(),
                ref_code: "aeepcd",
                project_id: "0",
            })
            .await
            .unwrap();

        assert_eq!(login.token, "tok-abc");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_200_code_field_is_a_retryable_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/user/login")
            .with_status(200)
            .with_body(r#"{"code":500,"message":"login failed"}"#)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url(), None);
        let err = client
            .login(&LoginPayload {
                address: "0xAbC".to_owned(),
                signature: "0xSig".to_owned(),
                ref_code: "aeepcd",
                project_id: "0",
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api { code: 500, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn session_requests_carry_the_token_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/taskwall/meme/sign")
            .match_header("token", "tok-abc")
            .with_status(200)
            .with_body(r#"{"code":200,"message":"success","debug":{"isSign":1,"signDay":7}}"#)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url(), None);
        let session = client.session("tok-abc".to_owned());
        let sign = session.sign_in().await.unwrap();

        assert_eq!(sign.is_sign, 1);
        assert_eq!(sign.sign_day, 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn invalid_proxy_falls_back_to_direct_connection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/user/score/detail")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "page": 1,
                "limit": 10,
                "address": "0xabc"
            })))
            .with_status(200)
            .with_body(r#"{"code":200,"message":"success","debug":{"score":1234}}"#)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(server.url(), Some("ftp://127.0.0.1:1"));
        let score = client
            .session("tok-abc".to_owned())
            .score_detail("0xabc")
            .await
            .unwrap();

        assert_eq!(score.score, 1234);
    }
}
