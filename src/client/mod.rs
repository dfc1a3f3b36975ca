//! Client layer: performs Twilio API calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::config::TwilioConfig;
use crate::domain::{
    MessageResponse, PhoneNumber, ServiceSid, VerificationChannel, VerificationResponse,
};
use crate::error::{ProviderError, TwilioError};

const DEFAULT_API_BASE: &str = "https://api.twilio.com/2010-04-01";
const DEFAULT_VERIFY_BASE: &str = "https://verify.twilio.com/v2";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) retry_after: Option<String>,
    pub(crate) body: String,
}

#[derive(Clone)]
pub(crate) struct BasicAuth {
    pub(crate) username: String,
    pub(crate) password: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: &'a BasicAuth,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: &'a BasicAuth,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .basic_auth(&auth.username, Some(&auth.password))
                .form(&params)
                .send()
                .await?;
            let status = response.status().as_u16();
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = response.text().await?;
            Ok(HttpResponse {
                status,
                retry_after,
                body,
            })
        })
    }
}

#[derive(Debug, Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this when you need to customize the API base URLs, timeout, or user-agent.
pub struct TwilioClientBuilder {
    config: TwilioConfig,
    api_base: String,
    verify_base: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TwilioClientBuilder {
    /// Create a builder with the public Twilio endpoints and no timeout/user-agent override.
    pub fn new(config: &TwilioConfig) -> Self {
        Self {
            config: config.clone(),
            api_base: DEFAULT_API_BASE.to_owned(),
            verify_base: DEFAULT_VERIFY_BASE.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the REST API base (default `https://api.twilio.com/2010-04-01`).
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Override the Verify API base (default `https://verify.twilio.com/v2`).
    pub fn verify_base(mut self, base: impl Into<String>) -> Self {
        self.verify_base = base.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TwilioClient`].
    ///
    /// Fails with [`ProviderError::Transport`] if a base URL is invalid or the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<TwilioClient, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| ProviderError::Transport(Box::new(err)))?;

        TwilioClient::from_parts(
            &self.config,
            &self.api_base,
            &self.verify_base,
            Arc::new(ReqwestTransport { client }),
        )
    }
}

#[derive(Clone)]
/// Twilio REST client bound to one account.
///
/// Sends messages through the Messages API and talks to the Verify API. Every call is a
/// single HTTP request; nothing is retried.
pub struct TwilioClient {
    auth: BasicAuth,
    from_number: PhoneNumber,
    service_sid: Option<ServiceSid>,
    messages_endpoint: Url,
    verify_base: Url,
    http: Arc<dyn HttpTransport>,
}

impl TwilioClient {
    /// Create a client with the default endpoints.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(config: &TwilioConfig) -> Result<Self, ProviderError> {
        TwilioClientBuilder::new(config).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(config: &TwilioConfig) -> TwilioClientBuilder {
        TwilioClientBuilder::new(config)
    }

    pub(crate) fn from_parts(
        config: &TwilioConfig,
        api_base: &str,
        verify_base: &str,
        http: Arc<dyn HttpTransport>,
    ) -> Result<Self, ProviderError> {
        let account_sid = config.account_sid().as_str();
        tracing::debug!(account_sid, "initializing Twilio REST client");

        let api_base = parse_base(api_base)?;
        let verify_base = parse_base(verify_base)?;
        let messages_endpoint =
            join_segments(&api_base, &["Accounts", account_sid, "Messages.json"]);

        tracing::info!(account_sid, "Twilio client initialized");
        Ok(Self {
            auth: BasicAuth {
                username: account_sid.to_owned(),
                password: config.auth_token().as_str().to_owned(),
            },
            from_number: config.from_number().clone(),
            service_sid: config.service_sid().cloned(),
            messages_endpoint,
            verify_base,
            http,
        })
    }

    /// Verify service taken from the configuration, if any.
    pub fn service_sid(&self) -> Option<&ServiceSid> {
        self.service_sid.as_ref()
    }

    /// Send an SMS through the Messages API.
    ///
    /// `from` overrides the configured origin number; `None` or an empty value falls back to it.
    ///
    /// Errors:
    /// - [`TwilioError::RateLimit`] when Twilio answers with code `20429`,
    /// - [`TwilioError::Api`] with the Twilio code for any other Twilio error,
    /// - [`TwilioError::Api`] with code `UNKNOWN` for transport or parse failures.
    ///
    /// A provider-side `error_code` on an accepted message is returned, not raised.
    pub async fn send_message(
        &self,
        to: &PhoneNumber,
        body: &str,
        from: Option<&str>,
    ) -> Result<MessageResponse, TwilioError> {
        let sender = from
            .filter(|value| !value.is_empty())
            .unwrap_or(self.from_number.as_str());
        tracing::info!(to = %to, sender, "sending SMS");

        let params = crate::transport::encode_create_message_form(to, sender, body);
        let result = self
            .post(&self.messages_endpoint, params)
            .await
            .and_then(|body| {
                crate::transport::decode_message_json_response(&body)
                    .map_err(|err| ProviderError::Parse(Box::new(err)))
            });

        match result {
            Ok(response) => {
                tracing::debug!(to = %to, sid = ?response.sid, "SMS sent successfully");
                Ok(response)
            }
            Err(err @ ProviderError::Rest { .. }) => {
                tracing::error!(to = %to, error = %err, code = ?err.code(), "Twilio API error");
                Err(err.into())
            }
            Err(err) => {
                tracing::error!(to = %to, error = %err, "unexpected error when sending SMS");
                Err(err.into())
            }
        }
    }

    /// Start a verification on the given Verify service.
    pub async fn create_verification(
        &self,
        service_sid: &ServiceSid,
        to: &PhoneNumber,
        channel: VerificationChannel,
    ) -> Result<VerificationResponse, ProviderError> {
        let url = join_segments(
            &self.verify_base,
            &["Services", service_sid.as_str(), "Verifications"],
        );
        tracing::debug!(
            to = %to,
            channel = channel.as_str(),
            "creating verification via Twilio API"
        );

        let params = crate::transport::encode_verification_form(to, channel);
        let body = self.post(&url, params).await?;
        crate::transport::decode_verification_json_response(&body)
            .map_err(|err| ProviderError::Parse(Box::new(err)))
    }

    /// Submit a code against an in-flight verification.
    pub async fn create_verification_check(
        &self,
        service_sid: &ServiceSid,
        to: &PhoneNumber,
        code: &str,
    ) -> Result<VerificationResponse, ProviderError> {
        let url = join_segments(
            &self.verify_base,
            &["Services", service_sid.as_str(), "VerificationCheck"],
        );
        tracing::debug!(to = %to, "checking verification via Twilio API");

        let params = crate::transport::encode_verification_check_form(to, code);
        let body = self.post(&url, params).await?;
        crate::transport::decode_verification_json_response(&body)
            .map_err(|err| ProviderError::Parse(Box::new(err)))
    }

    async fn post(
        &self,
        url: &Url,
        params: Vec<(String, String)>,
    ) -> Result<String, ProviderError> {
        let response = self
            .http
            .post_form(url.as_str(), &self.auth, params)
            .await
            .map_err(ProviderError::Transport)?;

        if !(200..=299).contains(&response.status) {
            return Err(crate::transport::decode_rest_error(
                response.status,
                response.retry_after,
                &response.body,
            ));
        }

        Ok(response.body)
    }
}

fn parse_base(value: &str) -> Result<Url, ProviderError> {
    let url = Url::parse(value).map_err(|err| ProviderError::Transport(Box::new(err)))?;
    if url.cannot_be_a_base() {
        return Err(ProviderError::Transport(
            format!("endpoint cannot be used as a base URL: {value}").into(),
        ));
    }
    Ok(url)
}

fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone)]
    pub(crate) struct RecordedRequest {
        pub(crate) url: String,
        pub(crate) username: String,
        pub(crate) params: Vec<(String, String)>,
    }

    #[derive(Debug, Clone)]
    pub(crate) enum FakeReply {
        Http {
            status: u16,
            retry_after: Option<String>,
            body: String,
        },
        Fail(String),
    }

    impl FakeReply {
        pub(crate) fn json(status: u16, body: impl Into<String>) -> Self {
            Self::Http {
                status,
                retry_after: None,
                body: body.into(),
            }
        }

        pub(crate) fn with_retry_after(self, value: &str) -> Self {
            match self {
                Self::Http { status, body, .. } => Self::Http {
                    status,
                    retry_after: Some(value.to_owned()),
                    body,
                },
                other => other,
            }
        }
    }

    #[derive(Debug, Clone, Default)]
    pub(crate) struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug, Default)]
    struct FakeTransportState {
        requests: Vec<RecordedRequest>,
        replies: VecDeque<FakeReply>,
    }

    impl FakeTransport {
        pub(crate) fn new(reply: FakeReply) -> Self {
            let transport = Self::default();
            transport.push(reply);
            transport
        }

        pub(crate) fn push(&self, reply: FakeReply) {
            self.state.lock().unwrap().replies.push_back(reply);
        }

        pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
            self.state.lock().unwrap().requests.clone()
        }

        pub(crate) fn last_request(&self) -> RecordedRequest {
            self.requests().pop().expect("no request recorded")
        }

        pub(crate) fn client(&self, config: &TwilioConfig) -> TwilioClient {
            TwilioClient::from_parts(
                config,
                "https://api.example.invalid/2010-04-01",
                "https://verify.example.invalid/v2",
                Arc::new(self.clone()),
            )
            .unwrap()
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            auth: &'a BasicAuth,
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let reply = {
                    let mut state = self.state.lock().unwrap();
                    state.requests.push(RecordedRequest {
                        url: url.to_owned(),
                        username: auth.username.clone(),
                        params,
                    });
                    state
                        .replies
                        .pop_front()
                        .unwrap_or_else(|| FakeReply::Fail("no reply queued".to_owned()))
                };
                match reply {
                    FakeReply::Http {
                        status,
                        retry_after,
                        body,
                    } => Ok(HttpResponse {
                        status,
                        retry_after,
                        body,
                    }),
                    FakeReply::Fail(message) => Err(message.into()),
                }
            })
        }
    }

    pub(crate) fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    pub(crate) fn config() -> TwilioConfig {
        TwilioConfig::new("AC123456789", "auth_token_123", "+1234567890").unwrap()
    }

    pub(crate) fn config_with_service() -> TwilioConfig {
        config().with_service_sid("VA123456789").unwrap()
    }
}
