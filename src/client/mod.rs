//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    AccessKeyId, AccessKeySecret, NormalizedResult, QuerySendDetails, SendBatchSms, SendSms,
    ValidationError, normalize,
};
use crate::transport::{self, RpcError, signing};

/// Base URL of the provider's RPC endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://dysmsapi.aliyuncs.com/";
/// Region every request is pinned to.
pub const REGION: &str = "cn-hangzhou";
pub const PRODUCT: &str = "Dysmsapi";
pub const API_VERSION: &str = "2017-05-25";

const SEND_SMS_ACTION: &str = "SendSms";
const SEND_BATCH_SMS_ACTION: &str = "SendBatchSms";
const QUERY_SEND_DETAILS_ACTION: &str = "QuerySendDetails";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A remote procedure call, ready to be signed and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    pub endpoint: Url,
    pub product: &'static str,
    pub version: &'static str,
    pub action: &'static str,
    pub method: reqwest::Method,
    pub query: Vec<(String, String)>,
}

/// Signs and delivers [`RpcRequest`]s.
///
/// Implementations return the body of a successful exchange, or an [`RpcError`]
/// carrying the provider's (or the transport's own) error code and message.
/// [`ReqwestRpcTransport`] is used unless the builder is given another one.
pub trait RpcTransport: Send + Sync {
    fn call<'a>(
        &'a self,
        credentials: &'a Credentials,
        request: RpcRequest,
    ) -> BoxFuture<'a, Result<String, RpcError>>;
}

/// [`RpcTransport`] backed by `reqwest`, signing with `ACS3-HMAC-SHA256`.
#[derive(Debug, Clone)]
pub struct ReqwestRpcTransport {
    client: reqwest::Client,
}

impl ReqwestRpcTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl RpcTransport for ReqwestRpcTransport {
    fn call<'a>(
        &'a self,
        credentials: &'a Credentials,
        request: RpcRequest,
    ) -> BoxFuture<'a, Result<String, RpcError>> {
        Box::pin(async move {
            let host = host_header(&request.endpoint)?;
            let date = chrono::Utc::now()
                .format("%Y-%m-%dT%H:%M:%SZ")
                .to_string();
            let nonce = uuid::Uuid::new_v4().simple().to_string();

            let signed = signing::sign(
                credentials.access_key_id().as_str(),
                credentials.access_key_secret().as_str(),
                &signing::SigningInput {
                    method: request.method.as_str(),
                    host: &host,
                    action: request.action,
                    version: request.version,
                    query: &request.query,
                    date: &date,
                    nonce: &nonce,
                },
            )
            .map_err(|err| RpcError::Client {
                code: transport::SDK_INVALID_REQUEST.to_owned(),
                message: err.to_string(),
            })?;

            let mut url = request.endpoint;
            if signed.query_string.is_empty() {
                url.set_query(None);
            } else {
                url.set_query(Some(&signed.query_string));
            }

            let mut builder = self.client.request(request.method, url);
            for (name, value) in signed.headers {
                builder = builder.header(name, value);
            }

            let response = builder.send().await.map_err(server_unreachable)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(server_unreachable)?;
            transport::classify_http_response(status, body)
        })
    }
}

fn host_header(endpoint: &Url) -> Result<String, RpcError> {
    let host = endpoint.host_str().ok_or_else(|| RpcError::Client {
        code: transport::SDK_INVALID_REQUEST.to_owned(),
        message: format!("endpoint has no host: {endpoint}"),
    })?;
    Ok(match endpoint.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    })
}

fn server_unreachable(err: reqwest::Error) -> RpcError {
    RpcError::Client {
        code: transport::SDK_SERVER_UNREACHABLE.to_owned(),
        message: err.to_string(),
    }
}

#[derive(Debug, Clone)]
/// AccessKey pair used to sign every request.
pub struct Credentials {
    access_key_id: AccessKeyId,
    access_key_secret: AccessKeySecret,
}

impl Credentials {
    /// Validate both halves of the key pair.
    ///
    /// Fails with [`DysmsError::MissingCredential`] when either is empty.
    pub fn new(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> Result<Self, DysmsError> {
        Ok(Self {
            access_key_id: AccessKeyId::new(access_key_id).map_err(missing_credential)?,
            access_key_secret: AccessKeySecret::new(access_key_secret)
                .map_err(missing_credential)?,
        })
    }

    pub fn access_key_id(&self) -> &AccessKeyId {
        &self.access_key_id
    }

    pub fn access_key_secret(&self) -> &AccessKeySecret {
        &self.access_key_secret
    }
}

fn missing_credential(err: ValidationError) -> DysmsError {
    match err {
        ValidationError::Empty { field } => DysmsError::MissingCredential { field },
        other => DysmsError::Validation(other),
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`DysmsClient`].
///
/// Provider and transport failures are not errors: they come back as a
/// [`NormalizedResult`] carrying the provider's code and message.
pub enum DysmsError {
    /// AccessKey id or secret is empty.
    #[error("missing credential: {field}")]
    MissingCredential { field: &'static str },

    /// A successful response had no `Code` or could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The underlying HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Clone)]
/// Builder for [`DysmsClient`].
///
/// Use this when you need to customize the endpoint, timeout, user-agent, or transport.
pub struct DysmsClientBuilder {
    credentials: Credentials,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn RpcTransport>>,
}

impl DysmsClientBuilder {
    /// Create a builder with the default endpoint and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Override the provider endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Send requests through an externally supplied signed-RPC transport.
    pub fn transport(mut self, transport: Arc<dyn RpcTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`DysmsClient`].
    pub fn build(self) -> Result<DysmsClient, DysmsError> {
        let endpoint = Url::parse(&self.endpoint)?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder.build().map_err(DysmsError::HttpClient)?;
                Arc::new(ReqwestRpcTransport::new(client))
            }
        };

        Ok(DysmsClient {
            credentials: self.credentials,
            endpoint,
            transport,
        })
    }
}

#[derive(Clone)]
/// High-level Alibaba Cloud SMS client.
///
/// Every operation resolves to a [`NormalizedResult`]: provider rejections and transport
/// failures included. Only a malformed success body surfaces as
/// [`DysmsError::InvalidResponse`].
pub struct DysmsClient {
    credentials: Credentials,
    endpoint: Url,
    transport: Arc<dyn RpcTransport>,
}

impl DysmsClient {
    /// Create a client with the default endpoint and HTTP settings.
    pub fn new(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> Result<Self, DysmsError> {
        Self::builder(Credentials::new(access_key_id, access_key_secret)?).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> DysmsClientBuilder {
        DysmsClientBuilder::new(credentials)
    }

    /// Send one templated message to one or more recipients (`SendSms`).
    pub async fn send_sms(&self, request: SendSms) -> Result<NormalizedResult, DysmsError> {
        let query = transport::encode_send_sms_query(REGION, &request);
        self.execute(SEND_SMS_ACTION, query).await
    }

    /// Send a templated message with per-recipient signs and variables (`SendBatchSms`).
    pub async fn send_batch_sms(
        &self,
        request: SendBatchSms,
    ) -> Result<NormalizedResult, DysmsError> {
        let query = transport::encode_send_batch_sms_query(REGION, &request);
        self.execute(SEND_BATCH_SMS_ACTION, query).await
    }

    /// Query delivery records for one recipient and day (`QuerySendDetails`).
    pub async fn query_send_details(
        &self,
        request: QuerySendDetails,
    ) -> Result<NormalizedResult, DysmsError> {
        let query = transport::encode_query_send_details_query(REGION, &request);
        self.execute(QUERY_SEND_DETAILS_ACTION, query).await
    }

    async fn execute(
        &self,
        action: &'static str,
        query: Vec<(String, String)>,
    ) -> Result<NormalizedResult, DysmsError> {
        tracing::debug!(action, params = query.len(), "dispatching request");

        let request = RpcRequest {
            endpoint: self.endpoint.clone(),
            product: PRODUCT,
            version: API_VERSION,
            action,
            method: reqwest::Method::POST,
            query,
        };

        let body = match self.transport.call(&self.credentials, request).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(action, code = err.code(), "provider call failed: {}", err.message());
                return Ok(NormalizedResult::from_provider(err.code(), err.message()));
            }
        };

        let raw = transport::decode_rpc_response(&body).map_err(|err| {
            tracing::error!(action, "undecodable response: {err}");
            DysmsError::InvalidResponse(Box::new(err))
        })?;
        tracing::debug!(
            action,
            request_id = raw.request_id.as_deref(),
            biz_id = raw.biz_id.as_deref(),
            "response received"
        );

        normalize(&raw).map_err(|err| {
            tracing::error!(action, request_id = raw.request_id.as_deref(), "{err}");
            DysmsError::InvalidResponse(Box::new(err))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::domain::{
        BatchSignNames, BatchTemplateParams, QueryOptions, RawPhoneNumber, ResponseError,
        ResultCode, SendDate, SendOptions, SignName, TemplateCode, TemplateParams,
    };

    use super::*;

    #[derive(Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    struct FakeTransportState {
        calls: usize,
        last_request: Option<RpcRequest>,
        last_key_id: Option<String>,
        response: Result<String, RpcError>,
    }

    impl FakeTransport {
        fn new(response: Result<String, RpcError>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    calls: 0,
                    last_request: None,
                    last_key_id: None,
                    response,
                })),
            }
        }

        fn ok(body: impl Into<String>) -> Self {
            Self::new(Ok(body.into()))
        }

        fn last_request(&self) -> RpcRequest {
            self.state.lock().unwrap().last_request.clone().unwrap()
        }

        fn calls(&self) -> usize {
            self.state.lock().unwrap().calls
        }
    }

    impl RpcTransport for FakeTransport {
        fn call<'a>(
            &'a self,
            credentials: &'a Credentials,
            request: RpcRequest,
        ) -> BoxFuture<'a, Result<String, RpcError>> {
            Box::pin(async move {
                let mut state = self.state.lock().unwrap();
                state.calls += 1;
                state.last_request = Some(request);
                state.last_key_id = Some(credentials.access_key_id().as_str().to_owned());
                state.response.clone()
            })
        }
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn make_client(transport: FakeTransport) -> DysmsClient {
        DysmsClient {
            credentials: Credentials::new("test_id", "test_secret").unwrap(),
            endpoint: Url::parse("https://example.invalid/").unwrap(),
            transport: Arc::new(transport),
        }
    }

    fn send_sms_request() -> SendSms {
        SendSms::new(
            SignName::new("阿里云短信测试").unwrap(),
            TemplateCode::new("SMS_0001").unwrap(),
            vec![RawPhoneNumber::new("12345678901").unwrap()],
            SendOptions {
                template_params: Some(TemplateParams::new().with("code", "12345")),
                out_id: None,
            },
        )
        .unwrap()
    }

    fn query_request() -> QuerySendDetails {
        QuerySendDetails::new(
            RawPhoneNumber::new("12345678901").unwrap(),
            SendDate::parse("20210101").unwrap(),
            QueryOptions::default(),
        )
    }

    #[tokio::test]
    async fn send_sms_maps_ok_response_to_success() {
        let json = r#"
        {
          "Message": "OK",
          "RequestId": "F655A8D5-B967-440B-8683-DAD6FF8DE990",
          "Code": "OK",
          "BizId": "900619746936498440^0"
        }
        "#;
        let transport = FakeTransport::ok(json);
        let client = make_client(transport.clone());

        let result = client.send_sms(send_sms_request()).await.unwrap();
        assert_eq!(result, NormalizedResult::success());

        let request = transport.last_request();
        assert_eq!(request.action, "SendSms");
        assert_eq!(request.product, "Dysmsapi");
        assert_eq!(request.version, "2017-05-25");
        assert_eq!(request.method, reqwest::Method::POST);
        assert_eq!(request.endpoint.as_str(), "https://example.invalid/");
        assert_param(&request.query, "RegionId", "cn-hangzhou");
        assert_param(&request.query, "PhoneNumbers", "12345678901");
        assert_param(&request.query, "SignName", "阿里云短信测试");
        assert_param(&request.query, "TemplateCode", "SMS_0001");
        assert_param(&request.query, "TemplateParam", r#"{"code":"12345"}"#);
        assert_eq!(
            transport.state.lock().unwrap().last_key_id.as_deref(),
            Some("test_id")
        );
    }

    #[tokio::test]
    async fn send_sms_maps_known_provider_code_to_table_entry() {
        let json = r#"
        {
          "Message": "触发分钟级流控Permits:1",
          "RequestId": "2184201F-BFB3-446B-B1F2-C746B7BF0657",
          "Code": "isv.BUSINESS_LIMIT_CONTROL"
        }
        "#;
        let client = make_client(FakeTransport::ok(json));

        let result = client.send_sms(send_sms_request()).await.unwrap();
        assert_eq!(result.code, ResultCode::Numeric(429));
        assert_ne!(result.message, "触发分钟级流控Permits:1");
    }

    #[tokio::test]
    async fn send_sms_passes_unknown_provider_code_through() {
        let json = r#"{"Code":"isv.SOMETHING_NEW","Message":"new failure"}"#;
        let client = make_client(FakeTransport::ok(json));

        let result = client.send_sms(send_sms_request()).await.unwrap();
        assert_eq!(
            result,
            NormalizedResult::new(
                ResultCode::Provider("isv.SOMETHING_NEW".to_owned()),
                "new failure"
            )
        );
    }

    #[tokio::test]
    async fn send_sms_maps_transport_failure_to_result() {
        let transport = FakeTransport::new(Err(RpcError::Client {
            code: "SDK.ServerUnreachable".to_owned(),
            message: "connection refused".to_owned(),
        }));
        let client = make_client(transport);

        let result = client.send_sms(send_sms_request()).await.unwrap();
        assert_eq!(
            result,
            NormalizedResult::new(
                ResultCode::Provider("SDK.ServerUnreachable".to_owned()),
                "connection refused"
            )
        );
    }

    #[tokio::test]
    async fn send_sms_rejects_response_without_code() {
        let client = make_client(FakeTransport::ok(r#"{"Message":"OK"}"#));

        let err = client.send_sms(send_sms_request()).await.unwrap_err();
        match err {
            DysmsError::InvalidResponse(source) => {
                assert_eq!(
                    source.downcast_ref::<ResponseError>(),
                    Some(&ResponseError::MissingCode)
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_sms_rejects_undecodable_response() {
        let client = make_client(FakeTransport::ok("{ not json }"));

        let err = client.send_sms(send_sms_request()).await.unwrap_err();
        assert!(matches!(err, DysmsError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn send_batch_sms_sends_json_encoded_fields() {
        let transport = FakeTransport::ok(r#"{"Code":"OK","Message":"OK"}"#);
        let client = make_client(transport.clone());

        let request = SendBatchSms::new(
            BatchSignNames::Shared(SignName::new("Acme").unwrap()),
            TemplateCode::new("SMS_0001").unwrap(),
            vec![
                RawPhoneNumber::new("123").unwrap(),
                RawPhoneNumber::new("456").unwrap(),
            ],
            Some(BatchTemplateParams::Shared(
                TemplateParams::new().with("code", "9999"),
            )),
        )
        .unwrap();

        let result = client.send_batch_sms(request).await.unwrap();
        assert!(result.is_success());

        let request = transport.last_request();
        assert_eq!(request.action, "SendBatchSms");
        assert_param(&request.query, "PhoneNumberJson", r#"["123","456"]"#);
        assert_param(&request.query, "SignNameJson", r#""Acme""#);
        assert_param(&request.query, "TemplateParamJson", r#"{"code":"9999"}"#);
    }

    #[tokio::test]
    async fn query_send_details_maps_server_failure_to_result() {
        let transport = FakeTransport::new(Err(RpcError::Server {
            code: "InvalidDateFormat".to_owned(),
            message: "bad date".to_owned(),
            request_id: None,
        }));
        let client = make_client(transport.clone());

        let result = client.query_send_details(query_request()).await.unwrap();
        assert_eq!(
            result,
            NormalizedResult::new(
                ResultCode::Provider("InvalidDateFormat".to_owned()),
                "bad date"
            )
        );

        let request = transport.last_request();
        assert_eq!(request.action, "QuerySendDetails");
        assert_param(&request.query, "PhoneNumber", "12345678901");
        assert_param(&request.query, "SendDate", "20210101");
        assert_param(&request.query, "PageSize", "10");
        assert_param(&request.query, "CurrentPage", "1");
        assert!(request.query.iter().all(|(k, _)| k != "BizId"));
    }

    #[tokio::test]
    async fn query_send_details_maps_ok_response_to_success() {
        let json = r#"
        {
          "TotalCount": 1,
          "Message": "OK",
          "RequestId": "819BE656-D2E0-4858-8B21-B2E477085AAF",
          "SmsSendDetailDTOs": {"SmsSendDetailDTO": []},
          "Code": "OK"
        }
        "#;
        let client = make_client(FakeTransport::ok(json));

        let result = client.query_send_details(query_request()).await.unwrap();
        assert!(result.is_success());
    }

    #[test]
    fn empty_credentials_fail_before_any_call() {
        let transport = FakeTransport::ok("{}");

        let err = Credentials::new("", "secret").unwrap_err();
        assert!(matches!(
            err,
            DysmsError::MissingCredential {
                field: AccessKeyId::FIELD
            }
        ));
        let err = Credentials::new("id", "").unwrap_err();
        assert!(matches!(
            err,
            DysmsError::MissingCredential {
                field: AccessKeySecret::FIELD
            }
        ));
        assert!(matches!(
            DysmsClient::new("  ", "secret"),
            Err(DysmsError::MissingCredential { .. })
        ));

        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn builder_applies_endpoint_and_custom_transport() {
        let credentials = Credentials::new("id", "secret").unwrap();
        let client = DysmsClient::builder(credentials.clone())
            .endpoint("https://example.invalid/custom/")
            .transport(Arc::new(FakeTransport::ok("{}")))
            .build()
            .unwrap();
        assert_eq!(client.endpoint.as_str(), "https://example.invalid/custom/");

        let err = DysmsClient::builder(credentials)
            .endpoint("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, DysmsError::InvalidEndpoint(_)));
    }

    #[test]
    fn default_client_uses_provider_endpoint() {
        let client = DysmsClient::new("id", "secret").unwrap();
        assert_eq!(client.endpoint.as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn host_header_keeps_non_default_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(host_header(&url).unwrap(), "127.0.0.1:8080");

        let url = Url::parse(DEFAULT_ENDPOINT).unwrap();
        assert_eq!(host_header(&url).unwrap(), "dysmsapi.aliyuncs.com");
    }
}
