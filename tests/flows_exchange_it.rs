// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::{Duration, OffsetDateTime};
// self
use oauth2_lark::{
	config::ClientConfig,
	context::CallContext,
	error::Error,
	flows::ReqwestLarkClient,
	obs::Phase,
	provider::ProviderDescriptor,
	url::Url,
};

const APP_ID: &str = "cli_mock";
const APP_SECRET: &str = "secret-mock";
const JSON_UTF8: &str = "application/json; charset=utf-8";

fn build_descriptor(server: &MockServer, limit: Option<usize>) -> ProviderDescriptor {
	let mut builder = ProviderDescriptor::builder()
		.open_apis_base(&server.url("/open-apis/"))
		.expect("Mock base URL should parse successfully.");

	if let Some(limit) = limit {
		builder = builder.response_body_limit(limit);
	}

	builder.build().expect("Provider descriptor should build successfully.")
}

fn build_client(server: &MockServer, limit: Option<usize>) -> ReqwestLarkClient {
	oauth2_lark::_preludet::build_reqwest_test_client(
		build_descriptor(server, limit),
		ClientConfig::new(APP_ID, APP_SECRET),
	)
}

async fn mock_app_token<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
	let body = json!({ "code": 0, "msg": "ok", "app_access_token": token, "expire": 7140 });

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/open-apis/auth/v3/app_access_token/internal")
				.header("content-type", JSON_UTF8)
				.json_body(json!({ "app_id": APP_ID, "app_secret": APP_SECRET }));
			then.status(200).header("content-type", "application/json").json_body(body.clone());
		})
		.await
}

#[tokio::test]
async fn exchange_code_runs_both_phases() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, None);
	let app = mock_app_token(&server, "a-1").await;
	let user = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/open-apis/authen/v1/access_token")
				.header("content-type", JSON_UTF8)
				.header("authorization", "Bearer a-1")
				.json_body(json!({ "grant_type": "authorization_code", "code": "c-1" }));
			then.status(200).header("content-type", "application/json").json_body(json!({
				"code": 0,
				"msg": "success",
				"data": {
					"access_token": "u-1",
					"refresh_token": "ur-1",
					"token_type": "Bearer",
					"expires_in": 7200,
					"refresh_expires_in": 2_592_000,
					"user_id": "u1",
					"name": "Ann"
				}
			}));
		})
		.await;
	let before = OffsetDateTime::now_utc();
	let token = client
		.exchange_code(&CallContext::new(), "c-1")
		.await
		.expect("Two-phase exchange should succeed.");
	let after = OffsetDateTime::now_utc();

	app.assert_calls_async(1).await;
	user.assert_calls_async(1).await;

	assert_eq!(token.access_token.secret(), "u-1");
	assert_eq!(token.refresh_token.as_ref().map(|t| t.secret().as_str()), Some("ur-1"));
	assert_eq!(token.authorization_header(), "Bearer u-1");
	assert!(token.expires_at >= before + Duration::seconds(7200));
	assert!(token.expires_at <= after + Duration::seconds(7200));
	assert!(token.refresh_expires_at.is_some());
	assert!(!token.is_expired());
}

#[tokio::test]
async fn app_token_rejection_skips_phase_two() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, None);
	let app = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-apis/auth/v3/app_access_token/internal");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "code": 10003, "msg": "invalid app_id" }));
		})
		.await;
	let user = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-apis/authen/v1/access_token");
			then.status(200).json_body(json!({ "code": 0, "data": { "access_token": "u-1" } }));
		})
		.await;
	let err = client
		.exchange_code(&CallContext::new(), "c-1")
		.await
		.expect_err("Rejected application credentials must fail the exchange.");

	assert!(matches!(
		err,
		Error::ProviderStatus { phase: Phase::AppAccessToken, code: 10003, ref message }
			if message == "invalid app_id"
	));

	app.assert_calls_async(1).await;
	user.assert_calls_async(0).await;
}

#[tokio::test]
async fn empty_app_token_is_missing_access_token() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, None);
	let _app = mock_app_token(&server, "").await;
	let err = client
		.fetch_app_access_token(&CallContext::new())
		.await
		.expect_err("Empty application token must be rejected.");

	assert!(matches!(err, Error::MissingAccessToken { phase: Phase::AppAccessToken }));
}

#[tokio::test]
async fn user_token_rejection_reports_phase_two() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, None);
	let _app = mock_app_token(&server, "a-2").await;
	let _user = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-apis/authen/v1/access_token");
			then.status(200).json_body(json!({ "code": 20007, "msg": "code expired", "data": {} }));
		})
		.await;
	let err = client
		.exchange_code(&CallContext::new(), "stale")
		.await
		.expect_err("Rejected authorization code must fail the exchange.");

	assert!(matches!(
		err,
		Error::ProviderStatus { phase: Phase::UserAccessToken, code: 20007, ref message }
			if message == "code expired"
	));
	assert_eq!(err.phase(), Some(Phase::UserAccessToken));
}

#[tokio::test]
async fn successful_envelope_without_user_token_is_rejected() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, None);
	let app_token = {
		let _app = mock_app_token(&server, "a-3").await;

		client
			.fetch_app_access_token(&CallContext::new())
			.await
			.expect("Phase one should succeed.")
	};

	assert_eq!(app_token.secret(), "a-3");

	let _user = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-apis/authen/v1/access_token");
			then.status(200).json_body(json!({ "code": 0, "data": { "expires_in": 7200 } }));
		})
		.await;
	let err = client
		.exchange_user_code(&CallContext::new(), "c-3", app_token)
		.await
		.expect_err("Missing user token must be rejected.");

	assert!(matches!(err, Error::MissingAccessToken { phase: Phase::UserAccessToken }));
}

#[tokio::test]
async fn non_success_http_status_is_reported() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, None);
	let _app = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-apis/auth/v3/app_access_token/internal");
			then.status(500).body("upstream exploded");
		})
		.await;
	let err = client
		.exchange_code(&CallContext::new(), "c-1")
		.await
		.expect_err("HTTP 500 must fail the exchange.");

	assert!(matches!(err, Error::HttpStatus { phase: Phase::AppAccessToken, status: 500 }));
}

#[tokio::test]
async fn malformed_envelope_is_a_decode_error() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, None);
	let _app = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-apis/auth/v3/app_access_token/internal");
			then.status(200).body("<html>maintenance</html>");
		})
		.await;
	let err = client
		.fetch_app_access_token(&CallContext::new())
		.await
		.expect_err("Non-JSON body must fail to decode.");

	assert!(matches!(err, Error::Decode { phase: Phase::AppAccessToken, .. }));
}

#[tokio::test]
async fn oversized_body_is_rejected_before_status_and_decode() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Some(64));
	let _app = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-apis/auth/v3/app_access_token/internal");
			then.status(502).body("x".repeat(65));
		})
		.await;
	let err = client
		.fetch_app_access_token(&CallContext::new())
		.await
		.expect_err("Oversized body must be rejected.");

	assert!(matches!(err, Error::BodyTooLarge { phase: Phase::AppAccessToken, limit: 64 }));
}

#[tokio::test]
async fn default_cap_rejects_one_byte_over_a_mebibyte() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, None);
	let _app = mock_app_token(&server, "a-4").await;
	let _user = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-apis/authen/v1/access_token");
			then.status(200).body(" ".repeat((1 << 20) + 1));
		})
		.await;
	let err = client
		.exchange_code(&CallContext::new(), "c-4")
		.await
		.expect_err("Body past the default cap must be rejected.");

	assert!(matches!(err, Error::BodyTooLarge { phase: Phase::UserAccessToken, limit: 1_048_576 }));
}

#[tokio::test]
async fn authorize_url_targets_the_descriptor_endpoint() {
	let server = MockServer::start_async().await;
	let descriptor = build_descriptor(&server, None);
	let config = ClientConfig::new(APP_ID, APP_SECRET)
		.with_redirect_uri(
			Url::parse("https://app.example.com/login/lark").expect("Redirect URI should parse."),
		)
		.with_scopes(["contact:user.email:readonly", "contact:user.id:readonly"]);
	let client = ReqwestLarkClient::new(descriptor, config);
	let request = client.start_authorization();
	let pairs = request.authorize_url.query_pairs().into_owned().collect::<Vec<_>>();

	assert_eq!(request.authorize_url.path(), "/open-apis/authen/v1/index");
	assert_eq!(
		pairs,
		vec![
			("response_type".to_owned(), "code".to_owned()),
			("app_id".to_owned(), APP_ID.to_owned()),
			("redirect_uri".to_owned(), "https://app.example.com/login/lark".to_owned()),
			(
				"scope".to_owned(),
				"contact:user.email:readonly contact:user.id:readonly".to_owned()
			),
			("state".to_owned(), request.state.clone()),
		]
	);
	assert!(request.validate_state(&request.state).is_ok());
	assert!(matches!(request.validate_state("forged"), Err(Error::StateMismatch)));
}
