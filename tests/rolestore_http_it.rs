// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use privx_sdk::{
	error::{CodecError, Error},
	http::ReqwestConnector,
	reqwest::Client,
	rolestore::{NewRole, Reconciliation, Role, RoleId, RoleReconciler, RoleStore, UserId},
};

const TOKEN: &str = "test-bearer-token";
const USER_ROLES: &str = "/role-store/api/v1/users/u-1/roles";

// The mock server runs with a self-signed certificate.
fn build_client() -> Client {
	Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.")
}

fn build_store(server: &MockServer) -> RoleStore<ReqwestConnector> {
	let connector = ReqwestConnector::with_client(build_client(), &server.base_url())
		.expect("Mock server URL should be a valid base.")
		.with_bearer_token(TOKEN);

	RoleStore::new(connector)
}

fn user(id: &str) -> UserId {
	UserId::new(id).expect("User fixture should be valid.")
}

fn role(id: &str) -> RoleId {
	RoleId::new(id).expect("Role fixture should be valid.")
}

#[tokio::test]
async fn user_roles_sends_bearer_token() -> color_eyre::Result<()> {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(USER_ROLES).header("authorization", format!("Bearer {TOKEN}"));
			then.status(200).json_body(json!({
				"count": 1,
				"items": [{ "id": "r-1", "name": "admins", "explicit": true, "implicit": false }]
			}));
		})
		.await;
	let roles = build_store(&server).user_roles(&user("u-1")).await?;

	mock.assert_async().await;
	assert_eq!(roles.len(), 1);
	assert_eq!(roles[0].name.as_deref(), Some("admins"));
	assert_eq!(roles[0].attributes.get("implicit"), Some(&json!(false)));

	Ok(())
}

#[tokio::test]
async fn add_user_role_writes_full_set_once() {
	let server = MockServer::start_async().await;
	let read = server
		.mock_async(|when, then| {
			when.method(GET).path(USER_ROLES);
			then.status(200).json_body(json!({
				"count": 1,
				"items": [{ "id": "r-0", "explicit": false, "source_rules": { "match": "ANY" } }]
			}));
		})
		.await;
	let lookup = server
		.mock_async(|when, then| {
			when.method(GET).path("/role-store/api/v1/roles/r-1");
			then.status(200).json_body(json!({ "id": "r-1", "name": "admins" }));
		})
		.await;
	let write = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path(USER_ROLES)
				.header("content-type", "application/json")
				.json_body(json!([
					{ "id": "r-0", "explicit": false, "source_rules": { "match": "ANY" } },
					{ "id": "r-1", "explicit": true }
				]));
			then.status(200);
		})
		.await;
	let reconciler = RoleReconciler::<RoleStore<ReqwestConnector>>::new(build_store(&server));
	let outcome = reconciler
		.add_user_role(&user("u-1"), &role("r-1"))
		.await
		.expect("Grant should succeed against the mock directory.");

	assert_eq!(outcome, Reconciliation::Updated);

	read.assert_calls_async(1).await;
	lookup.assert_calls_async(1).await;
	write.assert_calls_async(1).await;
}

#[tokio::test]
async fn remove_of_absent_role_issues_no_put() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path(USER_ROLES);
			then.status(200).json_body(json!({ "count": 1, "items": [{ "id": "r-0" }] }));
		})
		.await;

	let write = server
		.mock_async(|when, then| {
			when.method(PUT).path(USER_ROLES);
			then.status(200);
		})
		.await;
	let outcome = RoleReconciler::<RoleStore<ReqwestConnector>>::new(build_store(&server))
		.remove_user_role(&user("u-1"), &role("r-9"))
		.await
		.expect("Revoking an absent role should succeed.");

	assert_eq!(outcome, Reconciliation::Unchanged);

	write.assert_calls_async(0).await;
}

#[tokio::test]
async fn unknown_role_maps_to_status_error() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/role-store/api/v1/roles/ghost");
			then.status(404).body("role not found");
		})
		.await;

	let err = build_store(&server).role(&role("ghost")).await.expect_err("404 must fail.");

	match err {
		Error::Status { method, path, status, body } => {
			assert_eq!(method, "GET");
			assert_eq!(path, "/role-store/api/v1/roles/ghost");
			assert_eq!(status, 404);
			assert_eq!(body.as_deref(), Some("role not found"));
		},
		other => panic!("Unexpected error: {other:?}"),
	}
}

#[tokio::test]
async fn malformed_body_maps_to_codec_error() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/role-store/api/v1/roles");
			then.status(200).body("<html>maintenance</html>");
		})
		.await;

	let err = build_store(&server).roles().await.expect_err("HTML must not decode.");

	assert!(matches!(err, Error::Codec(CodecError::MalformedBody(_))));
}

#[tokio::test]
async fn resolve_roles_posts_names() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/role-store/api/v1/roles/resolve")
				.json_body(json!(["admins", "auditors"]));
			then.status(200).json_body(json!({
				"count": 2,
				"items": [{ "id": "r-2", "name": "auditors" }, { "id": "r-1", "name": "admins" }]
			}));
		})
		.await;
	let refs = RoleReconciler::<RoleStore<ReqwestConnector>>::new(build_store(&server))
		.resolve_roles(["admins", "auditors"])
		.await
		.expect("Resolution should succeed.");

	mock.assert_async().await;
	assert_eq!(refs[0].id, role("r-2"), "Directory order is returned unchanged.");
	assert_eq!(refs[1].name, "admins");
}

#[tokio::test]
async fn empty_resolve_skips_the_network() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.any_request();
			then.status(500);
		})
		.await;
	let refs = RoleReconciler::<RoleStore<ReqwestConnector>>::new(build_store(&server))
		.resolve_roles(Vec::<String>::new())
		.await
		.expect("Empty resolution should succeed.");

	assert!(refs.is_empty());

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn replace_user_roles_accepts_empty_response() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(PUT).path(USER_ROLES).json_body(json!([]));
			then.status(204);
		})
		.await;

	build_store(&server)
		.replace_user_roles(&user("u-1"), &Vec::<Role>::new())
		.await
		.expect("An empty 204 response should be accepted.");

	mock.assert_async().await;
}

#[tokio::test]
async fn identifiers_are_escaped_on_the_wire() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/role-store/api/v1/users/ldap%2Falice%20b/roles");
			then.status(200).json_body(json!({ "count": 0, "items": [] }));
		})
		.await;
	let roles = build_store(&server)
		.user_roles(&user("ldap/alice b"))
		.await
		.expect("Escaped identifier should reach the user roles resource.");

	mock.assert_async().await;
	assert!(roles.is_empty());
}

#[tokio::test]
async fn create_role_posts_without_id() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/role-store/api/v1/roles")
				.json_body(json!({ "name": "auditors" }));
			then.status(201).json_body(json!({ "id": "assigned-by-server" }));
		})
		.await;
	let id = build_store(&server)
		.create_role(&NewRole::named("auditors"))
		.await
		.expect("Role creation should return the assigned id.");

	mock.assert_async().await;
	assert_eq!(id, role("assigned-by-server"));
}

#[tokio::test]
async fn unreadable_role_set_blocks_the_write() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path(USER_ROLES);
			then.status(200)
				.json_body(json!({ "count": 2, "items": [{ "id": "r-0" }, { "id": "" }] }));
		})
		.await;

	let write = server
		.mock_async(|when, then| {
			when.method(PUT).path(USER_ROLES);
			then.status(200);
		})
		.await;
	let err = RoleReconciler::<RoleStore<ReqwestConnector>>::new(build_store(&server))
		.remove_user_role(&user("u-1"), &role("r-0"))
		.await
		.expect_err("A role set with an invalid entry must not be rewritten.");

	assert!(matches!(err, Error::Codec(CodecError::UnexpectedShape(_))));

	write.assert_calls_async(0).await;
}
