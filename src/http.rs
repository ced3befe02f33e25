//! Connector contract between role-store clients and an HTTP stack.
//!
//! The role-store client only ever speaks four verbs over JSON values, so any transport that
//! can implement [`Connector`] (a reqwest client, a recording fake, a proxy) can back it.
//! Retry, backoff, TLS, and timeouts are the connector's business; the SDK surfaces whatever
//! error the connector returns.

// self
use crate::{_prelude::*, error::ConfigError};
#[cfg(feature = "reqwest")]
use crate::error::{CodecError, TransportError};

/// Boxed future returned by [`Connector`] verbs.
pub type ConnectorFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Generic REST verbs consumed by [`RoleStore`](crate::rolestore::RoleStore).
pub trait Connector
where
	Self: Send + Sync,
{
	/// Fetches the resource at `path` and returns its JSON body (`Null` when empty).
	fn get<'a>(&'a self, path: &'a ApiPath) -> ConnectorFuture<'a, Value>;

	/// Posts `body` to `path` and returns the JSON response body (`Null` when empty).
	fn post<'a>(&'a self, path: &'a ApiPath, body: Value) -> ConnectorFuture<'a, Value>;

	/// Replaces the resource at `path` with `body`.
	fn put<'a>(&'a self, path: &'a ApiPath, body: Value) -> ConnectorFuture<'a, ()>;

	/// Deletes the resource at `path`.
	fn delete<'a>(&'a self, path: &'a ApiPath) -> ConnectorFuture<'a, ()>;
}

/// REST resource path kept as raw segments until it is rendered onto a base URL.
///
/// Segments are percent-escaped by [`ApiPath::to_url`], so identifiers may contain `/`, spaces,
/// or any other character without changing the resource they address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiPath(Vec<String>);
impl ApiPath {
	/// Builds a path from literal segments.
	pub fn new<I, S>(segments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(segments.into_iter().map(Into::into).collect())
	}

	/// Appends one segment (typically an identifier).
	pub fn join(mut self, segment: impl AsRef<str>) -> Self {
		self.0.push(segment.as_ref().to_owned());

		self
	}

	/// Appends the escaped segments to `base`, keeping any path prefix it already has.
	pub fn to_url(&self, base: &Url) -> Result<Url> {
		let mut url = base.clone();

		url.path_segments_mut()
			.map_err(|()| ConfigError::BaseUrlCannotBeABase { url: base.to_string() })?
			.pop_if_empty()
			.extend(&self.0);

		Ok(url)
	}
}
impl Display for ApiPath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		for segment in &self.0 {
			write!(f, "/{segment}")?;
		}

		Ok(())
	}
}

/// [`Connector`] backed by a [`ReqwestClient`] and a directory base URL.
///
/// Request bodies are sent as `application/json`; a bearer token, when configured, is attached
/// to every request. Non-2xx responses become [`Error::Status`].
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestConnector {
	client: ReqwestClient,
	base_url: Url,
	bearer_token: Option<crate::credential::Secret>,
}
#[cfg(feature = "reqwest")]
impl ReqwestConnector {
	/// Creates a connector with a default [`ReqwestClient`].
	pub fn new(base_url: &str) -> Result<Self> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::http_client_build)?;

		Self::with_client(client, base_url)
	}

	/// Wraps an existing [`ReqwestClient`] (custom TLS roots, timeouts, proxies).
	pub fn with_client(client: ReqwestClient, base_url: &str) -> Result<Self> {
		let base_url =
			Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		if base_url.cannot_be_a_base() {
			return Err(ConfigError::BaseUrlCannotBeABase { url: base_url.to_string() }.into());
		}

		Ok(Self { client, base_url, bearer_token: None })
	}

	/// Attaches `Authorization: Bearer <token>` to every request.
	pub fn with_bearer_token(mut self, token: impl Into<crate::credential::Secret>) -> Self {
		self.bearer_token = Some(token.into());

		self
	}

	/// Directory base URL every [`ApiPath`] is rendered onto.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	async fn send(
		&self,
		method: reqwest::Method,
		verb: &'static str,
		path: &ApiPath,
		body: Option<Value>,
	) -> Result<Vec<u8>> {
		use reqwest::header::{CONTENT_TYPE, HeaderValue};

		let url = path.to_url(&self.base_url)?;
		let mut request = self.client.request(method, url);

		if let Some(token) = &self.bearer_token {
			request = request.bearer_auth(token.expose());
		}
		if let Some(body) = body {
			let bytes = serde_json::to_vec(&body).map_err(CodecError::Encode)?;

			request = request
				.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
				.body(bytes);
		}

		let response = request
			.send()
			.await
			.map_err(|e| TransportError::network(verb, path.to_string(), e))?;
		let status = response.status();

		if !status.is_success() {
			let body = response.text().await.ok().filter(|text| !text.is_empty());

			return Err(Error::Status {
				method: verb,
				path: path.to_string(),
				status: status.as_u16(),
				body,
			});
		}

		let bytes = response
			.bytes()
			.await
			.map_err(|e| TransportError::network(verb, path.to_string(), e))?;

		Ok(bytes.to_vec())
	}

	async fn send_json(
		&self,
		method: reqwest::Method,
		verb: &'static str,
		path: &ApiPath,
		body: Option<Value>,
	) -> Result<Value> {
		let bytes = self.send(method, verb, path, body).await?;

		parse_body(&bytes)
	}
}
#[cfg(feature = "reqwest")]
impl Debug for ReqwestConnector {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ReqwestConnector")
			.field("base_url", &self.base_url.as_str())
			.field("bearer_token_set", &self.bearer_token.is_some())
			.finish()
	}
}
#[cfg(feature = "reqwest")]
impl Connector for ReqwestConnector {
	fn get<'a>(&'a self, path: &'a ApiPath) -> ConnectorFuture<'a, Value> {
		Box::pin(self.send_json(reqwest::Method::GET, "GET", path, None))
	}

	fn post<'a>(&'a self, path: &'a ApiPath, body: Value) -> ConnectorFuture<'a, Value> {
		Box::pin(self.send_json(reqwest::Method::POST, "POST", path, Some(body)))
	}

	fn put<'a>(&'a self, path: &'a ApiPath, body: Value) -> ConnectorFuture<'a, ()> {
		Box::pin(async move {
			self.send(reqwest::Method::PUT, "PUT", path, Some(body)).await?;

			Ok(())
		})
	}

	fn delete<'a>(&'a self, path: &'a ApiPath) -> ConnectorFuture<'a, ()> {
		Box::pin(async move {
			self.send(reqwest::Method::DELETE, "DELETE", path, None).await?;

			Ok(())
		})
	}
}

/// Empty bodies decode as `Null` so verbs without a response payload stay infallible.
#[cfg(feature = "reqwest")]
fn parse_body(bytes: &[u8]) -> Result<Value> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}

	serde_json::from_slice(bytes).map_err(|e| CodecError::MalformedBody(e).into())
}
