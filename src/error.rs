//! SDK-level error types shared by credential resolution, connectors, and role-store calls.

// self
use crate::_prelude::*;

/// SDK-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical SDK error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Request or response body could not be (de)serialized.
	#[error(transparent)]
	Codec(#[from] CodecError),

	/// The directory answered with a non-success HTTP status.
	#[error("{method} {path} failed with HTTP status {status}.")]
	Status {
		/// HTTP verb of the failed call.
		method: &'static str,
		/// Rendered resource path of the failed call.
		path: String,
		/// HTTP status code returned by the directory.
		status: u16,
		/// Response body, when it could be read.
		body: Option<String>,
	},
	/// An in-process directory has no record for the requested identifier.
	#[error("{resource} `{id}` was not found.")]
	NotFound {
		/// Resource kind (user, role, source).
		resource: &'static str,
		/// Identifier that was looked up.
		id: String,
	},
}

impl From<crate::rolestore::IdentifierError> for Error {
	fn from(e: crate::rolestore::IdentifierError) -> Self {
		Self::Config(e.into())
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A config file explicitly requested by the caller could not be read.
	#[error("Config file {} could not be read.", .path.display())]
	Read {
		/// Path handed to the resolver.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
	/// Connector base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Connector base URL cannot carry path segments (e.g. `mailto:`).
	#[error("Base URL `{url}` cannot carry resource paths.")]
	BaseUrlCannotBeABase {
		/// Offending base URL.
		url: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// An identifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::rolestore::IdentifierError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {method} {path}.")]
	Network {
		/// HTTP verb of the failed call.
		method: &'static str,
		/// Rendered resource path of the failed call.
		path: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error for the given call.
	pub fn network(
		method: &'static str,
		path: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { method, path: path.into(), source: Box::new(src) }
	}
}

/// Body encoding and decoding failures.
#[derive(Debug, ThisError)]
pub enum CodecError {
	/// Request payload could not be encoded as JSON.
	#[error("Request body could not be encoded as JSON.")]
	Encode(#[source] serde_json::Error),
	/// Response body is not valid JSON.
	#[error("Response body is not valid JSON.")]
	MalformedBody(#[source] serde_json::Error),
	/// Response JSON does not match the expected shape.
	#[error("Response JSON does not match the expected shape at `{}`.", .0.path())]
	UnexpectedShape(#[source] serde_path_to_error::Error<serde_json::Error>),
}
