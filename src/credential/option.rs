//! Ordered configuration options folded over a [`Credential`].

// self
use crate::{
	_prelude::*,
	credential::{
		Credential, Secret,
		file::ConfigDocument,
		source::{Environment, FileReader},
	},
	error::ConfigError,
	obs,
};

/// Environment variable prefix used by [`ConfigOption::environment`].
pub const DEFAULT_ENV_PREFIX: &str = "PRIVX";

const ENV_API_CLIENT_ID: &str = "API_CLIENT_ID";
const ENV_API_CLIENT_SECRET: &str = "API_CLIENT_SECRET";
const ENV_OAUTH_CLIENT_ID: &str = "API_OAUTH_CLIENT_ID";
const ENV_OAUTH_CLIENT_SECRET: &str = "API_OAUTH_CLIENT_SECRET";

/// A single credential source. Options only see the accumulated [`Credential`], never each
/// other, so callers control precedence purely by ordering: later options overwrite any field
/// they set.
///
/// # Config file error policy
///
/// [`ConfigOption::ConfigFile`] is asymmetric on purpose. A file the caller explicitly named
/// but that cannot be read aborts resolution with [`ConfigError::Read`]. A file that reads fine
/// but does not parse is skipped, leaving the fields to other options.
#[derive(Clone, PartialEq, Eq)]
pub enum ConfigOption {
	/// Sets the access key when present.
	Access(Option<String>),
	/// Sets the secret key when present.
	Secret(Option<Secret>),
	/// Sets the digest when both halves of the OAuth pair are present.
	Digest {
		/// OAuth client identifier.
		access: Option<String>,
		/// OAuth client secret.
		secret: Option<Secret>,
	},
	/// Reads the `[auth]` table of a TOML file when a path is present.
	ConfigFile(Option<PathBuf>),
	/// Reads `{prefix}_API_CLIENT_ID` and friends from the environment.
	Environment {
		/// Variable name prefix, `PRIVX` by default.
		prefix: String,
	},
}
impl ConfigOption {
	/// Sets the access key if `value` is present; no-op otherwise.
	pub fn access(value: Option<&str>) -> Self {
		Self::Access(value.map(str::to_owned))
	}

	/// Sets the secret key if `value` is present; no-op otherwise.
	pub fn secret(value: Option<&str>) -> Self {
		Self::Secret(value.map(Secret::from))
	}

	/// Sets the digest of the OAuth pair if both halves are present; no-op otherwise.
	pub fn digest(access: Option<&str>, secret: Option<&str>) -> Self {
		Self::Digest { access: access.map(str::to_owned), secret: secret.map(Secret::from) }
	}

	/// Reads credentials from a TOML config file if `path` is present; no-op otherwise.
	pub fn config_file(path: Option<&Path>) -> Self {
		Self::ConfigFile(path.map(Path::to_path_buf))
	}

	/// Reads credentials from the `PRIVX_*` environment variables.
	pub fn environment() -> Self {
		Self::environment_with_prefix(DEFAULT_ENV_PREFIX)
	}

	/// Reads credentials from `{prefix}_API_*` environment variables.
	pub fn environment_with_prefix(prefix: impl Into<String>) -> Self {
		Self::Environment { prefix: prefix.into() }
	}

	/// Applies the option to `credential`, returning the updated value.
	///
	/// Only [`ConfigOption::ConfigFile`] can fail, and only when the file cannot be read.
	pub fn apply(
		&self,
		mut credential: Credential,
		files: &dyn FileReader,
		env: &dyn Environment,
	) -> Result<Credential> {
		match self {
			Self::Access(value) =>
				if let Some(value) = value {
					credential.access = value.clone();
				},
			Self::Secret(value) =>
				if let Some(value) = value {
					credential.secret = value.clone();
				},
			Self::Digest { access, secret } =>
				if let (Some(access), Some(secret)) = (access, secret) {
					credential.digest = digest_of(access, secret.expose());
				},
			Self::ConfigFile(path) =>
				if let Some(path) = path {
					credential = apply_config_file(credential, path, files)?;
				},
			Self::Environment { prefix } => credential = apply_environment(credential, prefix, env),
		}

		Ok(credential)
	}
}
impl Debug for ConfigOption {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Access(value) => f.debug_tuple("Access").field(value).finish(),
			Self::Secret(value) => f.debug_tuple("Secret").field(value).finish(),
			Self::Digest { access, secret } =>
				f.debug_struct("Digest").field("access", access).field("secret", secret).finish(),
			Self::ConfigFile(path) => f.debug_tuple("ConfigFile").field(path).finish(),
			Self::Environment { prefix } =>
				f.debug_struct("Environment").field("prefix", prefix).finish(),
		}
	}
}

/// Base64 (standard alphabet, padded) of `"access:secret"`.
pub fn digest_of(access: &str, secret: &str) -> Secret {
	use base64::{Engine, engine::general_purpose::STANDARD};

	Secret::new(STANDARD.encode(format!("{access}:{secret}")))
}

fn apply_config_file(
	mut credential: Credential,
	path: &Path,
	files: &dyn FileReader,
) -> Result<Credential> {
	let bytes = files
		.read(path)
		.map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
	let doc = match ConfigDocument::parse(&bytes) {
		Ok(doc) => doc,
		Err(failure) => {
			obs::config_file_skipped(path, &failure);

			return Ok(credential);
		},
	};

	if let Some(access) = doc.auth.api_client_id() {
		credential.access = access.to_owned();
	}
	if let Some(secret) = doc.auth.api_client_secret() {
		credential.secret = Secret::from(secret);
	}
	if let Some((access, secret)) = doc.auth.oauth_pair() {
		credential.digest = digest_of(access, secret);
	}

	Ok(credential)
}

fn apply_environment(
	mut credential: Credential,
	prefix: &str,
	env: &dyn Environment,
) -> Credential {
	let var = |suffix: &str| env.lookup(&format!("{prefix}_{suffix}"));

	if let Some(access) = var(ENV_API_CLIENT_ID) {
		credential.access = access;
	}
	if let Some(secret) = var(ENV_API_CLIENT_SECRET) {
		credential.secret = Secret::from(secret);
	}
	if let (Some(access), Some(secret)) = (var(ENV_OAUTH_CLIENT_ID), var(ENV_OAUTH_CLIENT_SECRET)) {
		credential.digest = digest_of(&access, &secret);
	}

	credential
}
