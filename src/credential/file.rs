//! TOML credential document layout.

// crates.io
use toml::{Table, Value as TomlValue};
// self
use crate::_prelude::*;

/// Top-level config document; only the `[auth]` table is consulted.
///
/// Keys match case-insensitively (`[AUTH]`, `API_CLIENT_ID`), and an exact lowercase key wins
/// over its case variants.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct ConfigDocument {
	#[serde(default)]
	pub(crate) auth: AuthSection,
}
impl ConfigDocument {
	/// Parses raw bytes; invalid UTF-8 and malformed TOML both count as parse failures.
	pub(crate) fn parse(bytes: &[u8]) -> Result<Self, ParseFailure> {
		let text = std::str::from_utf8(bytes).map_err(ParseFailure::Utf8)?;
		let table = text.parse::<Table>().map_err(ParseFailure::Toml)?;

		TomlValue::Table(fold_keys(table)).try_into::<Self>().map_err(ParseFailure::Toml)
	}
}

/// Credential fields of the `[auth]` table. Empty strings are treated as unset.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct AuthSection {
	#[serde(default)]
	pub(crate) oauth_client_id: Option<String>,
	#[serde(default)]
	pub(crate) oauth_client_secret: Option<String>,
	#[serde(default)]
	pub(crate) api_client_id: Option<String>,
	#[serde(default)]
	pub(crate) api_client_secret: Option<String>,
}
impl AuthSection {
	pub(crate) fn api_client_id(&self) -> Option<&str> {
		non_empty(&self.api_client_id)
	}

	pub(crate) fn api_client_secret(&self) -> Option<&str> {
		non_empty(&self.api_client_secret)
	}

	/// Returns the OAuth pair only when both halves are non-empty.
	pub(crate) fn oauth_pair(&self) -> Option<(&str, &str)> {
		Some((non_empty(&self.oauth_client_id)?, non_empty(&self.oauth_client_secret)?))
	}
}

/// Recoverable failure to interpret a config file's contents.
#[derive(Debug, ThisError)]
pub(crate) enum ParseFailure {
	#[error("Config file is not valid UTF-8.")]
	Utf8(#[source] std::str::Utf8Error),
	#[error("Config file is not valid TOML.")]
	Toml(#[source] toml::de::Error),
}

fn fold_keys(table: Table) -> Table {
	let mut folded = Table::new();

	for (key, value) in table {
		let value = match value {
			TomlValue::Table(inner) => TomlValue::Table(fold_keys(inner)),
			other => other,
		};
		let lowered = key.to_ascii_lowercase();

		if key == lowered || !folded.contains_key(&lowered) {
			folded.insert(lowered, value);
		}
	}

	folded
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|v| !v.is_empty())
}
