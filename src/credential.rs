//! Layered client credentials resolved from explicit values, config files, and the environment.
//!
//! Resolution folds an ordered list of [`ConfigOption`]s over an empty [`Credential`]; every
//! option may overwrite fields set by the ones before it. The resolver never validates the
//! result. Empty fields are left for the authentication layer to reject.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use privx_sdk::credential::{self, ConfigOption};
//!
//! let flag_access: Option<String> = None;
//! let credential = credential::resolve([
//! 	ConfigOption::config_file(Some(Path::new("privx.toml"))),
//! 	ConfigOption::environment(),
//! 	ConfigOption::access(flag_access.as_deref()),
//! ])?;
//!
//! assert!(!credential.access.is_empty());
//! # Ok::<(), privx_sdk::error::Error>(())
//! ```

mod file;
mod option;
mod secret;
mod source;

pub use option::*;
pub use secret::*;
pub use source::*;

// self
use crate::{
	_prelude::*,
	obs::{Operation, OperationOutcome, OperationSpan},
};

/// Resolved access/secret/digest triple used to authenticate subsequent API calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credential {
	/// API client identifier.
	pub access: String,
	/// API client secret.
	pub secret: Secret,
	/// Base64 of `"oauth_client_id:oauth_client_secret"` for the nested OAuth layer.
	pub digest: Secret,
}

/// Folds [`ConfigOption`]s over a [`Credential`] using injectable file and environment sources.
#[derive(Clone)]
pub struct CredentialResolver {
	files: Arc<dyn FileReader>,
	env: Arc<dyn Environment>,
}
impl CredentialResolver {
	/// Creates a resolver backed by the given collaborators.
	pub fn with_sources(files: Arc<dyn FileReader>, env: Arc<dyn Environment>) -> Self {
		Self { files, env }
	}

	/// Applies `options` left to right, starting from an empty credential.
	///
	/// Stops at the first unreadable config file.
	pub fn resolve<I>(&self, options: I) -> Result<Credential>
	where
		I: IntoIterator<Item = ConfigOption>,
	{
		let span = OperationSpan::new(Operation::ResolveCredential);
		let result = span.in_scope(|| {
			options.into_iter().try_fold(Credential::default(), |credential, option| {
				option.apply(credential, self.files.as_ref(), self.env.as_ref())
			})
		});

		span.finish(OperationOutcome::of(&result));

		result
	}
}
impl Default for CredentialResolver {
	fn default() -> Self {
		Self::with_sources(Arc::new(FsFileReader), Arc::new(ProcessEnvironment))
	}
}
impl Debug for CredentialResolver {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("CredentialResolver(..)")
	}
}

/// Resolves `options` against the local filesystem and process environment.
pub fn resolve<I>(options: I) -> Result<Credential>
where
	I: IntoIterator<Item = ConfigOption>,
{
	CredentialResolver::default().resolve(options)
}
