//! Injectable file and environment collaborators consulted by configuration options.

// std
use std::{env, fs, io};
// self
use crate::_prelude::*;

/// Reads raw configuration bytes from a path.
pub trait FileReader
where
	Self: Send + Sync,
{
	/// Returns the full contents of `path`, or the I/O failure that prevented reading it.
	fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Looks up environment variables by name.
pub trait Environment
where
	Self: Send + Sync,
{
	/// Returns the variable's value, or `None` when it is not set.
	fn lookup(&self, name: &str) -> Option<String>;
}

/// [`FileReader`] backed by the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsFileReader;
impl FileReader for FsFileReader {
	fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
		fs::read(path)
	}
}

/// [`Environment`] backed by the current process environment.
///
/// Variables whose value is not valid Unicode are treated as absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;
impl Environment for ProcessEnvironment {
	fn lookup(&self, name: &str) -> Option<String> {
		env::var_os(name).and_then(|value| value.into_string().ok())
	}
}

/// Fixed in-memory [`Environment`] for tests and embedded callers.
#[derive(Clone, Debug, Default)]
pub struct MemoryEnvironment(HashMap<String, String>);
impl MemoryEnvironment {
	/// Builds an environment from `(name, value)` pairs.
	pub fn new<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}

	/// Sets (or replaces) a single variable.
	pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.insert(name.into(), value.into());

		self
	}
}
impl Environment for MemoryEnvironment {
	fn lookup(&self, name: &str) -> Option<String> {
		self.0.get(name).cloned()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn memory_environment_distinguishes_empty_from_absent() {
		let env = MemoryEnvironment::new([("PRIVX_API_CLIENT_ID", "")]).with_var("OTHER", "1");

		assert_eq!(env.lookup("PRIVX_API_CLIENT_ID").as_deref(), Some(""));
		assert_eq!(env.lookup("OTHER").as_deref(), Some("1"));
		assert_eq!(env.lookup("PRIVX_API_CLIENT_SECRET"), None);
	}

	#[test]
	fn process_environment_skips_unset_variables() {
		assert_eq!(ProcessEnvironment.lookup("PRIVX_SDK_TEST_SURELY_UNSET_VARIABLE"), None);
	}

	#[test]
	fn fs_reader_reports_missing_files() {
		let err = FsFileReader
			.read(Path::new("/nonexistent/privx-sdk/config.toml"))
			.expect_err("Missing files must surface as I/O errors.");

		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}
}
