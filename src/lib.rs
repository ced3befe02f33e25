//! Client-side building blocks for PrivX-style role directories: layered client credentials
//! resolved from flags, config files, and the environment, plus a role-store client whose
//! membership reconciliation never issues a redundant write.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod credential;
pub mod error;
pub mod http;
pub mod obs;
pub mod rolestore;

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		path::{Path, PathBuf},
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
