//! Optional observability helpers for SDK operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `privx_sdk.operation` with `operation`,
//!   `user`, `role`, and `outcome` fields, plus events for skipped config files and no-op
//!   reconciliations.
//! - Enable `metrics` to increment the `privx_sdk_operation_total` counter for every
//!   attempt/success/unchanged/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations observed by the SDK.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Credential option folding.
	ResolveCredential,
	/// Explicit role grant reconciliation.
	AddUserRole,
	/// Role revocation reconciliation.
	RemoveUserRole,
	/// Role name to identifier lookup.
	ResolveRoles,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::ResolveCredential => "resolve_credential",
			Operation::AddUserRole => "add_user_role",
			Operation::RemoveUserRole => "remove_user_role",
			Operation::ResolveRoles => "resolve_roles",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an SDK operation.
	Attempt,
	/// Completion that changed remote state (or produced a value).
	Success,
	/// Completion that found the desired state already in place.
	Unchanged,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Success or failure of a finished operation.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => Self::Success,
			Err(_) => Self::Failure,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Unchanged => "unchanged",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
