//! Idempotent user-role reconciliation.
//!
//! Both membership operations read the user's current role set once, decide locally, and
//! write at most once. When the desired state already holds nothing is written, so
//! downstream permission re-evaluation is only triggered by real changes.
//!
//! # Concurrency
//!
//! The directory exposes no version token, so the read/write pair is not atomic. Two
//! reconcilers touching the same user concurrently can both read the same set and each
//! write back a version missing the other's change (last writer wins). Callers that need
//! stronger guarantees must serialize reconciliation per user themselves.

// self
use crate::{
	_prelude::*,
	obs::{self, Operation, OperationOutcome, OperationSpan},
	rolestore::{Role, RoleDirectory, RoleId, RoleRef, UserId},
};

/// What a reconciliation did to the directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reconciliation {
	/// The desired membership already held; no write was issued.
	Unchanged,
	/// Exactly one write converged the membership.
	Updated,
}
impl Reconciliation {
	/// Returns `true` when a write was issued.
	pub const fn is_updated(self) -> bool {
		matches!(self, Self::Updated)
	}
}

/// Converges user-role membership against a [`RoleDirectory`].
///
/// Role sets are keyed strictly by [`RoleId`]; the `explicit` flag is not part of the key, so
/// removal drops a role however it was granted and re-adding always records a direct grant.
pub struct RoleReconciler<D>
where
	D: ?Sized + RoleDirectory,
{
	directory: Arc<D>,
}
impl<D> RoleReconciler<D>
where
	D: ?Sized + RoleDirectory,
{
	/// Creates a reconciler over `directory`.
	pub fn new(directory: impl Into<Arc<D>>) -> Self {
		Self { directory: directory.into() }
	}

	/// Grants `role` to `user` explicitly unless the user already holds it.
	///
	/// Reads the current set, then (only when the role is missing) fetches the role record
	/// to make sure it exists, appends an explicit grant, and writes the set back once. A
	/// failed read aborts before anything is written; a failed write is returned as-is.
	pub async fn add_user_role(&self, user: &UserId, role: &RoleId) -> Result<Reconciliation> {
		const OPERATION: Operation = Operation::AddUserRole;

		let span = OperationSpan::new(OPERATION).membership(user, role);
		let result = span
			.instrument(async {
				let mut roles = self.directory.user_roles(user).await?;

				if roles.iter().any(|current| current.id == *role) {
					obs::membership_unchanged(OPERATION, user, role);

					return Ok(Reconciliation::Unchanged);
				}

				let canonical = self.directory.role(role).await?;

				roles.push(Role::explicit_grant(canonical.id));
				self.directory.replace_user_roles(user, &roles).await?;

				Ok(Reconciliation::Updated)
			})
			.await;

		span.finish(outcome(&result));

		result
	}

	/// Revokes `role` from `user` if the user holds it, whether granted explicitly or not.
	///
	/// Reads the current set and writes the filtered set back once, only when something was
	/// actually removed.
	pub async fn remove_user_role(&self, user: &UserId, role: &RoleId) -> Result<Reconciliation> {
		const OPERATION: Operation = Operation::RemoveUserRole;

		let span = OperationSpan::new(OPERATION).membership(user, role);
		let result = span
			.instrument(async {
				let roles = self.directory.user_roles(user).await?;
				let held = roles.len();
				let remaining =
					roles.into_iter().filter(|current| current.id != *role).collect::<Vec<_>>();

				if remaining.len() == held {
					obs::membership_unchanged(OPERATION, user, role);

					return Ok(Reconciliation::Unchanged);
				}

				self.directory.replace_user_roles(user, &remaining).await?;

				Ok(Reconciliation::Updated)
			})
			.await;

		span.finish(outcome(&result));

		result
	}

	/// Resolves human-readable role names into canonical references.
	///
	/// The result follows the directory's order, not necessarily the input order; match by
	/// name when order matters. An empty input returns an empty list without a remote call.
	pub async fn resolve_roles<I, S>(&self, names: I) -> Result<Vec<RoleRef>>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		const OPERATION: Operation = Operation::ResolveRoles;

		let names = names.into_iter().map(Into::into).collect::<Vec<String>>();

		if names.is_empty() {
			return Ok(Vec::new());
		}

		let span = OperationSpan::new(OPERATION);
		let result = span.instrument(self.directory.resolve_roles(&names)).await;

		span.finish(OperationOutcome::of(&result));

		result
	}
}
impl<D> Clone for RoleReconciler<D>
where
	D: ?Sized + RoleDirectory,
{
	fn clone(&self) -> Self {
		Self { directory: self.directory.clone() }
	}
}
impl<D> Debug for RoleReconciler<D>
where
	D: ?Sized + RoleDirectory,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RoleReconciler(..)")
	}
}

fn outcome(result: &Result<Reconciliation>) -> OperationOutcome {
	match result {
		Ok(Reconciliation::Updated) => OperationOutcome::Success,
		Ok(Reconciliation::Unchanged) => OperationOutcome::Unchanged,
		Err(_) => OperationOutcome::Failure,
	}
}
