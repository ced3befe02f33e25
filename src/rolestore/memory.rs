//! Thread-safe in-memory [`RoleDirectory`] for local development and tests.

// std
use std::sync::atomic::{AtomicUsize, Ordering};
// self
use crate::{
	_prelude::*,
	rolestore::{DirectoryFuture, Role, RoleDirectory, RoleId, RoleRef, UserId},
};

#[derive(Debug, Default)]
struct State {
	catalog: RwLock<HashMap<RoleId, Role>>,
	memberships: RwLock<HashMap<UserId, Vec<Role>>>,
	writes: Mutex<Vec<RoleWrite>>,
	reads: AtomicUsize,
}

/// One `replace_user_roles` call observed by a [`MemoryDirectory`].
#[derive(Clone, Debug, PartialEq)]
pub struct RoleWrite {
	/// User whose role set was replaced.
	pub user: UserId,
	/// Role set that was written.
	pub roles: Vec<Role>,
}

/// Role directory that keeps roles and memberships in-process.
///
/// Unknown users and roles fail with [`Error::NotFound`], mirroring a remote 404. Every
/// `replace_user_roles` call is logged so callers can assert how many writes an operation
/// issued. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct MemoryDirectory(Arc<State>);
impl MemoryDirectory {
	/// Adds (or replaces) a role in the catalog.
	pub fn insert_role(&self, role: Role) {
		self.0.catalog.write().insert(role.id.clone(), role);
	}

	/// Registers `user` with an initial role set. Not counted as a write.
	pub fn insert_user(&self, user: UserId, roles: impl IntoIterator<Item = Role>) {
		self.0.memberships.write().insert(user, roles.into_iter().collect());
	}

	/// Current role set of `user` (empty when the user is unknown).
	pub fn roles_of(&self, user: &UserId) -> Vec<Role> {
		self.0.memberships.read().get(user).cloned().unwrap_or_default()
	}

	/// Every write observed so far, oldest first.
	pub fn writes(&self) -> Vec<RoleWrite> {
		self.0.writes.lock().clone()
	}

	/// Number of `replace_user_roles` calls observed so far.
	pub fn write_count(&self) -> usize {
		self.0.writes.lock().len()
	}

	/// Number of read operations (`user_roles`, `role`, `resolve_roles`) served so far.
	pub fn read_count(&self) -> usize {
		self.0.reads.load(Ordering::SeqCst)
	}

	fn user_roles_now(&self, user: &UserId) -> Result<Vec<Role>> {
		self.0.reads.fetch_add(1, Ordering::SeqCst);
		self.0
			.memberships
			.read()
			.get(user)
			.cloned()
			.ok_or_else(|| Error::NotFound { resource: "user", id: user.to_string() })
	}

	fn role_now(&self, role: &RoleId) -> Result<Role> {
		self.0.reads.fetch_add(1, Ordering::SeqCst);
		self.0
			.catalog
			.read()
			.get(role)
			.cloned()
			.ok_or_else(|| Error::NotFound { resource: "role", id: role.to_string() })
	}

	fn replace_now(&self, user: &UserId, roles: &[Role]) -> Result<()> {
		let mut memberships = self.0.memberships.write();
		let Some(current) = memberships.get_mut(user) else {
			return Err(Error::NotFound { resource: "user", id: user.to_string() });
		};

		*current = roles.to_vec();
		self.0.writes.lock().push(RoleWrite { user: user.clone(), roles: roles.to_vec() });

		Ok(())
	}

	// Input order; unknown names are skipped.
	fn resolve_now(&self, names: &[String]) -> Vec<RoleRef> {
		self.0.reads.fetch_add(1, Ordering::SeqCst);

		let catalog = self.0.catalog.read();

		names
			.iter()
			.filter_map(|name| {
				catalog
					.values()
					.find(|role| role.name.as_deref() == Some(name.as_str()))
					.map(|role| RoleRef { id: role.id.clone(), name: name.clone() })
			})
			.collect()
	}
}
impl RoleDirectory for MemoryDirectory {
	fn user_roles<'a>(&'a self, user: &'a UserId) -> DirectoryFuture<'a, Vec<Role>> {
		Box::pin(async move { self.user_roles_now(user) })
	}

	fn role<'a>(&'a self, role: &'a RoleId) -> DirectoryFuture<'a, Role> {
		Box::pin(async move { self.role_now(role) })
	}

	fn replace_user_roles<'a>(
		&'a self,
		user: &'a UserId,
		roles: &'a [Role],
	) -> DirectoryFuture<'a, ()> {
		Box::pin(async move { self.replace_now(user, roles) })
	}

	fn resolve_roles<'a>(&'a self, names: &'a [String]) -> DirectoryFuture<'a, Vec<RoleRef>> {
		Box::pin(async move { Ok(self.resolve_now(names)) })
	}
}
