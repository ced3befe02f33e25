//! Role-store client, directory contract, and membership reconciliation.

pub mod memory;
pub mod reconcile;

mod client;
mod id;
mod model;

pub use client::RoleStore;
pub use id::*;
pub use memory::MemoryDirectory;
pub use model::*;
pub use reconcile::*;

// self
use crate::_prelude::*;

/// Boxed future returned by [`RoleDirectory`] operations.
pub type DirectoryFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// The directory operations membership reconciliation is built on.
///
/// [`RoleStore`] implements it over HTTP; [`MemoryDirectory`] keeps everything in-process.
pub trait RoleDirectory
where
	Self: Send + Sync,
{
	/// Current role set of `user`, explicit and inherited alike.
	fn user_roles<'a>(&'a self, user: &'a UserId) -> DirectoryFuture<'a, Vec<Role>>;

	/// Canonical record of `role`; fails when the role does not exist.
	fn role<'a>(&'a self, role: &'a RoleId) -> DirectoryFuture<'a, Role>;

	/// Replaces the full role set of `user` with `roles`.
	fn replace_user_roles<'a>(
		&'a self,
		user: &'a UserId,
		roles: &'a [Role],
	) -> DirectoryFuture<'a, ()>;

	/// Translates role names into canonical references, in the directory's order.
	fn resolve_roles<'a>(&'a self, names: &'a [String]) -> DirectoryFuture<'a, Vec<RoleRef>>;
}
