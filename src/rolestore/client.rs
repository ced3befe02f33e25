//! HTTP role-store client built on a [`Connector`].

// crates.io
use serde::de::DeserializeOwned;
use serde_json::json;
// self
use crate::{
	_prelude::*,
	error::CodecError,
	http::{ApiPath, Connector},
	rolestore::{
		DirectoryFuture, NewRole, Role, RoleDirectory, RoleId, RoleRef, Source, SourceId, User,
		UserId,
		model::{Created, Items},
	},
};

const API_ROOT: [&str; 3] = ["role-store", "api", "v1"];

/// Role-store API client.
///
/// Every method is a single call through the connector; errors (including HTTP 404 for
/// unknown identifiers) are returned exactly as the connector reports them.
pub struct RoleStore<C>
where
	C: ?Sized + Connector,
{
	connector: Arc<C>,
}
impl<C> RoleStore<C>
where
	C: ?Sized + Connector,
{
	/// Creates a client that issues every call through `connector`.
	pub fn new(connector: impl Into<Arc<C>>) -> Self {
		Self { connector: connector.into() }
	}

	/// Connector backing this client.
	pub fn connector(&self) -> &C {
		&self.connector
	}

	/// Lists every user source.
	pub async fn sources(&self) -> Result<Vec<Source>> {
		let body = self.connector.get(&path(["sources"])).await?;

		Ok(decode::<Items<Source>>(body)?.items)
	}

	/// Fetches a single source.
	pub async fn source(&self, id: &SourceId) -> Result<Source> {
		decode(self.connector.get(&path(["sources"]).join(id)).await?)
	}

	/// Creates a source and returns the identifier the directory assigned to it.
	pub async fn create_source(&self, source: &Source) -> Result<SourceId> {
		let body = self.connector.post(&path(["sources"]), encode(source)?).await?;

		Ok(decode::<Created<SourceId>>(body)?.id)
	}

	/// Deletes a source.
	pub async fn delete_source(&self, id: &SourceId) -> Result<()> {
		self.connector.delete(&path(["sources"]).join(id)).await
	}

	/// Searches users matching `keywords`, optionally restricted to one source.
	pub async fn search_users(
		&self,
		keywords: &str,
		source: Option<&SourceId>,
	) -> Result<Vec<User>> {
		let query = json!({
			"keywords": keywords,
			"source": source.map_or("", |id| id.as_ref()),
		});
		let body = self.connector.post(&path(["users", "search"]), query).await?;

		Ok(decode::<Items<User>>(body)?.items)
	}

	/// Fetches a single user.
	pub async fn user(&self, id: &UserId) -> Result<User> {
		decode(self.connector.get(&path(["users"]).join(id)).await?)
	}

	/// Lists the roles `id` currently holds.
	pub async fn user_roles(&self, id: &UserId) -> Result<Vec<Role>> {
		let body = self.connector.get(&user_roles_path(id)).await?;

		Ok(decode::<Items<Role>>(body)?.items)
	}

	/// Overwrites the role set of `id`.
	///
	/// This is a blind write. Prefer [`RoleReconciler`](crate::rolestore::RoleReconciler) for
	/// single-role changes.
	pub async fn replace_user_roles(&self, id: &UserId, roles: &[Role]) -> Result<()> {
		self.connector.put(&user_roles_path(id), encode(roles)?).await
	}

	/// Lists every configured role.
	pub async fn roles(&self) -> Result<Vec<Role>> {
		let body = self.connector.get(&path(["roles"])).await?;

		Ok(decode::<Items<Role>>(body)?.items)
	}

	/// Fetches a single role.
	pub async fn role(&self, id: &RoleId) -> Result<Role> {
		decode(self.connector.get(&path(["roles"]).join(id)).await?)
	}

	/// Lists the users holding role `id`.
	pub async fn role_members(&self, id: &RoleId) -> Result<Vec<User>> {
		let body = self.connector.get(&path(["roles"]).join(id).join("members")).await?;

		Ok(decode::<Items<User>>(body)?.items)
	}

	/// Creates a role and returns the identifier the directory assigned to it.
	pub async fn create_role(&self, role: &NewRole) -> Result<RoleId> {
		let body = self.connector.post(&path(["roles"]), encode(role)?).await?;

		Ok(decode::<Created<RoleId>>(body)?.id)
	}

	/// Resolves role names to identifiers.
	///
	/// Every call reaches the directory, even with no names; the short-circuit for empty
	/// input lives in [`RoleReconciler::resolve_roles`](crate::rolestore::RoleReconciler).
	pub async fn resolve_roles(&self, names: &[String]) -> Result<Vec<RoleRef>> {
		let body = self.connector.post(&path(["roles", "resolve"]), encode(names)?).await?;

		Ok(decode::<Items<RoleRef>>(body)?.items)
	}
}
impl<C> Clone for RoleStore<C>
where
	C: ?Sized + Connector,
{
	fn clone(&self) -> Self {
		Self { connector: self.connector.clone() }
	}
}
impl<C> Debug for RoleStore<C>
where
	C: ?Sized + Connector,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RoleStore(..)")
	}
}
impl<C> RoleDirectory for RoleStore<C>
where
	C: ?Sized + Connector,
{
	fn user_roles<'a>(&'a self, user: &'a UserId) -> DirectoryFuture<'a, Vec<Role>> {
		Box::pin(RoleStore::user_roles(self, user))
	}

	fn role<'a>(&'a self, role: &'a RoleId) -> DirectoryFuture<'a, Role> {
		Box::pin(RoleStore::role(self, role))
	}

	fn replace_user_roles<'a>(
		&'a self,
		user: &'a UserId,
		roles: &'a [Role],
	) -> DirectoryFuture<'a, ()> {
		Box::pin(RoleStore::replace_user_roles(self, user, roles))
	}

	fn resolve_roles<'a>(&'a self, names: &'a [String]) -> DirectoryFuture<'a, Vec<RoleRef>> {
		Box::pin(RoleStore::resolve_roles(self, names))
	}
}

fn path<const N: usize>(resource: [&str; N]) -> ApiPath {
	ApiPath::new(API_ROOT.into_iter().chain(resource))
}

fn user_roles_path(id: &UserId) -> ApiPath {
	path(["users"]).join(id).join("roles")
}

fn encode<T>(value: &T) -> Result<Value>
where
	T: ?Sized + Serialize,
{
	serde_json::to_value(value).map_err(|e| CodecError::Encode(e).into())
}

fn decode<T>(value: Value) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(value).map_err(|e| CodecError::UnexpectedShape(e).into())
}
