//! Role-store entities and response envelopes.
//!
//! Only the fields the SDK reasons about are typed. Everything else the directory returns is
//! kept in `attributes` so a read-modify-write round trip writes it back untouched.

// crates.io
use serde_json::Map;
// self
use crate::{
	_prelude::*,
	rolestore::{RoleId, SourceId, UserId},
};

/// A role, either granted directly (`explicit`) or inherited through source/group rules.
///
/// `id` is mandatory when decoding. A role set containing an entry without a usable id fails to
/// decode as a whole, so reconciliation never writes back a set it could not fully read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Role {
	/// Role identifier; membership sets are keyed by it.
	pub id: RoleId,
	/// Human-readable role name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// `true` for a direct grant, `false` for one held transitively.
	#[serde(default)]
	pub explicit: bool,
	/// Remaining directory fields, preserved verbatim.
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}
impl Role {
	/// A bare role record carrying only its identifier.
	pub fn new(id: RoleId) -> Self {
		Self { id, name: None, explicit: false, attributes: Map::new() }
	}

	/// A direct grant of `id`, as appended by membership reconciliation.
	pub fn explicit_grant(id: RoleId) -> Self {
		Self { explicit: true, ..Self::new(id) }
	}

	/// Sets the display name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}
}

/// Body of a role creation request; the directory assigns the identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRole {
	/// Human-readable role name.
	pub name: String,
	/// Remaining role fields (permissions, source rules, comment), sent verbatim.
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}
impl NewRole {
	/// A role creation request carrying only a name.
	pub fn named(name: impl Into<String>) -> Self {
		Self { name: name.into(), attributes: Map::new() }
	}
}

/// Lightweight reference returned when resolving role names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
	/// Canonical role identifier.
	pub id: RoleId,
	/// Role name the identifier was resolved from.
	#[serde(default)]
	pub name: String,
}

/// A directory user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
	/// User identifier.
	pub id: UserId,
	/// Login name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub principal: Option<String>,
	/// Source the user was imported from.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_id: Option<SourceId>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub full_name: Option<String>,
	/// Contact address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Remaining directory fields, preserved verbatim.
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

/// A user source (local, LDAP, OIDC, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
	/// Source identifier; absent on sources that have not been created yet.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<SourceId>,
	/// Source name.
	#[serde(default)]
	pub name: String,
	/// Whether the directory synchronizes this source.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub enabled: Option<bool>,
	/// Free-form comment.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub comment: Option<String>,
	/// Remaining directory fields (connection settings, TTL, tags), preserved verbatim.
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

/// `{count, items}` list envelope used by every collection endpoint.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Items<T> {
	#[serde(default)]
	pub(crate) items: Vec<T>,
}

/// `{id}` body returned by create endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct Created<I> {
	pub(crate) id: I,
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn unknown_role_fields_survive_round_trip() {
		let raw = json!({
			"id": "r-1",
			"name": "admins",
			"explicit": false,
			"implicit": true,
			"source_rules": { "type": "GROUP", "match": "ANY" }
		});
		let role: Role = serde_json::from_value(raw.clone()).expect("Role should decode.");

		assert_eq!(role.name.as_deref(), Some("admins"));
		assert_eq!(role.attributes.get("implicit"), Some(&json!(true)));
		assert_eq!(serde_json::to_value(&role).expect("Role should encode."), raw);
	}

	#[test]
	fn explicit_grant_serializes_minimal_record() {
		let role = Role::explicit_grant(RoleId::new("r-2").expect("Role fixture should be valid."));

		assert_eq!(
			serde_json::to_value(&role).expect("Role should encode."),
			json!({ "id": "r-2", "explicit": true })
		);
	}

	#[test]
	fn missing_explicit_flag_defaults_to_false() {
		let role: Role = serde_json::from_value(json!({ "id": "r-3" })).expect("Role should decode.");

		assert!(!role.explicit);
	}

	#[test]
	fn role_without_id_is_rejected() {
		assert!(serde_json::from_value::<Role>(json!({ "name": "orphan" })).is_err());
		assert!(serde_json::from_value::<Role>(json!({ "id": "" })).is_err());
	}

	#[test]
	fn list_envelope_decodes_types_without_default() {
		let items: Items<Role> =
			serde_json::from_value(json!({ "count": 1, "items": [{ "id": "r-1" }] }))
				.expect("Role list should decode.");
		let empty: Items<RoleRef> =
			serde_json::from_value(json!({ "count": 0 })).expect("Missing items should default.");

		let role = RoleId::new("r-1").expect("Role fixture should be valid.");

		assert_eq!(items.items, vec![Role::new(role)]);
		assert!(empty.items.is_empty());
	}

	#[test]
	fn new_role_never_carries_an_id() {
		let mut role = NewRole::named("auditors");

		role.attributes.insert("comment".into(), json!("read-only access"));

		assert_eq!(
			serde_json::to_value(&role).expect("New role should encode."),
			json!({ "name": "auditors", "comment": "read-only access" })
		);
	}

	#[test]
	fn unsaved_source_omits_id() {
		let source = Source { name: "ldap".into(), ..Source::default() };

		assert_eq!(
			serde_json::to_value(&source).expect("Source should encode."),
			json!({ "name": "ldap" })
		);
	}
}
