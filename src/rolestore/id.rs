//! Strongly typed directory identifiers.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (user, role, source).
		kind: &'static str,
	},
}

def_id! { UserId, "Directory identifier of a user.", "User" }
def_id! { RoleId, "Directory identifier of a role.", "Role" }
def_id! { SourceId, "Directory identifier of a user source.", "Source" }

// Identifiers are opaque to the directory; anything non-empty is escaped onto the path.
fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_identifiers_are_rejected() {
		assert_eq!(UserId::new(""), Err(IdentifierError::Empty { kind: "User" }));
		assert!(RoleId::new("privx-admin").is_ok());
		assert!(SourceId::new("ldap source/1").is_ok(), "Escaping is the connector's job.");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let role: RoleId =
			serde_json::from_str("\"4a1c-role\"").expect("Role should deserialize successfully.");

		assert_eq!(role.as_ref(), "4a1c-role");
		assert_eq!(serde_json::to_string(&role).expect("Role should serialize."), "\"4a1c-role\"");
		assert!(serde_json::from_str::<RoleId>("\"\"").is_err());
	}

	#[test]
	fn debug_names_the_kind() {
		let user = UserId::new("u-1").expect("User fixture should be valid.");

		assert_eq!(format!("{user:?}"), "User(u-1)");
		assert_eq!(user.to_string(), "u-1");
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<RoleId, u8> = HashMap::from_iter([(
			RoleId::new("role-123").expect("Role used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("role-123"), Some(&7));
	}
}
