//! Provider-independent user identity.

// self
use crate::_prelude::*;

/// Small identity projection consumed by the rest of the authentication system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedIdentity {
	/// Stable provider user identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Email address.
	pub email: String,
	/// Login name; the provider has no username, so this mirrors `email`.
	pub login: String,
}
