/// Authorization module for the membership registry
///
/// The caller's raw role string (held in the session by the surrounding
/// HTTP layer) is parsed exactly once into a [`Role`] and threaded through
/// every operation that needs it:
///
/// ```rust,ignore
/// use registry_core::common::auth::{Role, RoleConfig, scope};
///
/// let role = Role::resolve(&raw_role, &RoleConfig::default());
/// let visible = scope(&role, members);
/// ```
///
/// Resolution never fails: unrecognized strings fall through to the most
/// restrictive tier, whose scope selects nothing.
mod errors;
mod role;
mod scope;

pub use errors::AuthError;
pub use role::{Role, RoleConfig};
pub use scope::{
    authorize_mutation, can_access_document, is_visible, require_national_admin, scope,
    ScopeTarget,
};
