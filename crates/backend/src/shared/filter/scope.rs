use crate::system::auth::Principal;

/// Row-level restriction derived from the requesting principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityScope {
    /// Privileged principal: sees every row
    Unrestricted,
    /// Sees only rows whose scope column equals the principal id
    Restricted(String),
}

impl IdentityScope {
    pub fn for_principal(principal: &Principal) -> Self {
        if principal.is_admin {
            IdentityScope::Unrestricted
        } else {
            IdentityScope::Restricted(principal.username.clone())
        }
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, IdentityScope::Restricted(_))
    }

    /// Whether a row carrying `value` in the scope column is visible
    pub fn permits(&self, value: Option<&str>) -> bool {
        match self {
            IdentityScope::Unrestricted => true,
            IdentityScope::Restricted(principal) => value == Some(principal.as_str()),
        }
    }
}
