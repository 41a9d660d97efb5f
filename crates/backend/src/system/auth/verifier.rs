use std::collections::HashMap;

use super::password;
use super::Principal;
use crate::shared::config::AuthConfig;

/// Checks login credentials
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, id: &str, secret: &str) -> Option<Principal>;
}

/// Users listed under `[[auth.users]]` in the configuration
pub struct ConfiguredUsers {
    users: HashMap<String, String>,
    admin_principal: String,
}

impl ConfiguredUsers {
    pub fn from_config(auth: &AuthConfig) -> Self {
        let users = auth
            .users
            .iter()
            .map(|u| (u.username.trim().to_string(), u.password_hash.clone()))
            .collect();
        Self {
            users,
            admin_principal: auth.admin_principal.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl IdentityVerifier for ConfiguredUsers {
    fn verify(&self, id: &str, secret: &str) -> Option<Principal> {
        let username = id.trim();
        let hash = self.users.get(username)?;
        if !password::verify_password(secret, hash) {
            return None;
        }
        Some(Principal {
            username: username.to_string(),
            is_admin: username == self.admin_principal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::UserEntry;

    fn users() -> ConfiguredUsers {
        ConfiguredUsers::from_config(&AuthConfig {
            users: vec![
                UserEntry {
                    username: "admin".into(),
                    password_hash: password::hash_password("root-pw").unwrap(),
                },
                UserEntry {
                    username: "NYC".into(),
                    password_hash: password::hash_password("nyc-pw").unwrap(),
                },
            ],
            ..AuthConfig::default()
        })
    }

    #[test]
    fn known_users_with_correct_password() {
        let users = users();
        assert_eq!(users.len(), 2);
        assert_eq!(
            users.verify("admin", "root-pw"),
            Some(Principal {
                username: "admin".into(),
                is_admin: true
            })
        );
        assert_eq!(
            users.verify(" NYC ", "nyc-pw"),
            Some(Principal {
                username: "NYC".into(),
                is_admin: false
            })
        );
    }

    #[test]
    fn unknown_user_or_wrong_password_is_rejected() {
        let users = users();
        assert_eq!(users.verify("NYC", "root-pw"), None);
        assert_eq!(users.verify("LA", "nyc-pw"), None);
    }
}
