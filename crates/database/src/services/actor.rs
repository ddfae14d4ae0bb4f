use crate::error::ServiceError;
use log::warn;
use models::role::Role;

/// The authenticated user on whose behalf a service call runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    /// `None` when the identity provider supplied no recognised role
    pub role: Option<Role>,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Fails with [`ServiceError::Forbidden`] unless the actor is an admin
    pub fn require_admin(&self, action: &str) -> Result<(), ServiceError> {
        self.require_any(&[Role::Admin], action)
    }

    /// Fails with [`ServiceError::Forbidden`] unless the actor holds one of `roles`
    pub fn require_any(&self, roles: &[Role], action: &str) -> Result<(), ServiceError> {
        if self.role.is_some_and(|role| roles.contains(&role)) {
            return Ok(());
        }

        warn!(
            "User {} with role {} attempted to {action}",
            self.user_id,
            self.role.map(|r| r.to_string()).unwrap_or_else(|| "none".into())
        );

        let allowed: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
        Err(ServiceError::Forbidden(format!(
            "Only {} users may {action}",
            allowed.join(" or ")
        )))
    }
}
