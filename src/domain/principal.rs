use crate::domain::ids::PrincipalId;

/// Role granted by the external access layer when the session was verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

/// An identified caller. The engine never authenticates anyone itself; it
/// only trusts the role attached by the transport layer.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: PrincipalId,
    pub role: Role,
}

impl Principal {
    pub fn user(id: impl Into<String>) -> Self {
        Principal { id: PrincipalId::new(id), role: Role::User }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Principal { id: PrincipalId::new(id), role: Role::Admin }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
