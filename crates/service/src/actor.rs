use models::role::Role;
use uuid::Uuid;

/// The authenticated identity performing an operation. Always passed
/// explicitly into service calls; never read from ambient state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self { Self { id, role } }

    pub fn is_admin(&self) -> bool { self.role == Role::Admin }
}
