use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of account roles. Stored as a string column on `user`;
/// mutable in exactly one direction (customer becomes provider once).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Provider,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Provider => "provider",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "provider" => Ok(Role::Provider),
            "admin" => Ok(Role::Admin),
            other => Err(crate::errors::ModelError::Validation(format!("unknown role: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Role;
    use std::str::FromStr;

    #[test]
    fn round_trips_all_roles() {
        for r in [Role::Customer, Role::Provider, Role::Admin] {
            assert_eq!(Role::from_str(r.as_str()).unwrap(), r);
        }
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(Role::from_str("superuser").is_err());
        assert!(Role::from_str("Customer").is_err());
    }
}
