use serde_json::Value;

use super::enums::UserRole;
use super::validate::{len_between, min_len, Email, FromPayload, Length, Payload, ValidationFailure};
use super::PERSON_NAME;
use crate::database::models::User;

const USERNAME: Length = len_between(3, 50);
const PASSWORD: Length = min_len(6);

#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
}

impl FromPayload for CreateUserInput {
    fn from_payload(value: &Value) -> Result<Self, ValidationFailure> {
        let mut p = Payload::new(value)?;
        let username = p.required::<String>("username", &[&USERNAME]);
        let email = p.required::<String>("email", &[&Email]);
        let password = p.required::<String>("password", &[&PASSWORD]);
        let full_name = p.required::<String>("full_name", &[&PERSON_NAME]);
        let role = p.required::<UserRole>("role", &[]);
        let is_active = p.defaulted::<bool>("is_active", true, &[]);

        p.finish(|| {
            Some(Self {
                username: username?,
                email: email?,
                password: password?,
                full_name: full_name?,
                role: role?,
                is_active: is_active?,
            })
        })
    }
}

/// Partial update: only `id` is required, omitted fields keep stored values.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateUserInput {
    pub id: i32,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl FromPayload for UpdateUserInput {
    fn from_payload(value: &Value) -> Result<Self, ValidationFailure> {
        let mut p = Payload::new(value)?;
        let id = p.required::<i32>("id", &[]);
        let username = p.optional::<String>("username", &[&USERNAME]);
        let email = p.optional::<String>("email", &[&Email]);
        let full_name = p.optional::<String>("full_name", &[&PERSON_NAME]);
        let role = p.optional::<UserRole>("role", &[]);
        let is_active = p.optional::<bool>("is_active", &[]);

        p.finish(|| {
            Some(Self {
                id: id?,
                username: username?,
                email: email?,
                full_name: full_name?,
                role: role?,
                is_active: is_active?,
            })
        })
    }
}

impl UpdateUserInput {
    /// Merges the supplied fields into `user`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(full_name) = self.full_name {
            user.full_name = full_name;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}
