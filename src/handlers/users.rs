use chrono::Utc;
use tracing::{error, info};

use crate::auth::hash_password;
use crate::database::models::{NewUser, User};
use crate::error::ApiError;
use crate::schema::{CreateUserInput, UpdateUserInput};
use crate::state::AppState;

pub async fn create_user(state: AppState, input: CreateUserInput) -> Result<User, ApiError> {
    let password_hash = hash_password(&input.password).map_err(|e| {
        error!("Password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to store credentials")
    })?;

    let user = state
        .repos
        .users
        .create_user(NewUser {
            username: input.username,
            email: input.email,
            password_hash,
            full_name: input.full_name,
            role: input.role,
            is_active: input.is_active,
            created_at: Utc::now(),
        })
        .await?;

    info!(user_id = user.id, username = %user.username, "User created");
    Ok(user)
}

pub async fn get_users(state: AppState) -> Result<Vec<User>, ApiError> {
    Ok(state.repos.users.list_users().await?)
}

/// Merges the supplied fields into the stored user.
pub async fn update_user(state: AppState, input: UpdateUserInput) -> Result<User, ApiError> {
    let id = input.id;
    let now = Utc::now();
    let user = state
        .repos
        .users
        .update_user(
            id,
            Box::new(move |user: &mut User| {
                input.apply_to(user);
                user.updated_at = now;
            }),
        )
        .await?;

    info!(user_id = user.id, "User updated");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::config::AppConfig;
    use crate::database::{MemoryStore, Repositories};
    use crate::handlers::test_support;
    use std::sync::Arc;
    use crate::schema::{FromPayload, UserRole};
    use serde_json::{json, Value};

    fn create_input(username: &str, email: &str) -> CreateUserInput {
        CreateUserInput::from_payload(&json!({
            "username": username,
            "email": email,
            "password": "secret1",
            "full_name": "Jane Doe",
            "role": "MANAGER"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn created_user_never_exposes_the_password() {
        let state = test_support::state();
        let user = create_user(state, create_input("jdoe", "jdoe@example.com")).await.unwrap();
        let wire: Value = serde_json::to_value(&user).unwrap();
        assert!(wire.get("password").is_none());
        assert!(wire.get("password_hash").is_none());
        assert_eq!(wire["role"], "MANAGER");
        assert_eq!(wire["is_active"], true);
    }

    #[tokio::test]
    async fn password_is_stored_as_an_argon2_hash() {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(Repositories::from_store(store.clone()), AppConfig::development());
        let user = create_user(state, create_input("jdoe", "jdoe@example.com")).await.unwrap();

        let hash = store.password_hash(user.id).await.unwrap();
        assert_ne!(hash, "secret1");
        assert!(verify_password("secret1", &hash));
    }

    #[tokio::test]
    async fn duplicate_username_or_email_conflicts() {
        let state = test_support::state();
        create_user(state.clone(), create_input("jdoe", "jdoe@example.com")).await.unwrap();

        let err = create_user(state.clone(), create_input("jdoe", "other@example.com")).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.to_json()["field"], "username");

        let err = create_user(state.clone(), create_input("other", "jdoe@example.com")).await.unwrap_err();
        assert_eq!(err.to_json()["field"], "email");

        assert_eq!(get_users(state).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_keeps_omitted_fields() {
        let state = test_support::state();
        let created = create_user(state.clone(), create_input("jdoe", "jdoe@example.com")).await.unwrap();

        let input = UpdateUserInput::from_payload(&json!({ "id": created.id, "role": "ADMIN" })).unwrap();
        let updated = update_user(state, input).await.unwrap();

        assert_eq!(updated.role, UserRole::Admin);
        assert_eq!(updated.username, "jdoe");
        assert_eq!(updated.email, "jdoe@example.com");
        assert_eq!(updated.full_name, "Jane Doe");
        assert!(updated.is_active);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_of_unknown_user_is_not_found() {
        let state = test_support::state();
        let input = UpdateUserInput::from_payload(&json!({ "id": 99, "full_name": "Nobody Here" })).unwrap();
        assert_eq!(update_user(state, input).await.unwrap_err().status_code(), 404);
    }
}
