//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            display_name: entity.display_name,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_entity_to_domain_drops_password_hash() {
        let entity = UserEntity {
            id: Uuid::new_v4(),
            email: "alex@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            display_name: "Alex".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let user: domain::models::User = entity.clone().into();
        assert_eq!(user.id, entity.id);
        assert_eq!(user.email, entity.email);
        assert_eq!(user.display_name, entity.display_name);
        // domain::models::User carries no password hash field at all
    }
}
