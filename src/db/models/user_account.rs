//! Stored identity records. Credentials never leave the db and auth layers.

use chrono::{DateTime, Utc};

use crate::models::User;

#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}
