use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    db::{models::UserAccount, Database},
    log_info, log_warn,
    models::User,
};

use super::password::{hash_password, new_salt, verify_password, MIN_PASSWORD_LEN};

const ENABLE_LOGS: bool = true;

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    let well_formed = matches!(
        email.split_once('@'),
        Some((local, domain)) if !local.is_empty() && !domain.is_empty()
    );
    if !well_formed {
        bail!("'{email}' is not a valid email address");
    }
    Ok(email)
}

/// Local identity provider. Clones share the signed-in user; every change is
/// broadcast to subscribers.
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    current: Arc<watch::Sender<Option<User>>>,
}

impl AuthService {
    pub fn new(db: Database) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            db,
            current: Arc::new(sender),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    /// Receives the user on sign in and `None` on sign out.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }

    /// Create an account and sign it in. `name` defaults to the email.
    pub async fn sign_up(&self, email: &str, password: &str, name: Option<&str>) -> Result<User> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            bail!("password must be at least {MIN_PASSWORD_LEN} characters");
        }

        let salt = new_salt();
        let account = UserAccount {
            id: Uuid::new_v4().to_string(),
            name: name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(&email)
                .to_string(),
            email,
            password_hash: hash_password(&salt, password),
            password_salt: salt,
            created_at: Utc::now(),
        };

        self.db.insert_user(&account).await?;
        log_info!("Registered user {}", account.id);

        let user = account.to_user();
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email)?;
        let account = self
            .db
            .find_user_by_email(&email)
            .await?
            .filter(|account| {
                verify_password(&account.password_salt, password, &account.password_hash)
            })
            .ok_or_else(|| {
                log_warn!("Rejected sign in for {email}");
                anyhow!("invalid email or password")
            })?;

        let user = account.to_user();
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    pub fn sign_out(&self) {
        if self.current_user().is_some() {
            self.set_current(None);
        }
    }

    /// Re-establish a session persisted from an earlier run. A stale id
    /// (account deleted since) leaves the service signed out.
    pub async fn restore(&self, user_id: &str) -> Result<Option<User>> {
        let user = self
            .db
            .find_user_by_id(user_id)
            .await?
            .map(|account| account.to_user());

        match &user {
            Some(_) => self.set_current(user.clone()),
            None => log_warn!("Stored session refers to unknown user {user_id}"),
        }
        Ok(user)
    }

    fn set_current(&self, user: Option<User>) {
        match &user {
            Some(user) => log_info!("Signed in as {}", user.email),
            None => log_info!("Signed out"),
        }
        self.current.send_replace(user);
    }
}
