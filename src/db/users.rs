use crate::types::{AppError, Result, Role, UserResponse};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// A stored user account.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// Input for creating a user account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: Role,
}

/// Storage boundary for user accounts.
///
/// The authentication core never touches this directly; it serves the
/// account handlers (register, login, refresh, profile). Implementations
/// must enforce unique emails and usernames.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a new active account and assigns it an id.
    async fn create(&self, user: NewUser) -> Result<UserRecord>;

    /// Looks up a user by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>>;

    /// Looks up a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Whether an account with this email exists.
    async fn email_exists(&self, email: &str) -> Result<bool>;

    /// Whether an account with this username exists.
    async fn username_exists(&self, username: &str) -> Result<bool>;

    /// Records a successful login on the account.
    async fn touch_last_login(&self, id: i64) -> Result<()>;

    /// Enables or disables an account. Disabled accounts cannot log in.
    async fn set_active(&self, id: i64, active: bool) -> Result<()>;

    /// All accounts, ordered by id.
    async fn list(&self) -> Result<Vec<UserRecord>>;
}

/// In-memory [`UserStore`] keyed by user id.
///
/// Accounts live for the lifetime of the process. Ids are assigned from an
/// atomic sequence starting at 1.
pub struct InMemoryUserStore {
    users: RwLock<HashMap<i64, UserRecord>>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<UserRecord> {
        let mut users = self.users.write();

        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = UserRecord {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            full_name: user.full_name,
            role: user.role,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
        };
        users.insert(id, record.clone());

        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        Ok(self.users.read().values().any(|u| u.email == email))
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        Ok(self.users.read().values().any(|u| u.username == username))
    }

    async fn touch_last_login(&self, id: i64) -> Result<()> {
        let mut users = self.users.write();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        user.last_login_at = Some(Utc::now());

        Ok(())
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<()> {
        let mut users = self.users.write();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        user.is_active = active;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self.users.read().values().cloned().collect();
        users.sort_by_key(|u| u.id);

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            full_name: None,
            role: Role::Learner,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryUserStore::new();

        let first = store
            .create(new_user("alice", "alice@test.com"))
            .await
            .expect("should create");
        let second = store
            .create(new_user("bob", "bob@test.com"))
            .await
            .expect("should create");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.is_active, "new accounts start active");
        assert!(first.last_login_at.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryUserStore::new();

        store
            .create(new_user("alice", "dup@test.com"))
            .await
            .expect("should create");
        let result = store.create(new_user("other", "dup@test.com")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = InMemoryUserStore::new();

        store
            .create(new_user("alice", "alice@test.com"))
            .await
            .expect("should create");
        let result = store.create(new_user("alice", "other@test.com")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_lookups() {
        let store = InMemoryUserStore::new();
        let created = store
            .create(new_user("alice", "alice@test.com"))
            .await
            .expect("should create");

        let by_id = store
            .find_by_id(created.id)
            .await
            .expect("should query")
            .expect("should exist");
        assert_eq!(by_id.username, "alice");

        let by_email = store
            .find_by_email("alice@test.com")
            .await
            .expect("should query")
            .expect("should exist");
        assert_eq!(by_email.id, created.id);

        assert!(store.email_exists("alice@test.com").await.expect("ok"));
        assert!(!store.email_exists("missing@test.com").await.expect("ok"));
        assert!(store.username_exists("alice").await.expect("ok"));
        assert!(store.find_by_id(999).await.expect("ok").is_none());
    }

    #[tokio::test]
    async fn test_touch_last_login() {
        let store = InMemoryUserStore::new();
        let created = store
            .create(new_user("alice", "alice@test.com"))
            .await
            .expect("should create");

        store
            .touch_last_login(created.id)
            .await
            .expect("should update");

        let user = store
            .find_by_id(created.id)
            .await
            .expect("should query")
            .expect("should exist");
        assert!(user.last_login_at.is_some(), "login timestamp should be set");

        let missing = store.touch_last_login(999).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_active() {
        let store = InMemoryUserStore::new();
        let created = store
            .create(new_user("alice", "alice@test.com"))
            .await
            .expect("should create");

        store
            .set_active(created.id, false)
            .await
            .expect("should update");

        let user = store
            .find_by_id(created.id)
            .await
            .expect("should query")
            .expect("should exist");
        assert!(!user.is_active);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let store = InMemoryUserStore::new();
        for (name, email) in [
            ("carol", "carol@test.com"),
            ("alice", "alice@test.com"),
            ("bob", "bob@test.com"),
        ] {
            store.create(new_user(name, email)).await.expect("should create");
        }

        let users = store.list().await.expect("should list");
        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
