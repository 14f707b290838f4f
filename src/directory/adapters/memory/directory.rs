//! In-memory user directory for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::{
    domain::{EmailAddress, User, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    users: HashMap<UserId, User>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> UserDirectoryResult<RwLockReadGuard<'_, InMemoryDirectoryState>> {
        self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> UserDirectoryResult<RwLockWriteGuard<'_, InMemoryDirectoryState>> {
        self.state.write().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Collects matching users ordered by creation time.
fn collect_sorted<'a>(users: impl Iterator<Item = &'a User>) -> Vec<User> {
    let mut matched: Vec<User> = users.cloned().collect();
    matched.sort_by_key(|user| (user.created_at(), user.id()));
    matched
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn store(&self, user: &User) -> UserDirectoryResult<()> {
        let mut state = self.write()?;
        if state.users.contains_key(&user.id()) {
            return Err(UserDirectoryError::DuplicateUser(user.id()));
        }
        if state.email_index.contains_key(user.email()) {
            return Err(UserDirectoryError::DuplicateEmail(user.email().clone()));
        }

        state.email_index.insert(user.email().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserDirectoryResult<Option<User>> {
        let state = self.read()?;
        let user = state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn list_all(&self) -> UserDirectoryResult<Vec<User>> {
        let state = self.read()?;
        Ok(collect_sorted(state.users.values()))
    }

    async fn list_by_manager(&self, manager_id: UserId) -> UserDirectoryResult<Vec<User>> {
        let state = self.read()?;
        Ok(collect_sorted(
            state
                .users
                .values()
                .filter(|user| user.is_employee_of(manager_id)),
        ))
    }
}
