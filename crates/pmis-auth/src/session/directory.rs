//! In-memory user directory.

use std::collections::HashMap;

use pmis_core::types::UserId;
use pmis_entity::user::User;

/// Read-only lookup table of known users.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    /// Users in seed order.
    users: Vec<User>,
    /// Lower-cased username → position in `users`.
    by_username: HashMap<String, usize>,
}

impl UserDirectory {
    /// Builds a directory from seeded users. Later duplicates of a
    /// username are ignored.
    pub fn new(users: Vec<User>) -> Self {
        let mut by_username = HashMap::with_capacity(users.len());
        for (pos, user) in users.iter().enumerate() {
            by_username
                .entry(user.username.to_lowercase())
                .or_insert(pos);
        }
        Self { users, by_username }
    }

    /// Finds a user by username, case-insensitively.
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.by_username
            .get(&username.trim().to_lowercase())
            .and_then(|&pos| self.users.get(pos))
    }

    /// Finds a user by id.
    pub fn find_by_id(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Every user, in seed order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
