//! User Filters
//!
//! Case-insensitive matching over cached users.

use crate::api::User;

/// Filter for users
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Lowercased search term, matched against name and email
    term: String,
    active: Option<bool>,
}

impl UserFilter {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_lowercase(),
            active: None,
        }
    }

    /// Only keep users whose active flag equals `active`
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn matches(&self, user: &User) -> bool {
        if let Some(active) = self.active {
            if user.active != active {
                return false;
            }
        }

        if self.term.is_empty() {
            return true;
        }

        user.name.to_lowercase().contains(&self.term) || user.email.to_lowercase().contains(&self.term)
    }

    /// Matching users, in their original order
    pub fn apply(&self, users: &[User]) -> Vec<User> {
        users.iter().filter(|u| self.matches(u)).cloned().collect()
    }
}
