//! Resource Manager
//!
//! Cache-aside layer over [`ResourceClient`]. The cache is filled lazily on
//! first read, replaced wholesale by [`ResourceManager::refresh`] and only
//! ever appended to by [`ResourceManager::create_and_cache`].

use super::filter::UserFilter;
use crate::api::{Backend, ClientError, ResourceClient, SimulatedBackend, User};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Summary statistics about cached users
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Users per email domain, in order of first appearance
    pub domain_counts: IndexMap<String, usize>,
    pub last_refresh: Option<DateTime<Utc>>,
}

/// Higher-level user management on top of the client
pub struct ResourceManager<B: Backend = SimulatedBackend> {
    client: ResourceClient<B>,
    cache: Vec<User>,
    last_refresh: Option<DateTime<Utc>>,
}

impl<B: Backend> ResourceManager<B> {
    pub fn new(client: ResourceClient<B>) -> Self {
        Self {
            client,
            cache: Vec::new(),
            last_refresh: None,
        }
    }

    pub fn client(&self) -> &ResourceClient<B> {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut ResourceClient<B> {
        &mut self.client
    }

    /// Cached users, without triggering a fetch
    pub fn cached(&self) -> &[User] {
        &self.cache
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    /// Refetch the user list and replace the cache
    ///
    /// On failure the previous cache and timestamp are kept.
    pub fn refresh(&mut self) -> Result<(), ClientError> {
        let users = self.client.list_users()?;
        self.cache = users;
        self.last_refresh = Some(Utc::now());
        tracing::info!("Refreshed {} users from API", self.cache.len());
        Ok(())
    }

    /// Fill the cache if it is empty
    fn ensure_loaded(&mut self) -> Result<(), ClientError> {
        if self.cache.is_empty() {
            tracing::debug!("User cache empty, refreshing");
            self.refresh()?;
        }
        Ok(())
    }

    /// Active users, in cache order
    pub fn active_users(&mut self) -> Result<Vec<User>, ClientError> {
        self.ensure_loaded()?;
        Ok(UserFilter::default().with_active(true).apply(&self.cache))
    }

    /// Find a user by email address
    pub fn find_by_email(&mut self, email: &str) -> Result<Option<User>, ClientError> {
        self.ensure_loaded()?;
        Ok(self.cache.iter().find(|u| u.email == email).cloned())
    }

    /// Find a user by id
    pub fn find_by_id(&mut self, id: u64) -> Result<Option<User>, ClientError> {
        self.ensure_loaded()?;
        Ok(self.cache.iter().find(|u| u.id == id).cloned())
    }

    /// Case-insensitive search over names and emails
    pub fn search(&mut self, term: &str) -> Result<Vec<User>, ClientError> {
        self.filter(&UserFilter::new(term))
    }

    pub fn filter(&mut self, filter: &UserFilter) -> Result<Vec<User>, ClientError> {
        self.ensure_loaded()?;
        Ok(filter.apply(&self.cache))
    }

    /// Create a user and add it to the cache without refetching
    pub fn create_and_cache(&mut self, name: &str, email: &str) -> Result<User, ClientError> {
        let user = self.client.create_user(name, email).inspect_err(|e| {
            tracing::warn!("Failed to create user: {}", e);
        })?;

        self.cache.push(user.clone());
        tracing::info!("Created and cached user: {}", user.name);
        Ok(user)
    }

    /// Summary statistics about users
    pub fn summary(&mut self) -> Result<UserSummary, ClientError> {
        self.ensure_loaded()?;

        let total = self.cache.len();
        let active = self.cache.iter().filter(|u| u.active).count();

        let mut domain_counts: IndexMap<String, usize> = IndexMap::new();
        for domain in self.cache.iter().filter_map(User::domain) {
            *domain_counts.entry(domain.to_string()).or_insert(0) += 1;
        }

        Ok(UserSummary {
            total,
            active,
            inactive: total - active,
            domain_counts,
            last_refresh: self.last_refresh,
        })
    }
}
