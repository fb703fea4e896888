//! Resource management layer
//!
//! Caching, filtering and aggregation over the users served by the API.
//!
//! # Architecture
//!
//! - [`manager`] - Cache-aside [`ResourceManager`] with lazy fill and summaries
//! - [`filter`] - Case-insensitive [`UserFilter`] used for searches
//!
//! # Example
//!
//! ```
//! use usercache::api::{ClientConfig, ResourceClient};
//! use usercache::resource::ResourceManager;
//!
//! let client = ResourceClient::simulated(ClientConfig::new("https://api.example.com"));
//! let mut manager = ResourceManager::new(client);
//! let summary = manager.summary().unwrap();
//! assert_eq!(summary.total, 3);
//! ```

pub mod filter;
pub mod manager;

pub use filter::UserFilter;
pub use manager::{ResourceManager, UserSummary};
