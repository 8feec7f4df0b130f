//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! the driving port and can be tested against any store.

use std::sync::Arc;

use crate::domain::ports::UserDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserDirectory>,
}

impl HttpState {
    /// Construct state around a user directory.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_api::domain::UserDirectoryService;
    /// use user_api::inbound::http::state::HttpState;
    /// use user_api::outbound::persistence::InMemoryUserRepository;
    ///
    /// let service = UserDirectoryService::new(Arc::new(InMemoryUserRepository::new()));
    /// let state = HttpState::new(Arc::new(service));
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }
}
