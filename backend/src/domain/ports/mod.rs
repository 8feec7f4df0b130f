//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_directory;
mod user_repository;

#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
