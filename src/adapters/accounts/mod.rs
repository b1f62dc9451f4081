//! User account adapters.

mod store_user_repository;

pub use store_user_repository::StoreUserRepository;
