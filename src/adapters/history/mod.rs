//! History repository adapters.

mod store_history_repository;

pub use store_history_repository::StoreHistoryRepository;
