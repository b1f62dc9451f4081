//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, levels, errors)
//! - `diagnosis` - In-progress scan record, merge-updates, referral rule
//! - `workflow` - Scan stages and the pure transition reducer
//! - `history` - Immutable snapshots of finished scans
//! - `user` - Account records, sign-up and profile validation
//! - `navigation` - Typed screen routes

pub mod diagnosis;
pub mod foundation;
pub mod history;
pub mod navigation;
pub mod user;
pub mod workflow;
