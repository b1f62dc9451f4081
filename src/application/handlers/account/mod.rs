//! Account handlers - registration, sign-in/out and profile edits.

mod current_user;
mod register_user;
mod sign_in;
mod update_profile;

pub use current_user::GetCurrentUserHandler;
pub use register_user::{RegisterUserCommand, RegisterUserHandler, RegisterUserResult};
pub use sign_in::{SignInCommand, SignInHandler, SignInResult, SignOutHandler};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler, UpdateProfileResult};
