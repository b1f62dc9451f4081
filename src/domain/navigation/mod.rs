//! Navigation targets passed between screens.

mod route;

pub use route::Route;
