//! Admin session state: the stored bearer token and the route guard built on it.

pub mod guard;
pub mod session;
pub mod token;

pub use guard::*;
pub use session::*;
pub use token::*;
