//! Authentication route handlers
//!
//! - Registration and login with email and password
//! - Token refresh
//! - Logout (token revocation)
//! - Current principal lookup

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use refresh::refresh;
pub use register::register;
