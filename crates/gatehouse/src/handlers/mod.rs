//! HTTP request handlers for Gatehouse.

pub mod check_message;
pub mod claims;
pub mod health;
pub mod me;
pub mod ping;

pub use check_message::check_message;
pub use claims::show_claims;
pub use health::health_check;
pub use me::get_me;
pub use ping::{admin_ping, ping, protected_ping};
