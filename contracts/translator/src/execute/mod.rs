//! Execute handlers for the translator contract.
//!
//! - `transport` - SendMessage, ResendMessage, TransferMessage and the delivery reply
//! - `config` - chain registry, relayers, ordering toggles, initializer binding
//! - `admin` - two-step ownership

mod admin;
mod config;
mod transport;

pub use admin::*;
pub use config::*;
pub use transport::*;
