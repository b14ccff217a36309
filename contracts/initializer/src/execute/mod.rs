//! Execute handlers for the initializer contract.
//!
//! - `transfer` - InitTransfer, ResendTransfer and ReceivePayload
//! - `relay` - trusted relay fee table
//! - `config` - blocklist, client registry, fee collector
//! - `admin` - two-step ownership

mod admin;
mod config;
mod relay;
mod transfer;

pub use admin::*;
pub use config::*;
pub use relay::*;
pub use transfer::*;
