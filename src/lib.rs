#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod board;
mod bot;
mod common;
mod config;
mod game;
pub mod oracle;
#[cfg(feature = "std")]
mod autoplay;
#[cfg(feature = "std")]
mod coordinator;
#[cfg(feature = "std")]
mod error;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
mod observer;
#[cfg(feature = "std")]
pub mod prelude;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod transport;

pub use board::*;
pub use bot::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use oracle::{evaluate, Verdict};
#[cfg(feature = "std")]
pub use autoplay::run_bot;
#[cfg(feature = "std")]
pub use coordinator::Coordinator;
#[cfg(feature = "std")]
pub use error::SessionError;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, LOG_ENV};
#[cfg(feature = "std")]
pub use observer::*;
#[cfg(feature = "std")]
pub use transport::{ChannelError, MoveChannel};
