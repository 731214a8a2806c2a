//! Platform-free logic of the live game-session client.
//!
//! The browser shell supplies a [`Transport`], an [`IdentityStore`] and an
//! [`IdentityPrompt`]; everything that decides what to send and what to draw
//! lives here so it can be exercised on the host.

pub use board_view::*;
pub use channel::*;
pub use error::*;
pub use identity::*;
pub use interaction::*;
pub use presence::*;
pub use session::*;
pub use slot::*;
pub use timer::*;

pub use minegrid_protocol as protocol;

mod board_view;
mod channel;
mod error;
mod identity;
mod interaction;
mod presence;
mod session;
mod slot;
mod timer;
