//! Wire types shared between the minegrid client and the game server.
//!
//! Everything here mirrors the JSON the server speaks: board snapshots, the
//! realtime envelopes, and the game-creation payloads.

pub use endpoints::*;
pub use error::*;
pub use lobby::*;
pub use message::*;
pub use snapshot::*;

mod endpoints;
mod error;
mod lobby;
mod message;
mod snapshot;

/// Grid position `(row, column)`, both 0-based.
pub type Coord2 = (usize, usize);
