//! Wire protocol
//!
//! - `reader`: zero-filling little-endian cursor
//! - `message`: server frames decoded into typed messages
//! - `command`: client frames and the connection handshake

pub mod command;
pub mod error;
pub mod message;
pub mod reader;

pub use command::{ClientCommand, handshake};
pub use error::ProtocolError;
pub use message::{BallUpdate, ServerMessage, TickUpdate};
pub use reader::ByteReader;
