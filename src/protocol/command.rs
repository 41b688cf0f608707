//! Client → server frames

use serde::{Deserialize, Serialize};

/// Protocol version announced in the first handshake frame
pub const PROTOCOL_VERSION: u8 = 4;
/// Client key announced in the second handshake frame
pub const CLIENT_KEY: u32 = 154_669_603;

/// Leading type tags of client frames
pub mod tag {
    pub const SPAWN: u8 = 0;
    pub const SPECTATE: u8 = 1;
    pub const MOVE_TO: u8 = 16;
    pub const SPLIT: u8 = 17;
    pub const EJECT: u8 = 21;
    pub const TOKEN: u8 = 80;
    pub const PROTOCOL_VERSION: u8 = 254;
    pub const CLIENT_KEY: u8 = 255;
}

/// A command the client can send once connected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientCommand {
    /// Enter the game with the given nickname
    Spawn { name: String },
    Spectate,
    /// Steer all owned balls toward a world position
    MoveTo { x: i32, y: i32 },
    Split,
    Eject,
}

impl ClientCommand {
    /// Encode into a ready-to-send frame
    pub fn encode(&self) -> Vec<u8> {
        match self {
            ClientCommand::Spawn { name } => {
                let mut buf = Vec::with_capacity(1 + 2 * name.len());
                buf.push(tag::SPAWN);
                for unit in name.encode_utf16() {
                    buf.extend_from_slice(&unit.to_le_bytes());
                }
                buf
            }
            ClientCommand::Spectate => vec![tag::SPECTATE],
            ClientCommand::MoveTo { x, y } => {
                let mut buf = Vec::with_capacity(13);
                buf.push(tag::MOVE_TO);
                buf.extend_from_slice(&x.to_le_bytes());
                buf.extend_from_slice(&y.to_le_bytes());
                // Unused trailing field, always zero
                buf.extend_from_slice(&[0; 4]);
                buf
            }
            ClientCommand::Split => vec![tag::SPLIT],
            ClientCommand::Eject => vec![tag::EJECT],
        }
    }
}

/// The three frames sent right after the socket opens, in order
pub fn handshake(token: &str) -> [Vec<u8>; 3] {
    let mut key = Vec::with_capacity(5);
    key.push(tag::CLIENT_KEY);
    key.extend_from_slice(&CLIENT_KEY.to_le_bytes());

    // One byte per token char; tokens are plain ASCII
    let mut auth = Vec::with_capacity(1 + token.len());
    auth.push(tag::TOKEN);
    auth.extend(token.chars().map(|c| c as u32 as u8));

    [vec![tag::PROTOCOL_VERSION, PROTOCOL_VERSION], key, auth]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_to_layout() {
        let buf = ClientCommand::MoveTo { x: -1, y: 258 }.encode();
        assert_eq!(buf.len(), 13);
        assert_eq!(buf[0], 16);
        assert_eq!(&buf[1..5], &[0xff, 0xff, 0xff, 0xff]);
        assert_eq!(&buf[5..9], &[0x02, 0x01, 0x00, 0x00]);
        assert_eq!(&buf[9..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_spawn_is_utf16() {
        let buf = ClientCommand::Spawn { name: "Hi".into() }.encode();
        assert_eq!(buf, vec![0, b'H', 0, b'i', 0]);
    }

    #[test]
    fn test_single_byte_commands() {
        assert_eq!(ClientCommand::Spectate.encode(), vec![1]);
        assert_eq!(ClientCommand::Split.encode(), vec![17]);
        assert_eq!(ClientCommand::Eject.encode(), vec![21]);
    }

    #[test]
    fn test_handshake_frames() {
        let [version, key, auth] = handshake("AB12");
        assert_eq!(version, vec![254, 4]);
        assert_eq!(key[0], 255);
        assert_eq!(u32::from_le_bytes([key[1], key[2], key[3], key[4]]), 154_669_603);
        assert_eq!(auth, vec![80, b'A', b'B', b'1', b'2']);
    }
}
