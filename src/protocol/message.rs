//! Server → client messages
//!
//! Each frame is decoded in full into a typed [`ServerMessage`] before it
//! touches the world, so the world can apply it under a single lock.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::error::ProtocolError;
use super::reader::ByteReader;
use crate::world::{Color, MapBounds};

/// Leading type tags of server frames
pub mod tag {
    pub const TICK: u8 = 16;
    pub const SPECTATE: u8 = 17;
    pub const SPAWNED: u8 = 32;
    pub const FFA_LEADERBOARD: u8 = 49;
    pub const TEAM_SCORES: u8 = 50;
    pub const MAP_SIZE: u8 = 64;
}

const OPT_VIRUS: u8 = 1 << 0;
const OPT_EXTRA_BLOCK: u8 = 1 << 1;
const OPT_EXTRA_STRING: u8 = 1 << 2;

/// One entity record from the update section of a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallUpdate {
    pub id: u32,
    pub position: IVec2,
    pub size: i16,
    pub color: Color,
    pub is_virus: bool,
    /// Empty when the server omitted the name
    pub name: String,
}

/// Contents of a tick frame, in wire order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickUpdate {
    /// Ids eaten this tick (eater ids are not kept)
    pub eaten: Vec<u32>,
    pub updates: Vec<BallUpdate>,
    /// Ids that left the visible area
    pub removed: Vec<u32>,
}

/// A fully decoded server frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    Tick(TickUpdate),
    /// Camera position and zoom while spectating
    Spectate { x: f32, y: f32, zoom: f32 },
    /// A new ball now belongs to us
    Spawned { id: u32 },
    FfaLeaderboard(Vec<String>),
    TeamScores(Vec<f32>),
    MapSize(MapBounds),
}

impl ServerMessage {
    /// Decode a complete frame, dispatching on its leading tag
    pub fn decode(frame: &[u8]) -> Result<Self, ProtocolError> {
        if frame.is_empty() {
            return Err(ProtocolError::EmptyMessage);
        }

        let mut r = ByteReader::new(frame);
        let message = match r.read_u8() {
            tag::TICK => ServerMessage::Tick(decode_tick(&mut r)),
            tag::SPECTATE => ServerMessage::Spectate {
                x: r.read_f32(),
                y: r.read_f32(),
                zoom: r.read_f32(),
            },
            tag::SPAWNED => ServerMessage::Spawned { id: r.read_u32() },
            tag::FFA_LEADERBOARD => {
                let count = r.read_u32();
                let names = read_counted(&mut r, count, |r| {
                    r.skip(4); // player id
                    r.read_utf16_string()
                });
                ServerMessage::FfaLeaderboard(names)
            }
            tag::TEAM_SCORES => {
                let count = r.read_u32();
                ServerMessage::TeamScores(read_counted(&mut r, count, ByteReader::read_f32))
            }
            tag::MAP_SIZE => ServerMessage::MapSize(MapBounds {
                min_x: r.read_f64(),
                min_y: r.read_f64(),
                max_x: r.read_f64(),
                max_y: r.read_f64(),
            }),
            other => return Err(ProtocolError::UnknownMessage(other)),
        };

        log::trace!(
            "decoded {} of {} bytes: {:?}",
            r.position().min(frame.len()),
            frame.len(),
            message
        );
        Ok(message)
    }
}

/// Read up to `count` entries, stopping early once the frame is exhausted.
///
/// Entries that start inside the frame are read in full (zero-filled past
/// the end); a bogus count never turns into billions of zero entries.
fn read_counted<'a, T>(
    r: &mut ByteReader<'a>,
    count: u32,
    mut read: impl FnMut(&mut ByteReader<'a>) -> T,
) -> Vec<T> {
    let mut out = Vec::with_capacity((count as usize).min(r.remaining()));
    for _ in 0..count {
        if r.is_exhausted() {
            break;
        }
        out.push(read(r));
    }
    out
}

fn decode_tick(r: &mut ByteReader<'_>) -> TickUpdate {
    let eat_count = r.read_u16();
    let eaten = read_counted(r, u32::from(eat_count), |r| {
        r.skip(4); // eater id
        r.read_u32()
    });

    let mut updates = Vec::new();
    loop {
        let id = r.read_u32();
        if id == 0 {
            break;
        }
        updates.push(decode_ball_update(r, id));
    }

    let removed_count = r.read_u32();
    let removed = read_counted(r, removed_count, ByteReader::read_u32);

    TickUpdate {
        eaten,
        updates,
        removed,
    }
}

fn decode_ball_update(r: &mut ByteReader<'_>, id: u32) -> BallUpdate {
    let x = r.read_i32();
    let y = r.read_i32();
    let size = r.read_i16();
    let color = Color {
        r: r.read_u8(),
        g: r.read_u8(),
        b: r.read_u8(),
    };
    let options = r.read_u8();

    if options & OPT_EXTRA_BLOCK != 0 {
        let len = r.read_u32();
        r.skip(len as usize);
    }
    if options & OPT_EXTRA_STRING != 0 {
        let _ = r.read_latin1_string();
    }

    BallUpdate {
        id,
        position: IVec2::new(x, y),
        size,
        color,
        is_virus: options & OPT_VIRUS != 0,
        name: r.read_utf16_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Little-endian frame builder for tests
    #[derive(Default)]
    pub(crate) struct FrameBuilder(pub Vec<u8>);

    impl FrameBuilder {
        pub fn new(tag: u8) -> Self {
            Self(vec![tag])
        }
        pub fn u8(mut self, v: u8) -> Self {
            self.0.push(v);
            self
        }
        pub fn u16(mut self, v: u16) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }
        pub fn i16(mut self, v: i16) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }
        pub fn u32(mut self, v: u32) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }
        pub fn i32(mut self, v: i32) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }
        pub fn f32(mut self, v: f32) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }
        pub fn f64(mut self, v: f64) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }
        pub fn utf16(mut self, s: &str) -> Self {
            for unit in s.encode_utf16() {
                self.0.extend_from_slice(&unit.to_le_bytes());
            }
            self.u16(0)
        }
        /// Entity record with no extra blocks
        pub fn ball(self, id: u32, x: i32, y: i32, size: i16, name: &str) -> Self {
            self.u32(id)
                .i32(x)
                .i32(y)
                .i16(size)
                .u8(10)
                .u8(20)
                .u8(30)
                .u8(0)
                .utf16(name)
        }
        pub fn build(self) -> Vec<u8> {
            self.0
        }
    }

    #[test]
    fn test_decode_tick() {
        let frame = FrameBuilder::new(tag::TICK)
            .u16(1)
            .u32(7) // eater
            .u32(9) // eaten
            .ball(42, -100, 250, 64, "Bob")
            .u32(43)
            .i32(1)
            .i32(2)
            .i16(100)
            .u8(0)
            .u8(255)
            .u8(0)
            .u8(OPT_VIRUS | OPT_EXTRA_BLOCK | OPT_EXTRA_STRING)
            .u32(3)
            .u8(0xaa)
            .u8(0xbb)
            .u8(0xcc)
            .u8(b's')
            .u8(b'k')
            .u8(0)
            .utf16("")
            .u32(0)
            .u32(2)
            .u32(5)
            .u32(6)
            .build();

        let ServerMessage::Tick(tick) = ServerMessage::decode(&frame).unwrap() else {
            panic!("expected tick");
        };
        assert_eq!(tick.eaten, vec![9]);
        assert_eq!(tick.updates.len(), 2);
        assert_eq!(tick.updates[0].id, 42);
        assert_eq!(tick.updates[0].position, IVec2::new(-100, 250));
        assert_eq!(tick.updates[0].size, 64);
        assert_eq!(tick.updates[0].color, Color { r: 10, g: 20, b: 30 });
        assert_eq!(tick.updates[0].name, "Bob");
        assert!(!tick.updates[0].is_virus);
        assert!(tick.updates[1].is_virus);
        assert_eq!(tick.updates[1].name, "");
        assert_eq!(tick.removed, vec![5, 6]);
    }

    #[test]
    fn test_decode_spectate_truncated_zoom() {
        // Zoom is cut off after two bytes and decodes as zero
        let mut frame = FrameBuilder::new(tag::SPECTATE).f32(12.5).f32(-3.0).build();
        frame.extend_from_slice(&[0x00, 0x40]);
        assert_eq!(
            ServerMessage::decode(&frame).unwrap(),
            ServerMessage::Spectate {
                x: 12.5,
                y: -3.0,
                zoom: 0.0
            }
        );
    }

    #[test]
    fn test_decode_leaderboard_and_scores() {
        let frame = FrameBuilder::new(tag::FFA_LEADERBOARD)
            .u32(2)
            .u32(100)
            .utf16("alpha")
            .u32(101)
            .utf16("beta")
            .build();
        assert_eq!(
            ServerMessage::decode(&frame).unwrap(),
            ServerMessage::FfaLeaderboard(vec!["alpha".into(), "beta".into()])
        );

        let frame = FrameBuilder::new(tag::TEAM_SCORES)
            .u32(3)
            .f32(0.5)
            .f32(0.25)
            .f32(0.25)
            .build();
        assert_eq!(
            ServerMessage::decode(&frame).unwrap(),
            ServerMessage::TeamScores(vec![0.5, 0.25, 0.25])
        );
    }

    #[test]
    fn test_decode_map_size_and_spawn() {
        let frame = FrameBuilder::new(tag::MAP_SIZE)
            .f64(0.0)
            .f64(0.0)
            .f64(11180.0)
            .f64(11180.0)
            .build();
        assert_eq!(
            ServerMessage::decode(&frame).unwrap(),
            ServerMessage::MapSize(MapBounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 11180.0,
                max_y: 11180.0
            })
        );

        let frame = FrameBuilder::new(tag::SPAWNED).u32(77).build();
        assert_eq!(
            ServerMessage::decode(&frame).unwrap(),
            ServerMessage::Spawned { id: 77 }
        );
    }

    #[test]
    fn test_unknown_and_empty_frames() {
        assert_eq!(
            ServerMessage::decode(&[72, 1, 2]),
            Err(ProtocolError::UnknownMessage(72))
        );
        assert_eq!(ServerMessage::decode(&[]), Err(ProtocolError::EmptyMessage));
    }

    #[test]
    fn test_bogus_count_is_bounded() {
        let frame = FrameBuilder::new(tag::TEAM_SCORES).u32(u32::MAX).f32(1.0).build();
        assert_eq!(
            ServerMessage::decode(&frame).unwrap(),
            ServerMessage::TeamScores(vec![1.0])
        );
    }

    #[test]
    fn test_truncated_tick_terminates() {
        // Update section cut off in the middle of the size field
        let frame = FrameBuilder::new(tag::TICK)
            .u16(0)
            .u32(5)
            .i32(10)
            .i32(20)
            .u8(3)
            .build();
        let ServerMessage::Tick(tick) = ServerMessage::decode(&frame).unwrap() else {
            panic!("expected tick");
        };
        assert_eq!(tick.updates.len(), 1);
        assert_eq!(tick.updates[0].size, 0);
        assert_eq!(tick.updates[0].name, "");
        assert!(tick.removed.is_empty());
    }

    proptest! {
        #[test]
        fn prop_decode_never_panics(tag in prop_oneof![Just(16u8), Just(17), Just(32), Just(49), Just(50), Just(64)],
                                    body in proptest::collection::vec(any::<u8>(), 0..256)) {
            let mut frame = vec![tag];
            frame.extend(body);
            prop_assert!(ServerMessage::decode(&frame).is_ok());
        }
    }
}
