//! Frame-by-frame session driver
//!
//! Sits between the transport and the world: every inbound frame is decoded,
//! applied, and turned into events for the caller. Nothing here is fatal; an
//! unknown frame is reported and the next frame is processed normally.

use crate::protocol::{ProtocolError, ServerMessage};
use crate::world::{World, WorldEvent};

/// What happened while handling one frame
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// First frame of the connection has been handled
    Ready,
    /// A later frame has been handled
    Updated,
    /// We no longer own any ball
    Died,
    /// The frame could not be understood; the world is unchanged
    Error(ProtocolError),
}

/// One connection's worth of world tracking
#[derive(Debug, Clone, Default)]
pub struct Session {
    world: World,
    ready: bool,
    frames: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track frames into an existing world handle
    pub fn with_world(world: World) -> Self {
        Self {
            world,
            ready: false,
            frames: 0,
        }
    }

    /// Handle to the world this session feeds
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Frames handled so far, including unknown ones
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Handle one inbound frame
    pub fn receive(&mut self, frame: &[u8]) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.frames += 1;

        match ServerMessage::decode(frame) {
            Ok(message) => {
                for event in self.world.apply(message) {
                    match event {
                        WorldEvent::Died => {
                            log::info!("died");
                            events.push(SessionEvent::Died);
                        }
                    }
                }
            }
            Err(err) => {
                log::warn!("{}", err);
                events.push(SessionEvent::Error(err));
            }
        }

        if self.ready {
            events.push(SessionEvent::Updated);
        } else {
            self.ready = true;
            log::info!("session ready");
            events.push(SessionEvent::Ready);
        }
        events
    }
}
