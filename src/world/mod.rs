//! Live world model
//!
//! A single [`WorldState`] sits behind one `RwLock`. The message handler is
//! the only writer; readers get copies, so a later message can never change
//! what a reader already holds.

pub mod ball;
pub mod state;

pub use ball::{Ball, Color, can_eat};
pub use state::{Camera, MapBounds, WorldEvent, WorldState};

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::protocol::ServerMessage;

/// Consistent copy of the whole world, taken under one read lock
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldView {
    pub balls: HashMap<u32, Ball>,
    /// Our visible balls, oldest first
    pub owned: Vec<Ball>,
    pub camera: Camera,
    pub bounds: Option<MapBounds>,
    pub leaderboard: Vec<String>,
    pub team_scores: Vec<f32>,
}

impl WorldView {
    pub fn main_ball(&self) -> Option<&Ball> {
        self.owned.first()
    }

    /// Main ball position, else the spectator camera
    pub fn position(&self) -> Vec2 {
        self.main_ball()
            .map(Ball::position_f32)
            .unwrap_or(Vec2::new(self.camera.x, self.camera.y))
    }

    pub fn total_size(&self) -> i32 {
        self.owned.iter().map(|b| i32::from(b.size)).sum()
    }
}

/// Shared handle to the world; clones see the same state
#[derive(Debug, Clone, Default)]
pub struct World {
    inner: Arc<RwLock<WorldState>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one message as a single atomic update
    pub fn apply(&self, message: ServerMessage) -> Vec<WorldEvent> {
        self.inner.write().apply(message)
    }

    pub fn snapshot(&self) -> WorldView {
        let state = self.inner.read();
        WorldView {
            balls: state.balls.clone(),
            owned: state.owned_balls().cloned().collect(),
            camera: state.camera,
            bounds: state.bounds,
            leaderboard: state.leaderboard.clone(),
            team_scores: state.team_scores.clone(),
        }
    }

    /// All visible balls, including ours
    pub fn balls(&self) -> HashMap<u32, Ball> {
        self.inner.read().balls.clone()
    }

    /// Our visible balls keyed by id
    pub fn owned_balls(&self) -> HashMap<u32, Ball> {
        self.inner
            .read()
            .owned_balls()
            .map(|b| (b.id, b.clone()))
            .collect()
    }

    pub fn main_ball(&self) -> Option<Ball> {
        self.inner.read().main_ball().cloned()
    }

    pub fn leaderboard(&self) -> Vec<String> {
        self.inner.read().leaderboard.clone()
    }

    pub fn team_scores(&self) -> Vec<f32> {
        self.inner.read().team_scores.clone()
    }

    pub fn bounds(&self) -> Option<MapBounds> {
        self.inner.read().bounds
    }

    pub fn position(&self) -> Vec2 {
        self.inner.read().position()
    }

    pub fn zoom(&self) -> f32 {
        self.inner.read().camera.zoom
    }

    pub fn total_size(&self) -> i32 {
        self.inner.read().total_size()
    }
}
