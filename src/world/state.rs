//! World state and message application
//!
//! Everything here runs under the world's write lock; one call to
//! [`WorldState::apply`] is one atomic update.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use crate::protocol::{BallUpdate, ServerMessage, TickUpdate};

/// Map rectangle announced by the server
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl MapBounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Spectator camera, used while we own no balls
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

/// Things callers need to react to after a message is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Our last owned ball was eaten
    Died,
}

/// The canonical world model
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    /// Every visible ball, including ours
    pub(crate) balls: HashMap<u32, Ball>,
    /// Ids of our balls, oldest first
    pub(crate) owned: Vec<u32>,
    pub(crate) camera: Camera,
    pub(crate) bounds: Option<MapBounds>,
    pub(crate) leaderboard: Vec<String>,
    pub(crate) team_scores: Vec<f32>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one decoded server message
    pub fn apply(&mut self, message: ServerMessage) -> Vec<WorldEvent> {
        let mut events = Vec::new();
        match message {
            ServerMessage::Tick(tick) => self.apply_tick(tick, &mut events),
            ServerMessage::Spectate { x, y, zoom } => {
                self.camera = Camera { x, y, zoom };
            }
            ServerMessage::Spawned { id } => self.apply_spawn(id),
            ServerMessage::FfaLeaderboard(names) => self.leaderboard = names,
            ServerMessage::TeamScores(scores) => self.team_scores = scores,
            ServerMessage::MapSize(bounds) => {
                log::debug!("map bounds {:?}", bounds);
                self.bounds = Some(bounds);
            }
        }
        events
    }

    fn apply_tick(&mut self, tick: TickUpdate, events: &mut Vec<WorldEvent>) {
        for id in tick.eaten {
            self.balls.remove(&id);
            if self.remove_owned(id) {
                // The server resends everything after one of our balls dies
                self.balls.clear();
                if self.owned.is_empty() {
                    log::info!("last owned ball {} was eaten", id);
                    events.push(WorldEvent::Died);
                }
            }
        }

        for update in tick.updates {
            self.upsert(update);
        }

        for id in tick.removed {
            self.balls.remove(&id);
            self.remove_owned(id);
        }
    }

    fn apply_spawn(&mut self, id: u32) {
        self.balls
            .entry(id)
            .or_insert_with(|| Ball::new(id))
            .is_mine = true;
        if !self.owned.contains(&id) {
            self.owned.push(id);
        }
    }

    fn upsert(&mut self, update: BallUpdate) {
        let is_mine = self.owned.contains(&update.id);
        let ball = self
            .balls
            .entry(update.id)
            .or_insert_with(|| Ball::new(update.id));
        ball.position = update.position;
        ball.size = update.size;
        ball.color = update.color;
        ball.is_virus = update.is_virus;
        ball.is_mine = is_mine;
        if ball.name.is_none() || !update.name.is_empty() {
            ball.name = Some(update.name);
        }
    }

    fn remove_owned(&mut self, id: u32) -> bool {
        match self.owned.iter().position(|&owned| owned == id) {
            Some(index) => {
                self.owned.remove(index);
                true
            }
            None => false,
        }
    }

    /// Our owned balls that are currently visible, oldest first
    pub fn owned_balls(&self) -> impl Iterator<Item = &Ball> {
        self.owned.iter().filter_map(|id| self.balls.get(id))
    }

    /// Oldest owned ball still visible
    pub fn main_ball(&self) -> Option<&Ball> {
        self.owned_balls().next()
    }

    /// Sum of the sizes of our visible balls
    pub fn total_size(&self) -> i32 {
        self.owned_balls().map(|b| i32::from(b.size)).sum()
    }

    /// Main ball position, else the spectator camera
    pub fn position(&self) -> Vec2 {
        match self.main_ball() {
            Some(ball) => ball.position_f32(),
            None => Vec2::new(self.camera.x, self.camera.y),
        }
    }
}
