//! Tracked circular entities (player cells, viruses, food)

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::{EAT_RATIO, FOOD_MAX_SIZE};

/// 24-bit ball color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Any ball the server tells us about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Server-assigned id, never reused within a session
    pub id: u32,
    /// None until the server has sent a name
    pub name: Option<String>,
    /// World coordinates
    pub position: IVec2,
    pub size: i16,
    pub color: Color,
    /// Owned by the local player
    pub is_mine: bool,
    pub is_virus: bool,
}

impl Ball {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            name: None,
            position: IVec2::ZERO,
            size: 0,
            color: Color::default(),
            is_mine: false,
            is_virus: false,
        }
    }

    /// Position as floats, for projection and geometry
    #[inline]
    pub fn position_f32(&self) -> Vec2 {
        self.position.as_vec2()
    }

    fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// Small, nameless and not ours
    pub fn is_food(&self) -> bool {
        !self.is_virus && !self.is_mine && self.size <= FOOD_MAX_SIZE && !self.has_name()
    }

    /// Another player's cell
    pub fn is_enemy(&self) -> bool {
        !self.is_virus && !self.is_mine && !self.is_food()
    }

    /// Whether this ball is big enough to eat `target`
    pub fn can_eat(&self, target: &Ball) -> bool {
        can_eat(self.size, target.size)
    }
}

/// Size rule for eating, independent of any ball
#[inline]
pub fn can_eat(size: i16, target_size: i16) -> bool {
    f64::from(size) / f64::from(target_size) >= EAT_RATIO
}
