//! Axis-aligned collision detection between the player and falling items
//!
//! The core only ever asks two questions of an entity: where its collision
//! box is and where it should be drawn. Everything else is plain rectangle
//! overlap.

use glam::Vec2;

use super::state::{FallingItem, ItemKind, Player};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True if the interiors intersect (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Grow the box by `margin` on every side
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }
}

/// Anything with a collision box and a draw rectangle
pub trait Bounded {
    fn bounds(&self) -> Aabb;

    /// Destination rectangle for drawing (defaults to the collision box)
    fn draw_bounds(&self) -> Aabb {
        self.bounds()
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Player::size())
    }
}

impl Bounded for FallingItem {
    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.size))
    }

    fn draw_bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.size * self.draw_scale))
    }
}

/// Contacts found in one tick, as indices into the item slice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collisions {
    /// First obstacle (in item order) touching the player
    pub fatal: Option<usize>,
    /// Collectibles touching the player; empty whenever `fatal` is set
    pub collected: Vec<usize>,
    /// Obstacles inside the near-miss band but not touching
    pub grazed: Vec<usize>,
}

/// Find every item touching the player
///
/// Obstacles win over collectibles: if any obstacle overlaps, the round ends
/// and no collectible from the same tick is credited.
pub fn resolve_collisions(player: &Aabb, items: &[FallingItem], near_miss: f32) -> Collisions {
    let fatal = items
        .iter()
        .position(|item| item.kind == ItemKind::Obstacle && item.bounds().overlaps(player));
    if fatal.is_some() {
        return Collisions {
            fatal,
            ..Default::default()
        };
    }

    let band = player.expand(near_miss);
    let mut collisions = Collisions::default();
    for (index, item) in items.iter().enumerate() {
        let bounds = item.bounds();
        match item.kind {
            ItemKind::Collectible if bounds.overlaps(player) => collisions.collected.push(index),
            ItemKind::Obstacle if bounds.overlaps(&band) => collisions.grazed.push(index),
            _ => {}
        }
    }
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NEAR_MISS_DISTANCE;

    fn item_at(id: u32, kind: ItemKind, pos: Vec2) -> FallingItem {
        let mut item = FallingItem::new(id, kind, pos.x, 0.0);
        item.pos = pos;
        item
    }

    #[test]
    fn test_overlap_excludes_touching_edges() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        let c = Aabb::from_center(Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_draw_bounds_follow_pulse() {
        let mut item = item_at(1, ItemKind::Collectible, Vec2::new(100.0, 100.0));
        item.draw_scale = 1.1;
        assert!(item.draw_bounds().size().x > item.bounds().size().x);
        assert_eq!(item.draw_bounds().center(), item.bounds().center());
    }

    #[test]
    fn test_obstacle_beats_collectible() {
        let player = Player::new();
        let items = vec![
            item_at(1, ItemKind::Collectible, player.pos),
            item_at(2, ItemKind::Obstacle, player.pos),
        ];
        let hits = resolve_collisions(&player.bounds(), &items, NEAR_MISS_DISTANCE);
        assert_eq!(hits.fatal, Some(1));
        assert!(hits.collected.is_empty());
    }

    #[test]
    fn test_first_obstacle_is_fatal() {
        let player = Player::new();
        let items = vec![
            item_at(1, ItemKind::Obstacle, player.pos + Vec2::new(5.0, 0.0)),
            item_at(2, ItemKind::Obstacle, player.pos),
        ];
        let hits = resolve_collisions(&player.bounds(), &items, NEAR_MISS_DISTANCE);
        assert_eq!(hits.fatal, Some(0));
    }

    #[test]
    fn test_collects_all_touching_collectibles() {
        let player = Player::new();
        let items = vec![
            item_at(1, ItemKind::Collectible, player.pos),
            item_at(2, ItemKind::Collectible, Vec2::new(50.0, 50.0)),
            item_at(3, ItemKind::Collectible, player.pos + Vec2::new(-10.0, 0.0)),
        ];
        let hits = resolve_collisions(&player.bounds(), &items, NEAR_MISS_DISTANCE);
        assert_eq!(hits.fatal, None);
        assert_eq!(hits.collected, vec![0, 2]);
    }

    #[test]
    fn test_near_miss_band() {
        let player = Player::new();
        let bounds = player.bounds();
        // Obstacle just right of the player, 5px gap
        let x = bounds.max.x + 5.0 + 35.0 / 2.0;
        let items = vec![item_at(1, ItemKind::Obstacle, Vec2::new(x, player.pos.y))];
        let hits = resolve_collisions(&bounds, &items, NEAR_MISS_DISTANCE);
        assert_eq!(hits.fatal, None);
        assert_eq!(hits.grazed, vec![0]);
    }
}
