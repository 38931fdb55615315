use glam::Vec2;

use super::pool::PoolSlot;

/// A single shot, owned by either the player-bullet or enemy-bullet pool.
/// Direction of travel is a property of the owning pool, not the bullet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bullet {
    pub pos: Vec2,
    pub active: bool,
}

impl Bullet {
    /// Initializes a freshly allocated slot.
    pub fn spawn_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.active = true;
    }
}

impl PoolSlot for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_at_activates() {
        let mut bullet = Bullet::default();
        assert!(!bullet.active);

        bullet.spawn_at(Vec2::new(0.25, -0.25));
        assert!(bullet.active);
        assert_eq!(bullet.pos, Vec2::new(0.25, -0.25));
    }

    #[test]
    fn test_deactivate_keeps_position() {
        let mut bullet = Bullet::default();
        bullet.spawn_at(Vec2::new(0.5, 0.0));
        bullet.deactivate();
        assert!(!bullet.active);
        assert_eq!(bullet.pos, Vec2::new(0.5, 0.0));
    }
}
