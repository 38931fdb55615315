use glam::Vec2;

use super::pool::PoolSlot;

/// A formation enemy. While patrolling it moves with the shared formation
/// speed and `vel` is unused; during a dive `vel` carries the homing
/// trajectory. `hit_flash` is a one-frame pulse for the renderer, cleared at
/// the start of the next tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub lives: u8,
    pub active: bool,
    pub diving: bool,
    pub hit_flash: bool,
}

impl Enemy {
    /// Initializes a freshly allocated slot at its formation home position.
    pub fn spawn_at(&mut self, pos: Vec2, lives: u8) {
        *self = Enemy {
            pos,
            vel: Vec2::ZERO,
            lives,
            active: true,
            diving: false,
            hit_flash: false,
        };
    }

    /// Applies one bullet hit. Returns true when the hit was lethal.
    /// Lives never go back up; reaching zero deactivates the slot for good.
    pub fn take_hit(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.hit_flash = true;
        if self.lives == 0 {
            self.active = false;
            self.diving = false;
            return true;
        }
        false
    }

    /// Immediate elimination, used when a diver rams the player.
    pub fn force_kill(&mut self) {
        self.lives = 0;
        self.active = false;
        self.diving = false;
    }
}

impl PoolSlot for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}
