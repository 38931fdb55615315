//! Formation geometry and the patrol / dive state machine.
//!
//! All enemies live in one fixed pool; a slot index maps straight to a
//! formation row and column. Patrolling enemies share a single horizontal
//! velocity owned by [`Formation`]; a dive detaches one enemy onto a homing
//! trajectory and teleports it back into the grid when it leaves the
//! playfield.

use glam::Vec2;
use rand::Rng;

use crate::entities::{Enemy, Pool};

use super::{ENEMY_LIVES, PLAYER_Y};

pub const FORMATION_ROWS: usize = 3;
pub const FORMATION_COLS: usize = 9;
/// Pool capacity: one slot per grid position plus a few spares.
pub const ENEMY_CAPACITY: usize = 30;

/// Horizontal distance between columns and vertical distance between rows.
const COL_SPACING: f32 = 0.15;
const ROW_SPACING: f32 = 0.2;
const TOP_ROW_Y: f32 = 0.85;

pub const PATROL_SPEED: f32 = 0.003;
/// A patroller reaching this |x| flips the whole formation's direction.
pub const PATROL_X_BOUND: f32 = 0.9;

/// Minimum seconds between dive initiations, globally.
pub const DIVE_INTERVAL: f32 = 7.0;
const DIVE_SPEED: f32 = 0.012;
const HOMING_ACCEL: f32 = 0.0004;
/// A diver past either bound is done and teleports back into the grid.
const DIVE_EXIT_Y: f32 = -0.95;
const DIVE_EXIT_X: f32 = 1.0;

pub fn slot_row(slot: usize) -> usize {
    slot / FORMATION_COLS
}

pub fn slot_col(slot: usize) -> usize {
    slot % FORMATION_COLS
}

/// Phase-zero x of a column, centered on the screen.
pub fn home_x(col: usize) -> f32 {
    (col as f32 - (FORMATION_COLS as f32 - 1.0) / 2.0) * COL_SPACING
}

pub fn row_y(row: usize) -> f32 {
    TOP_ROW_Y - row as f32 * ROW_SPACING
}

/// Shared patrol state plus the global dive timer.
#[derive(Debug, Clone)]
pub struct Formation {
    /// Horizontal velocity applied to every patroller each tick; the sign is
    /// the current sweep direction.
    pub speed_x: f32,
    /// Clock time of the last successful dive initiation. `None` until the
    /// first tick arms it, so the opening dive comes one full interval after
    /// spawn.
    last_dive: Option<f32>,
}

impl Default for Formation {
    fn default() -> Self {
        Self::new()
    }
}

impl Formation {
    pub fn new() -> Self {
        Self {
            speed_x: PATROL_SPEED,
            last_dive: None,
        }
    }

    /// Activates the full grid: row-major, one slot per grid position.
    /// Spare slots beyond the grid stay free.
    pub fn spawn(&self, enemies: &mut Pool<Enemy>) {
        for slot in 0..FORMATION_ROWS * FORMATION_COLS {
            let home = Vec2::new(home_x(slot_col(slot)), row_y(slot_row(slot)));
            enemies.get_mut(slot).spawn_at(home, ENEMY_LIVES);
        }
    }

    /// One tick of enemy motion: patrol sweep, possible dive initiation,
    /// homing dive motion, and re-insertion of finished divers.
    pub fn update(
        &mut self,
        enemies: &mut Pool<Enemy>,
        now: f32,
        player_x: f32,
        rng: &mut impl Rng,
    ) {
        self.patrol(enemies);
        self.maybe_start_dive(enemies, now, player_x, rng);
        self.advance_dives(enemies, player_x);
        self.return_finished_dives(enemies);
    }

    fn patrol(&mut self, enemies: &mut Pool<Enemy>) {
        let speed = self.speed_x;
        for enemy in enemies.iter_mut() {
            if enemy.active && !enemy.diving {
                enemy.pos.x += speed;
            }
        }

        // One patroller reaching a bound while moving outward flips every
        // patroller's direction in the same tick.
        let at_bound = enemies.iter().any(|enemy| {
            enemy.active
                && !enemy.diving
                && ((enemy.pos.x >= PATROL_X_BOUND && speed > 0.0)
                    || (enemy.pos.x <= -PATROL_X_BOUND && speed < 0.0))
        });
        if at_bound {
            self.speed_x = -self.speed_x;
        }
    }

    fn maybe_start_dive(
        &mut self,
        enemies: &mut Pool<Enemy>,
        now: f32,
        player_x: f32,
        rng: &mut impl Rng,
    ) {
        let Some(last) = self.last_dive else {
            self.last_dive = Some(now);
            return;
        };
        if now - last < DIVE_INTERVAL {
            return;
        }

        // Only the bottom row may peel off, ascending slot order.
        let bottom = FORMATION_ROWS - 1;
        let candidates: Vec<usize> = (0..FORMATION_ROWS * FORMATION_COLS)
            .filter(|&slot| slot_row(slot) == bottom)
            .filter(|&slot| {
                let enemy = enemies.get(slot);
                enemy.active && !enemy.diving
            })
            .collect();

        // No candidate: leave the timer alone so the next tick may retry.
        if candidates.is_empty() {
            return;
        }

        let slot = candidates[rng.random_range(0..candidates.len())];
        let enemy = enemies.get_mut(slot);
        let target = Vec2::new(player_x, PLAYER_Y);
        enemy.vel = (target - enemy.pos).normalize_or(Vec2::NEG_Y) * DIVE_SPEED;
        enemy.diving = true;
        self.last_dive = Some(now);
    }

    fn advance_dives(&self, enemies: &mut Pool<Enemy>, player_x: f32) {
        // Steer toward where the player is now, not where the dive began.
        let target = Vec2::new(player_x, PLAYER_Y);
        for enemy in enemies.iter_mut() {
            if enemy.active && enemy.diving {
                enemy.vel += (target - enemy.pos).normalize_or(Vec2::ZERO) * HOMING_ACCEL;
                enemy.pos += enemy.vel;
            }
        }
    }

    fn return_finished_dives(&mut self, enemies: &mut Pool<Enemy>) {
        for slot in 0..enemies.capacity() {
            let enemy = *enemies.get(slot);
            if !enemy.active || !enemy.diving {
                continue;
            }
            if enemy.pos.y >= DIVE_EXIT_Y && enemy.pos.x.abs() <= DIVE_EXIT_X {
                continue;
            }

            // Sample the patrol phase from the first patroller in slot order
            // so the returning enemy lands in sync with the formation's
            // current sweep.
            let sample = (0..enemies.capacity()).filter(|&other| other != slot).find(|&other| {
                let other = enemies.get(other);
                other.active && !other.diving
            });

            let x = match sample {
                Some(other) => {
                    let offset = enemies.get(other).pos.x - home_x(slot_col(other));
                    home_x(slot_col(slot)) + offset + self.speed_x
                }
                None => {
                    // Nothing left to sync with: land at phase zero and
                    // restart the sweep at the base speed.
                    self.speed_x = PATROL_SPEED;
                    home_x(slot_col(slot))
                }
            };

            let enemy = enemies.get_mut(slot);
            enemy.pos = Vec2::new(x, row_y(slot_row(slot)));
            enemy.vel = Vec2::ZERO;
            enemy.diving = false;
        }
    }
}
