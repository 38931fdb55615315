//! The game simulation.
//!
//! One `step` is one rendered frame. The module is deterministic and
//! platform-free: the monotonic clock value and the RNG are injected by the
//! caller, so the binary passes wall-clock seconds and `rand::rng()` while
//! tests pass hand-picked times and a seeded generator.

pub mod collision;
pub mod formation;

use glam::Vec2;
use rand::Rng;

use crate::entities::{Bullet, Enemy, Player, Pool};

pub use formation::Formation;

// Playfield: unit square, x and y in [-1, 1], y pointing up.

pub const PLAYER_Y: f32 = -0.5;
pub const PLAYER_HALF_W: f32 = 0.25;
pub const PLAYER_HALF_H: f32 = 0.25;
/// The ship slides within this |x|.
pub const PLAYER_X_BOUND: f32 = 0.75;
pub const PLAYER_SPEED: f32 = 0.01;
/// Hits the player can take before the game ends.
pub const PLAYER_DEATH_THRESHOLD: u32 = 10;

pub const ENEMY_HALF_W: f32 = 0.10;
pub const ENEMY_HALF_H: f32 = 0.10;
pub const ENEMY_LIVES: u8 = 2;

pub const PLAYER_BULLET_CAPACITY: usize = 10;
pub const ENEMY_BULLET_CAPACITY: usize = 5;
/// Per-tick bullet travel; player bullets go up, enemy bullets go down.
pub const PLAYER_BULLET_SPEED: f32 = 0.01;
pub const ENEMY_BULLET_SPEED: f32 = 0.01;
/// Player bullets leave the muzzle just above the ship.
const PLAYER_BULLET_SPAWN_OFFSET: f32 = 0.25;

/// Seconds between successful shots. The player cooldown is global across
/// the pool; enemy cooldowns are supplied per call site.
pub const PLAYER_FIRE_COOLDOWN: f32 = 0.65;
pub const DIVE_FIRE_COOLDOWN: f32 = 0.2;
pub const FORMATION_FIRE_COOLDOWN: f32 = 2.0;
/// One-in-N chance per tick that the formation takes a pot-shot at all.
const FORMATION_FIRE_ODDS: u32 = 30;

/// Abstract input for one tick. App-level actions (pause, restart, quit)
/// never reach the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Fire,
}

/// What happened during a tick. The app layer turns these into sounds,
/// particles, and the game-over transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    PlayerFired,
    EnemyFired,
    EnemyHit { pos: Vec2 },
    EnemyDestroyed { pos: Vec2 },
    PlayerHit,
    GameOver,
}

/// Owns every pool and timer for one game session. Created at startup,
/// replaced wholesale on restart.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub player: Player,
    pub enemies: Pool<Enemy>,
    pub player_bullets: Pool<Bullet>,
    pub enemy_bullets: Pool<Bullet>,
    pub formation: Formation,
    /// Enemies destroyed this session.
    pub score: u32,
    last_player_shot: Option<f32>,
    last_enemy_shot: Option<f32>,
    over: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        let formation = Formation::new();
        let mut enemies = Pool::new(formation::ENEMY_CAPACITY);
        formation.spawn(&mut enemies);

        Self {
            player: Player::new(),
            enemies,
            player_bullets: Pool::new(PLAYER_BULLET_CAPACITY),
            enemy_bullets: Pool::new(ENEMY_BULLET_CAPACITY),
            formation,
            score: 0,
            last_player_shot: None,
            last_enemy_shot: None,
            over: false,
        }
    }

    /// True once the player has taken the last hit. A finished simulation
    /// never mutates again; the caller decides between shutdown and restart.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Remaining hits before the game ends, for the HUD.
    pub fn hits_left(&self) -> u32 {
        PLAYER_DEATH_THRESHOLD.saturating_sub(self.player.hit_count)
    }

    /// Advances the world by one tick: apply commands, move bullets, move
    /// the formation and its divers, resolve collisions, check for death.
    /// `now` is monotonic seconds, queried once by the caller so every
    /// cooldown comparison inside the tick sees the same instant.
    pub fn step(&mut self, now: f32, commands: &[Command], rng: &mut impl Rng) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.over {
            return events;
        }

        // Last tick's one-frame pulses have been rendered by now
        self.player.clear_hit_pulse();
        for enemy in self.enemies.iter_mut() {
            enemy.hit_flash = false;
        }

        for command in commands {
            match command {
                Command::MoveLeft => self.player.move_left(PLAYER_SPEED, PLAYER_X_BOUND),
                Command::MoveRight => self.player.move_right(PLAYER_SPEED, PLAYER_X_BOUND),
                Command::Fire => self.fire_player_bullet(now, &mut events),
            }
        }

        self.advance_bullets();
        self.formation
            .update(&mut self.enemies, now, self.player.x, rng);
        self.enemy_fire(now, rng, &mut events);

        self.score += collision::player_bullets_vs_enemies(
            &mut self.player_bullets,
            &mut self.enemies,
            &mut events,
        );
        self.score +=
            collision::divers_vs_player(&mut self.enemies, &mut self.player, &mut events);
        collision::enemy_bullets_vs_player(&mut self.enemy_bullets, &mut self.player, &mut events);

        if self.player.hit_count >= PLAYER_DEATH_THRESHOLD {
            self.over = true;
            events.push(SimEvent::GameOver);
        }

        events
    }

    fn fire_player_bullet(&mut self, now: f32, events: &mut Vec<SimEvent>) {
        if let Some(last) = self.last_player_shot
            && now - last < PLAYER_FIRE_COOLDOWN
        {
            return;
        }
        // Pool exhausted: drop the shot silently and keep the cooldown
        // clock, since no shot actually happened.
        let Some(slot) = self.player_bullets.allocate() else {
            return;
        };
        let muzzle = Vec2::new(self.player.x, PLAYER_Y + PLAYER_BULLET_SPAWN_OFFSET);
        self.player_bullets.get_mut(slot).spawn_at(muzzle);
        self.last_player_shot = Some(now);
        events.push(SimEvent::PlayerFired);
    }

    fn fire_enemy_bullet(
        &mut self,
        now: f32,
        from: Vec2,
        cooldown: f32,
        events: &mut Vec<SimEvent>,
    ) {
        if let Some(last) = self.last_enemy_shot
            && now - last < cooldown
        {
            return;
        }
        let Some(slot) = self.enemy_bullets.allocate() else {
            return;
        };
        self.enemy_bullets.get_mut(slot).spawn_at(from);
        self.last_enemy_shot = Some(now);
        events.push(SimEvent::EnemyFired);
    }

    fn advance_bullets(&mut self) {
        for bullet in self.player_bullets.iter_mut() {
            if bullet.active {
                bullet.pos.y += PLAYER_BULLET_SPEED;
                if bullet.pos.y > 1.0 {
                    bullet.active = false;
                }
            }
        }
        for bullet in self.enemy_bullets.iter_mut() {
            if bullet.active {
                bullet.pos.y -= ENEMY_BULLET_SPEED;
                if bullet.pos.y < -1.0 {
                    bullet.active = false;
                }
            }
        }
    }

    fn enemy_fire(&mut self, now: f32, rng: &mut impl Rng, events: &mut Vec<SimEvent>) {
        // Divers shoot on a short leash; the shared cooldown still caps the
        // overall rate.
        for slot in 0..self.enemies.capacity() {
            let enemy = *self.enemies.get(slot);
            if enemy.active && enemy.diving {
                let muzzle = enemy.pos - Vec2::new(0.0, ENEMY_HALF_H);
                self.fire_enemy_bullet(now, muzzle, DIVE_FIRE_COOLDOWN, events);
            }
        }

        // The formation takes an occasional pot-shot from a random patroller.
        if rng.random_range(0..FORMATION_FIRE_ODDS) != 0 {
            return;
        }
        let patrollers: Vec<usize> = (0..self.enemies.capacity())
            .filter(|&slot| {
                let enemy = self.enemies.get(slot);
                enemy.active && !enemy.diving
            })
            .collect();
        if patrollers.is_empty() {
            return;
        }
        let slot = patrollers[rng.random_range(0..patrollers.len())];
        let muzzle = self.enemies.get(slot).pos - Vec2::new(0.0, ENEMY_HALF_H);
        self.fire_enemy_bullet(now, muzzle, FORMATION_FIRE_COOLDOWN, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_new_simulation_layout() {
        let sim = Simulation::new();
        assert_eq!(
            sim.enemies.active_count(),
            formation::FORMATION_ROWS * formation::FORMATION_COLS
        );
        assert_eq!(sim.player_bullets.active_count(), 0);
        assert_eq!(sim.enemy_bullets.active_count(), 0);
        assert_eq!(sim.score, 0);
        assert!(!sim.is_over());
    }

    #[test]
    fn test_fire_within_cooldown_is_rejected() {
        let mut sim = Simulation::new();
        sim.step(0.0, &[Command::Fire], &mut rng());
        assert_eq!(sim.player_bullets.active_count(), 1);

        // 0.1 s later: still cooling down
        sim.step(0.1, &[Command::Fire], &mut rng());
        assert_eq!(sim.player_bullets.active_count(), 1);

        // past the cooldown
        sim.step(0.75, &[Command::Fire], &mut rng());
        assert_eq!(sim.player_bullets.active_count(), 2);
    }

    #[test]
    fn test_player_bullet_spawns_above_ship() {
        let mut sim = Simulation::new();
        sim.step(0.0, &[Command::Fire], &mut rng());
        let bullet = sim.player_bullets.get(0);
        assert!(bullet.active);
        assert_eq!(bullet.pos.x, sim.player.x);
        // Spawned at the muzzle, then advanced one tick upward
        let expected_y = PLAYER_Y + PLAYER_BULLET_SPAWN_OFFSET + PLAYER_BULLET_SPEED;
        assert!((bullet.pos.y - expected_y).abs() < 1e-6);
    }

    #[test]
    fn test_full_pool_drops_shot_and_keeps_clock() {
        let mut sim = Simulation::new();
        for slot in 0..PLAYER_BULLET_CAPACITY {
            sim.player_bullets
                .get_mut(slot)
                .spawn_at(Vec2::new(0.0, 0.0));
        }
        let mut events = Vec::new();
        sim.fire_player_bullet(100.0, &mut events);
        assert!(events.is_empty());
        assert_eq!(sim.player_bullets.active_count(), PLAYER_BULLET_CAPACITY);
        assert_eq!(sim.last_player_shot, None);
    }

    #[test]
    fn test_enemy_bullet_pool_capacity_is_hard() {
        let mut sim = Simulation::new();
        let mut events = Vec::new();
        // Six rapid requests with no cooldown in the way
        for i in 0..6 {
            sim.fire_enemy_bullet(i as f32 * 10.0, Vec2::new(0.0, 0.5), 0.0, &mut events);
        }
        assert_eq!(sim.enemy_bullets.active_count(), ENEMY_BULLET_CAPACITY);
        assert_eq!(events.len(), ENEMY_BULLET_CAPACITY);
    }

    #[test]
    fn test_bullets_expire_off_screen() {
        let mut sim = Simulation::new();
        sim.player_bullets.get_mut(0).spawn_at(Vec2::new(0.0, 0.995));
        sim.enemy_bullets.get_mut(0).spawn_at(Vec2::new(0.0, -0.995));

        sim.advance_bullets();
        assert_eq!(sim.player_bullets.active_count(), 0);
        assert_eq!(sim.enemy_bullets.active_count(), 0);
    }

    #[test]
    fn test_move_commands_clamp_to_bound() {
        let mut sim = Simulation::new();
        // Far more ticks than needed to reach the bound
        for tick in 0..200 {
            sim.step(tick as f32 * 0.016, &[Command::MoveRight], &mut rng());
        }
        assert!((sim.player.x - PLAYER_X_BOUND).abs() < 1e-6);
    }

    #[test]
    fn test_finished_simulation_is_frozen() {
        let mut sim = Simulation::new();
        sim.player.hit_count = PLAYER_DEATH_THRESHOLD - 1;
        sim.enemy_bullets
            .get_mut(0)
            .spawn_at(Vec2::new(0.0, PLAYER_Y));

        let events = sim.step(0.0, &[], &mut rng());
        assert!(events.contains(&SimEvent::GameOver));
        assert!(sim.is_over());

        // Later steps are no-ops: nothing moves, nothing fires
        let before = sim.clone();
        let events = sim.step(1.0, &[Command::Fire, Command::MoveLeft], &mut rng());
        assert!(events.is_empty());
        assert_eq!(sim.player.x, before.player.x);
        assert_eq!(sim.player_bullets.active_count(), 0);
        assert_eq!(sim.score, before.score);
    }

    #[test]
    fn test_hit_pulses_last_exactly_one_tick() {
        let mut sim = Simulation::new();
        sim.enemy_bullets
            .get_mut(0)
            .spawn_at(Vec2::new(0.0, PLAYER_Y));

        sim.step(0.0, &[], &mut rng());
        assert!(sim.player.is_hit);

        sim.step(0.016, &[], &mut rng());
        assert!(!sim.player.is_hit);
        assert_eq!(sim.player.hit_count, 1);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_pool_counts_never_exceed_capacity(
                seed in 0u64..16,
                ticks in 1usize..600
            ) {
                let mut sim = Simulation::new();
                let mut r = StdRng::seed_from_u64(seed);
                // Spam fire every tick
                for tick in 0..ticks {
                    sim.step(tick as f32 * 0.016, &[Command::Fire], &mut r);
                    prop_assert!(
                        sim.player_bullets.active_count() <= PLAYER_BULLET_CAPACITY
                    );
                    prop_assert!(
                        sim.enemy_bullets.active_count() <= ENEMY_BULLET_CAPACITY
                    );
                    prop_assert!(
                        sim.enemies.active_count()
                            <= formation::FORMATION_ROWS * formation::FORMATION_COLS
                    );
                }
            }

            #[test]
            fn test_score_never_decreases(
                seed in 0u64..16,
                ticks in 1usize..400
            ) {
                let mut sim = Simulation::new();
                let mut r = StdRng::seed_from_u64(seed);
                let mut previous = 0;
                for tick in 0..ticks {
                    sim.step(tick as f32 * 0.016, &[Command::Fire], &mut r);
                    prop_assert!(sim.score >= previous);
                    previous = sim.score;
                }
            }
        }
    }
}
