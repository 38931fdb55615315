//! Axis-aligned-box collision resolution across the three entity sets.
//!
//! All tests are plain overlap checks with fixed half-extents; nothing is
//! swept, so a fast mover can tunnel through a thin target. Scans run in
//! ascending slot order, which fixes the winner of simultaneous overlaps.

use glam::Vec2;

use crate::entities::{Bullet, Enemy, Player, Pool};

use super::{
    ENEMY_HALF_H, ENEMY_HALF_W, PLAYER_HALF_H, PLAYER_HALF_W, PLAYER_Y, SimEvent,
};

fn overlaps(a: Vec2, b: Vec2, half_w: f32, half_h: f32) -> bool {
    (a.x - b.x).abs() <= half_w && (a.y - b.y).abs() <= half_h
}

/// Player bullets vs enemies. Each hit costs one life and the bullet; a
/// lethal hit frees the enemy slot. A bullet damages at most one enemy per
/// tick: the enemy scan breaks on first match. Returns the number of kills.
pub fn player_bullets_vs_enemies(
    bullets: &mut Pool<Bullet>,
    enemies: &mut Pool<Enemy>,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let mut kills = 0;
    for b in 0..bullets.capacity() {
        if !bullets.get(b).active {
            continue;
        }
        let pos = bullets.get(b).pos;
        for e in 0..enemies.capacity() {
            let enemy = enemies.get_mut(e);
            if !enemy.active {
                continue;
            }
            if overlaps(pos, enemy.pos, ENEMY_HALF_W, ENEMY_HALF_H) {
                let at = enemy.pos;
                if enemy.take_hit() {
                    kills += 1;
                    events.push(SimEvent::EnemyDestroyed { pos: at });
                } else {
                    events.push(SimEvent::EnemyHit { pos: at });
                }
                bullets.release(b);
                break;
            }
        }
    }
    kills
}

/// A diving enemy ramming the player costs the player one hit and eliminates
/// the enemy outright. Box extents are the sum of both half-sizes. Returns
/// the number of kills.
pub fn divers_vs_player(
    enemies: &mut Pool<Enemy>,
    player: &mut Player,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let mut kills = 0;
    let player_pos = Vec2::new(player.x, PLAYER_Y);
    let reach_w = PLAYER_HALF_W + ENEMY_HALF_W;
    let reach_h = PLAYER_HALF_H + ENEMY_HALF_H;
    for e in 0..enemies.capacity() {
        let enemy = enemies.get_mut(e);
        if !enemy.active || !enemy.diving {
            continue;
        }
        if overlaps(enemy.pos, player_pos, reach_w, reach_h) {
            let at = enemy.pos;
            enemy.force_kill();
            kills += 1;
            player.register_hit();
            events.push(SimEvent::EnemyDestroyed { pos: at });
            events.push(SimEvent::PlayerHit);
        }
    }
    kills
}

/// Enemy bullets vs the player ship.
pub fn enemy_bullets_vs_player(
    bullets: &mut Pool<Bullet>,
    player: &mut Player,
    events: &mut Vec<SimEvent>,
) {
    let player_pos = Vec2::new(player.x, PLAYER_Y);
    for b in 0..bullets.capacity() {
        if !bullets.get(b).active {
            continue;
        }
        if overlaps(bullets.get(b).pos, player_pos, PLAYER_HALF_W, PLAYER_HALF_H) {
            bullets.release(b);
            player.register_hit();
            events.push(SimEvent::PlayerHit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ENEMY_BULLET_CAPACITY, ENEMY_LIVES, PLAYER_BULLET_CAPACITY};

    fn bullet_pool_with(positions: &[Vec2], capacity: usize) -> Pool<Bullet> {
        let mut pool: Pool<Bullet> = Pool::new(capacity);
        for (i, pos) in positions.iter().enumerate() {
            pool.get_mut(i).spawn_at(*pos);
        }
        pool
    }

    #[test]
    fn test_bullet_hit_costs_one_life() {
        let mut bullets = bullet_pool_with(&[Vec2::new(0.3, 0.5)], PLAYER_BULLET_CAPACITY);
        let mut enemies: Pool<Enemy> = Pool::new(4);
        enemies.get_mut(0).spawn_at(Vec2::new(0.3, 0.5), ENEMY_LIVES);
        let mut events = Vec::new();

        let kills = player_bullets_vs_enemies(&mut bullets, &mut enemies, &mut events);
        assert_eq!(kills, 0);
        assert_eq!(enemies.get(0).lives, ENEMY_LIVES - 1);
        assert!(enemies.get(0).active);
        assert!(enemies.get(0).hit_flash);
        assert!(!bullets.get(0).active);
        assert!(matches!(events[0], SimEvent::EnemyHit { .. }));
    }

    #[test]
    fn test_bullet_miss_outside_box() {
        let mut bullets =
            bullet_pool_with(&[Vec2::new(0.3 + ENEMY_HALF_W + 0.01, 0.5)], PLAYER_BULLET_CAPACITY);
        let mut enemies: Pool<Enemy> = Pool::new(4);
        enemies.get_mut(0).spawn_at(Vec2::new(0.3, 0.5), ENEMY_LIVES);
        let mut events = Vec::new();

        player_bullets_vs_enemies(&mut bullets, &mut enemies, &mut events);
        assert_eq!(enemies.get(0).lives, ENEMY_LIVES);
        assert!(bullets.get(0).active);
        assert!(events.is_empty());
    }

    #[test]
    fn test_lethal_hit_frees_slot_and_counts_kill() {
        let mut bullets = bullet_pool_with(&[Vec2::ZERO], PLAYER_BULLET_CAPACITY);
        let mut enemies: Pool<Enemy> = Pool::new(4);
        enemies.get_mut(0).spawn_at(Vec2::ZERO, 1);
        let mut events = Vec::new();

        let kills = player_bullets_vs_enemies(&mut bullets, &mut enemies, &mut events);
        assert_eq!(kills, 1);
        assert!(!enemies.get(0).active);
        assert!(matches!(events[0], SimEvent::EnemyDestroyed { .. }));
    }

    #[test]
    fn test_bullet_damages_at_most_one_enemy() {
        // Two enemies stacked on the same spot; the lower slot index wins
        let mut bullets = bullet_pool_with(&[Vec2::ZERO], PLAYER_BULLET_CAPACITY);
        let mut enemies: Pool<Enemy> = Pool::new(4);
        enemies.get_mut(0).spawn_at(Vec2::ZERO, ENEMY_LIVES);
        enemies.get_mut(1).spawn_at(Vec2::ZERO, ENEMY_LIVES);
        let mut events = Vec::new();

        player_bullets_vs_enemies(&mut bullets, &mut enemies, &mut events);
        assert_eq!(enemies.get(0).lives, ENEMY_LIVES - 1);
        assert_eq!(enemies.get(1).lives, ENEMY_LIVES);
    }

    #[test]
    fn test_diver_rams_player() {
        let mut enemies: Pool<Enemy> = Pool::new(4);
        enemies.get_mut(2).spawn_at(Vec2::new(0.1, PLAYER_Y + 0.2), ENEMY_LIVES);
        enemies.get_mut(2).diving = true;
        let mut player = Player::new();
        let mut events = Vec::new();

        let kills = divers_vs_player(&mut enemies, &mut player, &mut events);
        assert_eq!(kills, 1);
        assert_eq!(player.hit_count, 1);
        assert!(player.is_hit);
        assert!(!enemies.get(2).active);
        assert!(!enemies.get(2).diving);
        assert_eq!(enemies.get(2).lives, 0);
    }

    #[test]
    fn test_patroller_never_rams_player() {
        // Same overlap, but not diving: patrol enemies pass over harmlessly
        let mut enemies: Pool<Enemy> = Pool::new(4);
        enemies.get_mut(0).spawn_at(Vec2::new(0.0, PLAYER_Y), ENEMY_LIVES);
        let mut player = Player::new();
        let mut events = Vec::new();

        divers_vs_player(&mut enemies, &mut player, &mut events);
        assert_eq!(player.hit_count, 0);
        assert!(enemies.get(0).active);
    }

    #[test]
    fn test_enemy_bullet_hits_player() {
        let mut bullets = bullet_pool_with(
            &[Vec2::new(0.1, PLAYER_Y + 0.1)],
            ENEMY_BULLET_CAPACITY,
        );
        let mut player = Player::new();
        let mut events = Vec::new();

        enemy_bullets_vs_player(&mut bullets, &mut player, &mut events);
        assert_eq!(player.hit_count, 1);
        assert!(player.is_hit);
        assert!(!bullets.get(0).active);
        assert_eq!(events, vec![SimEvent::PlayerHit]);
    }

    #[test]
    fn test_enemy_bullet_misses_player() {
        let mut bullets = bullet_pool_with(
            &[Vec2::new(PLAYER_HALF_W + 0.01, PLAYER_Y)],
            ENEMY_BULLET_CAPACITY,
        );
        let mut player = Player::new();
        let mut events = Vec::new();

        enemy_bullets_vs_player(&mut bullets, &mut player, &mut events);
        assert_eq!(player.hit_count, 0);
        assert!(bullets.get(0).active);
    }
}
