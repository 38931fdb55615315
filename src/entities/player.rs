/// The player ship. It slides along a fixed baseline, so only x is stored;
/// the baseline y and the movement bound are tuning constants owned by the
/// simulation and passed in by the caller.
///
/// `is_hit` is a one-frame pulse: set by the collision resolver, shown by the
/// renderer on the next draw, cleared at the start of the following tick.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub x: f32,
    pub hit_count: u32,
    pub is_hit: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            hit_count: 0,
            is_hit: false,
        }
    }

    pub fn move_left(&mut self, step: f32, bound: f32) {
        self.x = (self.x - step).max(-bound);
    }

    pub fn move_right(&mut self, step: f32, bound: f32) {
        self.x = (self.x + step).min(bound);
    }

    /// Records one hit from an enemy bullet or a ramming diver.
    pub fn register_hit(&mut self) {
        self.hit_count += 1;
        self.is_hit = true;
    }

    pub fn clear_hit_pulse(&mut self) {
        self.is_hit = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 0.01;
    const BOUND: f32 = 0.75;

    #[test]
    fn test_player_new() {
        let player = Player::new();
        assert_eq!(player.x, 0.0);
        assert_eq!(player.hit_count, 0);
        assert!(!player.is_hit);
    }

    #[test]
    fn test_movement_left_clamps() {
        let mut player = Player::new();
        player.move_left(STEP, BOUND);
        assert_eq!(player.x, -STEP);

        player.x = -BOUND;
        player.move_left(STEP, BOUND);
        assert_eq!(player.x, -BOUND);
    }

    #[test]
    fn test_movement_right_clamps() {
        let mut player = Player::new();
        player.move_right(STEP, BOUND);
        assert_eq!(player.x, STEP);

        player.x = BOUND;
        player.move_right(STEP, BOUND);
        assert_eq!(player.x, BOUND);
    }

    #[test]
    fn test_register_hit_sets_pulse() {
        let mut player = Player::new();
        player.register_hit();
        assert_eq!(player.hit_count, 1);
        assert!(player.is_hit);

        player.clear_hit_pulse();
        assert!(!player.is_hit);
        // Clearing the pulse never touches the counter
        assert_eq!(player.hit_count, 1);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_stays_within_bound(
                moves in prop::collection::vec(prop::bool::ANY, 0..300)
            ) {
                let mut player = Player::new();
                for move_right in moves {
                    if move_right {
                        player.move_right(STEP, BOUND);
                    } else {
                        player.move_left(STEP, BOUND);
                    }
                    prop_assert!(player.x.abs() <= BOUND);
                }
            }

            #[test]
            fn test_hit_count_never_decreases(
                hits in prop::collection::vec(prop::bool::ANY, 0..50)
            ) {
                let mut player = Player::new();
                let mut previous = 0;
                for hit in hits {
                    if hit {
                        player.register_hit();
                    } else {
                        player.clear_hit_pulse();
                    }
                    prop_assert!(player.hit_count >= previous);
                    previous = player.hit_count;
                }
            }
        }
    }
}
