mod bullet;
mod enemy;
mod game_state;
mod particle;
mod player;
mod pool;

// Re-export all public types
pub use bullet::Bullet;
pub use enemy::Enemy;
pub use game_state::GameState;
pub use particle::{Particle, create_explosion_particles};
pub use player::Player;
pub use pool::{Pool, PoolSlot};
