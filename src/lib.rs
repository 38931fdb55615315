// Library exports for testing
pub use entities::{Bullet, Enemy, GameState, Particle, Player, Pool, PoolSlot};
pub use sim::{Command, Formation, SimEvent, Simulation};

pub mod app;
pub mod audio;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod sim;
