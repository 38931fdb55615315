/// Top-level application state, owned by the app loop rather than the
/// simulation. The simulation itself only knows about its own terminal
/// (game-over) condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}
