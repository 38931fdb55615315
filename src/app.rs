use color_eyre::Result;
use glam::Vec2;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::entities::{GameState, Particle, create_explosion_particles};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::sim::{Command, PLAYER_Y, SimEvent, Simulation};

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    game_state: GameState,
    /// The whole game world; replaced wholesale on restart
    sim: Simulation,
    /// Cosmetic explosion fragments, app-owned so the simulation stays pure
    particles: Vec<Particle>,
    /// Frames info
    frame_count: u64,
    last_frame_time: Instant,
    fps: u32,
    /// Game timers
    game_start_time: Instant,
    final_time_secs: Option<u64>,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            running: true,
            game_state: GameState::Playing,
            sim: Simulation::new(),
            particles: Vec::new(),
            frame_count: 0,
            last_frame_time: now,
            fps: 0,
            game_start_time: now,
            final_time_secs: None,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager: AudioManager::default(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            // Calculate FPS
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            // Render the frame
            terminal.draw(|frame| {
                // Use final time if game is over, otherwise calculate current elapsed time
                let elapsed_time_secs = self
                    .final_time_secs
                    .unwrap_or_else(|| self.game_start_time.elapsed().as_secs());
                let view = RenderView {
                    game_state: self.game_state,
                    player: &self.sim.player,
                    enemies: &self.sim.enemies,
                    player_bullets: &self.sim.player_bullets,
                    enemy_bullets: &self.sim.enemy_bullets,
                    particles: &self.particles,
                    score: self.sim.score,
                    hits_left: self.sim.hits_left(),
                    frame_count: self.frame_count,
                    area: frame.area(),
                    fps: self.fps,
                    elapsed_time_secs,
                };
                self.renderer.render(frame, &view);
            })?;

            // Poll input events and translate them into actions
            self.input_manager.poll_events(&self.game_state)?;
            let actions = self.input_manager.get_actions(&self.game_state);
            let commands = self.process_actions(&actions);

            // Update game state
            if self.game_state == GameState::Playing {
                self.update_game(&commands);
            }

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(Duration::from_millis(8));
        }
        Ok(())
    }

    /// Handles app-level actions directly and collects the rest into
    /// simulation commands for this frame.
    fn process_actions(&mut self, actions: &[InputAction]) -> Vec<Command> {
        let mut commands = Vec::new();
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Pause => {
                    self.game_state = GameState::Paused;
                }
                InputAction::Resume => {
                    self.game_state = GameState::Playing;
                }
                InputAction::Restart => {
                    self.restart();
                }
                InputAction::MoveLeft => commands.push(Command::MoveLeft),
                InputAction::MoveRight => commands.push(Command::MoveRight),
                InputAction::Fire => commands.push(Command::Fire),
            }
        }
        commands
    }

    /// Fresh simulation, fresh timers; pools are rebuilt at full capacity.
    fn restart(&mut self) {
        self.sim = Simulation::new();
        self.particles.clear();
        self.game_state = GameState::Playing;
        self.game_start_time = Instant::now();
        self.final_time_secs = None;
        self.frame_count = 0;
    }

    /// Advance the simulation by one tick and react to what happened
    fn update_game(&mut self, commands: &[Command]) {
        self.frame_count += 1;

        let now = self.game_start_time.elapsed().as_secs_f32();
        let events = self.sim.step(now, commands, &mut rand::rng());
        self.handle_events(&events);

        // Update particles
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| !p.is_dead());
    }

    fn handle_events(&mut self, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::PlayerFired => self.audio_manager.play_fire_sound(),
                SimEvent::EnemyFired => self.audio_manager.play_enemy_fire_sound(),
                SimEvent::EnemyHit { .. } => {}
                SimEvent::EnemyDestroyed { pos } => {
                    self.particles.extend(create_explosion_particles(*pos));
                    self.audio_manager.play_explosion_sound();
                }
                SimEvent::PlayerHit => {
                    let at = Vec2::new(self.sim.player.x, PLAYER_Y);
                    self.particles.extend(create_explosion_particles(at));
                    self.audio_manager.play_player_hit_sound();
                }
                SimEvent::GameOver => {
                    // Capture final time when transitioning to game over
                    self.final_time_secs = Some(self.game_start_time.elapsed().as_secs());
                    self.game_state = GameState::GameOver;
                }
            }
        }
    }
}
