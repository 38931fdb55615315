use glam::Vec2;
use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::entities::{Bullet, Enemy, GameState, Particle, Player, Pool};
use crate::sim::PLAYER_Y;

/// Maps a playfield position (unit square, y up) to an absolute terminal
/// cell, or None when the position is off the field or the area is empty.
pub fn project(pos: Vec2, area: Rect) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    if !(-1.0..=1.0).contains(&pos.x) || !(-1.0..=1.0).contains(&pos.y) {
        return None;
    }
    let col = ((pos.x + 1.0) / 2.0 * (area.width - 1) as f32).round() as u16;
    let row = ((1.0 - pos.y) / 2.0 * (area.height - 1) as f32).round() as u16;
    Some((area.x + col, area.y + row))
}

const PLAYER_SPRITE: [&str; 3] = [" /^\\ ", "<|||>", " ||| "];
const ENEMY_SPRITE: &str = "<o>";
const DIVER_SPRITE: &str = "\\o/";

/// View struct that holds all game state needed for rendering.
/// Positions and boolean flags only; the simulation keeps everything else.
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub enemies: &'a Pool<Enemy>,
    pub player_bullets: &'a Pool<Bullet>,
    pub enemy_bullets: &'a Pool<Bullet>,
    pub particles: &'a [Particle],
    pub score: u32,
    pub hits_left: u32,
    pub frame_count: u64,
    pub area: Rect,
    pub fps: u32,
    pub elapsed_time_secs: u64,
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    // Future: could add theme/config fields here
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    /// Creates a new GameRenderer
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        // Render stars (simple background)
        if view.frame_count % 10 < 5 {
            let star_text = (0..area.height)
                .map(|_| {
                    let mut rng = rand::rng();
                    if rng.random_bool(0.05) { "." } else { " " }
                })
                .collect::<Vec<_>>()
                .join("\n");
            frame.render_widget(
                Paragraph::new(star_text).style(Style::default().fg(Color::DarkGray)),
                area,
            );
        }

        let buffer = frame.buffer_mut();

        // Render player; flash white for one frame when struck
        let player_color = if view.player.is_hit {
            Color::White
        } else {
            Color::Green
        };
        if let Some((cx, cy)) = project(Vec2::new(view.player.x, PLAYER_Y), area) {
            for (i, line) in PLAYER_SPRITE.iter().enumerate() {
                let x = cx as i32 - 2;
                let y = cy as i32 - 1 + i as i32;
                draw_clipped(
                    buffer,
                    area,
                    x,
                    y,
                    line,
                    Style::default()
                        .fg(player_color)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        // Render enemies; divers get their own sprite, fresh hits flash white
        for enemy in view.enemies.iter() {
            if !enemy.active {
                continue;
            }
            let (sprite, color) = if enemy.hit_flash {
                (ENEMY_SPRITE, Color::White)
            } else if enemy.diving {
                (DIVER_SPRITE, Color::Magenta)
            } else {
                (ENEMY_SPRITE, Color::Red)
            };
            if let Some((cx, cy)) = project(enemy.pos, area) {
                draw_clipped(
                    buffer,
                    area,
                    cx as i32 - 1,
                    cy as i32,
                    sprite,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }

        // Render bullets
        for bullet in view.player_bullets.iter() {
            if bullet.active
                && let Some((cx, cy)) = project(bullet.pos, area)
            {
                buffer.set_string(cx, cy, "|", Style::default().fg(Color::Yellow));
            }
        }
        for bullet in view.enemy_bullets.iter() {
            if bullet.active
                && let Some((cx, cy)) = project(bullet.pos, area)
            {
                buffer.set_string(cx, cy, "!", Style::default().fg(Color::Magenta));
            }
        }

        // Render particles, fading with age
        for particle in view.particles {
            let color = if particle.lifetime > 4 {
                Color::Red
            } else {
                Color::Yellow
            };
            if let Some((cx, cy)) = project(particle.pos, area) {
                buffer.set_string(
                    cx,
                    cy,
                    particle.glyph.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }

        // Stats overlay at the top - left side
        let stats_left = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Hits left: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.hits_left),
                if view.hits_left > 5 {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else if view.hits_left > 2 {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                },
            ),
            Span::styled("  Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.enemies.active_count()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };

        frame.render_widget(Paragraph::new(stats_left), stats_area);

        // Timer in center of header
        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;
        let timer_text = Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:02}:{:02}", minutes, seconds),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let timer_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        };

        frame.render_widget(Paragraph::new(timer_text).centered(), timer_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D or Arrows: Move] [Space: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };

        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        // First render the game screen
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = Rect {
            x: (area.width / 2).saturating_sub(15),
            y: (area.height / 2).saturating_sub(3),
            width: 30.min(area.width),
            height: 6.min(area.height),
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;

        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║      GAME OVER!           ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Time Survived: {:02}:{:02}", minutes, seconds))
                .centered()
                .cyan()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            area,
        );
    }
}

/// Writes a one-line string at (x, y), skipping it entirely when any part
/// would fall outside the area.
fn draw_clipped(
    buffer: &mut ratatui::buffer::Buffer,
    area: Rect,
    x: i32,
    y: i32,
    text: &str,
    style: Style,
) {
    let width = text.len() as i32;
    if x < area.x as i32
        || y < area.y as i32
        || x + width > (area.x + area.width) as i32
        || y >= (area.y + area.height) as i32
    {
        return;
    }
    buffer.set_string(x as u16, y as u16, text, style);
}
