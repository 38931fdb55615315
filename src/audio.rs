use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::time::Duration;

/// Audio manager for playing sound effects. All effects are short
/// synthesized tones, so there are no asset files to load.
pub struct AudioManager {
    /// Output stream and handle, or None when audio is unavailable
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl AudioManager {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let output = OutputStream::try_default()?;
        Ok(Self {
            output: Some(output),
        })
    }

    /// Player shot: short high blip
    pub fn play_fire_sound(&self) {
        self.play_tone(880.0, 60, 0.05);
    }

    /// Enemy shot: quieter, lower blip
    pub fn play_enemy_fire_sound(&self) {
        self.play_tone(440.0, 40, 0.02);
    }

    /// Enemy destroyed: low rumble
    pub fn play_explosion_sound(&self) {
        self.play_tone(110.0, 180, 0.08);
    }

    /// Player struck
    pub fn play_player_hit_sound(&self) {
        self.play_tone(220.0, 150, 0.08);
    }

    fn play_tone(&self, freq: f32, millis: u64, volume: f32) {
        // Ignore errors for sound playback - don't want to crash the game
        if let Some((_, handle)) = &self.output
            && let Ok(sink) = Sink::try_new(handle)
        {
            let source = SineWave::new(freq)
                .take_duration(Duration::from_millis(millis))
                .amplify(volume);
            sink.append(source);
            sink.detach();
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new().unwrap_or_else(|err| {
            // No audio device is not fatal; the game just runs silent
            eprintln!("Warning: Failed to initialize audio: {}", err);
            Self { output: None }
        })
    }
}
