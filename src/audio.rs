//! Audio system
//!
//! Procedurally generated cues and music loop via the Web Audio API - no
//! external files needed. Native builds are silent.

use crate::platform::Cue;
use crate::settings::Settings;

/// Bass line, one entry per eighth note (semitones above A1, None = rest)
#[rustfmt::skip]
pub const MUSIC_PATTERN: [Option<i32>; 16] = [
    Some(0), None, Some(0), Some(12), Some(0), None, Some(7), None,
    Some(5), None, Some(5), Some(17), Some(3), None, Some(7), Some(10),
];

/// Eighth note length at 140 BPM
pub const MUSIC_STEP_SECS: f64 = 60.0 / 140.0 / 2.0;

/// How far ahead the music scheduler queues notes
pub const MUSIC_LOOKAHEAD_SECS: f64 = 0.5;

const A1_HZ: f32 = 55.0;

/// Equal-tempered frequency for a semitone offset above A1
pub fn note_frequency(semitones: i32) -> f32 {
    A1_HZ * 2f32.powf(semitones as f32 / 12.0)
}

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::*;

    /// Running music voice: one oscillator retuned per step
    struct MusicVoice {
        osc: OscillatorNode,
        gain: GainNode,
        next_step_time: f64,
        step: usize,
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        sfx_gain: f32,
        music_gain: f32,
        music: Option<MusicVoice>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                sfx_gain: settings.sfx_gain(),
                music_gain: settings.music_gain(),
                music: None,
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.sfx_gain = settings.sfx_gain();
            self.music_gain = settings.music_gain();
            if let Some(voice) = &self.music {
                voice.gain.gain().set_value(self.music_gain * 0.25);
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound cue
        pub fn play(&self, cue: Cue) {
            let vol = self.sfx_gain;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                Cue::Jump => Self::play_jump(ctx, vol),
                Cue::Death => Self::play_death(ctx, vol),
            }
        }

        pub fn start_music(&mut self) {
            self.stop_music();
            let Some(ctx) = &self.ctx else { return };
            let Some((osc, gain)) = Self::create_osc(ctx, note_frequency(0), OscillatorType::Square)
            else {
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value_at_time(0.0, t).ok();
            osc.start().ok();
            self.music = Some(MusicVoice {
                osc,
                gain,
                next_step_time: t + 0.05,
                step: 0,
            });
            self.pump_music();
        }

        pub fn stop_music(&mut self) {
            if let Some(voice) = self.music.take() {
                voice.osc.stop().ok();
            }
        }

        /// Queue upcoming music steps. Call once per frame.
        pub fn pump_music(&mut self) {
            let Some(ctx) = &self.ctx else { return };
            let Some(voice) = &mut self.music else { return };
            let vol = self.music_gain * 0.25;
            let horizon = ctx.current_time() + MUSIC_LOOKAHEAD_SECS;

            while voice.next_step_time < horizon {
                let t = voice.next_step_time;
                match MUSIC_PATTERN[voice.step % MUSIC_PATTERN.len()] {
                    Some(semi) => {
                        voice.osc.frequency().set_value_at_time(note_frequency(semi), t).ok();
                        voice.gain.gain().set_value_at_time(vol, t).ok();
                        voice.gain.gain()
                            .linear_ramp_to_value_at_time(vol * 0.2, t + MUSIC_STEP_SECS * 0.9)
                            .ok();
                    }
                    None => {
                        voice.gain.gain().set_value_at_time(0.0, t).ok();
                    }
                }
                voice.step += 1;
                voice.next_step_time += MUSIC_STEP_SECS;
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Jump - quick rising blip
        fn play_jump(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 300.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(900.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Death - falling buzz over a low thud
        fn play_death(ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = Self::create_osc(ctx, 400.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.6)
                    .ok();
                osc.frequency().set_value_at_time(400.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.6)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.7).ok();
            }

            if let Some((osc, gain)) = Self::create_osc(ctx, 60.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Silent audio manager for native builds; tracks what would play
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct AudioManager {
    sfx_gain: f32,
    music_gain: f32,
    music_playing: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        log::info!("No audio backend on native - cues are silent");
        Self {
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
            music_playing: false,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_gain = settings.sfx_gain();
        self.music_gain = settings.music_gain();
    }

    pub fn resume(&self) {}

    pub fn play(&self, cue: Cue) {
        if self.sfx_gain > 0.0 {
            log::trace!("(silent) {} at gain {:.2}", cue.as_str(), self.sfx_gain);
        }
    }

    pub fn start_music(&mut self) {
        self.music_playing = true;
        log::trace!("(silent) music on at gain {:.2}", self.music_gain);
    }

    pub fn stop_music(&mut self) {
        self.music_playing = false;
    }

    pub fn pump_music(&mut self) {}

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }
}
