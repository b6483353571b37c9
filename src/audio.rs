//! Sound effects
//!
//! The simulation only reports what happened; this module maps those events
//! to cues and plays them. Every cue is a short list of pitch-swept tones so
//! no audio files are needed. Playback is best effort: failures are dropped.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Avatar leaves the ground
    Jump,
    /// Avatar touches down
    Land,
    GameOver,
    /// Every 100 points
    Milestone,
    /// Any pickup collected
    PowerUp,
    BossArrive,
    /// Boss survived
    BossDefeat,
}

/// Oscillator shape, independent of the audio backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
}

/// One pitch sweep with a linear fade-out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub start_hz: f32,
    pub end_hz: f32,
    /// Seconds
    pub duration: f64,
    pub wave: Waveform,
    pub volume: f32,
    /// Seconds after the cue starts
    pub delay: f64,
}

const fn tone(
    start_hz: f32,
    end_hz: f32,
    duration: f64,
    wave: Waveform,
    volume: f32,
    delay: f64,
) -> Tone {
    Tone {
        start_hz,
        end_hz,
        duration,
        wave,
        volume,
        delay,
    }
}

const JUMP: [Tone; 1] = [tone(300.0, 600.0, 0.12, Waveform::Sine, 0.2, 0.0)];
const LAND: [Tone; 1] = [tone(150.0, 80.0, 0.08, Waveform::Triangle, 0.25, 0.0)];
const GAME_OVER: [Tone; 3] = [
    tone(500.0, 150.0, 0.18, Waveform::Sawtooth, 0.3, 0.0),
    tone(300.0, 80.0, 0.25, Waveform::Sawtooth, 0.25, 0.15),
    tone(180.0, 60.0, 0.3, Waveform::Sawtooth, 0.2, 0.35),
];
const MILESTONE: [Tone; 3] = [
    tone(523.0, 659.0, 0.12, Waveform::Sine, 0.2, 0.0),
    tone(659.0, 784.0, 0.12, Waveform::Sine, 0.2, 0.08),
    tone(784.0, 1047.0, 0.12, Waveform::Sine, 0.2, 0.16),
];
const POWER_UP: [Tone; 2] = [
    tone(600.0, 1200.0, 0.15, Waveform::Sine, 0.25, 0.0),
    tone(800.0, 1400.0, 0.12, Waveform::Sine, 0.15, 0.05),
];
const BOSS_ARRIVE: [Tone; 3] = [
    tone(60.0, 40.0, 0.5, Waveform::Sawtooth, 0.35, 0.0),
    tone(100.0, 200.0, 0.8, Waveform::Triangle, 0.25, 0.3),
    tone(200.0, 400.0, 0.5, Waveform::Sine, 0.2, 0.8),
];
const BOSS_DEFEAT: [Tone; 4] = [
    tone(523.0, 659.0, 0.15, Waveform::Sine, 0.25, 0.0),
    tone(659.0, 784.0, 0.15, Waveform::Sine, 0.25, 0.1),
    tone(784.0, 1047.0, 0.15, Waveform::Sine, 0.25, 0.2),
    tone(1047.0, 1319.0, 0.15, Waveform::Sine, 0.25, 0.35),
];

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Landed => Some(SoundEffect::Land),
            GameEvent::Milestone(_) => Some(SoundEffect::Milestone),
            GameEvent::ShieldCollected | GameEvent::EffectStarted(_) => Some(SoundEffect::PowerUp),
            GameEvent::BossArrived(_) => Some(SoundEffect::BossArrive),
            GameEvent::BossDefeated { .. } => Some(SoundEffect::BossDefeat),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }

    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::Jump => &JUMP,
            SoundEffect::Land => &LAND,
            SoundEffect::GameOver => &GAME_OVER,
            SoundEffect::Milestone => &MILESTONE,
            SoundEffect::PowerUp => &POWER_UP,
            SoundEffect::BossArrive => &BOSS_ARRIVE,
            SoundEffect::BossDefeat => &BOSS_DEFEAT,
        }
    }
}

/// Anything that can play a cue. Must never fail loudly.
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every cue (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl SoundSink for SilentSink {
    fn play(&mut self, _effect: SoundEffect) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, SoundSink, Tone, Waveform};

    const MASTER_VOLUME: f32 = 0.8;

    /// Web Audio backend
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Create an oscillator routed through its own gain node
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            wave: Waveform,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match wave {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            });
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, tone.start_hz, tone.wave) else {
                return;
            };
            let t = ctx.current_time() + tone.delay;
            let end = t + tone.duration;

            osc.frequency().set_value_at_time(tone.start_hz, t).ok();
            osc.frequency()
                .linear_ramp_to_value_at_time(tone.end_hz, end)
                .ok();
            gain.gain().set_value_at_time(tone.volume * vol, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, end).ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.01).ok();
        }
    }

    impl SoundSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };

            // Browsers start the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in effect.tones() {
                Self::play_tone(ctx, tone, MASTER_VOLUME);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BossKind, PowerUpKind};
    use glam::Vec2;

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Jumped), Some(SoundEffect::Jump));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EffectStarted(PowerUpKind::SlowMotion)),
            Some(SoundEffect::PowerUp)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BossDefeated {
                kind: BossKind::GiantCactus,
                bonus: 200,
                center: Vec2::ZERO,
            }),
            Some(SoundEffect::BossDefeat)
        );
        // Expiry is silent
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EffectEnded(PowerUpKind::SlowMotion)),
            None
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::ScoreChanged(5)), None);
    }

    #[test]
    fn test_tones_are_playable() {
        for effect in [
            SoundEffect::Jump,
            SoundEffect::Land,
            SoundEffect::GameOver,
            SoundEffect::Milestone,
            SoundEffect::PowerUp,
            SoundEffect::BossArrive,
            SoundEffect::BossDefeat,
        ] {
            let tones = effect.tones();
            assert!(!tones.is_empty());
            for t in tones {
                assert!(t.start_hz > 0.0 && t.end_hz > 0.0);
                assert!(t.duration > 0.0 && t.delay >= 0.0);
                assert!((0.0..=1.0).contains(&t.volume));
            }
        }
    }

    #[test]
    fn test_jump_sweeps_up() {
        let t = SoundEffect::Jump.tones()[0];
        assert!(t.end_hz > t.start_hz);
        let t = SoundEffect::Land.tones()[0];
        assert!(t.end_hz < t.start_hz);
    }
}
