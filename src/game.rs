//! Game orchestrator
//!
//! `Game` owns one `GameState` and everything around it: the configuration
//! accessor, high score persistence, sound, the frame scheduler and the
//! presentation listeners. The platform shell calls `frame()` once per
//! display refresh and forwards player input.

use crate::audio::{SilentSink, SoundEffect, SoundSink};
use crate::consts::MAX_FRAME_GAP_MS;
use crate::highscores::HighScorePort;
use crate::platform::{FrameScheduler, ManualScheduler};
use crate::renderer::{Canvas, draw_frame};
use crate::settings::ConfigSource;
use crate::sim::{self, GameEvent, GamePhase, GameState, TickInput, Viewport};

/// Presentation-layer hooks (HUD score, menus)
pub trait SessionListener {
    fn on_score_changed(&mut self, _score: u64) {}
    fn on_phase_changed(&mut self, _phase: GamePhase) {}
    /// Last call before the listener is dropped; release outside hooks here
    fn on_destroyed(&mut self) {}
}

pub struct Game {
    state: GameState,
    config: Box<dyn ConfigSource>,
    high_scores: Box<dyn HighScorePort>,
    sound: Box<dyn SoundSink>,
    scheduler: Box<dyn FrameScheduler>,
    listeners: Vec<Box<dyn SessionListener>>,
    input: TickInput,
    last_frame_ms: Option<f64>,
    started: bool,
    destroyed: bool,
}

impl Game {
    /// Build an idle game. The high score is read once, here.
    pub fn new(
        seed: u64,
        config: impl ConfigSource + 'static,
        high_scores: impl HighScorePort + 'static,
        viewport: Viewport,
    ) -> Self {
        let best = high_scores.get();
        let state = GameState::new(seed, &config.current(), viewport, best);
        log::info!("Game created (seed {}, high score {})", seed, best);
        Self {
            state,
            config: Box::new(config),
            high_scores: Box::new(high_scores),
            sound: Box::new(SilentSink),
            scheduler: Box::new(ManualScheduler::new()),
            listeners: Vec::new(),
            input: TickInput::default(),
            last_frame_ms: None,
            started: false,
            destroyed: false,
        }
    }

    pub fn with_sound(mut self, sound: impl SoundSink + 'static) -> Self {
        self.sound = Box::new(sound);
        self
    }

    pub fn with_scheduler(mut self, scheduler: impl FrameScheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    pub fn add_listener(&mut self, listener: impl SessionListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Begin the render-driven loop. The session itself stays idle until the
    /// first action.
    pub fn start(&mut self) {
        if self.destroyed {
            log::warn!("start() after destroy() ignored");
            return;
        }
        if self.started {
            return;
        }
        self.started = true;
        self.last_frame_ms = None;
        self.scheduler.request_frame();
        log::info!("Frame loop started");
    }

    /// Player action: start or restart from idle/game over, jump while playing
    pub fn handle_action(&mut self) {
        if self.destroyed {
            return;
        }
        let config = self.config.current();
        sim::handle_action(&mut self.state, &config);
        self.dispatch_events();
    }

    pub fn pause(&mut self) {
        if self.destroyed {
            return;
        }
        if sim::pause(&mut self.state) {
            log::info!("Paused");
        }
        self.dispatch_events();
    }

    pub fn resume(&mut self) {
        if self.destroyed {
            return;
        }
        if sim::resume(&mut self.state) {
            log::info!("Resumed");
            // The wall-clock gap spent paused must not count as a stall
            self.last_frame_ms = None;
        }
        self.dispatch_events();
    }

    /// Demo mode on or off
    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
        log::info!("Autopilot: {}", on);
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    /// Stop for good: no further frames run and listeners are released.
    /// Safe to call at any time, including more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.scheduler.cancel_frame();
        for mut listener in self.listeners.drain(..) {
            listener.on_destroyed();
        }
        log::info!("Game destroyed");
    }

    /// Surface width changed
    pub fn resize(&mut self, width: f32) {
        self.state.resize(Viewport::from_width(width));
    }

    /// One display refresh: advance at most one tick, report, draw, and ask
    /// for the next frame. A gap longer than `MAX_FRAME_GAP_MS` since the
    /// previous frame skips the tick.
    pub fn frame(&mut self, timestamp_ms: f64, canvas: &mut dyn Canvas) {
        if self.destroyed {
            return;
        }

        let stalled = self
            .last_frame_ms
            .is_some_and(|last| timestamp_ms - last > MAX_FRAME_GAP_MS);
        self.last_frame_ms = Some(timestamp_ms);

        let config = self.config.current();
        if stalled {
            log::debug!("Frame gap over {} ms, tick skipped", MAX_FRAME_GAP_MS);
        } else {
            sim::tick(&mut self.state, &config, &self.input);
        }
        self.input.action = false;
        self.input.pause = false;

        self.dispatch_events();
        draw_frame(canvas, &self.state, config.avatar_color());

        if self.started {
            self.scheduler.request_frame();
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.sound.play(effect);
            }
            match event {
                GameEvent::ScoreChanged(score) => {
                    for listener in &mut self.listeners {
                        listener.on_score_changed(score);
                    }
                }
                GameEvent::PhaseChanged(phase) => {
                    for listener in &mut self.listeners {
                        listener.on_phase_changed(phase);
                    }
                }
                GameEvent::NewHighScore(score) => self.high_scores.set(score),
                _ => {}
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.displayed_score()
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
