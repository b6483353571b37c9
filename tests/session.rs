//! Whole-session scenarios driven through the public API

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use dino_dash::highscores::{HighScorePort, MemoryHighScore, StoredHighScore};
use dino_dash::persistence::{KeyValueStore, MemoryStore};
use dino_dash::platform::{FrameScheduler, ManualScheduler};
use dino_dash::renderer::{Canvas, Layer, NullCanvas, TextAlign};
use dino_dash::sim::{
    BossKind, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, ObstacleSpawner,
    TickInput, Viewport, tick,
};
use dino_dash::{Color, Difficulty, Game, GameConfig, SessionListener};

const FRAME_MS: f64 = 16.0;

fn easy() -> GameConfig {
    GameConfig {
        difficulty: Difficulty::Easy,
        ..GameConfig::default()
    }
}

fn running(seed: u64, config: &GameConfig) -> GameState {
    let mut state = GameState::new(seed, config, Viewport::default(), 0);
    dino_dash::sim::handle_action(&mut state, config);
    state.drain_events();
    state
}

/// Records layer markers and text, ignores geometry
#[derive(Default)]
struct Recording {
    layers: Vec<Layer>,
    texts: Vec<String>,
    shapes: usize,
}

impl Canvas for Recording {
    fn begin_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }
    fn fill_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: Color) {
        self.shapes += 1;
    }
    fn fill_round_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: Color) {
        self.shapes += 1;
    }
    fn stroke_round_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32, _: Color) {
        self.shapes += 1;
    }
    fn fill_vertical_gradient(&mut self, _: f32, _: f32, _: f32, _: f32, _: Color, _: Color) {
        self.shapes += 1;
    }
    fn fill_circle(&mut self, _: Vec2, _: f32, _: Color) {
        self.shapes += 1;
    }
    fn fill_ellipse(&mut self, _: Vec2, _: Vec2, _: f32, _: Color) {
        self.shapes += 1;
    }
    fn fill_polygon(&mut self, _: &[Vec2], _: Color) {
        self.shapes += 1;
    }
    fn stroke_line(&mut self, _: Vec2, _: Vec2, _: f32, _: Color) {
        self.shapes += 1;
    }
    fn fill_text(&mut self, text: &str, _: Vec2, _: f32, _: bool, _: TextAlign, _: Color) {
        self.texts.push(text.to_string());
    }
}

#[derive(Clone, Default)]
struct PhaseLog(Rc<RefCell<Vec<GamePhase>>>);

impl SessionListener for PhaseLog {
    fn on_phase_changed(&mut self, phase: GamePhase) {
        self.0.borrow_mut().push(phase);
    }
}

#[test]
fn idle_player_eventually_loses() {
    let config = easy();
    let mut state = running(1, &config);
    let mut ended_at = None;
    for _ in 0..10_000 {
        tick(&mut state, &config, &TickInput::default());
        if state.phase == GamePhase::GameOver {
            ended_at = Some(state.time_ticks);
            break;
        }
    }
    assert!(ended_at.is_some(), "session never ended");
    assert!(
        state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    );
}

#[test]
fn shield_turns_a_fatal_hit_into_a_near_miss() {
    let config = GameConfig::default();
    let mut state = running(2, &config);
    state.avatar.activate_shield();
    let ground = state.viewport.ground_y();
    state.obstacles.obstacles.push(Obstacle::new(
        77,
        ObstacleKind::SmallCactus,
        state.avatar.pos.x,
        ground,
    ));

    tick(&mut state, &config, &TickInput::default());
    assert_eq!(state.phase, GamePhase::Running);
    assert!(!state.avatar.shield_active);
    assert!(state.drain_events().contains(&GameEvent::ShieldAbsorbed));

    // Unshielded, the same hit is fatal
    state.obstacles.obstacles.push(Obstacle::new(
        78,
        ObstacleKind::SmallCactus,
        state.avatar.pos.x,
        ground,
    ));
    tick(&mut state, &config, &TickInput::default());
    assert_eq!(state.phase, GamePhase::GameOver);
}

#[test]
fn custom_frequency_spawns_more_often() {
    let average = |frequency: f32| {
        let config = GameConfig {
            difficulty: Difficulty::Custom,
            custom_frequency: frequency,
            ..GameConfig::default()
        };
        let preset = config.preset();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawner = ObstacleSpawner::new(&preset, &mut rng);
        let mut total = 0u64;
        for _ in 0..500 {
            total += spawner.spawn_interval() as u64;
            spawner.reset(&preset, &mut rng);
        }
        total as f64 / 500.0
    };
    assert!(average(10.0) < average(1.0));
}

#[test]
fn milestones_fire_once_per_hundred() {
    let config = GameConfig::default();
    let mut state = running(4, &config);
    state.score = 199.5;
    let mut milestones = Vec::new();
    for _ in 0..30 {
        tick(&mut state, &config, &TickInput::default());
        state.obstacles.obstacles.clear();
        for event in state.drain_events() {
            if let GameEvent::Milestone(at) = event {
                milestones.push(at);
            }
        }
    }
    // The jump to 199.5 crosses 100 on the first tick
    assert_eq!(milestones, vec![100, 200]);
}

#[test]
fn bosses_alternate_and_suspend_obstacles() {
    let config = GameConfig::default();
    let mut state = running(5, &config);
    let mut arrivals = Vec::new();

    for threshold in [499.95, 999.95] {
        state.score = state.score.max(threshold);
        let mut defeated = false;
        for _ in 0..3000 {
            tick(&mut state, &config, &TickInput::default());
            for event in state.drain_events() {
                match event {
                    GameEvent::BossArrived(kind) => {
                        arrivals.push(kind);
                        assert!(state.obstacles.obstacles.is_empty());
                    }
                    GameEvent::BossDefeated { .. } => defeated = true,
                    _ => {}
                }
            }
            if state.boss.is_active() {
                assert!(state.obstacles.obstacles.is_empty());
            } else if defeated {
                break;
            }
            // Keep the runner alive between encounters
            state.obstacles.obstacles.clear();
            assert_ne!(state.phase, GamePhase::GameOver);
        }
        assert!(defeated);
    }

    assert_eq!(arrivals, vec![BossKind::GiantCactus, BossKind::MegaPterodactyl]);
}

#[test]
fn pause_freezes_and_resumes_through_the_facade() {
    let phases = PhaseLog::default();
    let mut game = Game::new(6, easy(), MemoryHighScore::default(), Viewport::default());
    game.add_listener(phases.clone());
    game.start();
    game.handle_action();

    let mut now = 0.0;
    for _ in 0..20 {
        game.frame(now, &mut NullCanvas);
        now += FRAME_MS;
    }
    game.pause();
    let ticks = game.state().time_ticks;
    let score = game.state().score;
    for _ in 0..100 {
        game.frame(now, &mut NullCanvas);
        now += FRAME_MS;
    }
    assert_eq!(game.state().time_ticks, ticks);
    assert_eq!(game.state().score, score);

    game.resume();
    game.frame(now, &mut NullCanvas);
    assert_eq!(game.state().time_ticks, ticks + 1);
    assert_eq!(
        *phases.0.borrow(),
        vec![GamePhase::Running, GamePhase::Paused, GamePhase::Running]
    );
}

#[test]
fn destroy_mid_session_stops_the_loop() {
    let scheduler = ManualScheduler::new();
    let mut game = Game::new(7, easy(), MemoryHighScore::default(), Viewport::default())
        .with_scheduler(scheduler.clone());
    game.start();
    game.handle_action();

    let mut now = 0.0;
    let mut frames = 0;
    while scheduler.fire() {
        game.frame(now, &mut NullCanvas);
        now += FRAME_MS;
        frames += 1;
        if frames == 50 {
            game.destroy();
        }
    }
    assert_eq!(frames, 50);
    assert!(!scheduler.is_pending());
}

#[test]
fn frame_draws_layers_back_to_front() {
    let mut game = Game::new(
        8,
        GameConfig::default(),
        MemoryHighScore::default(),
        Viewport::default(),
    );
    let mut canvas = Recording::default();
    game.frame(0.0, &mut canvas);
    assert_eq!(canvas.layers, Layer::ORDER.to_vec());
    assert!(canvas.shapes > 0);
    assert!(canvas.texts.iter().any(|t| t.contains("Start")));

    game.handle_action();
    let mut canvas = Recording::default();
    game.frame(FRAME_MS, &mut canvas);
    assert_eq!(canvas.layers, Layer::ORDER.to_vec());
    assert!(!canvas.texts.iter().any(|t| t.contains("Start")));
}

#[test]
fn high_score_survives_a_restart() {
    let store = MemoryStore::new();
    let mut game = Game::new(
        9,
        easy(),
        StoredHighScore::new(store.clone()),
        Viewport::default(),
    );
    game.handle_action();
    let mut now = 0.0;
    while game.phase() != GamePhase::GameOver && now < 10_000.0 * FRAME_MS {
        game.frame(now, &mut NullCanvas);
        now += FRAME_MS;
    }
    assert_eq!(game.phase(), GamePhase::GameOver);
    let best = game.high_score();
    assert!(best > 0);

    let key = StoredHighScore::<MemoryStore>::STORAGE_KEY;
    assert_eq!(store.get_item(key).unwrap(), Some(best.to_string()));

    let reopened = StoredHighScore::new(store.clone());
    assert_eq!(reopened.get(), best);
    let game = Game::new(10, easy(), reopened, Viewport::default());
    assert_eq!(game.high_score(), best);
}
