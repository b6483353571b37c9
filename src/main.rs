//! Dino Dash entry point
//!
//! Web: wires the canvas, input, storage and audio to a `Game` and drives it
//! from requestAnimationFrame. Native: a headless autopilot run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, KeyboardEvent};

    use dino_dash::audio::AudioManager;
    use dino_dash::highscores::StoredHighScore;
    use dino_dash::persistence::{KeyValueStore, LocalStore, MemoryStore};
    use dino_dash::platform::RafScheduler;
    use dino_dash::renderer::Canvas2d;
    use dino_dash::sim::{GamePhase, Viewport};
    use dino_dash::{Game, GameConfig, SessionListener};

    /// Mirrors score and phase into the page
    struct DomHud {
        document: Document,
    }

    impl SessionListener for DomHud {
        fn on_score_changed(&mut self, score: u64) {
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&score.to_string()));
            }
        }

        fn on_phase_changed(&mut self, phase: GamePhase) {
            if let Some(el) = self.document.get_element_by_id("game") {
                let _ = el.set_attribute("data-phase", phase.as_str());
            }
        }
    }

    /// DOM event handlers owned by the game; detached when it is destroyed
    #[derive(Default)]
    struct DomListeners {
        bound: Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
    }

    impl DomListeners {
        fn listen(
            &mut self,
            target: &EventTarget,
            name: &'static str,
            handler: impl FnMut(Event) + 'static,
        ) {
            let closure = Closure::<dyn FnMut(Event)>::new(handler);
            let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            self.bound.push((target.clone(), name, closure));
        }

        fn listen_keys(
            &mut self,
            target: &EventTarget,
            mut handler: impl FnMut(KeyboardEvent) + 'static,
        ) {
            self.listen(target, "keydown", move |event: Event| {
                if let Ok(event) = event.dyn_into::<KeyboardEvent>() {
                    handler(event);
                }
            });
        }
    }

    impl SessionListener for DomListeners {
        fn on_destroyed(&mut self) {
            for (target, name, closure) in self.bound.drain(..) {
                let _ = target
                    .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
            log::info!("DOM listeners detached");
        }
    }

    /// Laid-out width of the canvas container
    fn surface_width(canvas: &HtmlCanvasElement) -> f32 {
        canvas
            .parent_element()
            .map(|parent| parent.client_width())
            .unwrap_or_else(|| canvas.client_width()) as f32
    }

    fn build_game<S>(store: S, seed: u64, viewport: Viewport, dom: &mut DomListeners) -> Game
    where
        S: KeyValueStore + Clone + 'static,
    {
        let config = Rc::new(RefCell::new(GameConfig::load(&store)));
        setup_settings_keys(dom, config.clone(), store.clone());
        Game::new(seed, config, StoredHighScore::new(store), viewport)
    }

    /// D cycles difficulty, T cycles obstacle theme; each change is saved
    fn setup_settings_keys<S>(dom: &mut DomListeners, config: Rc<RefCell<GameConfig>>, store: S)
    where
        S: KeyValueStore + 'static,
    {
        let window = web_sys::window().unwrap();
        dom.listen_keys(&window, move |event: KeyboardEvent| {
            let mut config = config.borrow_mut();
            match event.code().as_str() {
                "KeyD" => {
                    config.difficulty = config.difficulty.next();
                    log::info!("Difficulty: {}", config.difficulty.as_str());
                }
                "KeyT" => {
                    config.obstacle_theme = config.obstacle_theme.next();
                    log::info!("Obstacle theme: {}", config.obstacle_theme.as_str());
                }
                _ => return,
            }
            config.save(&store);
        });
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dino Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let Some(mut surface) = Canvas2d::new(canvas.clone()) else {
            log::error!("2D canvas context unavailable");
            return;
        };

        let viewport = Viewport::from_width(surface_width(&canvas));
        let dpr = window.device_pixel_ratio();
        surface.resize(viewport.width, viewport.height, dpr);
        let surface = Rc::new(RefCell::new(surface));

        let seed = js_sys::Date::now() as u64;
        let scheduler = RafScheduler::new();
        let frames = scheduler.clone();
        let mut dom = DomListeners::default();

        let game = match LocalStore::open() {
            Ok(store) => build_game(store, seed, viewport, &mut dom),
            Err(e) => {
                log::warn!("{}; settings and high score will not persist", e);
                build_game(MemoryStore::new(), seed, viewport, &mut dom)
            }
        };
        let mut game = game
            .with_sound(AudioManager::new())
            .with_scheduler(scheduler);
        game.add_listener(DomHud {
            document: document.clone(),
        });
        let game = Rc::new(RefCell::new(game));

        log::info!("Game initialized with seed: {}", seed);

        {
            let game = game.clone();
            let surface = surface.clone();
            frames.install(move |time: f64| {
                let mut surface = surface.borrow_mut();
                game.borrow_mut().frame(time, &mut *surface);
            });
        }

        setup_input_handlers(&mut dom, &canvas, game.clone());
        setup_resize(&mut dom, canvas.clone(), game.clone(), surface);
        setup_auto_pause(&mut dom, game.clone());
        game.borrow_mut().add_listener(dom);
        setup_teardown(game.clone());

        game.borrow_mut().start();

        log::info!("Dino Dash running!");
    }

    fn setup_input_handlers(
        dom: &mut DomListeners,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            dom.listen_keys(&window, move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" | "ArrowUp" | "KeyW" => {
                        event.prevent_default();
                        if !event.repeat() {
                            g.handle_action();
                        }
                    }
                    "Escape" | "KeyP" => {
                        if g.phase() == GamePhase::Paused {
                            g.resume();
                        } else {
                            g.pause();
                        }
                    }
                    "KeyI" => {
                        let on = !g.autopilot();
                        g.set_autopilot(on);
                    }
                    _ => {}
                }
            });
        }

        // Touch
        {
            let game = game.clone();
            dom.listen(canvas, "touchstart", move |event: Event| {
                event.prevent_default();
                game.borrow_mut().handle_action();
            });
        }

        // Mouse
        dom.listen(canvas, "mousedown", move |_event: Event| {
            game.borrow_mut().handle_action();
        });
    }

    fn setup_resize(
        dom: &mut DomListeners,
        canvas: HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
        surface: Rc<RefCell<Canvas2d>>,
    ) {
        let window = web_sys::window().unwrap();
        dom.listen(&window, "resize", move |_event: Event| {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let width = surface_width(&canvas);
            let mut g = game.borrow_mut();
            g.resize(width);
            let viewport = g.state().viewport;
            surface
                .borrow_mut()
                .resize(viewport.width, viewport.height, dpr);
        });
    }

    fn setup_auto_pause(dom: &mut DomListeners, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            dom.listen(&document, "visibilitychange", move |_event: Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.phase().is_active() {
                        g.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
        }

        // Window blur (click outside)
        dom.listen(&window, "blur", move |_event: Event| {
            let mut g = game.borrow_mut();
            if g.phase().is_active() {
                g.pause();
                log::info!("Auto-paused (window blur)");
            }
        });
    }

    /// Tear the game down when the page goes away
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            game.borrow_mut().destroy();
        });
        let _ = window.add_event_listener_with_callback(
            "pagehide",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::rc::Rc;

    use dino_dash::highscores::StoredHighScore;
    use dino_dash::persistence::MemoryStore;
    use dino_dash::platform::ManualScheduler;
    use dino_dash::renderer::NullCanvas;
    use dino_dash::sim::{GamePhase, Viewport};
    use dino_dash::{Difficulty, Game, GameConfig, SessionListener};

    /// Ten minutes of play at 60 Hz
    const MAX_FRAMES: u32 = 36_000;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Counts finished sessions
    struct SessionCounter(Rc<Cell<u32>>);

    impl SessionListener for SessionCounter {
        fn on_phase_changed(&mut self, phase: GamePhase) {
            log::debug!("Phase -> {}", phase.as_str());
            if phase == GamePhase::GameOver {
                self.0.set(self.0.get() + 1);
            }
        }
    }

    pub fn run() {
        let difficulty = std::env::args()
            .nth(1)
            .and_then(|arg| Difficulty::from_str(&arg))
            .unwrap_or(Difficulty::Medium);
        let config = GameConfig {
            difficulty,
            ..GameConfig::default()
        };
        let seed: u64 = rand::random();
        let store = MemoryStore::new();
        let scheduler = ManualScheduler::new();
        let sessions = Rc::new(Cell::new(0));

        let mut game = Game::new(seed, config, StoredHighScore::new(store), Viewport::default())
            .with_scheduler(scheduler.clone());
        game.add_listener(SessionCounter(sessions.clone()));
        game.set_autopilot(true);
        game.start();

        let mut frames = 0;
        let mut now = 0.0;
        while frames < MAX_FRAMES && scheduler.fire() {
            game.frame(now, &mut NullCanvas);
            now += FRAME_MS;
            frames += 1;
        }

        log::info!(
            "Headless run ({}): {} frames, {} sessions over, score {}, best {}",
            difficulty.as_str(),
            frames,
            sessions.get(),
            game.score(),
            game.high_score()
        );
        game.destroy();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dino Dash (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
