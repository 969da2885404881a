//! Brick Breaker entry point
//!
//! Browser front end on wasm32; a headless autopilot demo everywhere else.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, HtmlAudioElement, HtmlButtonElement, HtmlCanvasElement, KeyboardEvent, Window,
    };

    use brick_breaker::audio::{AudioManager, SoundEffect};
    use brick_breaker::consts::*;
    use brick_breaker::renderer::{RenderState, scene};
    use brick_breaker::sim::{
        Debouncer, FrameScheduler, GameEvent, GamePhase, GameState, InputState, Key, Outcome,
        autopilot, tick,
    };
    use brick_breaker::{Bounds, InitError, Tuning};

    /// Game instance holding all front-end state
    struct Game {
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        /// Current canvas size in CSS pixels
        bounds: Bounds,
        tuning: Tuning,
        /// None until the run button is pressed
        session: Option<GameState>,
        render_state: Option<RenderState>,
        input: InputState,
        autopilot: bool,
        scheduler: FrameScheduler,
        resize: Debouncer,
        /// Pending resize check timer
        resize_timer: Option<i32>,
        accumulator: f32,
        last_time: f64,
        shown_score: Option<u32>,
        audio: AudioManager,
    }

    impl Game {
        fn new(
            window: Window,
            document: Document,
            canvas: HtmlCanvasElement,
            tuning: Tuning,
        ) -> Self {
            let music = document
                .get_element_by_id("bg-music")
                .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());

            Self {
                window,
                document,
                canvas,
                bounds: Bounds::new(1.0, 1.0),
                tuning,
                session: None,
                render_state: None,
                input: InputState::default(),
                autopilot: false,
                scheduler: FrameScheduler::new(),
                resize: Debouncer::new(RESIZE_DEBOUNCE_MS),
                resize_timer: None,
                accumulator: 0.0,
                last_time: 0.0,
                shown_score: None,
                audio: AudioManager::new(music),
            }
        }

        fn phase(&self) -> Option<GamePhase> {
            self.session.as_ref().map(|s| s.phase)
        }

        /// Size the canvas to the viewport. Returns the backing store size in
        /// physical pixels.
        fn fit_canvas(&mut self) -> (u32, u32) {
            let inner_w = self
                .window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(1000.0);
            let inner_h = self
                .window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            self.bounds = Bounds::for_viewport(inner_w as f32, inner_h as f32);

            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{}px", self.bounds.width));
            let _ = style.set_property("height", &format!("{}px", self.bounds.height));

            let dpr = self.window.device_pixel_ratio();
            let width = (self.bounds.width as f64 * dpr) as u32;
            let height = (self.bounds.height as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            (width, height)
        }

        /// Begin a fresh session at the current canvas size
        fn start_session(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.session = Some(GameState::with_tuning(
                self.bounds,
                seed,
                self.tuning.clone(),
            ));
            self.input.clear();
            self.accumulator = 0.0;
            self.last_time = 0.0;

            self.set_hidden("game-over", true);
            self.set_pause_label("Pause");
            if let Some(btn) = self.button("pauseButton") {
                btn.set_disabled(false);
            }
            self.sync_score();
            self.sync_popups();

            self.audio.resume();
            self.audio.start_music();
            log::info!("Session started with seed: {}", seed);
        }

        /// Running ⇄ Paused. Returns true when the session is now running.
        fn toggle_pause(&mut self) -> bool {
            let Some(session) = self.session.as_mut() else {
                return false;
            };
            if session.is_over() {
                return false;
            }

            let phase = session.toggle_pause();
            if phase == GamePhase::Running {
                self.last_time = 0.0;
                self.set_pause_label("Pause");
                self.audio.resume_music();
                log::info!("Resumed");
                true
            } else {
                self.input.clear();
                self.set_pause_label("Resume");
                self.audio.pause_music();
                log::info!("Paused");
                false
            }
        }

        fn auto_pause(&mut self, reason: &str) {
            if self.phase() == Some(GamePhase::Running) {
                self.toggle_pause();
                log::info!("Auto-paused ({})", reason);
            }
        }

        /// Run simulation ticks for one host frame
        fn update(&mut self, dt: f32) {
            let Some(session) = self.session.as_mut() else {
                return;
            };

            self.accumulator += dt.min(MAX_FRAME_DT);
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = if self.autopilot {
                    autopilot(session)
                } else {
                    self.input
                };
                tick(session, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                if !session.is_running() {
                    self.accumulator = 0.0;
                    break;
                }
            }
            // Drop backlog the substep cap could not absorb
            self.accumulator = self.accumulator.min(SIM_DT);

            let events = session.drain_events();
            let outcome = session.outcome();
            let score = session.score;

            for event in &events {
                self.audio.play(SoundEffect::for_event(event));
            }
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::BrickBroken { .. }))
            {
                self.sync_score();
            }
            let ended = events
                .iter()
                .any(|e| matches!(e, GameEvent::Won | GameEvent::Lost));
            if let (true, Some(outcome)) = (ended, outcome) {
                self.show_game_over(outcome, score);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let (vertices, bounds) = scene::frame(self.session.as_ref(), self.bounds);

            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render(&vertices, bounds) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            self.sync_popups();
        }

        /// Resize after the debounce window: canvas, surface and an active session
        fn apply_resize(&mut self) {
            let (width, height) = self.fit_canvas();
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }

            let bounds = self.bounds;
            let rebuilt = self
                .session
                .as_mut()
                .is_some_and(|session| session.resize(bounds));
            if rebuilt {
                self.accumulator = 0.0;
                self.sync_score();
            }

            // The loop only draws while running
            if self.phase() != Some(GamePhase::Running) {
                self.render();
            }
        }

        // === HUD ===

        fn button(&self, id: &str) -> Option<HtmlButtonElement> {
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
            }
        }

        fn set_pause_label(&self, label: &str) {
            if let Some(btn) = self.button("pauseButton") {
                btn.set_text_content(Some(label));
            }
        }

        /// Write the score display if it changed
        fn sync_score(&mut self) {
            let score = self.session.as_ref().map_or(0, |s| s.score);
            if self.shown_score == Some(score) {
                return;
            }
            self.shown_score = Some(score);
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", score)));
            }
        }

        /// Mirror live score popups as positioned text over the canvas
        fn sync_popups(&self) {
            let Some(layer) = self.document.get_element_by_id("popups") else {
                return;
            };
            let html = self
                .session
                .as_ref()
                .filter(|session| session.bounds == self.bounds)
                .map(|session| {
                    session
                        .popups
                        .iter()
                        .map(|p| {
                            format!(
                                "<span class=\"popup\" style=\"left:{:.0}px;top:{:.0}px;opacity:{:.2}\">+{}</span>",
                                p.pos.x,
                                p.pos.y,
                                p.opacity(),
                                p.points
                            )
                        })
                        .collect::<String>()
                })
                .unwrap_or_default();
            layer.set_inner_html(&html);
        }

        fn show_game_over(&mut self, outcome: Outcome, score: u32) {
            self.audio.pause_music();
            self.input.clear();

            let message = match outcome {
                Outcome::Won => "You cleared every brick!",
                Outcome::Lost => "Game Over",
            };
            if let Some(el) = self.document.get_element_by_id("end-message") {
                el.set_text_content(Some(message));
            }
            if let Some(el) = self.document.get_element_by_id("final-score") {
                el.set_text_content(Some(&score.to_string()));
            }
            if let Some(btn) = self.button("pauseButton") {
                btn.set_disabled(true);
            }
            self.set_hidden("game-over", false);
        }
    }

    /// Load tuning overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };

        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning JSON, using defaults: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), InitError> {
        log::info!("Brick Breaker starting...");

        let window = web_sys::window().ok_or(InitError::NoWindow)?;
        let document = window.document().ok_or(InitError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("myCanvas")
            .ok_or_else(|| InitError::MissingElement {
                id: "myCanvas".to_string(),
            })?
            .dyn_into()
            .map_err(|_| InitError::NotACanvas {
                id: "myCanvas".to_string(),
            })?;

        let tuning = load_tuning(&document);
        let game = Rc::new(RefCell::new(Game::new(
            window.clone(),
            document.clone(),
            canvas.clone(),
            tuning,
        )));
        let (width, height) = game.borrow_mut().fit_canvas();

        // WebGPU where available, WebGL2 otherwise
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| InitError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| InitError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            g.sync_score();
            g.render();
        }

        setup_input_handlers(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_resize(&window, game.clone());
        setup_auto_pause(&window, &document, game);

        log::info!("Brick Breaker ready");
        Ok(())
    }

    /// Report a startup failure in the page
    pub fn show_error(error: &InitError) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("error") {
            el.set_text_content(Some(&error.to_string()));
            let _ = el.set_attribute("class", "");
        }
    }

    /// Start the frame loop unless a chain is already live
    fn kick(game: &Rc<RefCell<Game>>) {
        let needs_frame = game.borrow_mut().scheduler.request();
        if needs_frame {
            request_animation_frame(game.clone());
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let Some(phase) = g.phase() else {
                g.scheduler.cancel();
                return;
            };
            if !g.scheduler.on_frame(phase) {
                return;
            }

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();

            let phase = g.phase().unwrap_or(GamePhase::Paused);
            g.scheduler.keep_going(phase)
        };

        if keep_going {
            request_animation_frame(game);
        }
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key_name = event.key();
                if let Some(key) = Key::from_key_name(&key_name) {
                    event.prevent_default();
                    game.borrow_mut().input.press(key);
                    return;
                }

                match key_name.as_str() {
                    "Escape" => {
                        let resumed = game.borrow_mut().toggle_pause();
                        if resumed {
                            kick(&game);
                        }
                    }
                    "i" | "I" => {
                        let mut g = game.borrow_mut();
                        g.autopilot = !g.autopilot;
                        log::info!("Autopilot: {}", g.autopilot);
                    }
                    "m" | "M" => game.borrow_mut().audio.toggle_muted(),
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_key_name(&event.key()) {
                    game.borrow_mut().input.release(key);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Run: single use, starts the first session
        if let Some(btn) = document.get_element_by_id("runButton") {
            let game = game.clone();
            let run_btn = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Some(b) = run_btn.dyn_ref::<HtmlButtonElement>() {
                    b.set_disabled(true);
                }
                let _ = run_btn.set_attribute("class", "hidden");

                game.borrow_mut().start_session();
                kick(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #runButton element");
        }

        // Pause / resume
        if let Some(btn) = document.get_element_by_id("pauseButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let resumed = game.borrow_mut().toggle_pause();
                if resumed {
                    kick(&game);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Play again from the end modal
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start_session();
                kick(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Monotonic page clock in milliseconds
    fn now_ms(window: &Window) -> f64 {
        window
            .performance()
            .map_or_else(js_sys::Date::now, |p| p.now())
    }

    fn setup_resize(window: &Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let delay = {
                let mut g = game.borrow_mut();
                let now = now_ms(&g.window);
                g.resize.trigger(now);
                g.resize.delay_ms()
            };
            schedule_resize_check(game.clone(), delay);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Arm the single resize check timer, replacing any pending one
    fn schedule_resize_check(game: Rc<RefCell<Game>>, delay_ms: f64) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let check_game = game.clone();
        let check = Closure::once(move || {
            let (fire, remaining) = {
                let mut g = check_game.borrow_mut();
                g.resize_timer = None;
                let now = now_ms(&g.window);
                (g.resize.poll(now), g.resize.remaining_ms(now))
            };
            if fire {
                check_game.borrow_mut().apply_resize();
            } else if let Some(wait) = remaining {
                schedule_resize_check(check_game, wait);
            }
        });

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            check.as_ref().unchecked_ref(),
            delay_ms.ceil() as i32,
        ) {
            Ok(handle) => {
                if let Some(previous) = game.borrow_mut().resize_timer.replace(handle) {
                    window.clear_timeout_with_handle(previous);
                }
            }
            Err(e) => log::warn!("Failed to schedule resize check: {:?}", e),
        }
        check.forget();
    }

    fn setup_auto_pause(window: &Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    if let Err(e) = wasm_game::run().await {
        log::error!("Initialization failed: {}", e);
        wasm_game::show_error(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::Bounds;
    use brick_breaker::sim::{GameState, autopilot, tick};

    /// Safety cap for the demo; a cleared grid normally ends it much sooner
    const MAX_FRAMES: u64 = 100_000;

    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use a wasm build for the web version");

    let bounds = Bounds::new(800.0, 560.0);
    let mut state = GameState::new(bounds, 42);
    log::info!(
        "Canvas {}x{}, {} bricks",
        bounds.width,
        bounds.height,
        state.bricks.len()
    );

    while !state.is_over() && state.frame < MAX_FRAMES {
        let input = autopilot(&state);
        tick(&mut state, &input);
    }

    match state.outcome() {
        Some(outcome) => log::info!(
            "Demo finished: {:?}, score {} in {} frames",
            outcome,
            state.score,
            state.frame
        ),
        None => log::info!(
            "Demo stopped after {} frames, score {} ({} bricks left)",
            state.frame,
            state.score,
            state.bricks.alive_count()
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
