//! Gap Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use gap_runner::camera::{Camera, ScrollMode};
    use gap_runner::consts::*;
    use gap_runner::renderer::{self, canvas::paint};
    use gap_runner::sim::{Direction, Outcome, PlayArea, Runner, autopilot};
    use gap_runner::stats::format_ticks;
    use gap_runner::{RunStats, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        runner: Runner,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        camera: Camera,
        settings: Settings,
        stats: RunStats,
        accumulator: f32,
        last_time: f64,
        /// Pending animation frame, if the loop is scheduled
        frame_handle: Option<i32>,
        /// Frame callback, created once and reused for every frame
        frame_callback: Option<Closure<dyn FnMut(f64)>>,
        /// Demo mode - autopilot steers
        idle_mode: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                runner: Runner::new(seed, Tuning::load()),
                canvas,
                ctx,
                camera: Camera::new(),
                settings: Settings::load(),
                stats: RunStats::load(),
                accumulator: 0.0,
                last_time: 0.0,
                frame_handle: None,
                frame_callback: None,
                idle_mode: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// The element the canvas fills
        fn container(&self) -> Option<HtmlElement> {
            self.canvas.parent_element()?.dyn_into().ok()
        }

        /// Match the canvas to its container and return the play area
        fn measure(&self) -> PlayArea {
            let (w, h) = match self.container() {
                Some(el) => (el.offset_width(), el.offset_height()),
                None => (self.canvas.client_width(), self.canvas.client_height()),
            };
            let (w, h) = (w.max(0) as u32, h.max(0) as u32);
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            PlayArea::new(w as f32, h as f32)
        }

        /// Start a run if none is in progress
        fn start(&mut self) -> bool {
            if self.runner.is_running() {
                return false;
            }
            let area = self.measure();
            if !self.runner.start(area) {
                return false;
            }
            self.stats.record_start();
            self.stats.save();
            self.camera.reset();
            self.accumulator = 0.0;
            self.last_time = 0.0;
            true
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                if self.idle_mode {
                    if let Some(run) = self.runner.run() {
                        let dir = autopilot::steer(run, self.runner.tuning());
                        self.runner.set_horizontal_input(dir);
                    }
                }

                self.accumulator -= SIM_DT;
                substeps += 1;

                if let Some(outcome) = self.runner.tick() {
                    self.accumulator = 0.0;
                    self.record(outcome);
                    break;
                }
            }
        }

        /// Fold a finished run into the stats
        fn record(&mut self, outcome: Outcome) {
            let Some(run) = self.runner.run() else {
                return;
            };
            let ticks = run.time_ticks;
            if self.stats.record(outcome, ticks, run.rows_cleared()) {
                log::info!("New best time: {}", format_ticks(ticks));
            }
            self.stats.save();
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&self) -> Result<(), JsValue> {
            let cmds = renderer::build(
                &self.runner,
                self.canvas.width() as f32,
                self.canvas.height() as f32,
            );
            paint(&self.ctx, &cmds)
        }

        /// Scroll the page so the avatar stays centered
        fn follow_avatar(&mut self) {
            if !self.settings.camera_follow {
                return;
            }
            let Some(run) = self.runner.run() else {
                return;
            };
            let Some(window) = web_sys::window() else {
                return;
            };
            let section_top = self.container().map_or(0.0, |el| el.offset_top() as f64);
            let viewport_height = window
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0);

            if let Some(top) = self.camera.update(section_top, run.avatar.pos.y as f64, viewport_height) {
                let opts = web_sys::ScrollToOptions::new();
                opts.set_top(top);
                opts.set_behavior(match self.settings.scroll_mode() {
                    ScrollMode::Smooth => web_sys::ScrollBehavior::Smooth,
                    ScrollMode::Instant => web_sys::ScrollBehavior::Instant,
                });
                window.scroll_to_with_scroll_to_options(&opts);
            }
        }

        /// Update status text in DOM (only on state transitions)
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("fps") {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                }
            }

            if !self.runner.take_status_change() {
                return;
            }

            let message = self.runner.message();
            if let Some(el) = document.get_element_by_id("status") {
                el.set_text_content(Some(message));
                let class = if message.is_empty() { "hidden" } else { "" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("stats") {
                el.set_text_content(Some(&self.stats.summary()));
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Gap Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let game = Rc::new(RefCell::new(Game::new(js_sys::Date::now() as u64, canvas, ctx)));
        log::info!("Game initialized with seed: {}", game.borrow().runner.seed());

        // Owned by the game, so it must not hold a strong reference back
        let weak: Weak<RefCell<Game>> = Rc::downgrade(&game);
        let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if let Some(game) = weak.upgrade() {
                game_loop(game, time);
            }
        });
        game.borrow_mut().frame_callback = Some(callback);

        {
            let mut g = game.borrow_mut();
            g.measure();
            g.render()?;
            g.update_hud();
        }

        setup_input_handlers(game.clone())?;
        setup_visibility_handler(game)?;

        log::info!("Gap Runner ready");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down: steer, start, toggles
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let started = {
                    let mut g = game.borrow_mut();
                    match event.key().as_str() {
                        "ArrowLeft" => {
                            event.prevent_default();
                            g.runner.set_horizontal_input(Direction::Left);
                            false
                        }
                        "ArrowRight" => {
                            event.prevent_default();
                            g.runner.set_horizontal_input(Direction::Right);
                            false
                        }
                        " " => {
                            event.prevent_default();
                            g.start()
                        }
                        "i" | "I" => {
                            g.idle_mode = !g.idle_mode;
                            log::info!("Idle mode: {}", g.idle_mode);
                            false
                        }
                        "c" | "C" => {
                            g.settings.camera_follow = !g.settings.camera_follow;
                            g.settings.save();
                            log::info!("Camera follow: {}", g.settings.camera_follow);
                            false
                        }
                        _ => false,
                    }
                };
                if started {
                    game.borrow_mut().update_hud();
                    schedule_frame(&game);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up: release steering
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let direction = match event.key().as_str() {
                    "ArrowLeft" => Direction::Left,
                    "ArrowRight" => Direction::Right,
                    _ => return,
                };
                game.borrow_mut().runner.release_horizontal_input(direction);
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Suspend the loop while the tab is hidden, resume when it's back
    fn setup_visibility_handler(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;

        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                cancel_frame(&game);
                log::info!("Loop suspended (tab hidden)");
            } else if game.borrow().runner.is_running() {
                // Don't feed the hidden interval into the accumulator
                game.borrow_mut().last_time = 0.0;
                schedule_frame(&game);
                log::info!("Loop resumed");
            }
        });
        document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        )?;
        closure.forget();
        Ok(())
    }

    /// Request the next animation frame unless one is already pending
    fn schedule_frame(game: &Rc<RefCell<Game>>) {
        let requested = {
            let g = game.borrow();
            if g.frame_handle.is_some() {
                return;
            }
            let (Some(window), Some(callback)) = (web_sys::window(), g.frame_callback.as_ref()) else {
                return;
            };
            window.request_animation_frame(callback.as_ref().unchecked_ref())
        };

        match requested {
            Ok(handle) => game.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    /// Drop the pending animation frame, if any
    fn cancel_frame(game: &Rc<RefCell<Game>>) {
        if let Some(handle) = game.borrow_mut().frame_handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.frame_handle = None;

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.track_fps(time);
            if let Err(e) = g.render() {
                log::error!("Render error: {:?}", e);
            }
            g.follow_avatar();
            g.update_hud();

            g.runner.is_running()
        };

        // Stop scheduling as soon as the run has ended
        if keep_running {
            schedule_frame(&game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Gap Runner failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gap_runner::sim::{PlayArea, Runner, autopilot};
    use gap_runner::stats::format_ticks;
    use gap_runner::{RunStats, Tuning};

    env_logger::init();
    log::info!("Gap Runner (native) starting...");
    log::info!("Native mode runs headless demo runs - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    let mut runner = Runner::new(seed, Tuning::load());
    let mut stats = RunStats::new();

    for _ in 0..5 {
        runner.start(PlayArea::new(400.0, 2400.0));
        stats.record_start();
        let outcome = loop {
            if let Some(run) = runner.run() {
                let dir = autopilot::steer(run, runner.tuning());
                runner.set_horizontal_input(dir);
            }
            if let Some(outcome) = runner.tick() {
                break outcome;
            }
        };
        if let Some(run) = runner.run() {
            stats.record(outcome, run.time_ticks, run.rows_cleared());
            println!(
                "run {}: {:?} after {} ({} rows cleared)",
                run.number,
                outcome,
                format_ticks(run.time_ticks),
                run.rows_cleared()
            );
        }
    }

    println!("\nseed {}: {}", runner.seed(), stats.summary());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
