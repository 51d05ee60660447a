//! Spike Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use spike_dash::audio::AudioManager;
    use spike_dash::consts::*;
    use spike_dash::highscores::LocalStorageHighScoreStore;
    use spike_dash::platform::{Cue, InputEvent, Presenter, queue_auto_pause};
    use spike_dash::renderer::{self, RenderState, SceneOptions};
    use spike_dash::sim::{RenderSnapshot, SessionPhase, autopilot};
    use spike_dash::{Game, Settings, TickOutcome};

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    /// Canvas + Web Audio + DOM overlays
    struct WebPresenter {
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        fps: u32,
    }

    impl WebPresenter {
        fn update_hud(&self, snapshot: &RenderSnapshot) {
            let Some(document) = document() else {
                return;
            };

            set_text(&document, "#hud-score .hud-value", &snapshot.score.to_string());
            set_text(&document, "#hud-record .hud-value", &snapshot.high_score.to_string());
            if self.settings.show_fps {
                set_class(&document, "hud-fps", "hud-item");
                set_text(&document, "#hud-fps .hud-value", &self.fps.to_string());
            } else {
                set_class(&document, "hud-fps", "hud-item hidden");
            }

            let shown = |phase: SessionPhase| {
                if snapshot.phase == phase { "overlay" } else { "overlay hidden" }
            };
            set_class(&document, "menu", shown(SessionPhase::Menu));
            set_class(&document, "pause-menu", shown(SessionPhase::Paused));
            set_class(&document, "game-over", shown(SessionPhase::Dead));

            if snapshot.phase == SessionPhase::Menu {
                set_text(&document, "#menu-record", &snapshot.high_score.to_string());
            }
            if snapshot.phase == SessionPhase::Dead {
                set_text(&document, "#final-score", &snapshot.score.to_string());
                set_text(&document, "#final-record", &snapshot.high_score.to_string());
            }
        }
    }

    impl Presenter for WebPresenter {
        fn render(&mut self, snapshot: &RenderSnapshot) {
            if let Some(ref mut render_state) = self.render_state {
                let options = SceneOptions {
                    debug_hitboxes: self.settings.debug_hitboxes,
                };
                let vertices = renderer::build(snapshot, options);
                match render_state.render(&vertices, renderer::clear_color(snapshot)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            self.update_hud(snapshot);
        }

        fn play_cue(&mut self, cue: Cue) {
            self.audio.play(cue);
        }

        fn start_music(&mut self) {
            self.audio.start_music();
        }

        fn stop_music(&mut self) {
            self.audio.stop_music();
        }
    }

    /// Loop state around the session
    struct App {
        game: Game<WebPresenter, LocalStorageHighScoreStore>,
        /// Input drained into the next tick
        pending: Vec<InputEvent>,
        accumulator: f32,
        last_time: f64,
        /// Demo mode: autopilot supplies the primary action
        idle_mode: bool,
        /// Set once the session quits; the loop stops rescheduling
        stopped: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
    }

    impl App {
        fn settings_mut(&mut self) -> &mut Settings {
            &mut self.game.presenter_mut().settings
        }

        fn push(&mut self, event: InputEvent) {
            // Audio can only start after a user gesture
            self.game.presenter().audio.resume();
            self.pending.push(event);
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let mut input = std::mem::take(&mut self.pending);
                if self.idle_mode {
                    input.extend(autopilot::decide(self.game.state()));
                }

                if self.game.tick(&input) == TickOutcome::Quit {
                    self.shutdown();
                    return;
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.game.presenter_mut().fps = (60000.0 / elapsed).round() as u32;
                }
            }

            self.game.presenter_mut().audio.pump_music();
        }

        /// Immediate quit, used by page unload
        fn quit_now(&mut self) {
            if !self.stopped {
                self.game.tick(&[InputEvent::Quit]);
                self.shutdown();
            }
        }

        fn shutdown(&mut self) {
            self.stopped = true;
            self.pending.clear();
            if let Some(document) = document() {
                set_class(&document, "hud", "hidden");
                set_class(&document, "menu", "overlay hidden");
                set_class(&document, "pause-menu", "overlay hidden");
                set_class(&document, "game-over", "overlay hidden");
                set_class(&document, "exited", "overlay");
            }
            log::info!("Session ended (record {})", self.game.state().high_score);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Spike Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        set_class(&document, "loading", "hidden");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let audio = AudioManager::new(&settings);
        let render_state = init_renderer(&canvas, width, height).await;
        let tint_cycle = settings.tint_cycle();

        let presenter = WebPresenter {
            render_state,
            audio,
            settings,
            fps: 0,
        };

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, presenter, LocalStorageHighScoreStore).with_tint_cycle(tint_cycle);
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            pending: Vec::new(),
            accumulator: 0.0,
            last_time: 0.0,
            idle_mode: false,
            stopped: false,
            frame_times: [0.0; 60],
            frame_index: 0,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_auto_pause(app.clone());
        setup_unload(app.clone());

        set_class(&document, "hud", "");

        request_animation_frame(app);

        log::info!("Spike Dash running!");
        Ok(())
    }

    /// WebGPU setup; any failure leaves the game running without a canvas
    async fn init_renderer(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::warn!("Failed to create surface, rendering disabled: {e}");
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::warn!("No graphics adapter, rendering disabled: {e}");
                return None;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(state) => Some(state),
            Err(e) => {
                log::warn!("Renderer init failed, rendering disabled: {e:#}");
                None
            }
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse down (jump / start / restart)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().push(InputEvent::PrimaryAction);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().push(InputEvent::PrimaryAction);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut app = app.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        app.push(InputEvent::PrimaryAction);
                    }
                    "p" | "P" => app.push(InputEvent::PauseToggle),
                    "Escape" => app.push(InputEvent::Exit),
                    "i" | "I" => {
                        app.idle_mode = !app.idle_mode;
                        log::info!("Idle mode: {}", app.idle_mode);
                    }
                    "h" | "H" => {
                        let settings = app.settings_mut();
                        settings.debug_hitboxes = !settings.debug_hitboxes;
                        settings.save();
                    }
                    "m" | "M" => {
                        let presenter = app.game.presenter_mut();
                        presenter.settings.muted = !presenter.settings.muted;
                        presenter.settings.save();
                        presenter.audio.apply_settings(&presenter.settings);
                        log::info!("Muted: {}", presenter.settings.muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if a.stopped {
                return;
            }

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt, time);
            if a.stopped {
                return;
            }
        }

        request_animation_frame(app);
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        fn auto_pause(app: &mut App, why: &str) {
            if queue_auto_pause(app.game.phase(), &mut app.pending) {
                log::info!("Auto-paused ({why})");
            }
            let presenter = app.game.presenter_mut();
            if presenter.settings.mute_on_blur {
                presenter.audio.stop_music();
            }
        }

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&mut app.borrow_mut(), "tab hidden");
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
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                auto_pause(&mut app.borrow_mut(), "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus back: music resumes unless the run is over
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                if a.stopped || a.game.phase() == SessionPhase::Dead {
                    return;
                }
                let presenter = a.game.presenter_mut();
                if presenter.settings.mute_on_blur {
                    presenter.audio.start_music();
                }
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_unload(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().quit_now();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};

    use spike_dash::audio::AudioManager;
    use spike_dash::consts::TICK_RATE;
    use spike_dash::highscores::FileHighScoreStore;
    use spike_dash::platform::{Cue, FrameLimiter, HeadlessPresenter, InputEvent, Presenter};
    use spike_dash::sim::{RenderSnapshot, autopilot};
    use spike_dash::{Game, Settings, TickOutcome};

    /// Headless log output plus the (silent) audio manager
    struct NativePresenter {
        headless: HeadlessPresenter,
        audio: AudioManager,
    }

    impl Presenter for NativePresenter {
        fn render(&mut self, snapshot: &RenderSnapshot) {
            self.headless.render(snapshot);
        }

        fn play_cue(&mut self, cue: Cue) {
            self.headless.play_cue(cue);
            self.audio.play(cue);
        }

        fn start_music(&mut self) {
            self.headless.start_music();
            self.audio.start_music();
        }

        fn stop_music(&mut self) {
            self.headless.stop_music();
            self.audio.stop_music();
        }
    }

    /// Tick count for a demo of `seconds`
    pub(crate) fn demo_ticks(seconds: u32) -> Result<u32> {
        seconds
            .checked_mul(TICK_RATE)
            .with_context(|| format!("duration of {seconds}s is too long"))
    }

    /// Demo run: the autopilot plays for `seconds` (first argument, default
    /// 60), then the session quits
    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Spike Dash (native) starting...");
        log::info!("Native mode runs headless - serve the web build to play");

        let seconds: u32 = match std::env::args().nth(1) {
            Some(arg) => arg
                .parse()
                .with_context(|| format!("invalid duration in seconds: {arg:?}"))?,
            None => 60,
        };

        let settings = Settings::load();
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before 1970")?
            .as_millis() as u64;

        let presenter = NativePresenter {
            headless: HeadlessPresenter::new(),
            audio: AudioManager::new(&settings),
        };
        let mut game = Game::new(seed, presenter, FileHighScoreStore::default())
            .with_tint_cycle(settings.tint_cycle());
        log::info!("Game initialized with seed: {}", seed);

        let mut limiter = FrameLimiter::new(TICK_RATE);
        let total_ticks = demo_ticks(seconds)?;

        for n in 0..=total_ticks {
            let input: Vec<InputEvent> = if n == total_ticks {
                vec![InputEvent::Quit]
            } else {
                autopilot::decide(game.state()).into_iter().collect()
            };

            if game.tick(&input) == TickOutcome::Quit {
                break;
            }
            limiter.wait();
        }

        let presenter = game.presenter();
        log::info!(
            "Session ended after {} frames, {} cues, record {} (music {})",
            presenter.headless.frames,
            presenter.headless.cues.len(),
            game.state().high_score,
            if presenter.audio.music_playing() { "on" } else { "off" },
        );
        Ok(())
    }
}

#[cfg(test)]
#[cfg(not(target_arch = "wasm32"))]
mod tests {
    use super::native::demo_ticks;

    #[test]
    fn test_demo_ticks() {
        assert_eq!(demo_ticks(60).unwrap(), 3600);
        assert_eq!(demo_ticks(0).unwrap(), 0);
    }

    #[test]
    fn test_demo_ticks_rejects_overflow() {
        let err = demo_ticks(u32::MAX / 60 + 1).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
