//! Hoop Toss entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use hoop_toss::renderer::{RenderError, RenderState, scene};
    use hoop_toss::sim::{GameEvent, PointerSample, Viewport};
    use hoop_toss::{FrameReport, Session, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        /// rAF timestamp at which the score highlight comes off
        highlight_until: Option<f64>,
    }

    impl Game {
        /// Convert a pointer event to canvas-relative CSS pixels
        fn pointer_sample(&self, event: &PointerEvent) -> PointerSample {
            let rect = self.canvas.get_bounding_client_rect();
            PointerSample::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
                event.time_stamp(),
            )
        }

        /// Draw the current state
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = scene::build(self.session.state(), &self.settings);
            match render_state.render(&vertices) {
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

        /// React to a frame's events and expire the score highlight
        fn apply_report(&mut self, report: &FrameReport, time: f64) {
            for event in &report.events {
                match event {
                    GameEvent::Scored { score } => {
                        set_score_text(*score);
                        let duration = self.settings.effective_highlight_ms();
                        if duration > 0.0 {
                            set_score_highlight(true);
                            self.highlight_until = Some(time + duration);
                        }
                    }
                    GameEvent::RimHit { side } => log::debug!("Rim hit ({:?})", side),
                    _ => {}
                }
            }

            if self.highlight_until.is_some_and(|until| time >= until) {
                self.clear_highlight();
            }
        }

        fn clear_highlight(&mut self) {
            if self.highlight_until.take().is_some() {
                set_score_highlight(false);
            }
        }

        fn set_cursor(&self, cursor: &str) {
            let _ = self.canvas.style().set_property("cursor", cursor);
        }
    }

    fn set_score_text(score: u32) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id("score")) {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    fn set_score_highlight(on: bool) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id("score")) {
            let _ = if on {
                el.class_list().add_1("highlight")
            } else {
                el.class_list().remove_1("highlight")
            };
        }
    }

    /// Toggle game-mode classes on the container and body
    fn set_game_mode(on: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let targets = [
            (document.get_element_by_id("basketball-game"), "active"),
            (document.body().map(Into::into), "game-mode"),
        ];
        for (el, class) in targets {
            if let Some(el) = el {
                let _ = if on {
                    el.class_list().add_1(class)
                } else {
                    el.class_list().remove_1(class)
                };
            }
        }
    }

    /// Viewport in CSS pixels plus the matching backing-store size
    fn measure(window: &web_sys::Window) -> (Viewport, (u32, u32)) {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let dpr = window.device_pixel_ratio();
        (
            Viewport::new(width as f32, height as f32),
            ((width * dpr) as u32, (height * dpr) as u32),
        )
    }

    /// Tuning from an inline `<script id="tuning" type="application/json">`, if present
    fn load_tuning(document: &web_sys::Document) -> Tuning {
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
                log::warn!("Ignoring tuning overrides: {}", e);
                Tuning::default()
            }
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        size: (u32, u32),
        viewport: Viewport,
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, size, (viewport.width, viewport.height)).await
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Hoop Toss starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let (viewport, size) = measure(&window);
        canvas.set_width(size.0);
        canvas.set_height(size.1);

        let render_state = match init_renderer(&canvas, size, viewport).await {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("Renderer unavailable: {}", e);
                None
            }
        };
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(viewport, load_tuning(&document)),
            settings: Settings::load(),
            render_state,
            canvas: canvas.clone(),
            highlight_until: None,
        }));

        setup_session_buttons(game.clone());
        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());

        // Idle court until a session starts
        game.borrow_mut().render();

        log::info!("Hoop Toss ready!");
    }

    fn setup_session_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-game-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                set_game_mode(true);
                let schedule = {
                    let mut g = game.borrow_mut();
                    set_score_text(g.session.score());
                    g.session.start()
                };
                if schedule {
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("close-game-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                set_game_mode(false);
                let mut g = game.borrow_mut();
                g.session.end();
                g.set_cursor("");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Pointer down on the ball starts a drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let sample = g.pointer_sample(&event);
                if g.session.pointer_down(sample) {
                    event.prevent_default();
                    g.set_cursor("grabbing");
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Move and release are tracked on the window so fast flings off the canvas still count
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let sample = g.pointer_sample(&event);
                g.session.pointer_move(sample);
            });
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.session.pointer_up() {
                    g.set_cursor("");
                }
            });
            let _ = window
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // A cancelled touch never sends pointerup
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.session.pointer_cancel() {
                    g.set_cursor("");
                }
            });
            let _ = window.add_event_listener_with_callback(
                "pointercancel",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if matches!(event.key().as_str(), "d" | "D") {
                    g.settings.debug_overlay = !g.settings.debug_overlay;
                    g.settings.save();
                    log::info!("Debug overlay: {}", g.settings.debug_overlay);
                    if !g.session.is_active() {
                        g.render();
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (viewport, size) = measure(&window);

            let mut g = game.borrow_mut();
            let g = &mut *g;
            g.canvas.set_width(size.0);
            g.canvas.set_height(size.1);
            g.session.resize(viewport);
            if let Some(render_state) = g.render_state.as_mut() {
                render_state.resize(size, (viewport.width, viewport.height));
            }
            if !g.session.is_active() {
                g.render();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
        let keep_running = {
            let mut g = game.borrow_mut();
            match g.session.frame() {
                Some(report) => {
                    g.apply_report(&report, time);
                    g.render();
                    true
                }
                None => {
                    g.clear_highlight();
                    log::info!("Frame loop stopped");
                    false
                }
            }
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames to simulate for the headless throw
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u32 = 600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hoop_toss::sim::{PointerSample, Viewport};
    use hoop_toss::{Session, Tuning};

    env_logger::init();
    log::info!("Hoop Toss (native) starting...");
    log::info!("Native mode runs a scripted throw - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {}", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut session = Session::new(Viewport::new(1280.0, 720.0), tuning);
    session.start();

    // Flick up and to the right over two 16ms pointer samples
    let start = session.state().ball.center();
    session.pointer_down(PointerSample::new(start.x, start.y, 0.0));
    session.pointer_move(PointerSample::new(start.x + 6.0, start.y - 12.0, 16.0));
    session.pointer_move(PointerSample::new(start.x + 12.0, start.y - 24.0, 32.0));
    session.pointer_up();

    let mut last = None;
    for frame in 0..HEADLESS_FRAMES {
        let Some(report) = session.frame() else {
            break;
        };
        for event in &report.events {
            log::info!("frame {}: {:?}", frame, event);
        }
        last = Some(report);
    }
    session.end();

    if let Some(report) = last {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Cannot encode final frame: {}", e),
        }
    }
    println!("Final score: {}", session.score());
}
