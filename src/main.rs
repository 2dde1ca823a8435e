//! Bouncing Circles entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

    use bouncing_circles::platform::CanvasSurface;
    use bouncing_circles::{Playground, Settings, SurfaceError};

    /// Class added to the hint text once the loop is running
    const INACTIVE_CLASS: &str = "inactive";

    /// App instance holding the playground and frame timing
    struct App {
        playground: Playground<CanvasSurface>,
        last_time: f64,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;
            self.playground.advance(dt);
        }

        fn pointer_down(&mut self, x: f64, y: f64) {
            if self.playground.on_pointer_down(x, y) {
                mark_hint_inactive();
            }
        }
    }

    fn window_size(window: &Window) -> (u32, u32) {
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
        (width as u32, height as u32)
    }

    fn mark_hint_inactive() {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("text"));
        if let Some(el) = text {
            let _ = el.class_list().add_1(INACTIVE_CLASS);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Bouncing Circles starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("playground")
            .ok_or("no #playground canvas")?
            .dyn_into()
            .map_err(|_| "#playground is not a canvas")?;

        let (width, height) = window_size(&window);
        let seed = js_sys::Date::now() as u64;
        let playground = Playground::new(
            CanvasSurface::new(canvas),
            width,
            height,
            Settings::load(),
            seed,
        )
        .map_err(|e: SurfaceError| JsValue::from_str(&e.to_string()))?;

        log::info!("Playground initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            playground,
            last_time: 0.0,
        }));

        setup_input_handlers(&window, app.clone())?;
        request_animation_frame(app);

        log::info!("Bouncing Circles running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let document = window.document().ok_or("no document")?;

        // Touch handlers call preventDefault to suppress emulated mouse events
        let non_passive = AddEventListenerOptions::new();
        non_passive.set_passive(false);

        // Mouse down - spawn at the click position
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .pointer_down(event.client_x() as f64, event.client_y() as f64);
            });
            document
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().playground.on_pointer_up();
            });
            document
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start - first touch point acts as the pointer
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut()
                        .pointer_down(touch.client_x() as f64, touch.client_y() as f64);
                }
            });
            document.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &non_passive,
            )?;
            closure.forget();
        }

        // Touch end
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if event.touches().length() == 0 {
                    app.borrow_mut().playground.on_pointer_up();
                }
            });
            document.add_event_listener_with_callback_and_add_event_listener_options(
                "touchend",
                closure.as_ref().unchecked_ref(),
                &non_passive,
            )?;
            closure.forget();
        }

        // Window resize - forward the new viewport size to the surface
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let (width, height) = window_size(&window);
                app.borrow_mut().playground.on_surface_resize(width, height);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run().inspect_err(|e| log::error!("Startup failed: {:?}", e))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bouncing Circles (native) starting...");
    log::info!("Native mode has no drawing surface - run with `trunk serve` for the web version");

    println!("\nRunning headless bounce demo...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drop one circle near the left wall and print a few frames
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use bouncing_circles::renderer::Renderer;
    use bouncing_circles::sim::{Circle, Simulation};
    use bouncing_circles::surface::SurfaceSize;

    struct LogRenderer;

    impl Renderer for LogRenderer {
        fn clear_area(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {}

        fn draw_filled_disc(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
            println!("  disc at ({:.1}, {:.1}) r={} {}", cx, cy, radius, color);
        }
    }

    let mut sim = Simulation::new(LogRenderer, SurfaceSize::new(800, 600));
    let mut circles = vec![Circle::new(20.0, "#E7E247", 10.0, 300.0, -3.0, 0.0)];
    for _ in 0..3 {
        sim.frame(&mut circles);
    }
    println!("✓ Circle bounced off the left wall (dx = {})", circles[0].vel.x);
}
