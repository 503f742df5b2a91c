mod wgpu;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use console_error_panic_hook::set_once;
use globe::{Globe, GlobeConfig, Theme, markers_from_json, showcase_markers};
use gpu::SurfaceSize;
use runtime::{FrameHost, FrameTicket, INPUT_EVENTS, InputHost, ListenerSet};
use scene::InputEvent;
use surface::LandMaskResource;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent, Window};

thread_local! {
    // Shared by every view on the page; rasterized on first use.
    static LAND: LandMaskResource = LandMaskResource::world(GlobeConfig::default().land_mask);
}

/// Ticket handed out when the browser refuses a frame; never matches a real one.
const NO_FRAME: FrameTicket = FrameTicket(u64::MAX);

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

type EventClosure = Closure<dyn FnMut(Event)>;

/// `requestAnimationFrame` plus the canvas listeners of one view.
struct BrowserHost {
    window: Window,
    canvas: HtmlCanvasElement,
    frame_callback: Option<Closure<dyn FnMut(f64)>>,
    listeners: ListenerSet<EventClosure>,
}

impl FrameHost for BrowserHost {
    fn request_frame(&mut self) -> FrameTicket {
        let Some(callback) = &self.frame_callback else {
            return NO_FRAME;
        };
        match self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => FrameTicket(id as u32 as u64),
            Err(err) => {
                warn(&format!("requestAnimationFrame failed: {err:?}"));
                NO_FRAME
            }
        }
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        if ticket != NO_FRAME {
            if let Err(err) = self.window.cancel_animation_frame(ticket.0 as u32 as i32) {
                warn(&format!("cancelAnimationFrame failed: {err:?}"));
            }
        }
    }
}

impl InputHost for BrowserHost {
    fn detach_listeners(&mut self) -> usize {
        let canvas = &self.canvas;
        self.listeners.detach_all(|event, closure| {
            if let Err(err) = canvas.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
                warn(&format!("removeEventListener({event}) failed: {err:?}"));
            }
        })
    }
}

struct Inner {
    globe: Globe,
    host: BrowserHost,
    overlay_callback: Option<js_sys::Function>,
}

fn set_canvas_size(canvas: &HtmlCanvasElement, size: SurfaceSize) {
    if canvas.width() != size.width || canvas.height() != size.height {
        canvas.set_width(size.width);
        canvas.set_height(size.height);
    }
}

impl Inner {
    fn sync_canvas_size(&self) {
        if let Some(scene) = self.globe.scene() {
            set_canvas_size(&self.host.canvas, scene.surface_size());
        }
    }
}

fn translate(event: &Event) -> Option<InputEvent> {
    let kind = event.type_();
    match kind.as_str() {
        "mousedown" | "mousemove" => {
            let e = event.dyn_ref::<MouseEvent>()?;
            let (x, y) = (e.client_x() as f64, e.client_y() as f64);
            Some(if kind == "mousedown" {
                InputEvent::PointerDown { x, y }
            } else {
                InputEvent::PointerMove { x, y }
            })
        }
        "mouseup" => Some(InputEvent::PointerUp),
        "mouseleave" => Some(InputEvent::PointerLeave),
        "touchstart" | "touchmove" => {
            let touches = event.dyn_ref::<TouchEvent>()?.touches();
            let count = touches.length() as usize;
            let (x, y) = touches
                .item(0)
                .map_or((f64::NAN, f64::NAN), |t| (t.client_x() as f64, t.client_y() as f64));
            Some(if kind == "touchstart" {
                InputEvent::TouchStart { touches: count, x, y }
            } else {
                InputEvent::TouchMove { touches: count, x, y }
            })
        }
        "touchend" => Some(InputEvent::TouchEnd),
        "wheel" => {
            let e = event.dyn_ref::<WheelEvent>()?;
            e.prevent_default();
            Some(InputEvent::Wheel { delta_y: e.delta_y() })
        }
        _ => None,
    }
}

/// Interactive globe mounted on a `<canvas>`.
#[wasm_bindgen]
pub struct GlobeView {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl GlobeView {
    /// Mount on `<canvas id=canvas_id>`. Resolves once the GPU device is ready.
    pub async fn create(canvas_id: String) -> Result<GlobeView, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(&canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("canvas #{canvas_id} not found")))?
            .dyn_into()?;

        // A hidden canvas still needs a configurable surface; resize fixes it up later.
        let initial = SurfaceSize::new(
            canvas.client_width() as f64,
            canvas.client_height() as f64,
            window.device_pixel_ratio(),
        )
        .unwrap_or(SurfaceSize {
            width: 1,
            height: 1,
            pixel_ratio: 1.0,
        });
        set_canvas_size(&canvas, initial);
        let device = wgpu::canvas_device(&canvas, initial)
            .await
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let globe = LAND
            .with(|land| {
                Globe::new(
                    land,
                    showcase_markers(),
                    Theme::light(),
                    GlobeConfig::default(),
                    Box::new(device),
                )
            })
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let inner = Rc::new(RefCell::new(Inner {
            globe,
            host: BrowserHost {
                window,
                canvas,
                frame_callback: None,
                listeners: ListenerSet::new(),
            },
            overlay_callback: None,
        }));
        install_frame_callback(&inner);
        attach_listeners(&inner)?;

        let view = GlobeView { inner };
        let (w, h) = {
            let canvas = &view.inner.borrow().host.canvas;
            (canvas.client_width() as f64, canvas.client_height() as f64)
        };
        view.resize(w, h)?;
        Ok(view)
    }

    /// Report the canvas CSS size. Zero sizes are ignored until a real one arrives.
    pub fn resize(&self, css_width: f64, css_height: f64) -> Result<bool, JsValue> {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let ratio = inner.host.window.device_pixel_ratio();
        let built = inner
            .globe
            .resize(css_width, css_height, ratio)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        if !built {
            log(&format!("globe: deferring scene for {css_width}x{css_height}"));
            return Ok(false);
        }
        inner.sync_canvas_size();
        inner
            .globe
            .start(&mut inner.host)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(true)
    }

    pub fn set_dark_mode(&self, dark: bool) {
        self.inner.borrow_mut().globe.set_theme(Theme::for_dark_mode(dark));
    }

    pub fn set_markers_json(&self, json: &str) -> Result<(), JsValue> {
        let markers = markers_from_json(json).map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.inner.borrow_mut().globe.set_markers(markers);
        Ok(())
    }

    /// `callback(overlay)` runs once per frame with the cards to draw.
    pub fn set_overlay_callback(&self, callback: Option<js_sys::Function>) {
        self.inner.borrow_mut().overlay_callback = callback;
    }

    /// Stop the frame loop, free the scene and detach listeners. Safe to call twice.
    pub fn destroy(&self) {
        let Ok(mut guard) = self.inner.try_borrow_mut() else {
            warn("globe: destroy called re-entrantly; ignored");
            return;
        };
        let inner = &mut *guard;
        // The frame closure stays alive: destroy may run from inside it.
        if inner.globe.teardown(&mut inner.host) {
            inner.overlay_callback = None;
            log("globe: destroyed");
        }
    }
}

impl Drop for GlobeView {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn install_frame_callback(inner: &Rc<RefCell<Inner>>) {
    let weak: Weak<RefCell<Inner>> = Rc::downgrade(inner);
    let callback = Closure::wrap(Box::new(move |timestamp_ms: f64| {
        let Some(rc) = weak.upgrade() else {
            return;
        };
        let (overlay, callback) = {
            let Ok(mut guard) = rc.try_borrow_mut() else {
                return;
            };
            let inner = &mut *guard;
            let Some(ticket) = inner.globe.pending_frame() else {
                return;
            };
            let Some(overlay) = inner.globe.on_frame(&mut inner.host, ticket, timestamp_ms) else {
                return;
            };
            (overlay, inner.overlay_callback.clone())
        };
        // The callback may call back into the view, so no borrow is held here.
        if let Some(callback) = callback {
            let arg = overlay
                .to_json()
                .map_err(|err| JsValue::from_str(&err.to_string()))
                .and_then(|json| js_sys::JSON::parse(&json));
            match arg {
                Ok(arg) => {
                    if let Err(err) = callback.call1(&JsValue::NULL, &arg) {
                        warn(&format!("overlay callback threw: {err:?}"));
                    }
                }
                Err(err) => warn(&format!("overlay encode failed: {err:?}")),
            }
        }
    }) as Box<dyn FnMut(f64)>);
    inner.borrow_mut().host.frame_callback = Some(callback);
}

fn attach_listeners(inner: &Rc<RefCell<Inner>>) -> Result<(), JsValue> {
    let mut guard = inner.borrow_mut();
    for event in INPUT_EVENTS {
        let weak = Rc::downgrade(inner);
        let closure: EventClosure = Closure::wrap(Box::new(move |e: Event| {
            let Some(input) = translate(&e) else {
                return;
            };
            if let Some(rc) = weak.upgrade()
                && let Ok(mut inner) = rc.try_borrow_mut()
            {
                inner.globe.handle_input(input);
            }
        }) as Box<dyn FnMut(Event)>);

        let target = &guard.host.canvas;
        if event == "wheel" {
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
        } else {
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        }
        guard.host.listeners.attach(event, closure);
    }
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}
