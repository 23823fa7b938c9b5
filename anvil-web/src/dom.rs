use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Storage, Window};

/// Retrieve the global `window` object.
///
/// # Panics
/// Panics if executed outside of a browser context where `window` is unavailable.
#[must_use]
pub fn window() -> Window {
    web_sys::window().expect("`window` should be available in web context")
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Wall-clock milliseconds, the time base for toast expiry.
#[must_use]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Fresh RNG seed for a mounted minigame.
#[must_use]
pub fn random_seed() -> u64 {
    js_sys::Math::random().to_bits() ^ js_sys::Date::now().to_bits().rotate_left(17)
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A free-running `requestAnimationFrame` loop. Dropping it cancels the
/// pending frame and releases the callback.
pub struct AnimationLoop {
    handle: Rc<Cell<Option<i32>>>,
    slot: FrameSlot,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut() + 'static) -> Self {
        let handle = Rc::new(Cell::new(None));
        let slot: FrameSlot = Rc::new(RefCell::new(None));

        let handle_loop = handle.clone();
        let slot_loop = slot.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            on_frame();
            if let Some(cb) = slot_loop.borrow().as_ref() {
                handle_loop.set(request_frame(cb));
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = slot.borrow().as_ref() {
            handle.set(request_frame(cb));
        }
        Self { handle, slot }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(win) = web_sys::window() {
                let _ = win.cancel_animation_frame(id);
            }
        }
        // The closure holds a clone of `slot`; clearing it breaks the cycle.
        self.slot.borrow_mut().take();
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    window()
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(|err| log::warn!("requestAnimationFrame failed: {}", js_error_message(&err)))
        .ok()
}

/// A `setInterval` timer cleared on drop.
pub struct Interval {
    id: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(period_ms: i32, on_tick: impl FnMut() + 'static) -> Self {
        let closure = Closure::wrap(Box::new(on_tick) as Box<dyn FnMut()>);
        let id = window()
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|err| log::warn!("setInterval failed: {}", js_error_message(&err)))
            .ok();
        Self {
            id,
            _closure: closure,
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let (Some(id), Some(win)) = (self.id.take(), web_sys::window()) {
            win.clear_interval_with_handle(id);
        }
    }
}
