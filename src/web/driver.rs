// driver.rs - Browser plumbing
//
// The requestAnimationFrame loop and the window listeners that feed
// pointer and viewport changes into the scheduler. Closures are leaked
// on purpose: they live as long as the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, MouseEvent, TouchEvent, Window};

use crate::error::{EngineError, EngineResult};
use crate::scheduler::Scheduler;
use crate::surface::Viewport;

pub fn window() -> EngineResult<Window> {
    web_sys::window().ok_or_else(|| EngineError::Js("no window".into()))
}

pub fn read_viewport(window: &Window) -> Viewport {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(w, h, window.device_pixel_ratio())
}

/// Call `frame` once per display refresh, forever.
pub fn run_loop(mut frame: impl FnMut(f64) + 'static) -> EngineResult<()> {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();

    *slot.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        frame(timestamp);
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = request_frame(cb) {
                log::error!("frame loop stopped: {e}");
            }
        }
    }));

    match slot.borrow().as_ref() {
        Some(cb) => request_frame(cb),
        None => Ok(()),
    }
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> EngineResult<()> {
    window()?.request_animation_frame(cb.as_ref().unchecked_ref())?;
    Ok(())
}

pub fn listen<E: JsCast + 'static>(
    target: &EventTarget,
    kind: &str,
    mut handler: impl FnMut(E) + 'static,
) -> EngineResult<()> {
    let cb = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Pointer, touch and resize tracking for the scheduler.
pub fn track_input(window: &Window, scheduler: &Rc<RefCell<Scheduler>>) -> EngineResult<()> {
    let s = scheduler.clone();
    listen(window, "mousemove", move |e: MouseEvent| {
        s.borrow_mut().pointer_moved(e.client_x() as f64, e.client_y() as f64);
    })?;

    let s = scheduler.clone();
    listen(window, "touchstart", move |e: TouchEvent| {
        if let Some(t) = e.touches().get(0) {
            s.borrow_mut().pointer_moved(t.client_x() as f64, t.client_y() as f64);
        }
    })?;

    let s = scheduler.clone();
    let w = window.clone();
    listen(window, "resize", move |_: web_sys::Event| {
        let viewport = read_viewport(&w);
        match s.try_borrow_mut() {
            Ok(mut s) => s.resize(viewport),
            Err(_) => log::warn!("resize during tick ignored"),
        }
    })?;

    Ok(())
}
