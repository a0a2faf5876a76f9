//! Browser host: binds an [`EngineCore`] to a full-viewport canvas.
//!
//! One listener per event kind is registered on the window or document;
//! hovered elements are resolved at event time through [`BrowserDom`], so
//! content rendered after mount needs no registration. Frames come from
//! `requestAnimationFrame` through a [`RenderLoop`]. Dropping the
//! [`Mounted`] handle removes every listener and cancels the pending frame.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, EventTarget, HtmlAnchorElement, HtmlCanvasElement, MouseEvent,
    Window,
};

use crate::consts::TAG_SELECTOR;
use crate::dom::{Dom, normalize_path};
use crate::engine::EngineCore;
use crate::frame::{FrameScheduler, RenderLoop};
use crate::geom::{Point, Rect, Size};
use crate::input::Button;
use crate::render;

// =============================================================
// DOM adapter
// =============================================================

/// [`Dom`] over the live document.
pub struct BrowserDom {
    origin: String,
}

impl Dom for BrowserDom {
    type Node = Element;

    fn tagged_ancestor(&self, node: &Element) -> Option<Element> {
        node.closest(TAG_SELECTOR).unwrap_or_default()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node;
        ancestor.contains(Some(node))
    }

    fn bounding_rect(&self, node: &Element) -> Option<Rect> {
        if !node.is_connected() {
            return None;
        }
        let r = node.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
    }

    fn link_path(&self, node: &Element) -> Option<String> {
        let link = node.closest("a[href]").unwrap_or_default()?;
        let Ok(anchor) = link.dyn_into::<HtmlAnchorElement>() else {
            return None;
        };
        if anchor.target() == "_blank" || anchor.origin() != self.origin {
            return None;
        }
        Some(normalize_path(&anchor.pathname()))
    }
}

// =============================================================
// Frame scheduler
// =============================================================

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` / `cancelAnimationFrame`.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let callback = self.callback.borrow();
        let f = callback.as_ref()?;
        match self.window.request_animation_frame(f.as_ref().unchecked_ref()) {
            Ok(handle) => Some(handle),
            Err(_) => None,
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if self.window.cancel_animation_frame(handle).is_err() {
            // The frame already ran or the window is gone; nothing is pending.
        }
    }
}

// =============================================================
// Mounted instance
// =============================================================

struct Shared {
    core: EngineCore<Element>,
    dom: BrowserDom,
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    viewport: Size,
}

impl Shared {
    fn now(&self) -> f64 {
        self.window.performance().map_or_else(js_sys::Date::now, |p| p.now())
    }

    fn current_path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize(&mut self) {
        let width = self.window.inner_width().unwrap_or_default().as_f64().unwrap_or(0.0);
        let height = self.window.inner_height().unwrap_or_default().as_f64().unwrap_or(0.0);
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
        self.viewport = Size::new(width, height);
    }

    fn step(&mut self) {
        self.core.tick(&self.dom);
        let params = self.core.draw_params();
        if let Some(ctx) = self.ctx.as_mut() {
            if render::draw(ctx, &params, self.viewport).is_err() {
                // Context state is rebuilt on every draw, so only this frame is lost.
            }
        }
    }
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback: &js_sys::Function = self.closure.as_ref().unchecked_ref();
        if self.target.remove_event_listener_with_callback(self.kind, callback).is_err() {
            // The target is already detached from the page; it can no longer fire.
        }
    }
}

fn listen(target: &EventTarget, kind: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Listener, JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    Ok(Listener { target: target.clone(), kind, closure })
}

fn as_element(target: Option<EventTarget>) -> Option<Element> {
    match target?.dyn_into::<Element>() {
        Ok(el) => Some(el),
        Err(_) => None,
    }
}

/// A cursor attached to the page. Dropping it unmounts.
pub struct Mounted {
    listeners: Vec<Listener>,
    render_loop: Rc<RefCell<RenderLoop<RafScheduler>>>,
    callback: FrameCallback,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.listeners.clear();
        self.render_loop.borrow_mut().stop();
        // Breaks the callback -> loop -> scheduler -> callback cycle.
        self.callback.borrow_mut().take();
    }
}

/// Attach the cursor engine to `canvas` and start the frame loop.
///
/// # Errors
///
/// Returns `Err` if there is no window/document or a listener cannot be added.
pub fn mount(canvas: HtmlCanvasElement) -> Result<Mounted, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document: Document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let origin = window.location().origin().unwrap_or_default();

    let ctx = match canvas.get_context("2d")? {
        Some(obj) => match obj.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => Some(ctx),
            Err(_) => None,
        },
        None => None,
    };

    let shared = Rc::new(RefCell::new(Shared {
        core: EngineCore::new(),
        dom: BrowserDom { origin },
        window: window.clone(),
        canvas,
        ctx,
        viewport: Size::new(0.0, 0.0),
    }));
    shared.borrow_mut().resize();

    let win_target: &EventTarget = &window;
    let doc_target: &EventTarget = &document;
    let mut listeners = Vec::new();

    let s = Rc::clone(&shared);
    listeners.push(listen(win_target, "resize", move |_| s.borrow_mut().resize())?);

    let s = Rc::clone(&shared);
    listeners.push(listen(win_target, "mousemove", move |e| {
        if let Some(e) = e.dyn_ref::<MouseEvent>() {
            let pt = Point::new(f64::from(e.client_x()), f64::from(e.client_y()));
            s.borrow_mut().core.on_pointer_move(pt);
        }
    })?);

    let s = Rc::clone(&shared);
    listeners.push(listen(win_target, "mousedown", move |e| {
        if let Some(button) = e.dyn_ref::<MouseEvent>().and_then(|e| Button::from_dom(e.button())) {
            s.borrow_mut().core.on_pointer_down(button);
        }
    })?);

    let s = Rc::clone(&shared);
    listeners.push(listen(win_target, "mouseup", move |e| {
        if let Some(button) = e.dyn_ref::<MouseEvent>().and_then(|e| Button::from_dom(e.button())) {
            s.borrow_mut().core.on_pointer_up(button);
        }
    })?);

    let s = Rc::clone(&shared);
    listeners.push(listen(doc_target, "mouseover", move |e| {
        let Some(target) = as_element(e.target()) else {
            return;
        };
        let mut guard = s.borrow_mut();
        let now = guard.now();
        let Shared { core, dom, .. } = &mut *guard;
        core.on_pointer_over(&*dom, &target, now);
    })?);

    let s = Rc::clone(&shared);
    listeners.push(listen(doc_target, "mouseout", move |e| {
        let Some(target) = as_element(e.target()) else {
            return;
        };
        let related = e.dyn_ref::<MouseEvent>().and_then(|m| as_element(m.related_target()));
        let mut guard = s.borrow_mut();
        let Shared { core, dom, .. } = &mut *guard;
        core.on_pointer_out(&*dom, &target, related.as_ref());
    })?);

    let s = Rc::clone(&shared);
    listeners.push(listen(doc_target, "click", move |e| {
        let Some(target) = as_element(e.target()) else {
            return;
        };
        let mut guard = s.borrow_mut();
        let now = guard.now();
        let path = guard.current_path();
        let Shared { core, dom, .. } = &mut *guard;
        core.on_navigation_click(&*dom, &target, &path, now);
    })?);

    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let render_loop = Rc::new(RefCell::new(RenderLoop::new(RafScheduler {
        window,
        callback: Rc::clone(&callback),
    })));

    let lp = Rc::clone(&render_loop);
    let s = Rc::clone(&shared);
    *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
        lp.borrow_mut().frame(|| s.borrow_mut().step());
    }));
    render_loop.borrow_mut().start();

    Ok(Mounted { listeners, render_loop, callback })
}

/// JavaScript-facing handle returned by [`mount_cursor`].
#[wasm_bindgen]
pub struct CursorHandle {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl CursorHandle {
    /// Remove listeners and cancel the pending frame. Safe to call twice.
    pub fn unmount(&mut self) {
        self.mounted.take();
    }
}

/// Mount the cursor on a fixed, full-viewport, pointer-events-none canvas.
///
/// # Errors
///
/// Propagates [`mount`] failures to JavaScript.
#[wasm_bindgen(js_name = mountCursor)]
pub fn mount_cursor(canvas: HtmlCanvasElement) -> Result<CursorHandle, JsValue> {
    Ok(CursorHandle { mounted: Some(mount(canvas)?) })
}
