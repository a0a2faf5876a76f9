//! Cursor engine: the per-instance state record, the hover state machine,
//! and the per-frame update.
//!
//! `EngineCore` holds no browser handles. Pointer events mutate it
//! synchronously and [`EngineCore::tick`] advances it once per animation
//! frame; both run on the same event loop so no locking is involved. The
//! browser host in [`crate::browser`] owns one core per mounted canvas.

use crate::consts::{
    BASE_SIZE, BOX_CLICK_SCALE, DOT_CLICK_SCALE, HOVER_TRANSITION_THRESHOLD, INITIAL_HOVER_LERP, LERP,
    NAVIGATION_GUARD_MS, PADDING, RELEASE_THRESHOLD, ROTATION_LERP, ROTATION_SPEED, SCALE_LERP, SNAP_LERP,
    SPRING_RESET_ON_HOVER,
};
use crate::dom::Dom;
use crate::geom::{Point, Rect, Size, center_of, is_closer_to_vertical, lerp, snap_to_right_angle};
use crate::input::{
    Button, CursorState, should_handle_cursor_enter, should_handle_cursor_leave,
    should_release_cursor_on_navigation_click,
};
use crate::spring::Spring;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    /// Center of the bracket box.
    pub box_center: Point,
    /// Box dimensions, already swapped for quarter-turn orientations.
    pub box_size: Size,
    /// Box rotation in degrees.
    pub rotation: f64,
    pub box_scale: f64,
    /// The dot sits on the raw pointer.
    pub dot_center: Point,
    pub dot_scale: f64,
}

/// Cursor state record. `N` is the host's element handle.
#[derive(Debug, Clone)]
pub struct EngineCore<N> {
    pub state: CursorState,
    /// Logical anchor the box chases.
    pub mouse: Point,
    /// Raw pointer position.
    pub actual_mouse: Point,
    /// Pointer position at the previous move, for velocity deltas.
    pub prev_mouse: Point,
    /// Rendered box center.
    pub position: Point,
    /// Currently hovered tagged element. Never mutated by the engine.
    pub hovered: Option<N>,
    pub hovered_rect: Option<Rect>,
    pub target_anchor: Option<Point>,
    pub is_hover_transition: bool,
    /// Primary button held.
    pub is_active: bool,
    pub rotation: f64,
    pub target_rotation: f64,
    pub cursor_size: Size,
    pub box_scale: f64,
    pub dot_scale: f64,
    pub spring: Spring,
    /// Enter events are ignored until this timestamp (ms).
    pub navigation_guard_until: Option<f64>,
    pointer_seen: bool,
}

impl<N> Default for EngineCore<N> {
    fn default() -> Self {
        Self {
            state: CursorState::Free,
            mouse: Point::default(),
            actual_mouse: Point::default(),
            prev_mouse: Point::default(),
            position: Point::default(),
            hovered: None,
            hovered_rect: None,
            target_anchor: None,
            is_hover_transition: false,
            is_active: false,
            rotation: 0.0,
            target_rotation: 0.0,
            cursor_size: Size::square(BASE_SIZE),
            box_scale: 1.0,
            dot_scale: 1.0,
            spring: Spring::new(),
            navigation_guard_until: None,
            pointer_seen: false,
        }
    }
}

impl<N: Clone + PartialEq> EngineCore<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Pointer events ---

    /// Raw pointer motion.
    pub fn on_pointer_move(&mut self, pt: Point) {
        if !self.pointer_seen {
            self.pointer_seen = true;
            self.prev_mouse = pt;
        }
        let dx = pt.x - self.prev_mouse.x;
        let dy = pt.y - self.prev_mouse.y;

        self.actual_mouse = pt;
        match self.state {
            CursorState::Free => self.mouse = pt,
            CursorState::Hovering => self.spring.inject_velocity(dx, dy),
            CursorState::Releasing => {}
        }
        self.prev_mouse = pt;
    }

    pub fn on_pointer_down(&mut self, button: Button) {
        if button == Button::Primary {
            self.is_active = true;
        }
    }

    pub fn on_pointer_up(&mut self, button: Button) {
        if button == Button::Primary {
            self.is_active = false;
        }
    }

    /// Delegated "over" event. Returns `true` if a new element was entered.
    pub fn on_pointer_over<D>(&mut self, dom: &D, target: &N, now_ms: f64) -> bool
    where
        D: Dom<Node = N>,
    {
        if self.navigation_guard_active(now_ms) {
            return false;
        }
        if !should_handle_cursor_enter(dom, target, self.hovered.as_ref()) {
            return false;
        }
        let Some(el) = dom.tagged_ancestor(target) else {
            return false;
        };
        let Some(rect) = dom.bounding_rect(&el) else {
            return false;
        };
        self.enter(el, rect);
        true
    }

    /// Delegated "out" event. Returns `true` if the hovered element was left.
    pub fn on_pointer_out<D>(&mut self, dom: &D, target: &N, related: Option<&N>) -> bool
    where
        D: Dom<Node = N>,
    {
        if !should_handle_cursor_leave(dom, target, related, self.hovered.as_ref()) {
            return false;
        }
        self.release();
        true
    }

    /// Click anywhere in the document. An in-app link to another route
    /// releases hover and arms the navigation guard so the cursor does not
    /// latch onto an element the route change is about to unmount.
    pub fn on_navigation_click<D>(&mut self, dom: &D, target: &N, current_path: &str, now_ms: f64) -> bool
    where
        D: Dom<Node = N>,
    {
        if !should_release_cursor_on_navigation_click(dom, target, current_path) {
            return false;
        }
        self.release();
        self.navigation_guard_until = Some(now_ms + NAVIGATION_GUARD_MS);
        true
    }

    #[must_use]
    pub fn navigation_guard_active(&self, now_ms: f64) -> bool {
        self.navigation_guard_until.is_some_and(|until| now_ms < until)
    }

    // --- Transitions ---

    fn enter(&mut self, el: N, rect: Rect) {
        if self.state == CursorState::Hovering {
            self.spring.dampen(SPRING_RESET_ON_HOVER);
        } else {
            self.spring.reset();
        }

        self.state = CursorState::Hovering;
        self.hovered = Some(el);
        self.hovered_rect = Some(rect);
        self.target_anchor = Some(center_of(&rect));
        self.is_hover_transition = true;
        self.target_rotation = snap_to_right_angle(self.rotation);
    }

    /// Drop the hovered element and glide back to the pointer.
    /// No-op unless something is hovered.
    pub fn release(&mut self) {
        if self.state != CursorState::Hovering {
            return;
        }
        self.state = CursorState::Releasing;
        self.is_hover_transition = false;
        self.spring.reset();
        self.hovered = None;
        self.hovered_rect = None;
        self.target_anchor = None;
    }

    // --- Frame ---

    /// Advance one animation frame.
    pub fn tick<D>(&mut self, dom: &D)
    where
        D: Dom<Node = N>,
    {
        self.update_size();
        self.update_position(dom);
        self.update_rotation();
        self.update_scale();
    }

    fn update_size(&mut self) {
        let target = match (self.state, self.hovered_rect) {
            (CursorState::Hovering, Some(rect)) => Size::new(rect.width + PADDING, rect.height + PADDING),
            _ => Size::square(BASE_SIZE),
        };
        self.cursor_size.width = lerp(self.cursor_size.width, target.width, LERP);
        self.cursor_size.height = lerp(self.cursor_size.height, target.height, LERP);
    }

    fn update_position<D>(&mut self, dom: &D)
    where
        D: Dom<Node = N>,
    {
        match self.state {
            CursorState::Hovering => self.update_hovering(dom),
            CursorState::Releasing => {
                self.mouse = self.position;
                self.position = self.position.lerp(self.actual_mouse, LERP);
                if self.position.distance(self.actual_mouse) < RELEASE_THRESHOLD {
                    self.state = CursorState::Free;
                    self.position = self.actual_mouse;
                }
            }
            CursorState::Free => self.position = self.actual_mouse,
        }
    }

    fn update_hovering<D>(&mut self, dom: &D)
    where
        D: Dom<Node = N>,
    {
        // Re-measure every frame; an element that left the layout releases.
        let rect = self.hovered.as_ref().and_then(|el| dom.bounding_rect(el));
        let Some(rect) = rect else {
            self.release();
            return;
        };
        let anchor = center_of(&rect);
        self.hovered_rect = Some(rect);
        self.target_anchor = Some(anchor);

        let speed = if self.is_hover_transition { INITIAL_HOVER_LERP } else { SNAP_LERP };
        let distance = self.mouse.distance(anchor);
        self.mouse = self.mouse.lerp(anchor, speed);
        if self.is_hover_transition && distance < HOVER_TRANSITION_THRESHOLD {
            self.is_hover_transition = false;
        }

        self.position = self.spring.update(self.mouse);
    }

    fn update_rotation(&mut self) {
        if self.state == CursorState::Free {
            self.rotation = (self.rotation + ROTATION_SPEED) % 360.0;
            self.target_rotation = self.rotation;
        } else {
            self.rotation = lerp(self.rotation, self.target_rotation, ROTATION_LERP);
        }
    }

    fn update_scale(&mut self) {
        let (box_target, dot_target) = if self.is_active { (BOX_CLICK_SCALE, DOT_CLICK_SCALE) } else { (1.0, 1.0) };
        self.box_scale = lerp(self.box_scale, box_target, SCALE_LERP);
        self.dot_scale = lerp(self.dot_scale, dot_target, SCALE_LERP);
    }

    // --- Queries ---

    /// Geometry for the renderer, with the box axes oriented by the
    /// quarter turn the rotation is heading for.
    #[must_use]
    pub fn draw_params(&self) -> DrawParams {
        let box_size =
            if is_closer_to_vertical(self.target_rotation) { self.cursor_size.transposed() } else { self.cursor_size };
        DrawParams {
            box_center: self.position,
            box_size,
            rotation: self.rotation,
            box_scale: self.box_scale,
            dot_center: self.actual_mouse,
            dot_scale: self.dot_scale,
        }
    }
}
