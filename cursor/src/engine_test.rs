#![allow(clippy::float_cmp)]

use super::*;
use crate::dom::{MemoryDom, NodeId};

// =============================================================
// Helpers
// =============================================================

/// A 100x40 tagged element at (200, 100) with one child, plus an untagged sibling.
struct Page {
    dom: MemoryDom,
    button: NodeId,
    label: NodeId,
    outside: NodeId,
}

fn page() -> Page {
    let mut dom = MemoryDom::new();
    let button = dom.append_tagged(dom.root(), Rect::new(200.0, 100.0, 100.0, 40.0));
    let label = dom.append(button);
    let outside = dom.append(dom.root());
    Page { dom, button, label, outside }
}

fn run_frames(core: &mut EngineCore<NodeId>, dom: &MemoryDom, n: usize) {
    for _ in 0..n {
        core.tick(dom);
    }
}

fn hovered_core(p: &Page) -> EngineCore<NodeId> {
    let mut core = EngineCore::new();
    core.on_pointer_move(Point::new(210.0, 110.0));
    assert!(core.on_pointer_over(&p.dom, &p.label, 0.0));
    core
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn new_core_is_free_with_base_size() {
    let core: EngineCore<NodeId> = EngineCore::new();
    assert_eq!(core.state, CursorState::Free);
    assert_eq!(core.cursor_size, Size::square(BASE_SIZE));
    assert_eq!(core.box_scale, 1.0);
    assert_eq!(core.dot_scale, 1.0);
    assert!(core.hovered.is_none());
}

// =============================================================
// Pointer motion
// =============================================================

#[test]
fn free_pointer_move_tracks_pointer() {
    let p = page();
    let mut core = EngineCore::new();
    core.on_pointer_move(Point::new(40.0, 60.0));
    core.tick(&p.dom);
    assert_eq!(core.mouse, Point::new(40.0, 60.0));
    assert_eq!(core.position, Point::new(40.0, 60.0));
    assert_eq!(core.actual_mouse, Point::new(40.0, 60.0));
}

#[test]
fn first_move_injects_no_velocity() {
    let p = page();
    let mut core = hovered_core(&p);
    core.spring.reset();
    // Already seen a pointer; a move while hovering kicks the spring.
    core.on_pointer_move(Point::new(230.0, 110.0));
    assert!(core.spring.velocity.x > 0.0);

    let mut fresh: EngineCore<NodeId> = EngineCore::new();
    fresh.on_pointer_move(Point::new(500.0, 500.0));
    assert_eq!(fresh.prev_mouse, Point::new(500.0, 500.0));
    assert_eq!(fresh.spring, Spring::default());
}

// =============================================================
// Enter / leave
// =============================================================

#[test]
fn enter_tagged_element_starts_hovering() {
    let p = page();
    let core = hovered_core(&p);
    assert_eq!(core.state, CursorState::Hovering);
    assert_eq!(core.hovered, Some(p.button));
    assert_eq!(core.hovered_rect, Some(Rect::new(200.0, 100.0, 100.0, 40.0)));
    assert_eq!(core.target_anchor, Some(Point::new(250.0, 120.0)));
    assert!(core.is_hover_transition);
}

#[test]
fn enter_untagged_element_stays_free() {
    let p = page();
    let mut core = EngineCore::new();
    assert!(!core.on_pointer_over(&p.dom, &p.outside, 0.0));
    assert_eq!(core.state, CursorState::Free);
}

#[test]
fn reenter_same_element_is_ignored() {
    let p = page();
    let mut core = hovered_core(&p);
    run_frames(&mut core, &p.dom, 3);
    let before = core.clone();
    assert!(!core.on_pointer_over(&p.dom, &p.button, 10.0));
    assert_eq!(core.state, before.state);
    assert_eq!(core.is_hover_transition, before.is_hover_transition);
}

#[test]
fn enter_snaps_rotation_target() {
    let p = page();
    let mut core = EngineCore::new();
    core.rotation = 100.0;
    assert!(core.on_pointer_over(&p.dom, &p.label, 0.0));
    assert_eq!(core.target_rotation, 90.0);
}

#[test]
fn hop_between_elements_dampens_spring() {
    let mut p = page();
    let other = p.dom.append_tagged(p.dom.root(), Rect::new(400.0, 100.0, 50.0, 50.0));
    let mut core = hovered_core(&p);
    core.spring.offset = Point::new(10.0, 10.0);
    core.spring.velocity = Point::new(5.0, 5.0);

    assert!(core.on_pointer_over(&p.dom, &other, 0.0));
    assert_eq!(core.hovered, Some(other));
    assert!((core.spring.offset.x - 10.0 * SPRING_RESET_ON_HOVER).abs() < 1e-12);
    assert!((core.spring.velocity.x - 5.0 * SPRING_RESET_ON_HOVER).abs() < 1e-12);
}

#[test]
fn enter_from_free_resets_spring() {
    let p = page();
    let mut core = EngineCore::new();
    core.spring.offset = Point::new(10.0, 10.0);
    assert!(core.on_pointer_over(&p.dom, &p.label, 0.0));
    assert_eq!(core.spring, Spring::default());
}

#[test]
fn moving_between_children_does_not_leave() {
    let mut p = page();
    let sibling = p.dom.append(p.button);
    let mut core = hovered_core(&p);
    assert!(!core.on_pointer_out(&p.dom, &p.label, Some(&sibling)));
    assert_eq!(core.state, CursorState::Hovering);
}

#[test]
fn leaving_to_outside_releases() {
    let p = page();
    let mut core = hovered_core(&p);
    assert!(core.on_pointer_out(&p.dom, &p.label, Some(&p.outside)));
    assert_eq!(core.state, CursorState::Releasing);
    assert!(core.hovered.is_none());
    assert!(core.hovered_rect.is_none());
    assert!(core.target_anchor.is_none());
    assert_eq!(core.spring, Spring::default());
}

#[test]
fn release_can_reenter_before_converging() {
    let mut p = page();
    let other = p.dom.append_tagged(p.dom.root(), Rect::new(600.0, 100.0, 20.0, 20.0));
    let mut core = hovered_core(&p);
    assert!(core.on_pointer_out(&p.dom, &p.label, Some(&p.outside)));
    core.tick(&p.dom);
    assert_eq!(core.state, CursorState::Releasing);
    assert!(core.on_pointer_over(&p.dom, &other, 0.0));
    assert_eq!(core.state, CursorState::Hovering);
}

#[test]
fn detached_hover_target_releases_on_next_frame() {
    let mut p = page();
    let mut core = hovered_core(&p);
    p.dom.detach(p.button);
    core.tick(&p.dom);
    assert_eq!(core.state, CursorState::Releasing);
    assert!(core.hovered.is_none());
}

#[test]
fn hovered_rect_follows_layout_changes() {
    let mut p = page();
    let mut core = hovered_core(&p);
    p.dom.set_rect(p.button, Rect::new(0.0, 0.0, 20.0, 20.0));
    core.tick(&p.dom);
    assert_eq!(core.hovered_rect, Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
    assert_eq!(core.target_anchor, Some(Point::new(10.0, 10.0)));
}

// =============================================================
// End-to-end frame behavior
// =============================================================

#[test]
fn size_trends_toward_hovered_bounds() {
    let p = page();
    let mut core = hovered_core(&p);
    let target = Size::new(100.0 + PADDING, 40.0 + PADDING);

    let mut last = core.cursor_size;
    for _ in 0..5 {
        core.tick(&p.dom);
        assert!(core.cursor_size.width > last.width, "width should grow toward {}", target.width);
        assert!(core.cursor_size.height < last.height, "height should shrink toward {}", target.height);
        last = core.cursor_size;
    }
    assert!((core.cursor_size.width - target.width).abs() < (BASE_SIZE - target.width).abs());
    assert!((core.cursor_size.height - target.height).abs() < (BASE_SIZE - target.height).abs());

    run_frames(&mut core, &p.dom, 100);
    assert!((core.cursor_size.width - target.width).abs() < 0.01);
    assert!((core.cursor_size.height - target.height).abs() < 0.01);
}

#[test]
fn hover_anchor_converges_on_element_center() {
    let p = page();
    let mut core = hovered_core(&p);
    run_frames(&mut core, &p.dom, 100);
    assert!(!core.is_hover_transition);
    assert!(core.position.distance(Point::new(250.0, 120.0)) < 0.01);
}

#[test]
fn leaving_returns_to_free_at_pointer() {
    let p = page();
    let mut core = hovered_core(&p);
    run_frames(&mut core, &p.dom, 10);

    core.on_pointer_move(Point::new(500.0, 500.0));
    assert!(core.on_pointer_out(&p.dom, &p.label, Some(&p.outside)));

    let mut frames = 0;
    while core.state != CursorState::Free && frames < 500 {
        core.tick(&p.dom);
        frames += 1;
    }
    assert_eq!(core.state, CursorState::Free, "release never converged");
    assert!(frames > 1);
    assert_eq!(core.position, Point::new(500.0, 500.0));

    core.tick(&p.dom);
    assert_eq!(core.position, core.actual_mouse);
}

#[test]
fn size_returns_to_base_after_release() {
    let p = page();
    let mut core = hovered_core(&p);
    run_frames(&mut core, &p.dom, 30);
    core.on_pointer_out(&p.dom, &p.label, Some(&p.outside));
    run_frames(&mut core, &p.dom, 150);
    assert!((core.cursor_size.width - BASE_SIZE).abs() < 0.01);
    assert!((core.cursor_size.height - BASE_SIZE).abs() < 0.01);
}

#[test]
fn free_state_spins_continuously() {
    let p = page();
    let mut core: EngineCore<NodeId> = EngineCore::new();
    run_frames(&mut core, &p.dom, 4);
    assert!((core.rotation - 4.0 * ROTATION_SPEED).abs() < 1e-9);
    assert_eq!(core.rotation, core.target_rotation);
}

#[test]
fn free_rotation_wraps_at_full_turn() {
    let p = page();
    let mut core: EngineCore<NodeId> = EngineCore::new();
    core.rotation = 359.9;
    core.tick(&p.dom);
    assert!(core.rotation < 1.0);
}

#[test]
fn hover_rotation_settles_on_right_angle() {
    let p = page();
    let mut core = EngineCore::new();
    core.rotation = 80.0;
    core.on_pointer_over(&p.dom, &p.label, 0.0);
    run_frames(&mut core, &p.dom, 120);
    assert!((core.rotation - 90.0).abs() < 0.01);
}

#[test]
fn click_scale_eases_toward_pressed_and_back() {
    let p = page();
    let mut core: EngineCore<NodeId> = EngineCore::new();
    core.on_pointer_down(Button::Primary);
    core.tick(&p.dom);
    assert!(core.box_scale < 1.0 && core.box_scale > BOX_CLICK_SCALE);
    assert!(core.dot_scale < 1.0 && core.dot_scale > DOT_CLICK_SCALE);

    run_frames(&mut core, &p.dom, 300);
    assert!((core.box_scale - BOX_CLICK_SCALE).abs() < 0.001);
    assert!((core.dot_scale - DOT_CLICK_SCALE).abs() < 0.001);

    core.on_pointer_up(Button::Primary);
    run_frames(&mut core, &p.dom, 300);
    assert!((core.box_scale - 1.0).abs() < 0.001);
}

#[test]
fn secondary_button_does_not_press() {
    let mut core: EngineCore<NodeId> = EngineCore::new();
    core.on_pointer_down(Button::Secondary);
    assert!(!core.is_active);
}

// =============================================================
// Navigation guard
// =============================================================

#[test]
fn navigation_click_releases_and_arms_guard() {
    let mut p = page();
    let link = p.dom.append_link(p.button, "/about");
    let mut core = hovered_core(&p);

    assert!(core.on_navigation_click(&p.dom, &link, "/", 1000.0));
    assert_eq!(core.state, CursorState::Releasing);
    assert!(core.navigation_guard_active(1000.0));
    assert!(core.navigation_guard_active(1000.0 + NAVIGATION_GUARD_MS - 1.0));
    assert!(!core.navigation_guard_active(1000.0 + NAVIGATION_GUARD_MS));
}

#[test]
fn navigation_guard_blocks_enter_until_expiry() {
    let mut p = page();
    let link = p.dom.append_link(p.button, "/about");
    let mut core = hovered_core(&p);
    core.on_navigation_click(&p.dom, &link, "/", 1000.0);

    assert!(!core.on_pointer_over(&p.dom, &p.label, 1100.0));
    assert_eq!(core.state, CursorState::Releasing);

    assert!(core.on_pointer_over(&p.dom, &p.label, 1000.0 + NAVIGATION_GUARD_MS));
    assert_eq!(core.state, CursorState::Hovering);
}

#[test]
fn click_on_current_route_keeps_hover() {
    let mut p = page();
    let link = p.dom.append_link(p.button, "/about");
    let mut core = hovered_core(&p);

    assert!(!core.on_navigation_click(&p.dom, &link, "/about", 1000.0));
    assert_eq!(core.state, CursorState::Hovering);
    assert!(core.navigation_guard_until.is_none());
}

// =============================================================
// Draw params
// =============================================================

#[test]
fn draw_params_swap_axes_near_quarter_turn() {
    let p = page();
    let mut core = EngineCore::new();
    core.rotation = 85.0;
    core.on_pointer_over(&p.dom, &p.label, 0.0);
    core.cursor_size = Size::new(104.0, 44.0);

    let params = core.draw_params();
    assert_eq!(params.box_size, Size::new(44.0, 104.0));
}

#[test]
fn draw_params_dot_follows_raw_pointer() {
    let p = page();
    let mut core = hovered_core(&p);
    core.on_pointer_move(Point::new(260.0, 130.0));
    core.tick(&p.dom);
    let params = core.draw_params();
    assert_eq!(params.dot_center, Point::new(260.0, 130.0));
    assert_eq!(params.box_center, core.position);
}
