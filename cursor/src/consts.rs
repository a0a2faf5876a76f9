//! Shared numeric constants for the cursor crate.

// ── Sizing ──────────────────────────────────────────────────────

/// Edge length of the bracket box when nothing is hovered, in CSS pixels.
pub const BASE_SIZE: f64 = 48.0;

/// Extra width and height added around a hovered element's bounds.
pub const PADDING: f64 = 4.0;

/// Diameter of the pointer dot.
pub const DOT_SIZE: f64 = 6.0;

/// Stroke width of the bracket corners.
pub const BORDER_WIDTH: f64 = 3.0;

/// Length of each bracket arm along an edge.
pub const CORNER_GAP: f64 = 12.0;

// ── Colors ──────────────────────────────────────────────────────

pub const BORDER_COLOR: &str = "#f8b4b9";
pub const DOT_COLOR: &str = "#f8b4b9";

// ── Interpolation ───────────────────────────────────────────────

/// Per-frame lerp factor for box size and for the release glide.
pub const LERP: f64 = 0.15;

/// Free-state spin, in degrees per frame.
pub const ROTATION_SPEED: f64 = 0.25;

/// Per-frame lerp factor toward the snapped rotation target.
pub const ROTATION_LERP: f64 = 0.18;

/// Per-frame lerp factor for click feedback scales.
pub const SCALE_LERP: f64 = 0.06;

/// Anchor follow factor once the hover transition has settled.
pub const SNAP_LERP: f64 = 0.9;

/// Anchor follow factor while travelling to a freshly entered element.
pub const INITIAL_HOVER_LERP: f64 = 0.15;

// ── Spring ──────────────────────────────────────────────────────

/// Restoring force per unit of offset.
pub const SPRING_STRENGTH: f64 = 0.075;

/// Velocity retained per tick. Must stay below 1 for the integrator to settle.
pub const SPRING_DAMPING: f64 = 0.55;

/// Fraction of raw pointer displacement injected as spring velocity.
pub const VELOCITY_INFLUENCE: f64 = 0.7;

/// Energy retained when hopping directly between two hovered elements.
pub const SPRING_RESET_ON_HOVER: f64 = 0.2;

// ── Click feedback ──────────────────────────────────────────────

pub const BOX_CLICK_SCALE: f64 = 0.85;
pub const DOT_CLICK_SCALE: f64 = 0.55;

// ── Thresholds ──────────────────────────────────────────────────

/// Anchor distance below which a hover transition counts as settled.
pub const HOVER_TRANSITION_THRESHOLD: f64 = 2.0;

/// Distance to the raw pointer below which a release completes.
pub const RELEASE_THRESHOLD: f64 = 0.5;

// ── Navigation ──────────────────────────────────────────────────

/// How long enter events are ignored after an in-app navigation click.
/// Matches the page transition duration (0.24 s).
pub const NAVIGATION_GUARD_MS: f64 = 240.0;

/// Attribute selector marking elements that the cursor latches onto.
pub const TAG_SELECTOR: &str = "[data-cursor]";
