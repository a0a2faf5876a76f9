//! Animated bracket cursor for the portfolio site.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It draws a
//! rotating, bracket-cornered box and a dot onto a full-viewport canvas. The
//! box trails the pointer while free, wraps `data-cursor` elements on hover
//! (with a spring trailing the pointer's motion) and glides back when the
//! pointer leaves. All behavior lives in [`engine::EngineCore`], which has no
//! browser dependency and is driven from tests through [`dom::MemoryDom`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Cursor state record, hover state machine, per-frame update |
//! | [`input`] | Hover state enum, mouse buttons, enter/leave/navigation predicates |
//! | [`dom`] | Element lookups (`Dom` trait) and the headless `MemoryDom` |
//! | [`spring`] | Damped spring trailing the box behind its anchor |
//! | [`frame`] | Frame scheduling and the single-request render loop |
//! | [`render`] | Drawing the box and dot through a 2D `Surface` |
//! | [`browser`] | DOM/`requestAnimationFrame` host and the wasm entry point |
//! | [`geom`] | Points, rects, angle helpers |
//! | [`consts`] | Sizes, colors, lerp factors, thresholds |

pub mod browser;
pub mod consts;
pub mod dom;
pub mod engine;
pub mod frame;
pub mod geom;
pub mod input;
pub mod render;
pub mod spring;
