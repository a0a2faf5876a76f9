//! Rendering: draws the bracket box and the pointer dot.
//!
//! Drawing goes through [`Surface`], the subset of the Canvas 2D API the
//! cursor uses. [`web_sys::CanvasRenderingContext2d`] implements it for the
//! browser. The renderer reads [`DrawParams`] and never mutates engine state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{BORDER_COLOR, BORDER_WIDTH, CORNER_GAP, DOT_COLOR, DOT_SIZE};
use crate::engine::DrawParams;
use crate::geom::Size;

/// The 2D drawing operations the cursor needs.
pub trait Surface {
    type Error;

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;
    fn scale(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;
    fn rotate(&mut self, radians: f64) -> Result<(), Self::Error>;
    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Self::Error>;
    fn stroke(&mut self);
    fn fill(&mut self);
}

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::translate(self, x, y)
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::scale(self, x, y)
    }

    fn rotate(&mut self, radians: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::rotate(self, radians)
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::arc(self, x, y, radius, start, end)
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }
}

/// Clear the viewport and draw the box and dot.
///
/// # Errors
///
/// Returns `Err` if any fallible surface call fails.
pub fn draw<S: Surface>(surface: &mut S, params: &DrawParams, viewport: Size) -> Result<(), S::Error> {
    surface.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    draw_box(surface, params)?;
    draw_dot(surface, params)
}

/// Four L-shaped corner brackets around the box, rotated about its center.
fn draw_box<S: Surface>(surface: &mut S, params: &DrawParams) -> Result<(), S::Error> {
    let Size { width: w, height: h } = params.box_size;

    surface.save();
    surface.translate(params.box_center.x, params.box_center.y)?;
    surface.scale(params.box_scale, params.box_scale)?;
    surface.rotate(params.rotation.to_radians())?;
    surface.translate(-w / 2.0, -h / 2.0)?;

    surface.set_stroke_style(BORDER_COLOR);
    surface.set_line_width(BORDER_WIDTH);
    surface.begin_path();

    let gx = CORNER_GAP.min(w);
    let gy = CORNER_GAP.min(h);
    let rx = (w - CORNER_GAP).max(0.0);
    let by = (h - CORNER_GAP).max(0.0);

    // Top-left
    segment(surface, 0.0, 0.0, gx, 0.0);
    segment(surface, 0.0, 0.0, 0.0, gy);
    // Top-right
    segment(surface, rx, 0.0, w, 0.0);
    segment(surface, w, 0.0, w, gy);
    // Bottom-left
    segment(surface, 0.0, by, 0.0, h);
    segment(surface, 0.0, h, gx, h);
    // Bottom-right
    segment(surface, rx, h, w, h);
    segment(surface, w, by, w, h);

    surface.stroke();
    surface.restore();
    Ok(())
}

fn segment<S: Surface>(surface: &mut S, x0: f64, y0: f64, x1: f64, y1: f64) {
    surface.move_to(x0, y0);
    surface.line_to(x1, y1);
}

fn draw_dot<S: Surface>(surface: &mut S, params: &DrawParams) -> Result<(), S::Error> {
    surface.save();
    surface.translate(params.dot_center.x, params.dot_center.y)?;
    surface.scale(params.dot_scale, params.dot_scale)?;
    surface.set_fill_style(DOT_COLOR);
    surface.begin_path();
    surface.arc(0.0, 0.0, DOT_SIZE / 2.0, 0.0, PI * 2.0)?;
    surface.fill();
    surface.restore();
    Ok(())
}
