//! Canvas measurement and screen-to-canvas mapping.
//!
//! # Responsibility
//! - Track the host container rectangle and the width used for layout.
//! - Signal when a resize requires re-synthesis.
//! - Map screen (client) coordinates into canvas space.
//!
//! # Invariants
//! - The layout width is always finite and positive; invalid measurements are
//!   ignored and the previous width is kept.
//! - Without a measured rectangle (or with zero width) the mapping is the
//!   identity, so drags still work before the first measurement.
//! - No zoom: the mapping is a pure translation.

use crate::model::geometry::Point;
use log::debug;

/// Container rectangle in screen coordinates, already scroll-adjusted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn is_measured(&self) -> bool {
        self.width.is_finite() && self.width > 0.0 && self.left.is_finite() && self.top.is_finite()
    }
}

/// Result of feeding one measurement to the sizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    /// Width changed; layouts must be recomputed.
    Resized { previous: f64, current: f64 },
    /// Same width (the offset may still have moved).
    Unchanged,
    /// Non-positive or non-finite width; previous width kept.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSizer {
    width: f64,
    rect: Option<ContainerRect>,
    generation: u64,
}

impl CanvasSizer {
    /// Starts with `initial_width` until the first valid measurement.
    pub fn new(initial_width: f64) -> Self {
        let width = if initial_width.is_finite() && initial_width > 0.0 {
            initial_width
        } else {
            1.0
        };
        Self {
            width,
            rect: None,
            generation: 0,
        }
    }

    /// Width used for waypoint synthesis.
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn rect(&self) -> Option<ContainerRect> {
        self.rect
    }

    /// Incremented on every accepted width change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Records a container measurement from the host resize observer.
    pub fn observe(&mut self, rect: ContainerRect) -> ResizeOutcome {
        self.rect = Some(rect);
        if !(rect.width.is_finite() && rect.width > 0.0) {
            debug!(
                "event=canvas_resize module=interaction status=ignored width={}",
                rect.width
            );
            return ResizeOutcome::Ignored;
        }
        if rect.width == self.width {
            return ResizeOutcome::Unchanged;
        }

        let previous = self.width;
        self.width = rect.width;
        self.generation += 1;
        debug!(
            "event=canvas_resize module=interaction status=ok previous={} current={} generation={}",
            previous, rect.width, self.generation
        );
        ResizeOutcome::Resized {
            previous,
            current: rect.width,
        }
    }

    /// Maps a screen point to canvas space.
    pub fn to_canvas(&self, screen: Point) -> Point {
        match self.rect {
            Some(rect) if rect.is_measured() => Point::new(screen.x - rect.left, screen.y - rect.top),
            _ => screen,
        }
    }
}
