// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-slide geometry shared between the viewer and the caption controller.
//!
//! The viewer owns every [`Slide`]; the controller borrows one mutably for
//! the duration of a single event and never retains it. [`ZoomLevels`] and
//! [`PanBounds`] are a reference fit-to-view model that viewers can use as is
//! or replace through [`crate::Viewer::recalculate_zoom_and_bounds`].

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size, Vec2};

use crate::CaptionLayout;

/// Widest image, in pixels, that the secondary zoom level is allowed to produce.
const MAX_SECONDARY_WIDTH: f64 = 4000.0;

/// Zoom factors derived from a natural content size and a pan area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLevels {
    /// Largest zoom (capped at `1.0`) at which the whole image fits.
    pub fit: f64,
    /// Smallest zoom (capped at `1.0`) at which the image covers the pan area.
    pub fill: f64,
    /// Zoom the slide opens at.
    pub initial: f64,
    /// Zoom used for "zoom in" gestures such as double-tap.
    pub secondary: f64,
    /// Upper bound for user zoom.
    pub max: f64,
    /// Lower bound for user zoom.
    pub min: f64,
}

impl Default for ZoomLevels {
    fn default() -> Self {
        Self {
            fit: 1.0,
            fill: 1.0,
            initial: 1.0,
            secondary: 1.0,
            max: 1.0,
            min: 1.0,
        }
    }
}

impl ZoomLevels {
    /// Computes zoom levels for content of `natural` size shown in `pan_area`.
    ///
    /// Degenerate sizes (zero, negative or non-finite) produce the default
    /// levels, all `1.0`.
    #[must_use]
    pub fn compute(natural: Size, pan_area: Size) -> Self {
        if !(natural.width > 0.0 && natural.height > 0.0)
            || !natural.is_finite()
            || !pan_area.is_finite()
        {
            return Self::default();
        }
        let h_ratio = pan_area.width.max(0.0) / natural.width;
        let v_ratio = pan_area.height.max(0.0) / natural.height;

        let fit = h_ratio.min(v_ratio).min(1.0);
        let fill = h_ratio.max(v_ratio).min(1.0);
        let initial = fit;

        let mut secondary = (fit * 3.0).min(1.0);
        if secondary * natural.width > MAX_SECONDARY_WIDTH {
            secondary = MAX_SECONDARY_WIDTH / natural.width;
        }

        let max = initial.max(secondary).max((fit * 4.0).max(1.0));
        let min = fit.min(initial).min(secondary);

        Self {
            fit,
            fill,
            initial,
            secondary,
            max,
            min,
        }
    }
}

/// Centering offset and pan limits of an image inside its pan area.
///
/// Offsets are in viewer coordinates: the pan-area origin (usually the
/// viewer's top/left padding) is already added in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanBounds {
    /// Top-left corner of the image when centered.
    pub center: Point,
    /// Smallest allowed top-left offset while panning.
    pub min: Point,
    /// Largest allowed top-left offset while panning.
    pub max: Point,
}

impl PanBounds {
    /// Recomputes the bounds for content of `natural` size at `zoom`.
    pub fn update(&mut self, natural: Size, pan_area: Size, origin: Vec2, zoom: f64) {
        let (cx, min_x, max_x) = axis(natural.width * zoom, pan_area.width, origin.x);
        let (cy, min_y, max_y) = axis(natural.height * zoom, pan_area.height, origin.y);
        self.center = Point::new(cx, cy);
        self.min = Point::new(min_x, min_y);
        self.max = Point::new(max_x, max_y);
    }

    /// Moves the centered position and both pan limits down by `dy`.
    pub fn shift_y(&mut self, dy: f64) {
        self.center.y += dy;
        self.min.y += dy;
        self.max.y += dy;
    }
}

fn axis(element: f64, pan_area: f64, origin: f64) -> (f64, f64, f64) {
    let center = ((pan_area - element) / 2.0).round() + origin;
    if element > pan_area {
        (center, (pan_area - element).round() + origin, origin)
    } else {
        (center, center, center)
    }
}

/// One media item as seen by the caption controller.
#[derive(Clone, Debug, PartialEq)]
pub struct Slide {
    /// Position of the slide in the viewer's data source.
    pub index: usize,
    /// Natural (unzoomed) content size.
    pub natural_size: Size,
    /// Space available to the image, excluding any reserved caption space.
    pub pan_area_size: Size,
    /// Offset of the pan area inside the viewer (top/left padding).
    pub pan_area_offset: Vec2,
    /// Zoom levels for the current pan area.
    pub zoom_levels: ZoomLevels,
    /// Zoom the user is currently looking at.
    pub current_zoom: f64,
    /// Centering bounds, usually at the initial zoom.
    pub bounds: PanBounds,
    /// Caption layout chosen for this slide; `None` when it has no caption.
    pub caption_layout: Option<CaptionLayout>,
    /// Pan area as it was after the last caption reservation.
    pub reserved_pan_area: Option<Size>,
    /// Vertical offset added to bounds at or below the initial zoom, used to
    /// center the image together with a caption under it.
    pub block_shift_y: f64,
}

impl Slide {
    /// Creates a slide fit into `pan_area_size` at its initial zoom.
    #[must_use]
    pub fn new(index: usize, natural_size: Size, pan_area_size: Size) -> Self {
        let mut slide = Self {
            index,
            natural_size,
            pan_area_size,
            pan_area_offset: Vec2::ZERO,
            zoom_levels: ZoomLevels::default(),
            current_zoom: 1.0,
            bounds: PanBounds::default(),
            caption_layout: None,
            reserved_pan_area: None,
            block_shift_y: 0.0,
        };
        slide.fit_to_pan_area();
        slide.current_zoom = slide.zoom_levels.initial;
        slide
    }

    /// Sets the pan-area origin offset, builder style.
    #[must_use]
    pub fn with_pan_area_offset(mut self, offset: Vec2) -> Self {
        self.pan_area_offset = offset;
        self.update_bounds(self.zoom_levels.initial);
        self
    }

    /// Recomputes zoom levels for the current pan area and centers at the
    /// initial zoom.
    pub fn fit_to_pan_area(&mut self) {
        self.zoom_levels = ZoomLevels::compute(self.natural_size, self.pan_area_size);
        self.update_bounds(self.zoom_levels.initial);
    }

    /// Recomputes [`Slide::bounds`] at `zoom`.
    ///
    /// At or below the initial zoom, [`Slide::block_shift_y`] is applied.
    pub fn update_bounds(&mut self, zoom: f64) {
        self.bounds.update(
            self.natural_size,
            self.pan_area_size,
            self.pan_area_offset,
            zoom,
        );
        if zoom <= self.zoom_levels.initial {
            self.bounds.shift_y(self.block_shift_y);
        }
    }

    /// Displayed image size at the initial zoom, rounded up to whole pixels.
    #[must_use]
    pub fn initial_image_size(&self) -> Size {
        let zoom = self.zoom_levels.initial;
        Size::new(
            (self.natural_size.width * zoom).ceil(),
            (self.natural_size.height * zoom).ceil(),
        )
    }

    /// Returns `true` when the user has zoomed past the fit-to-view level.
    #[must_use]
    pub fn is_zoomed_in(&self) -> bool {
        self.current_zoom > self.zoom_levels.initial
    }
}
