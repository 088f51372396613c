// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caption style state and the rendering seam.
//!
//! The controller never touches a UI toolkit directly. It keeps a
//! [`CaptionStyle`] value describing what the caption should look like and
//! hands it to a [`CaptionSurface`], which paints it (for example by
//! toggling CSS classes and inline styles on a DOM element).

use alloc::string::String;

use kurbo::{Point, Size};

use crate::classify::CaptionLayout;

/// Whether the caption takes part in the render tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    /// Painted and reachable by pointer and assistive technology.
    #[default]
    Visible,
    /// Removed from the render tree (`visibility: hidden`).
    Hidden,
}

/// Everything a surface needs to paint the caption.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptionStyle {
    /// Caption markup; empty when the slide has no caption.
    pub markup: String,
    /// Active layout style. At most one layout is active at a time.
    pub layout: Option<CaptionLayout>,
    /// Top-left offset in viewer coordinates; `None` lets the caption flow.
    pub position: Option<Point>,
    /// Fixed width; `None` lets the caption size to its content.
    pub width: Option<f64>,
    /// Set when `position.x` is within the horizontal edge threshold.
    pub on_horizontal_edge: bool,
    /// Faded-out styling (reduced opacity, non-interactive).
    pub faded: bool,
    /// Removed from the render tree after a fade-out completed.
    pub concealed: bool,
}

impl CaptionStyle {
    /// Effective visibility: hidden when concealed or when there is no markup.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        if self.concealed || self.markup.is_empty() {
            Visibility::Hidden
        } else {
            Visibility::Visible
        }
    }
}

/// The UI toolkit side of a caption.
///
/// A surface owns two elements: the live caption inside the viewer chrome and
/// an invisible clone used only for measuring.
pub trait CaptionSurface {
    /// Paints the live caption.
    fn paint(&mut self, caption: &CaptionStyle);

    /// Inserts the measurement clone.
    ///
    /// The clone must not affect layout of the live document: no visual
    /// footprint, hidden from assistive technology, not interactive. Called at
    /// most once per controller lifetime.
    fn create_probe(&mut self);

    /// Lays the measurement clone out as `probe` describes and returns its
    /// border-box size.
    fn measure_probe(&mut self, probe: &CaptionStyle) -> Size;

    /// Removes the live caption and the measurement clone.
    fn remove(&mut self) {}
}
