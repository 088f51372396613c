// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Off-screen caption measurement.

use kurbo::Size;

use crate::classify::CaptionLayout;
use crate::surface::{CaptionStyle, CaptionSurface};

/// Measures how much room caption markup needs.
///
/// The off-screen clone is created lazily on the first measurement and reused
/// afterwards.
#[derive(Clone, Debug, Default)]
pub struct MeasureProbe {
    created: bool,
    style: CaptionStyle,
}

impl MeasureProbe {
    /// Creates a probe; nothing is inserted into the surface yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once the clone exists on a surface.
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Measures `markup` under `layout` styling.
    ///
    /// `width` fixes the width (text wraps inside it); `None` lets the clone
    /// size to its content.
    pub fn measure<S: CaptionSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        markup: &str,
        width: Option<f64>,
        layout: CaptionLayout,
    ) -> Size {
        if !self.created {
            surface.create_probe();
            self.created = true;
        }
        self.style.markup.clear();
        self.style.markup.push_str(markup);
        self.style.layout = Some(layout);
        self.style.width = width;
        self.style.concealed = true;
        surface.measure_probe(&self.style)
    }

    /// Forgets the clone, for example after its surface was removed.
    pub fn reset(&mut self) {
        self.created = false;
        self.style = CaptionStyle::default();
    }
}
