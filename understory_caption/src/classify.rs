// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout classification.

use crate::config::{CaptionConfig, LayoutMode, ViewportInfo};
use crate::log::trace;
use crate::slide::Slide;

/// Where a slide's caption is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaptionLayout {
    /// To the right of the image, top-aligned with it.
    Aside,
    /// Under the image, as wide as the image.
    Below,
    /// A full-width strip at the bottom of the viewer that may overlap the image.
    Mobile,
}

impl CaptionLayout {
    /// Short lowercase name, suitable as a style-class suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aside => "aside",
            Self::Below => "below",
            Self::Mobile => "mobile",
        }
    }
}

/// Returns `true` when the mobile layout applies to `viewport`.
///
/// Predicate breakpoints are evaluated on every call.
#[must_use]
pub fn is_mobile_layout(config: &CaptionConfig, viewport: &ViewportInfo) -> bool {
    config.mobile_breakpoint().is_mobile(viewport)
}

/// Chooses the caption layout for `slide`.
///
/// `slide.bounds` must describe the image centered at its initial zoom
/// inside the current pan area. The mobile breakpoint overrides the
/// configured mode; in [`LayoutMode::Auto`] the caption goes aside when the
/// image's centered left offset exceeds its top offset.
#[must_use]
pub fn classify(slide: &Slide, viewport: &ViewportInfo, config: &CaptionConfig) -> CaptionLayout {
    if is_mobile_layout(config, viewport) {
        return CaptionLayout::Mobile;
    }
    desktop_layout(slide, config.mode())
}

/// Desktop half of [`classify`], for callers that already evaluated the
/// mobile breakpoint.
pub(crate) fn desktop_layout(slide: &Slide, mode: LayoutMode) -> CaptionLayout {
    let layout = match mode {
        LayoutMode::Aside => CaptionLayout::Aside,
        LayoutMode::Below => CaptionLayout::Below,
        LayoutMode::Auto => {
            // Bounds are in viewer coordinates, padding included.
            let center = slide.bounds.center;
            if center.x > center.y {
                CaptionLayout::Aside
            } else {
                CaptionLayout::Below
            }
        }
    };
    trace!(index = slide.index, layout = layout.as_str(), "classified caption layout");
    layout
}
