// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caption markup lookup for a slide.

use alloc::string::String;

use crate::config::ContentSource;
use crate::slide::Slide;
use crate::viewer::Viewer;

/// Looks up the caption markup of `slide`.
///
/// With [`ContentSource::Selector`] the designated sub-element wins, even
/// when it is empty; the image's `alt` text is only used when no such
/// element exists. An empty string means "no caption".
pub fn caption_markup<V: Viewer + ?Sized>(
    source: &ContentSource,
    viewer: &V,
    slide: &Slide,
) -> String {
    match source {
        ContentSource::Provider(provider) => provider(slide),
        ContentSource::Selector(selector) => viewer
            .query_markup(slide, selector)
            .or_else(|| viewer.image_alt(slide))
            .unwrap_or_default(),
    }
}
