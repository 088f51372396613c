// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_caption --heading-base-level=0

//! Understory Caption: caption placement for media viewers.
//!
//! This crate decides where the caption of a lightbox-style media viewer goes
//! and how much room the image should give up for it. For each slide it:
//! - Classifies the layout as **aside** (right of the image), **below**
//!   (under the image) or **mobile** (a bottom strip that may overlap).
//! - Measures the caption through an invisible probe element.
//! - Shrinks the slide's pan area just enough for image and caption not to
//!   collide, and asks the viewer to refit the image.
//! - Places the caption against the refit image.
//! - Fades the caption out while the user drags between slides or zooms in.
//!
//! It does **not** own a viewer, a zoom engine or a UI toolkit. Hosts
//! implement two small traits:
//! - [`Viewer`]: viewport, padding, event subscription, content lookup, and
//!   (optionally) zoom/bounds recomputation.
//! - [`CaptionSurface`]: paints a [`CaptionStyle`] and measures a probe.
//!
//! and forward their lifecycle events to [`DynamicCaption::handle_event`].
//! Time is passed in explicitly as millisecond timestamps, so the controller
//! is deterministic under test.
//!
//! ## Minimal example
//!
//! The layout pieces can also be used on their own:
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_caption::{
//!     CaptionConfig, CaptionLayout, CaptionStyle, Slide, ViewportInfo, apply_position, classify,
//! };
//!
//! let config = CaptionConfig::default();
//! let viewport = ViewportInfo { size: Size::new(1200.0, 800.0) };
//!
//! // A portrait image leaves more room at its sides than above it.
//! let mut slide = Slide::new(0, Size::new(600.0, 800.0), Size::new(1200.0, 800.0));
//! let layout = classify(&slide, &viewport, &config);
//! assert_eq!(layout, CaptionLayout::Aside);
//!
//! slide.caption_layout = Some(layout);
//! let mut caption = CaptionStyle::default();
//! apply_position(&slide, &mut caption, config.horizontal_edge_threshold());
//! assert_eq!(caption.position, Some(Point::new(900.0, 0.0)));
//! ```
//!
//! ## Zoom transitions
//!
//! After every layout pass the reserved pan area is stored on the slide
//! ([`Slide::reserved_pan_area`]). Zooming past the initial level swaps the
//! full viewport back in so deep zoom can use all of it; zooming back out
//! restores the stored size exactly.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: `no_std` float math through `kurbo/libm`.
//! - `tracing`: structured `tracing` events for layout decisions, padding
//!   overrides and fade transitions.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod classify;
mod config;
mod content;
mod controller;
mod fade;
mod log;
mod position;
mod probe;
mod reserve;
mod slide;
mod surface;
mod viewer;

pub use classify::{CaptionLayout, classify, is_mobile_layout};
pub use config::{
    CaptionConfig, CaptionConfigBuilder, ConfigIssue, ContentSource, DEFAULT_CAPTION_SELECTOR,
    DEFAULT_FADE_IN_DELAY_MS, DEFAULT_FADE_OUT_DELAY_MS, DEFAULT_HORIZONTAL_EDGE_THRESHOLD,
    DEFAULT_MOBILE_BREAKPOINT, DEFAULT_MOBILE_OVERLAP_RATIO, LayoutMode, MobileBreakpoint,
    ViewportInfo,
};
pub use content::caption_markup;
pub use controller::DynamicCaption;
pub use fade::{FadeAction, FadeController};
pub use position::apply_position;
pub use probe::MeasureProbe;
pub use reserve::{Reservation, reserve};
pub use slide::{PanBounds, Slide, ZoomLevels};
pub use surface::{CaptionStyle, CaptionSurface, Visibility};
pub use viewer::{
    AppendTarget, CAPTION_ELEMENT, EventKinds, SubscriptionId, UiElementSpec, Viewer, ViewerEvent,
};
