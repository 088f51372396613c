// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.
//!
//! A [`CaptionConfig`] is built once through [`CaptionConfigBuilder`] and is
//! read-only afterwards. Out-of-range values never reach the layout code:
//! [`CaptionConfigBuilder::build`] replaces them with defaults (or clamps
//! them), and [`CaptionConfigBuilder::issues`] reports what was wrong for
//! hosts that want to surface it.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;

use crate::Slide;
use crate::log::log_warn;

/// Selector of the element holding caption markup inside a slide's source element.
pub const DEFAULT_CAPTION_SELECTOR: &str = ".pswp-caption-content";
/// Viewport width, in pixels, below which the mobile layout is used.
pub const DEFAULT_MOBILE_BREAKPOINT: f64 = 600.0;
/// Distance from the left edge, in pixels, at or below which the caption is "on edge".
pub const DEFAULT_HORIZONTAL_EDGE_THRESHOLD: f64 = 20.0;
/// Share of the pan-area width that may sit beside the image before mobile
/// captions are allowed to overlap it.
pub const DEFAULT_MOBILE_OVERLAP_RATIO: f64 = 0.3;
/// Delay before a faded caption is removed from the render tree.
pub const DEFAULT_FADE_OUT_DELAY_MS: u64 = 400;
/// Delay before the faded style is dropped from a re-shown caption.
pub const DEFAULT_FADE_IN_DELAY_MS: u64 = 50;

/// Requested caption placement on desktop-sized viewports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// Pick `aside` or `below` per slide from the image's aspect ratio.
    #[default]
    Auto,
    /// Always place the caption to the right of the image.
    Aside,
    /// Always place the caption under the image.
    Below,
}

/// Viewer state handed to a [`MobileBreakpoint::Predicate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportInfo {
    /// Current viewport size in pixels.
    pub size: Size,
}

/// Decides whether the mobile layout applies.
pub enum MobileBreakpoint {
    /// Mobile when the viewport is narrower than this many pixels.
    Width(f64),
    /// Mobile when the predicate returns `true`.
    ///
    /// Evaluated on every layout pass, so it may depend on state that changes
    /// at runtime (orientation, user preference).
    Predicate(Box<dyn Fn(&ViewportInfo) -> bool>),
}

impl MobileBreakpoint {
    /// Returns `true` when `viewport` should use the mobile layout.
    #[must_use]
    pub fn is_mobile(&self, viewport: &ViewportInfo) -> bool {
        match self {
            Self::Width(width) => viewport.size.width < *width,
            Self::Predicate(predicate) => predicate(viewport),
        }
    }
}

impl Default for MobileBreakpoint {
    fn default() -> Self {
        Self::Width(DEFAULT_MOBILE_BREAKPOINT)
    }
}

impl fmt::Debug for MobileBreakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width(width) => f.debug_tuple("Width").field(width).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Where caption markup comes from.
pub enum ContentSource {
    /// Look up the sub-element matching this selector in the slide's source
    /// element, falling back to the image's `alt` text.
    Selector(String),
    /// Ask the closure for the markup of a slide.
    Provider(Box<dyn Fn(&Slide) -> String>),
}

impl Default for ContentSource {
    fn default() -> Self {
        Self::Selector(String::from(DEFAULT_CAPTION_SELECTOR))
    }
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// A configuration value that was rejected and replaced while building.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigIssue {
    /// The mobile overlap ratio was outside `[0, 1]` (or not a number).
    OverlapRatioOutOfRange(f64),
    /// The horizontal edge threshold was negative (or not a number).
    NegativeEdgeThreshold(f64),
    /// A numeric mobile breakpoint was negative or not finite.
    InvalidBreakpoint(f64),
    /// The caption selector was empty.
    EmptySelector,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverlapRatioOutOfRange(v) => {
                write!(f, "mobile overlap ratio {v} is outside [0, 1]")
            }
            Self::NegativeEdgeThreshold(v) => {
                write!(f, "horizontal edge threshold {v} is negative")
            }
            Self::InvalidBreakpoint(v) => write!(f, "mobile breakpoint {v} is not a valid width"),
            Self::EmptySelector => f.write_str("caption selector is empty"),
        }
    }
}

impl core::error::Error for ConfigIssue {}

/// Read-only configuration of a [`crate::DynamicCaption`].
#[derive(Debug)]
pub struct CaptionConfig {
    content: ContentSource,
    mode: LayoutMode,
    mobile_breakpoint: MobileBreakpoint,
    horizontal_edge_threshold: f64,
    mobile_overlap_ratio: f64,
    vertically_center_image: bool,
    mobile_overlap_restore: bool,
    reset_padding_on_mobile: bool,
    fade_out_delay_ms: u64,
    fade_in_delay_ms: u64,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        CaptionConfigBuilder::new().build()
    }
}

impl CaptionConfig {
    /// Starts a builder with every option at its default.
    #[must_use]
    pub fn builder() -> CaptionConfigBuilder {
        CaptionConfigBuilder::new()
    }

    /// Caption markup source.
    #[must_use]
    pub fn content(&self) -> &ContentSource {
        &self.content
    }

    /// Requested desktop layout.
    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Mobile layout predicate.
    #[must_use]
    pub fn mobile_breakpoint(&self) -> &MobileBreakpoint {
        &self.mobile_breakpoint
    }

    /// Left offset at or below which the caption is flagged as on the edge.
    #[must_use]
    pub fn horizontal_edge_threshold(&self) -> f64 {
        self.horizontal_edge_threshold
    }

    /// Mobile overlap ratio, always in `[0, 1]`.
    #[must_use]
    pub fn mobile_overlap_ratio(&self) -> f64 {
        self.mobile_overlap_ratio
    }

    /// Whether image and `below` caption are centered as one block.
    #[must_use]
    pub fn vertically_center_image(&self) -> bool {
        self.vertically_center_image
    }

    /// Whether mobile reservations are undone when the image has enough
    /// horizontal slack for the caption to overlap it.
    #[must_use]
    pub fn mobile_overlap_restore(&self) -> bool {
        self.mobile_overlap_restore
    }

    /// Whether viewer padding is zeroed while the mobile layout is active.
    #[must_use]
    pub fn reset_padding_on_mobile(&self) -> bool {
        self.reset_padding_on_mobile
    }

    /// Milliseconds between fading a caption out and concealing it.
    #[must_use]
    pub fn fade_out_delay_ms(&self) -> u64 {
        self.fade_out_delay_ms
    }

    /// Milliseconds between re-showing a caption and dropping its faded style.
    #[must_use]
    pub fn fade_in_delay_ms(&self) -> u64 {
        self.fade_in_delay_ms
    }
}

/// Builder for [`CaptionConfig`].
///
/// ```rust
/// use understory_caption::{CaptionConfig, LayoutMode, MobileBreakpoint};
///
/// let config = CaptionConfig::builder()
///     .mode(LayoutMode::Below)
///     .mobile_breakpoint(MobileBreakpoint::Width(720.0))
///     .mobile_overlap_ratio(1.5)
///     .build();
///
/// assert_eq!(config.mode(), LayoutMode::Below);
/// // Out-of-range ratios are clamped.
/// assert_eq!(config.mobile_overlap_ratio(), 1.0);
/// ```
#[derive(Debug)]
pub struct CaptionConfigBuilder {
    config: CaptionConfig,
}

impl Default for CaptionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptionConfigBuilder {
    /// Creates a builder with every option at its default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CaptionConfig {
                content: ContentSource::default(),
                mode: LayoutMode::default(),
                mobile_breakpoint: MobileBreakpoint::default(),
                horizontal_edge_threshold: DEFAULT_HORIZONTAL_EDGE_THRESHOLD,
                mobile_overlap_ratio: DEFAULT_MOBILE_OVERLAP_RATIO,
                vertically_center_image: false,
                mobile_overlap_restore: true,
                reset_padding_on_mobile: false,
                fade_out_delay_ms: DEFAULT_FADE_OUT_DELAY_MS,
                fade_in_delay_ms: DEFAULT_FADE_IN_DELAY_MS,
            },
        }
    }

    /// Reads caption markup from the sub-element matching `selector`.
    #[must_use]
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.config.content = ContentSource::Selector(selector.into());
        self
    }

    /// Reads caption markup from a closure.
    #[must_use]
    pub fn provider(mut self, provider: impl Fn(&Slide) -> String + 'static) -> Self {
        self.config.content = ContentSource::Provider(Box::new(provider));
        self
    }

    /// Sets the desktop layout mode.
    #[must_use]
    pub fn mode(mut self, mode: LayoutMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Sets the mobile breakpoint.
    #[must_use]
    pub fn mobile_breakpoint(mut self, breakpoint: MobileBreakpoint) -> Self {
        self.config.mobile_breakpoint = breakpoint;
        self
    }

    /// Sets the horizontal edge threshold in pixels.
    #[must_use]
    pub fn horizontal_edge_threshold(mut self, threshold: f64) -> Self {
        self.config.horizontal_edge_threshold = threshold;
        self
    }

    /// Sets the mobile overlap ratio.
    #[must_use]
    pub fn mobile_overlap_ratio(mut self, ratio: f64) -> Self {
        self.config.mobile_overlap_ratio = ratio;
        self
    }

    /// Centers image and `below` caption as one block.
    #[must_use]
    pub fn vertically_center_image(mut self, enabled: bool) -> Self {
        self.config.vertically_center_image = enabled;
        self
    }

    /// Enables or disables mobile overlap restoration.
    #[must_use]
    pub fn mobile_overlap_restore(mut self, enabled: bool) -> Self {
        self.config.mobile_overlap_restore = enabled;
        self
    }

    /// Enables or disables zeroing the viewer padding on mobile.
    #[must_use]
    pub fn reset_padding_on_mobile(mut self, enabled: bool) -> Self {
        self.config.reset_padding_on_mobile = enabled;
        self
    }

    /// Sets the fade-out and fade-in delays in milliseconds.
    #[must_use]
    pub fn fade_delays(mut self, fade_out_ms: u64, fade_in_ms: u64) -> Self {
        self.config.fade_out_delay_ms = fade_out_ms;
        self.config.fade_in_delay_ms = fade_in_ms;
        self
    }

    /// Lists the values that [`CaptionConfigBuilder::build`] would replace.
    #[must_use]
    pub fn issues(&self) -> Vec<ConfigIssue> {
        let c = &self.config;
        let mut issues = Vec::new();
        if let ContentSource::Selector(selector) = &c.content
            && selector.trim().is_empty()
        {
            issues.push(ConfigIssue::EmptySelector);
        }
        if let MobileBreakpoint::Width(width) = c.mobile_breakpoint
            && (!width.is_finite() || width < 0.0)
        {
            issues.push(ConfigIssue::InvalidBreakpoint(width));
        }
        if c.horizontal_edge_threshold.is_nan() || c.horizontal_edge_threshold < 0.0 {
            issues.push(ConfigIssue::NegativeEdgeThreshold(
                c.horizontal_edge_threshold,
            ));
        }
        if !(0.0..=1.0).contains(&c.mobile_overlap_ratio) {
            issues.push(ConfigIssue::OverlapRatioOutOfRange(c.mobile_overlap_ratio));
        }
        issues
    }

    /// Finishes the configuration, replacing invalid values.
    #[must_use]
    pub fn build(self) -> CaptionConfig {
        let issues = self.issues();
        let mut config = self.config;
        for issue in issues {
            log_warn!(%issue, "replacing invalid caption option");
            match issue {
                ConfigIssue::EmptySelector => config.content = ContentSource::default(),
                ConfigIssue::InvalidBreakpoint(_) => {
                    config.mobile_breakpoint = MobileBreakpoint::default();
                }
                ConfigIssue::NegativeEdgeThreshold(_) => {
                    config.horizontal_edge_threshold = DEFAULT_HORIZONTAL_EDGE_THRESHOLD;
                }
                ConfigIssue::OverlapRatioOutOfRange(ratio) => {
                    config.mobile_overlap_ratio = if ratio.is_nan() {
                        DEFAULT_MOBILE_OVERLAP_RATIO
                    } else {
                        ratio.clamp(0.0, 1.0)
                    };
                }
            }
        }
        config
    }
}
