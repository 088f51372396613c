// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewer port: what the caption controller needs from its host.
//!
//! A host (a lightbox, an image viewer, a gallery) implements [`Viewer`] and
//! forwards its lifecycle events to [`crate::DynamicCaption::handle_event`]
//! as [`ViewerEvent`]s. Slides are lent to the controller inside the event
//! payload; the viewer itself is passed separately so that hosts can keep
//! their slide storage apart from the port object.

use alloc::string::String;

use bitflags::bitflags;
use kurbo::{Insets, Size};

use crate::slide::Slide;

bitflags! {
    /// Set of viewer events a controller listens to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventKinds: u16 {
        /// The viewer finished initializing.
        const INIT = 1 << 0;
        /// UI elements may be registered now.
        const UI_REGISTER = 1 << 1;
        /// The current slide changed.
        const CHANGE = 1 << 2;
        /// A slide's size is being (re)calculated.
        const CALC_SLIDE_SIZE = 1 << 3;
        /// The main (slide-to-slide) scroll moved.
        const MOVE_MAIN_SCROLL = 1 << 4;
        /// Zoom or pan of the current slide changed.
        const ZOOM_PAN_UPDATE = 1 << 5;
        /// A zoom animation is about to start.
        const BEFORE_ZOOM_TO = 1 << 6;
        /// The viewer is closing.
        const CLOSE = 1 << 7;
    }
}

/// Handle returned by [`Viewer::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Where a registered UI element is inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppendTarget {
    /// The viewer's root element.
    Root,
    /// The viewer's top bar.
    Bar,
    /// The viewer's scroll wrapper.
    Wrapper,
}

/// Description of a UI element the controller asks the viewer to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiElementSpec {
    /// Element name, also used for its class name.
    pub name: &'static str,
    /// Relative order among registered elements.
    pub order: u32,
    /// Whether the element is rendered as a button.
    pub is_button: bool,
    /// Where the element is inserted.
    pub append_to: AppendTarget,
}

/// The caption element registered by [`crate::DynamicCaption`].
pub const CAPTION_ELEMENT: UiElementSpec = UiElementSpec {
    name: "dynamic-caption",
    order: 9,
    is_button: false,
    append_to: AppendTarget::Root,
};

/// A viewer lifecycle event.
#[derive(Debug)]
pub enum ViewerEvent<'a> {
    /// The viewer finished initializing.
    Init,
    /// UI elements may be registered now.
    UiRegister,
    /// `slide` became the current slide.
    Change {
        /// The new current slide.
        slide: &'a Slide,
    },
    /// `slide`'s pan area was (re)computed from the viewport and may be
    /// adjusted in place.
    CalcSlideSize {
        /// The slide being laid out.
        slide: &'a mut Slide,
        /// Whether `slide` is the current slide.
        is_current: bool,
    },
    /// The main scroll moved.
    MoveMainScroll {
        /// Whether the scroll is shifted away from its rest position (a drag
        /// between slides is in progress).
        shifted: bool,
    },
    /// Zoom or pan of the current slide changed.
    ZoomPanUpdate {
        /// The current slide with its up-to-date `current_zoom`.
        slide: &'a Slide,
    },
    /// A zoom animation towards `dest_zoom` is about to start.
    BeforeZoomTo {
        /// The current slide.
        slide: &'a mut Slide,
        /// Zoom level the animation ends at.
        dest_zoom: f64,
    },
    /// The viewer is closing.
    Close,
}

impl ViewerEvent<'_> {
    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKinds {
        match self {
            Self::Init => EventKinds::INIT,
            Self::UiRegister => EventKinds::UI_REGISTER,
            Self::Change { .. } => EventKinds::CHANGE,
            Self::CalcSlideSize { .. } => EventKinds::CALC_SLIDE_SIZE,
            Self::MoveMainScroll { .. } => EventKinds::MOVE_MAIN_SCROLL,
            Self::ZoomPanUpdate { .. } => EventKinds::ZOOM_PAN_UPDATE,
            Self::BeforeZoomTo { .. } => EventKinds::BEFORE_ZOOM_TO,
            Self::Close => EventKinds::CLOSE,
        }
    }
}

/// Capabilities the caption controller consumes from its host viewer.
pub trait Viewer {
    /// Current viewport size.
    fn viewport_size(&self) -> Size;

    /// Current padding around the pan area.
    fn padding(&self) -> Insets;

    /// Replaces the padding around the pan area.
    fn set_padding(&mut self, padding: Insets);

    /// Starts delivering `events` to the controller.
    fn subscribe(&mut self, events: EventKinds) -> SubscriptionId;

    /// Stops delivering events for `id`.
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Asks the viewer to create a UI element.
    ///
    /// The viewer hands the created element back through
    /// [`crate::DynamicCaption::element_created`].
    fn register_element(&mut self, spec: &UiElementSpec);

    /// Inner markup of the element matching `selector` inside `slide`'s
    /// source element, if both exist.
    fn query_markup(&self, slide: &Slide, selector: &str) -> Option<String>;

    /// `alt` text of the image inside `slide`'s source element.
    fn image_alt(&self, slide: &Slide) -> Option<String>;

    /// Recomputes zoom levels and bounds after `slide.pan_area_size` changed.
    fn recalculate_zoom_and_bounds(&self, slide: &mut Slide) {
        slide.fit_to_pan_area();
    }

    /// Recomputes `slide.bounds` at `zoom`.
    ///
    /// Overrides should add [`Slide::block_shift_y`] to the vertical bounds
    /// at or below the initial zoom, as [`Slide::update_bounds`] does.
    fn update_bounds(&self, slide: &mut Slide, zoom: f64) {
        slide.update_bounds(zoom);
    }

    /// Called after the live caption's markup changed.
    fn caption_updated(&mut self) {}

    /// Pan area available with no caption reserved: viewport minus padding.
    fn full_pan_area(&self) -> Size {
        let viewport = self.viewport_size();
        let padding = self.padding();
        Size::new(
            viewport.width - padding.x_value(),
            viewport.height - padding.y_value(),
        )
    }
}
