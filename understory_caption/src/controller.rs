// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The caption controller: event wiring around the layout pieces.

use kurbo::{Insets, Vec2};

use crate::classify::{CaptionLayout, desktop_layout, is_mobile_layout};
use crate::config::{CaptionConfig, ViewportInfo};
use crate::content::caption_markup;
use crate::fade::{FadeAction, FadeController};
use crate::log::debug;
use crate::position::apply_position;
use crate::probe::MeasureProbe;
use crate::reserve::reserve;
use crate::slide::Slide;
use crate::surface::{CaptionStyle, CaptionSurface};
use crate::viewer::{CAPTION_ELEMENT, EventKinds, SubscriptionId, Viewer, ViewerEvent};

/// Caption placement and visibility controller for one viewer.
///
/// ## Lifecycle
///
/// 1. [`DynamicCaption::attach`] subscribes to the viewer's events.
/// 2. On [`ViewerEvent::UiRegister`] the controller registers its caption
///    element; the viewer hands the created element back through
///    [`DynamicCaption::element_created`].
/// 3. Every event is forwarded to [`DynamicCaption::handle_event`], and the
///    host calls [`DynamicCaption::tick`] when [`DynamicCaption::next_deadline`]
///    has passed.
/// 4. [`ViewerEvent::Close`] (or [`DynamicCaption::destroy`]) releases the
///    subscription, the elements, and any padding override.
///
/// Until the element exists, layout and visibility events are ignored.
#[derive(Debug)]
pub struct DynamicCaption<S> {
    config: CaptionConfig,
    subscription: Option<SubscriptionId>,
    surface: Option<S>,
    probe: MeasureProbe,
    caption: CaptionStyle,
    painted: Option<CaptionStyle>,
    fade: FadeController,
    saved_padding: Option<Insets>,
}

impl<S: CaptionSurface> DynamicCaption<S> {
    /// Creates a detached controller.
    #[must_use]
    pub fn new(config: CaptionConfig) -> Self {
        let fade = FadeController::from_config(&config);
        Self {
            config,
            subscription: None,
            surface: None,
            probe: MeasureProbe::new(),
            caption: CaptionStyle::default(),
            painted: None,
            fade,
            saved_padding: None,
        }
    }

    /// The controller's configuration.
    #[must_use]
    pub fn config(&self) -> &CaptionConfig {
        &self.config
    }

    /// Current caption style state.
    #[must_use]
    pub fn caption(&self) -> &CaptionStyle {
        &self.caption
    }

    /// The live caption surface, once the viewer created it.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Mutable access to the live caption surface.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Returns `true` between [`DynamicCaption::attach`] and teardown.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Returns `true` while the caption is faded out or fading out.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.fade.is_hidden()
    }

    /// Timestamp at which [`DynamicCaption::tick`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.fade.deadline()
    }

    /// Subscribes to `viewer`'s events. Attaching twice is a no-op.
    pub fn attach<V: Viewer + ?Sized>(&mut self, viewer: &mut V) {
        if self.subscription.is_none() {
            self.subscription = Some(viewer.subscribe(EventKinds::all()));
        }
    }

    /// Receives the caption element created for [`CAPTION_ELEMENT`].
    pub fn element_created(&mut self, surface: S) {
        self.surface = Some(surface);
        self.painted = None;
        self.repaint();
    }

    /// Reacts to one viewer event. `now` is the event time in milliseconds.
    pub fn handle_event<V: Viewer + ?Sized>(
        &mut self,
        viewer: &mut V,
        event: ViewerEvent<'_>,
        now: u64,
    ) {
        if self.subscription.is_none() {
            return;
        }
        match event {
            ViewerEvent::Init => {
                self.fade = FadeController::from_config(&self.config);
                self.caption = CaptionStyle::default();
                self.painted = None;
            }
            ViewerEvent::UiRegister => viewer.register_element(&CAPTION_ELEMENT),
            ViewerEvent::Change { slide } => self.on_change(viewer, slide, now),
            ViewerEvent::CalcSlideSize { slide, is_current } => {
                self.on_calc_slide_size(viewer, slide, is_current);
            }
            ViewerEvent::MoveMainScroll { shifted } => {
                self.on_move_main_scroll(viewer, shifted, now);
            }
            ViewerEvent::ZoomPanUpdate { slide } => {
                if slide.is_zoomed_in() {
                    self.hide_caption(now);
                } else {
                    self.show_caption(now);
                }
            }
            ViewerEvent::BeforeZoomTo { slide, dest_zoom } => {
                Self::on_before_zoom_to(viewer, slide, dest_zoom);
            }
            ViewerEvent::Close => self.destroy(viewer),
        }
    }

    /// Applies a due fade transition.
    pub fn tick(&mut self, now: u64) -> Option<FadeAction> {
        let action = self.fade.tick(&mut self.caption, now)?;
        self.repaint();
        Some(action)
    }

    /// Fades the caption out.
    pub fn hide_caption(&mut self, now: u64) {
        if self.surface.is_some() && self.fade.hide(&mut self.caption, now) {
            self.repaint();
        }
    }

    /// Fades the caption in.
    pub fn show_caption(&mut self, now: u64) {
        if self.surface.is_some() && self.fade.show(&mut self.caption, now) {
            self.repaint();
        }
    }

    /// Releases everything the controller holds on `viewer`.
    pub fn destroy<V: Viewer + ?Sized>(&mut self, viewer: &mut V) {
        if let Some(id) = self.subscription.take() {
            viewer.unsubscribe(id);
        }
        if let Some(padding) = self.saved_padding.take() {
            viewer.set_padding(padding);
        }
        if let Some(mut surface) = self.surface.take() {
            surface.remove();
        }
        self.fade = FadeController::from_config(&self.config);
        self.probe.reset();
        self.caption = CaptionStyle::default();
        self.painted = None;
        debug!("caption controller destroyed");
    }

    fn on_change<V: Viewer + ?Sized>(&mut self, viewer: &mut V, slide: &Slide, now: u64) {
        if self.surface.is_none() {
            return;
        }
        self.caption.markup = caption_markup(self.config.content(), &*viewer, slide);
        viewer.caption_updated();
        apply_position(
            slide,
            &mut self.caption,
            self.config.horizontal_edge_threshold(),
        );
        // The caption must be visible right after switching slides.
        self.fade.show(&mut self.caption, now);
        self.repaint();
    }

    fn on_calc_slide_size<V: Viewer + ?Sized>(
        &mut self,
        viewer: &mut V,
        slide: &mut Slide,
        is_current: bool,
    ) {
        let viewport = ViewportInfo {
            size: viewer.viewport_size(),
        };
        let mobile = is_mobile_layout(&self.config, &viewport);
        if self.config.reset_padding_on_mobile() {
            self.sync_padding(viewer, slide, mobile);
        }

        let initial = slide.zoom_levels.initial;
        slide.block_shift_y = 0.0;
        viewer.update_bounds(slide, initial);

        let markup = caption_markup(self.config.content(), &*viewer, slide);
        if markup.is_empty() {
            slide.caption_layout = None;
            return;
        }

        let layout = if mobile {
            CaptionLayout::Mobile
        } else {
            desktop_layout(slide, self.config.mode())
        };
        slide.caption_layout = Some(layout);

        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let probe = &mut self.probe;
        reserve(slide, layout, &self.config, &*viewer, |width| {
            probe.measure(surface, &markup, width, layout)
        });

        if is_current {
            apply_position(
                slide,
                &mut self.caption,
                self.config.horizontal_edge_threshold(),
            );
            self.repaint();
        }
    }

    fn on_move_main_scroll<V: Viewer + ?Sized>(&mut self, viewer: &V, shifted: bool, now: u64) {
        let viewport = ViewportInfo {
            size: viewer.viewport_size(),
        };
        // Mobile captions stay put while swiping between slides.
        if is_mobile_layout(&self.config, &viewport) {
            return;
        }
        if shifted {
            self.hide_caption(now);
        } else {
            self.show_caption(now);
        }
    }

    fn on_before_zoom_to<V: Viewer + ?Sized>(viewer: &V, slide: &mut Slide, dest_zoom: f64) {
        let Some(reserved) = slide.reserved_pan_area else {
            return;
        };
        let initial = slide.zoom_levels.initial;
        if dest_zoom > initial {
            slide.pan_area_size = viewer.full_pan_area();
        } else {
            slide.pan_area_size = reserved;
            viewer.update_bounds(slide, initial);
        }
    }

    /// Zeroes the viewer padding on mobile and restores it on desktop, then
    /// re-derives `slide`'s pan area if the padding in effect changed.
    fn sync_padding<V: Viewer + ?Sized>(&mut self, viewer: &mut V, slide: &mut Slide, mobile: bool) {
        if mobile {
            if self.saved_padding.is_none() {
                self.saved_padding = Some(viewer.padding());
                viewer.set_padding(Insets::ZERO);
                debug!("viewer padding disabled for mobile caption");
            }
        } else if let Some(padding) = self.saved_padding.take() {
            viewer.set_padding(padding);
            debug!("viewer padding restored");
        }

        let padding = viewer.padding();
        let pan_area = viewer.full_pan_area();
        let offset = Vec2::new(padding.x0, padding.y0);
        if slide.pan_area_size != pan_area || slide.pan_area_offset != offset {
            slide.pan_area_size = pan_area;
            slide.pan_area_offset = offset;
            viewer.recalculate_zoom_and_bounds(slide);
        }
    }

    fn repaint(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if self.painted.as_ref() != Some(&self.caption) {
            surface.paint(&self.caption);
            self.painted = Some(self.caption.clone());
        }
    }
}
