// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport reservation: shrinking a slide's pan area so that its image and
//! caption do not collide.
//!
//! ## Algorithm
//!
//! Leftovers compare the pan-area size with the far edge of the image
//! centered at its initial zoom. The image offset is taken from
//! [`Slide::bounds`] as is, in viewer coordinates with the padding included.
//!
//! - **Aside**: the caption is measured at its natural width. If the space
//!   right of the image is not strictly larger than the caption, the pan area
//!   loses the caption's width and the image is refit.
//! - **Below**: the caption is measured at the image's width. If the space
//!   under the image is not strictly larger than the caption, the pan area
//!   loses the caption's height and the image is refit.
//! - **Mobile**: the caption is measured at the viewport width and always
//!   reserves its height. When overlap restoration is enabled and the refit
//!   image still has more than `pan_width * overlap_ratio / 2` of horizontal
//!   margin, the reservation is undone and the caption overlaps the image.
//!
//! With vertical centering, a below caption and its image are centered as one
//! block; the resulting offset is kept in [`Slide::block_shift_y`] so that
//! bounds recomputed at the initial zoom keep it.
//!
//! Whatever the outcome, the resulting pan area is recorded in
//! [`Slide::reserved_pan_area`] so that zoom transitions can return to it.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Size;

use crate::classify::CaptionLayout;
use crate::config::CaptionConfig;
use crate::log::debug;
use crate::slide::Slide;
use crate::viewer::Viewer;

/// Outcome of a [`reserve`] pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reservation {
    /// Layout the reservation was made for.
    pub layout: CaptionLayout,
    /// Measured caption size.
    pub caption_size: Size,
    /// Pan area before the pass.
    pub original_pan_area: Size,
    /// `true` when the pan area was shrunk and kept that way.
    pub shrunk: bool,
    /// `true` when a mobile reservation was undone to let the caption overlap.
    pub overlap_restored: bool,
}

/// Reserves room for a caption of `layout` inside `slide`'s pan area.
///
/// `measure` lays the caption out under an optional width constraint and
/// returns its size. Zoom levels and bounds are recomputed through
/// [`Viewer::recalculate_zoom_and_bounds`] after every pan-area change.
pub fn reserve<V, M>(
    slide: &mut Slide,
    layout: CaptionLayout,
    config: &CaptionConfig,
    viewer: &V,
    mut measure: M,
) -> Reservation
where
    V: Viewer + ?Sized,
    M: FnMut(Option<f64>) -> Size,
{
    if slide.block_shift_y != 0.0 {
        slide.block_shift_y = 0.0;
        let initial = slide.zoom_levels.initial;
        viewer.update_bounds(slide, initial);
    }
    let image = slide.initial_image_size();
    let center = slide.bounds.center;
    let original_pan_area = slide.pan_area_size;
    let mut shrunk = false;
    let mut overlap_restored = false;

    let caption_size = match layout {
        CaptionLayout::Aside => {
            let caption = measure(None);
            let leftover = slide.pan_area_size.width - (image.width + center.x);
            if leftover <= caption.width {
                slide.pan_area_size.width -= caption.width;
                viewer.recalculate_zoom_and_bounds(slide);
                shrunk = true;
            }
            debug!(
                index = slide.index,
                leftover,
                caption_width = caption.width,
                shrunk,
                "aside reservation"
            );
            caption
        }
        CaptionLayout::Below | CaptionLayout::Mobile => {
            let mobile = layout == CaptionLayout::Mobile;
            let width = if mobile {
                viewer.viewport_size().width
            } else {
                image.width
            };
            let caption = measure(Some(width));
            let leftover = slide.pan_area_size.height - (image.height + center.y);
            if mobile || leftover <= caption.height {
                slide.pan_area_size.height -= caption.height;
                viewer.recalculate_zoom_and_bounds(slide);
                shrunk = true;

                if mobile && config.mobile_overlap_restore() {
                    let max_margin =
                        slide.pan_area_size.width * config.mobile_overlap_ratio() / 2.0;
                    if slide.bounds.center.x > max_margin {
                        slide.pan_area_size.height = original_pan_area.height;
                        viewer.recalculate_zoom_and_bounds(slide);
                        shrunk = false;
                        overlap_restored = true;
                    }
                }
            }
            if !mobile && config.vertically_center_image() {
                center_with_caption(slide, original_pan_area.height, caption.height);
            }
            debug!(
                index = slide.index,
                mobile,
                leftover,
                caption_height = caption.height,
                shrunk,
                overlap_restored,
                "below reservation"
            );
            caption
        }
    };

    slide.reserved_pan_area = Some(slide.pan_area_size);

    Reservation {
        layout,
        caption_size,
        original_pan_area,
        shrunk,
        overlap_restored,
    }
}

/// Moves the image so that it and the caption under it are centered as one
/// block inside `pan_height`, never above the pan-area origin.
fn center_with_caption(slide: &mut Slide, pan_height: f64, caption_height: f64) {
    let block = slide.initial_image_size().height + caption_height;
    let top = ((pan_height - block) / 2.0).round().max(0.0);
    let shift = slide.pan_area_offset.y + top - slide.bounds.center.y;
    slide.block_shift_y = shift;
    slide.bounds.shift_y(shift);
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use kurbo::{Insets, Point, Size, Vec2};

    use super::reserve;
    use crate::classify::CaptionLayout;
    use crate::config::CaptionConfig;
    use crate::slide::Slide;
    use crate::viewer::{EventKinds, SubscriptionId, UiElementSpec, Viewer};

    struct Stub {
        viewport: Size,
    }

    impl Viewer for Stub {
        fn viewport_size(&self) -> Size {
            self.viewport
        }
        fn padding(&self) -> Insets {
            Insets::ZERO
        }
        fn set_padding(&mut self, _padding: Insets) {}
        fn subscribe(&mut self, _events: EventKinds) -> SubscriptionId {
            SubscriptionId(0)
        }
        fn unsubscribe(&mut self, _id: SubscriptionId) {}
        fn register_element(&mut self, _spec: &UiElementSpec) {}
        fn query_markup(&self, _slide: &Slide, _selector: &str) -> Option<String> {
            None
        }
        fn image_alt(&self, _slide: &Slide) -> Option<String> {
            None
        }
    }

    fn stub(width: f64, height: f64) -> Stub {
        Stub {
            viewport: Size::new(width, height),
        }
    }

    #[test]
    fn aside_shrinks_when_caption_does_not_fit() {
        // 800x600 image centered in 1200x800: 200px to the right of it.
        let mut slide = Slide::new(0, Size::new(800.0, 600.0), Size::new(1200.0, 800.0));
        assert_eq!(slide.bounds.center, Point::new(200.0, 100.0));

        let config = CaptionConfig::default();
        let r = reserve(
            &mut slide,
            CaptionLayout::Aside,
            &config,
            &stub(1200.0, 800.0),
            |_| Size::new(300.0, 100.0),
        );
        assert!(r.shrunk);
        assert_eq!(slide.pan_area_size, Size::new(900.0, 800.0));
        assert_eq!(slide.reserved_pan_area, Some(slide.pan_area_size));
        // Still fits at natural size, but is recentered in the narrower area.
        assert_eq!(slide.zoom_levels.initial, 1.0);
        assert_eq!(slide.bounds.center, Point::new(50.0, 100.0));
        let image = slide.initial_image_size();
        let leftover = 1200.0 - (image.width + slide.bounds.center.x);
        assert!(leftover >= 300.0);
    }

    #[test]
    fn aside_fits_without_adjustment() {
        let mut slide = Slide::new(0, Size::new(600.0, 800.0), Size::new(1600.0, 800.0));
        let config = CaptionConfig::default();
        let r = reserve(
            &mut slide,
            CaptionLayout::Aside,
            &config,
            &stub(1600.0, 800.0),
            |width| {
                assert_eq!(width, None);
                Size::new(300.0, 100.0)
            },
        );
        assert!(!r.shrunk);
        assert_eq!(slide.pan_area_size, Size::new(1600.0, 800.0));
        assert_eq!(slide.reserved_pan_area, Some(Size::new(1600.0, 800.0)));
    }

    #[test]
    fn exact_fit_counts_as_not_fitting() {
        // 500px of space right of the image, caption exactly 500px wide.
        let mut slide = Slide::new(0, Size::new(600.0, 800.0), Size::new(1600.0, 800.0));
        let config = CaptionConfig::default();
        let r = reserve(
            &mut slide,
            CaptionLayout::Aside,
            &config,
            &stub(1600.0, 800.0),
            |_| Size::new(500.0, 10.0),
        );
        assert!(r.shrunk);
        assert_eq!(slide.pan_area_size.width, 1100.0);
    }

    #[test]
    fn below_with_ample_space_is_left_alone() {
        let mut slide = Slide::new(0, Size::new(400.0, 300.0), Size::new(1000.0, 900.0));
        assert_eq!(slide.bounds.center, Point::new(300.0, 300.0));
        let config = CaptionConfig::default();
        let r = reserve(
            &mut slide,
            CaptionLayout::Below,
            &config,
            &stub(1000.0, 900.0),
            |width| {
                assert_eq!(width, Some(400.0));
                Size::new(400.0, 50.0)
            },
        );
        assert!(!r.shrunk);
        assert_eq!(slide.pan_area_size, Size::new(1000.0, 900.0));
        assert_eq!(slide.bounds.center, Point::new(300.0, 300.0));
    }

    #[test]
    fn below_shrinks_height_when_tight() {
        let mut slide = Slide::new(0, Size::new(1600.0, 600.0), Size::new(1200.0, 800.0));
        let config = CaptionConfig::default();
        let r = reserve(
            &mut slide,
            CaptionLayout::Below,
            &config,
            &stub(1200.0, 800.0),
            |_| Size::new(1200.0, 200.0),
        );
        // Image is 1200x450 at y=175: 175px under it, caption needs 200.
        assert!(r.shrunk);
        assert_eq!(slide.pan_area_size, Size::new(1200.0, 600.0));
        let image = slide.initial_image_size();
        assert!(800.0 - (image.height + slide.bounds.center.y) >= 200.0);
    }

    #[test]
    fn mobile_always_reserves_when_image_fills_width() {
        let mut slide = Slide::new(0, Size::new(1000.0, 500.0), Size::new(400.0, 700.0));
        let config = CaptionConfig::default();
        let r = reserve(
            &mut slide,
            CaptionLayout::Mobile,
            &config,
            &stub(400.0, 700.0),
            |width| {
                assert_eq!(width, Some(400.0));
                Size::new(400.0, 60.0)
            },
        );
        assert!(r.shrunk);
        assert!(!r.overlap_restored);
        assert_eq!(slide.pan_area_size, Size::new(400.0, 640.0));
    }

    #[test]
    fn mobile_overlap_restores_height_for_narrow_images() {
        // Portrait image on a landscape tablet: lots of horizontal margin.
        let mut slide = Slide::new(0, Size::new(300.0, 600.0), Size::new(580.0, 400.0));
        let config = CaptionConfig::default();
        let r = reserve(
            &mut slide,
            CaptionLayout::Mobile,
            &config,
            &stub(580.0, 400.0),
            |_| Size::new(580.0, 80.0),
        );
        assert!(!r.shrunk);
        assert!(r.overlap_restored);
        assert_eq!(slide.pan_area_size, Size::new(580.0, 400.0));
        assert_eq!(slide.reserved_pan_area, Some(Size::new(580.0, 400.0)));
    }

    #[test]
    fn mobile_overlap_restoration_can_be_disabled() {
        let mut slide = Slide::new(0, Size::new(300.0, 600.0), Size::new(580.0, 400.0));
        let config = CaptionConfig::builder()
            .mobile_overlap_restore(false)
            .build();
        let r = reserve(
            &mut slide,
            CaptionLayout::Mobile,
            &config,
            &stub(580.0, 400.0),
            |_| Size::new(580.0, 80.0),
        );
        assert!(r.shrunk);
        assert_eq!(slide.pan_area_size, Size::new(580.0, 320.0));
    }

    #[test]
    fn vertical_centering_lifts_image_when_caption_fits() {
        let mut slide = Slide::new(0, Size::new(400.0, 300.0), Size::new(1000.0, 900.0));
        let config = CaptionConfig::builder()
            .vertically_center_image(true)
            .build();
        reserve(
            &mut slide,
            CaptionLayout::Below,
            &config,
            &stub(1000.0, 900.0),
            |_| Size::new(400.0, 50.0),
        );
        // Block of 350px centered in 900px.
        assert_eq!(slide.bounds.center, Point::new(300.0, 275.0));
        assert_eq!(slide.bounds.min, slide.bounds.center);
        assert_eq!(slide.bounds.max, slide.bounds.center);
        assert_eq!(slide.block_shift_y, -25.0);
        assert_eq!(slide.pan_area_size, Size::new(1000.0, 900.0));

        // Recomputing at the initial zoom keeps the block centered.
        slide.update_bounds(slide.zoom_levels.initial);
        assert_eq!(slide.bounds.center, Point::new(300.0, 275.0));
    }

    #[test]
    fn repeated_reservation_starts_from_unshifted_bounds() {
        let mut slide = Slide::new(0, Size::new(400.0, 300.0), Size::new(1000.0, 900.0));
        let config = CaptionConfig::builder()
            .vertically_center_image(true)
            .build();
        for _ in 0..2 {
            reserve(
                &mut slide,
                CaptionLayout::Below,
                &config,
                &stub(1000.0, 900.0),
                |_| Size::new(400.0, 50.0),
            );
        }
        assert_eq!(slide.bounds.center, Point::new(300.0, 275.0));
        assert_eq!(slide.block_shift_y, -25.0);
    }

    #[test]
    fn padding_counts_against_the_leftover() {
        // 20px of left padding puts the image at x=220: 180px remain.
        let mut slide = Slide::new(0, Size::new(800.0, 600.0), Size::new(1200.0, 800.0))
            .with_pan_area_offset(Vec2::new(20.0, 0.0));
        assert_eq!(slide.bounds.center.x, 220.0);
        let config = CaptionConfig::default();
        let r = reserve(
            &mut slide,
            CaptionLayout::Aside,
            &config,
            &stub(1200.0, 800.0),
            |_| Size::new(199.0, 40.0),
        );
        assert!(r.shrunk);
        assert_eq!(slide.pan_area_size, Size::new(1001.0, 800.0));
    }
}
