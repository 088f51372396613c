// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caption placement against the refit image.

use kurbo::Point;

use crate::classify::CaptionLayout;
use crate::slide::Slide;
use crate::surface::CaptionStyle;

/// Places `caption` according to `slide`'s layout and bounds.
///
/// A pure function of the slide: applying it twice leaves the caption
/// unchanged. Slides without a caption layout leave the caption untouched.
///
/// - [`CaptionLayout::Mobile`]: no offset and no width, the caption flows.
/// - [`CaptionLayout::Aside`]: top-left at the image's top-right corner.
/// - [`CaptionLayout::Below`]: top-left at the image's bottom-left corner,
///   as wide as the image.
pub fn apply_position(slide: &Slide, caption: &mut CaptionStyle, edge_threshold: f64) {
    let Some(layout) = slide.caption_layout else {
        return;
    };
    caption.layout = Some(layout);

    let center = slide.bounds.center;
    let image = slide.initial_image_size();
    let (position, width) = match layout {
        CaptionLayout::Mobile => (None, None),
        CaptionLayout::Aside => (Some(Point::new(center.x + image.width, center.y)), None),
        CaptionLayout::Below => (
            Some(Point::new(center.x, center.y + image.height)),
            Some(image.width),
        ),
    };
    caption.position = position;
    caption.width = width;
    caption.on_horizontal_edge = position.is_some_and(|p| p.x <= edge_threshold);
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::apply_position;
    use crate::classify::CaptionLayout;
    use crate::slide::Slide;
    use crate::surface::CaptionStyle;

    fn slide(layout: CaptionLayout) -> Slide {
        let mut slide = Slide::new(3, Size::new(400.0, 300.0), Size::new(1000.0, 900.0));
        slide.caption_layout = Some(layout);
        slide
    }

    #[test]
    fn below_sits_under_the_image_at_image_width() {
        let mut caption = CaptionStyle::default();
        apply_position(&slide(CaptionLayout::Below), &mut caption, 20.0);
        assert_eq!(caption.layout, Some(CaptionLayout::Below));
        assert_eq!(caption.position, Some(Point::new(300.0, 600.0)));
        assert_eq!(caption.width, Some(400.0));
        assert!(!caption.on_horizontal_edge);
    }

    #[test]
    fn aside_sits_right_of_the_image_at_natural_width() {
        let mut caption = CaptionStyle {
            width: Some(123.0),
            ..CaptionStyle::default()
        };
        apply_position(&slide(CaptionLayout::Aside), &mut caption, 20.0);
        assert_eq!(caption.position, Some(Point::new(700.0, 300.0)));
        assert_eq!(caption.width, None);
    }

    #[test]
    fn mobile_clears_offsets() {
        let mut caption = CaptionStyle::default();
        apply_position(&slide(CaptionLayout::Below), &mut caption, 20.0);
        apply_position(&slide(CaptionLayout::Mobile), &mut caption, 20.0);
        assert_eq!(caption.layout, Some(CaptionLayout::Mobile));
        assert_eq!(caption.position, None);
        assert_eq!(caption.width, None);
        assert!(!caption.on_horizontal_edge);
    }

    #[test]
    fn edge_flag_uses_inclusive_threshold() {
        // Wide image flush with the left edge.
        let mut s = Slide::new(0, Size::new(2000.0, 500.0), Size::new(1000.0, 900.0));
        s.caption_layout = Some(CaptionLayout::Below);
        let mut caption = CaptionStyle::default();
        apply_position(&s, &mut caption, 0.0);
        assert_eq!(caption.position.map(|p| p.x), Some(0.0));
        assert!(caption.on_horizontal_edge);

        apply_position(&slide(CaptionLayout::Below), &mut caption, 300.0);
        assert!(caption.on_horizontal_edge);
        apply_position(&slide(CaptionLayout::Below), &mut caption, 299.0);
        assert!(!caption.on_horizontal_edge);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let s = slide(CaptionLayout::Aside);
        let mut caption = CaptionStyle::default();
        apply_position(&s, &mut caption, 20.0);
        let first = caption.clone();
        apply_position(&s, &mut caption, 20.0);
        assert_eq!(caption, first);
    }

    #[test]
    fn slide_without_caption_leaves_style_alone() {
        let mut s = slide(CaptionLayout::Aside);
        s.caption_layout = None;
        let mut caption = CaptionStyle {
            position: Some(Point::new(1.0, 2.0)),
            layout: Some(CaptionLayout::Below),
            ..CaptionStyle::default()
        };
        let before = caption.clone();
        apply_position(&s, &mut caption, 20.0);
        assert_eq!(caption, before);
    }
}
