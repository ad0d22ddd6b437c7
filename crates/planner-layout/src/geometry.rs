//! Page geometry for mirrored duplex pages
//!
//! The printable width is the same on both sides of a sheet; only the side
//! carrying the binding gutter flips between recto and verso.

use crate::config::PageConfig;
use crate::constants::{cm_to_twips, PT_PER_CM};
use crate::pagination::PageSide;

/// Physical page and content area, all lengths in centimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    /// Inside margin (binding edge on a recto)
    pub margin_left: f64,
    /// Outside margin (fore edge on a recto)
    pub margin_right: f64,
    pub gutter: f64,
    /// Distance of the page-number footer from the bottom edge
    pub footer_distance: f64,
}

impl PageGeometry {
    pub fn from_config(page: &PageConfig) -> Self {
        Self {
            page_width: page.width,
            page_height: page.height,
            margin_top: page.margin_top,
            margin_bottom: page.margin_bottom,
            margin_left: page.margin_left,
            margin_right: page.margin_right,
            gutter: page.gutter_size,
            footer_distance: page.page_number_position,
        }
    }

    /// Usable width in cm.
    ///
    /// With `include_gutter` the binding allowance is taken out of the
    /// width, which is what every page-filling table needs.
    pub fn content_width(&self, include_gutter: bool) -> f64 {
        let width = self.page_width - self.margin_left - self.margin_right;
        if include_gutter { width - self.gutter } else { width }
    }

    pub fn content_height(&self) -> f64 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    pub fn content_width_twips(&self) -> i64 {
        cm_to_twips(self.content_width(true))
    }

    pub fn content_height_twips(&self) -> i64 {
        cm_to_twips(self.content_height())
    }

    /// Left edge of the content area measured from the physical left edge
    pub fn content_left(&self, side: PageSide) -> f64 {
        match side {
            PageSide::Recto => self.margin_left + self.gutter,
            PageSide::Verso => self.margin_right,
        }
    }

    /// Position of the gutter's inner edge from the physical left edge
    pub fn gutter_line(&self, side: PageSide) -> f64 {
        match side {
            PageSide::Recto => self.gutter,
            PageSide::Verso => self.page_width - self.gutter,
        }
    }

    pub fn page_width_pt(&self) -> f32 {
        (self.page_width * PT_PER_CM) as f32
    }

    pub fn page_height_pt(&self) -> f32 {
        (self.page_height * PT_PER_CM) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a4() -> PageGeometry {
        PageGeometry {
            page_width: 21.0,
            page_height: 29.7,
            margin_top: 1.0,
            margin_bottom: 1.5,
            margin_left: 1.0,
            margin_right: 1.0,
            gutter: 1.0,
            footer_distance: 0.8,
        }
    }

    #[test]
    fn test_content_area() {
        let g = a4();
        assert!((g.content_width(true) - 18.0).abs() < 1e-9);
        assert!((g.content_width(false) - 19.0).abs() < 1e-9);
        assert!((g.content_height() - 27.2).abs() < 1e-9);
        assert_eq!(g.content_width_twips(), 10204);
        assert_eq!(g.content_height_twips(), 15420);
    }

    #[test]
    fn test_mirrored_content_edges() {
        let g = a4();
        assert!((g.content_left(PageSide::Recto) - 2.0).abs() < 1e-9);
        assert!((g.content_left(PageSide::Verso) - 1.0).abs() < 1e-9);
        assert!((g.gutter_line(PageSide::Verso) - 20.0).abs() < 1e-9);
    }
}
