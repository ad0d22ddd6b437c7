//! Shared constants for planner layout
//!
//! This module centralizes the unit conversions and the fixed allowances
//! the row-height solver subtracts before filling a page.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Twips per centimeter (1 inch = 1440 twips, 1 inch = 2.54cm)
pub const TWIPS_PER_CM: f64 = 1440.0 / 2.54; // ≈ 566.93

/// Twips per point
pub const TWIPS_PER_PT: f64 = 20.0;

/// English Metric Units per centimeter (914400 EMU per inch)
pub const EMU_PER_CM: f64 = 914_400.0 / 2.54;

/// Raster pixels per centimeter at 300 DPI print density
pub const PX_PER_CM: f64 = 300.0 / 2.54;

/// Points per centimeter
pub const PT_PER_CM: f64 = 72.0 / 2.54;

/// Convert centimeters to whole twips, truncating toward zero
#[inline]
pub fn cm_to_twips(cm: f64) -> i64 {
    (cm * TWIPS_PER_CM) as i64
}

/// Convert points to whole twips, truncating toward zero
#[inline]
pub fn pt_to_twips(pt: f64) -> i64 {
    (pt * TWIPS_PER_PT) as i64
}

/// Convert twips to centimeters
#[inline]
pub fn twips_to_cm(twips: i64) -> f64 {
    twips as f64 / TWIPS_PER_CM
}

/// Convert twips to points
#[inline]
pub fn twips_to_pt(twips: i64) -> f64 {
    twips as f64 / TWIPS_PER_PT
}

/// Convert centimeters to whole EMUs, truncating toward zero
#[inline]
pub fn cm_to_emu(cm: f64) -> i64 {
    (cm * EMU_PER_CM) as i64
}

/// Convert centimeters to whole raster pixels at print density
#[inline]
pub fn cm_to_px(cm: f64) -> u32 {
    (cm * PX_PER_CM) as u32
}

// =============================================================================
// Colors
// =============================================================================

/// 8-bit channel for a grayscale percentage (0 = white, 100 = black)
#[inline]
pub fn grayscale_channel(percent: u8) -> u8 {
    (255.0 * (1.0 - f64::from(percent) / 100.0)) as u8
}

/// `RRGGBB` hex string for a grayscale percentage
pub fn grayscale_hex(percent: u8) -> String {
    let v = grayscale_channel(percent);
    format!("{v:02X}{v:02X}{v:02X}")
}

/// Border width in eighths of a point
#[inline]
pub fn border_eighths(thickness_pt: f64) -> u32 {
    (thickness_pt * 8.0) as u32
}

// =============================================================================
// Page Filling Allowances (twips)
// =============================================================================

/// Height of a page-break paragraph shrunk to a 1pt exact line
pub const MINIMIZED_PARAGRAPH_TWIPS: i64 = 20;

/// Conservative height of an ordinary empty paragraph
pub const EMPTY_PARAGRAPH_TWIPS: i64 = 240;

/// Buffer subtracted from every page-filling table
pub const SAFETY_MARGIN_TWIPS: i64 = 40;

/// Extra allowance for the outer calendar grid's borders and spacing
pub const TABLE_BORDER_OVERHEAD_TWIPS: i64 = 80;

// =============================================================================
// Text Estimation
// =============================================================================

/// Approximate average glyph width as a fraction of the font size
pub const AVERAGE_CHAR_WIDTH_RATIO: f64 = 0.5;

/// Estimated rendered width of `text` in twips
pub fn estimate_text_width_twips(text: &str, font_size_pt: f64) -> i64 {
    let width_pt = text.chars().count() as f64 * font_size_pt * AVERAGE_CHAR_WIDTH_RATIO;
    (width_pt * TWIPS_PER_PT) as i64
}

// =============================================================================
// Fixed Section Footprints (page sides)
// =============================================================================

/// Cover front and inside cover
pub const COVER_SIDES: usize = 2;

/// Instructions page and its blank verso
pub const INSTRUCTIONS_SIDES: usize = 2;

/// Two year calendars, each followed by a blank verso
pub const CALENDAR_SIDES: usize = 4;

/// Month cover and its blank verso
pub const MONTH_COVER_SIDES: usize = 2;

/// Inside and outside of the rear cover
pub const REAR_COVER_SIDES: usize = 2;

/// Day tables sharing one page side in the daily spread
pub const DAYS_PER_SIDE: usize = 2;
