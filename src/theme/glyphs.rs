//! Shared glyphs used across header and footer segments. Kept here so a
//! future ASCII fallback only has to touch one table.

/// Powerline segment separator.
pub const SEP_RIGHT: &str = "\u{e0b0}";

/// Session badge in the header logo segment.
pub const SESSION: &str = "✦";

/// Marker on transcript speaker headers.
pub const SPEAKER: &str = "●";
