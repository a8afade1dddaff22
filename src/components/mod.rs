pub mod composer;
pub mod footer;
pub mod header;
pub mod overlays;
pub mod transcript;
pub mod welcome;
