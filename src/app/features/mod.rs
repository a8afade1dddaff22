pub mod composer;
pub mod follow_up;
pub mod session;
pub mod slash_menu;
pub mod transcript;
pub mod ui;
