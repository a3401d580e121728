pub mod empty_state;
pub mod error_overlay;
pub mod help_bar;
pub mod help_popup;
pub mod input_field;
pub mod loading_overlay;
pub mod popup;
pub mod screen_title;
