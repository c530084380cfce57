/// Widgets for the single studio page
pub mod page;
pub mod style;
pub mod toast;
