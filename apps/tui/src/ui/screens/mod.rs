pub mod directory;
pub mod help;
pub mod popup;
