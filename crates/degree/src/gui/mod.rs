pub mod app;
pub mod surface;
pub mod theme;
