pub mod gauge;
pub mod nav;

pub use gauge::{moisture_gauge, ph_gauge, rainfall_gauge, temperature_gauge};
pub use nav::{nav_bar, status_line};
