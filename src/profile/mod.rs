//! Profile read surface.

mod handlers;

pub use handlers::my_profile;
