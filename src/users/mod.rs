//! User registration.

mod avatar;
mod handlers;

pub use avatar::gravatar_url;
pub use handlers::register;
