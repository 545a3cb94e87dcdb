pub mod admin;

pub mod auth;

pub mod evaluation;

pub use admin::configure_admin_routes;
pub use auth::configure_auth_routes;
pub use evaluation::configure_evaluation_routes;
