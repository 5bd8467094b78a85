pub mod alumni;
pub mod auth;
pub mod employment;
pub mod files;
