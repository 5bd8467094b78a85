pub mod alumni;
pub mod employment;
pub mod file;
pub mod user;
