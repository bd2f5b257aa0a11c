pub mod ai;
pub mod auth;
pub mod presentations;
pub mod system;
