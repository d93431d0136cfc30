pub mod navigation;
pub mod permission;
pub mod role;
pub mod user;
