pub mod assets;
pub mod dashboard;
pub mod devices;
pub mod entity;
pub mod signals;
