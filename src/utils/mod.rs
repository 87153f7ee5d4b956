pub mod logging;
pub mod animations;
