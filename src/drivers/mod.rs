pub mod haptic;
pub mod indicator;
