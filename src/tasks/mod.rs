pub mod button;
pub mod haptic;
