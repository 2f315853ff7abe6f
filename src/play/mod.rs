pub mod breaker;
pub mod playback;
