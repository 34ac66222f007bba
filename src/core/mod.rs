pub mod format;
pub mod moods;
#[cfg_attr(not(feature = "audio"), allow(dead_code))]
pub mod player;
pub mod samples;
pub mod session;
