// Guided career conversation: four phases, keyword-driven content, timed replies.
// No inference and no persistence; one session lives in memory for the process.

pub mod coach;
pub mod handlers;
pub mod pacing;
pub mod progress;
pub mod render;
pub mod scheduler;
pub mod selector;
pub mod session;
