// Library surface for the binary, headless tests and alternative front ends.
pub mod app;
pub mod app_dirs;
pub mod audio;
pub mod config;
pub mod game;
pub mod input;
pub mod logging;
pub mod presenter;
pub mod runtime;
pub mod scheduler;
pub mod score_store;
pub mod sequence;
pub mod session;
pub mod signal;
pub mod ui;
pub mod view;

pub use game::GameController;
pub use sequence::{PrefixCheck, SequenceEngine};
pub use session::Phase;
pub use signal::Signal;
