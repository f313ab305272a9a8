//! Sketchboard Application
//!
//! Application shell tying the core session, the input adapter and the
//! renderer together. The native binary replays a recorded gesture script.

mod app;
mod config;
mod error;
mod script;

pub use app::App;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use script::{ScriptStep, load_script};
