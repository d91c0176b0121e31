//! ECS resources shared across systems.
//!
//! Submodules overview:
//! - [`axeconfig`] – axe tuning, poll interval and clip ids loaded from INI
//! - [`feedback`] – channel to the audio/haptics consumer
//! - [`worldtime`] – simulation clock

pub mod axeconfig;
pub mod feedback;
pub mod worldtime;
