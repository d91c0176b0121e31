//! Simulation systems and observers.
//!
//! Submodules overview
//! - [`axe`] – axe observers (grab, contact, recall) and the axe tick
//! - [`contact`] – resolve raw ground contacts to head/body events
//! - [`feedback`] – forward feedback commands to the consumer channel
//! - [`meshspin`] – spin the axe mesh while thrown or recalling
//! - [`movement`] – integrate rigid bodies into transforms
//! - [`recallpoll`] – debounced recall gesture reports
//! - [`time`] – update simulation time and delta

pub mod axe;
pub mod contact;
pub mod feedback;
pub mod meshspin;
pub mod movement;
pub mod recallpoll;
pub mod time;
