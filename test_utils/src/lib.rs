//! Utility helpers for tests.
//!
//! [`FakeHost`] stands in for every collaborator the perception machine
//! talks to, and [`app`] builds headless Bevy apps with a fixed frame step.

pub mod app;
pub mod host;

pub use app::{headless_app, spawn_enemy, spawn_player, step};
pub use host::{FakeHost, FakeNavigator};
