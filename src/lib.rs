//! Colony Economy - per-turn planetary economy simulation

pub mod content;
pub mod core;
pub mod economy;
pub mod planet;
pub mod realm;
