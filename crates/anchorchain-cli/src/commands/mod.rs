//! Subcommand implementations.

pub mod blocks;
pub mod events;
pub mod proof;
pub mod record;
pub mod seal;
pub mod status;
pub mod verify;
