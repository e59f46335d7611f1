// Group-coordination bot - core
//
// Events are recruited, joined, and closed through chat-platform slash
// commands and buttons; organizers post acknowledgeable notices and an
// external scheduler calls back to remind whoever has not confirmed.
// Architecture: interaction router -> lifecycle engines -> injected store /
// scheduler / chat clients.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
