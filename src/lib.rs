//! Beremiz launcher: command line, startup sequence and the GUI seams it drives.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod extensions;
pub mod gui;
pub mod launcher;
