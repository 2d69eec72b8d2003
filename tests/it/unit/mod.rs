//! Unit tests for the interaction core.

mod coords_tests;
mod settings_tests;
