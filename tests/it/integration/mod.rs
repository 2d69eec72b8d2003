//! Integration tests: full pointer sequences through a `Scope`.

mod drag_flow_tests;
mod gesture_flow_tests;
mod replay_tests;
