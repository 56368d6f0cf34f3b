// Typing core plus the pieces the binary and integration tests share.
// The terminal front end (app, event, ui) lives in the binary only.
pub mod config;
pub mod logging;
pub mod replay;
pub mod session;
pub mod snippet;
