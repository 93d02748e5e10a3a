//! stillcam: a still camera behind a small HTTP server.
//!
//! A request runs the capture utility (locally or over ssh), stores the JPEG
//! as `img-<timestamp>.jpg`, repoints `last.jpg` at it and answers with a
//! gallery page of the most recent captures.

pub mod capture;
pub mod config;
pub mod daemon;
pub mod server;

pub use config::Config;
