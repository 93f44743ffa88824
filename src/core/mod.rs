//! Core modules for the price ticker and the exposure checker.
//!
//! - `http`: curl-backed HTTP GET behind the [`http::HttpClient`] trait
//! - `interrupt`: SIGINT flag for stopping the ticker loop
//! - `ticker`: periodic spot price report
//! - `exposure`: one-shot VPN/proxy heuristics

pub mod exposure;
pub mod http;
pub mod interrupt;
pub mod ticker;
