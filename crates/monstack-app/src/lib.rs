//! monstack demo app library entry.
//!
//! An instrumented HTTP service that exposes a request counter, a latency
//! histogram and an active-requests gauge for the metrics database to
//! scrape. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
