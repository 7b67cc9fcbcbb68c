//! Demo endpoints, the alert webhook sink, and the latency/failure
//! simulator behind them.

pub mod demo;
pub mod simulator;

pub use demo::{api_alerts, api_data, api_error, api_slow, home};
pub use simulator::{RandomSimulator, Simulator};
