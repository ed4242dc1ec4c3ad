//! Library crate for portsweep: a bounded-concurrency TCP connect scanner.
pub mod cli;
pub mod error;
pub mod logging;
pub mod observer;
pub mod output;
pub mod ports;
pub mod probe;
pub mod resolve;
pub mod scanner;
pub mod sink;
pub mod types;
