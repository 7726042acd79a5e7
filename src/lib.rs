// Everything except the terminal front end lives here so benchmarks and
// integration tests can drive it without a TTY.

pub mod config;
pub mod corpus;
pub mod engine;
pub mod generator;
pub mod session;
pub mod verse;
pub mod waitlist;
