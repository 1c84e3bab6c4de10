//! Clients endpoint guarded by a non-blocking admission limiter.
//!
//! [`limiter::AdmissionLimiter`] caps how many units of work run at once and
//! sheds the rest. The HTTP side lives in [`routes`]; [`worker`] runs the
//! optional per-request fan-out that exercises the limiter.

pub mod config;
pub mod limiter;
pub mod models;
pub mod routes;
pub mod worker;
