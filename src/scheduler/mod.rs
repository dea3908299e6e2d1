//! Background jobs.
//!
//! - `inactivity_sweep` - Recurring inactivity sweep with graceful shutdown
//! - `ready` - One-shot signal raised when the gateway connection is ready

pub mod inactivity_sweep;
pub mod ready;

#[cfg(test)]
mod test;
