//! Business logic for member lifecycle tracking and auto-moderation.
//!
//! - `classifier` - Bot-signature classification over role sets
//! - `inactivity` - Pure inactivity evaluation over a store snapshot
//! - `moderation` - Notify/remove/report actions
//! - `reactor` - Gateway membership event handling
//! - `sweep` - One pass of the periodic inactivity sweep
//! - `platform` - Contract for the platform the bot moderates

pub mod classifier;
pub mod inactivity;
pub mod moderation;
pub mod platform;
pub mod reactor;
pub mod sweep;

#[cfg(test)]
pub(crate) mod test;
