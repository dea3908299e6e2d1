//! Domain models shared by the data, service, and bot layers.

pub mod member;
pub mod moderation;
