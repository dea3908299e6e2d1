//! Shared state handed to the Discord event handler.
//!
//! Built once during startup. Every field is cheap to clone (reference-counted or
//! `Copy`), so the handler and background tasks each hold their own copy.

use std::sync::Arc;

use crate::{scheduler::ready::ReadySignal, service::reactor::MemberEventReactor};

#[derive(Clone)]
pub struct BotState {
    /// Reacts to membership events for the configured guild.
    pub reactor: Arc<MemberEventReactor>,

    /// Raised from the gateway ready handler so the sweep scheduler can start.
    pub ready: ReadySignal,

    /// Events from any other guild are ignored.
    pub guild_id: u64,
}

impl BotState {
    pub fn new(reactor: Arc<MemberEventReactor>, ready: ReadySignal, guild_id: u64) -> Self {
        Self {
            reactor,
            ready,
            guild_id,
        }
    }
}
