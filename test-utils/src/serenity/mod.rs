//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating
//! what Discord's gateway and HTTP API would deliver to the bot.
//!
//! ```rust,ignore
//! use test_utils::serenity::create_test_member;
//!
//! let member = create_test_member(111, 222, &[333, 444], false);
//! ```
//!
//! # Available Factories
//!
//! - `member::create_test_member` - Create Serenity Member objects
//! - `member::create_test_bot_member` - Create Serenity Member objects for bot accounts

pub mod member;

pub use member::{create_test_bot_member, create_test_member};
