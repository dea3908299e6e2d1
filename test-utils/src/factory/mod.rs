//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for
//! customization and a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Defaults: verified member who joined and was last seen now
//! let member = factory::member_record::create_member(&db).await?;
//!
//! // Customized
//! let member = factory::member_record::MemberRecordFactory::new(&db)
//!     .member_id(123456789)
//!     .pending_verification(true)
//!     .last_seen_at(Utc::now() - Duration::days(60))
//!     .build()
//!     .await?;
//! ```

pub mod helpers;
pub mod member_record;

pub use member_record::{create_member, create_member_with_id};
