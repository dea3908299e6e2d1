//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models so
//! database-specific structures never leak into the service layer.

pub mod member;

pub use member::MemberRecordRepository;
