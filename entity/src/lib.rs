//! SeaORM entities for the pawkeeper member store.

pub mod prelude;

pub mod member_record;
