pub use super::member_record::Entity as MemberRecord;
