// Business logic services

pub mod user_record_service;

pub use user_record_service::UserRecordService;
