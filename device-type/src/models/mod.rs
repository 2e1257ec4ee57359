pub mod device_type;
pub mod error_record;
