pub mod db;
pub mod migration_runner;
pub mod row_set;
pub mod source;
pub mod tables;
