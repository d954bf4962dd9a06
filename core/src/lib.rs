pub mod csv_import;
pub mod db;
pub mod models;
pub mod notify;
pub mod selector;
pub mod service;
pub mod shopping;
