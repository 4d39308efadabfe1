pub mod analytics;
pub mod cli;
pub mod database;
pub mod database_factory;
pub mod date_provider;
pub mod date_range;
pub mod demo_data;
pub mod models;
pub mod report;
pub mod row_factories;
