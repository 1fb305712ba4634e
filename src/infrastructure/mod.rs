pub mod database;
pub mod datasource;
pub mod mapper;
pub mod repositories;
pub mod time;
pub mod util;
