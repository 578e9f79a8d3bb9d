pub mod database;
pub mod io;
pub mod log;
