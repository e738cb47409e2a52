mod db;
mod logs;
mod shutdown;

pub use db::init_db;
pub use logs::init_tracing;
pub use shutdown::shutdown_signal;
