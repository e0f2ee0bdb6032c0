mod logs;
mod metrics;
mod random_string;

pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status};
pub use self::random_string::generate_random_string;
