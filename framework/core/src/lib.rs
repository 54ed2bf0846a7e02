mod env;
mod error;
mod suite;

pub mod prelude {
    pub use crate::env::{parse_bool_flag, Env};
    pub use crate::error::ConfigError;
    pub use crate::suite::Suite;
}
