//! Firmware configuration
//!
//! Configuration is compiled into the firmware as TOML text and parsed at
//! boot by the no_std parser in [`parser`].

pub mod parser;
pub mod types;

pub use parser::{parse_config, ParseError};
pub use types::*;
