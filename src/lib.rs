pub mod config;
pub mod error;
pub mod scenario;
pub mod session;

pub use error::{ClientResult, Error, ErrorKind, Result, ScenarioError};
