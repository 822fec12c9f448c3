pub mod changelog;
pub mod classifier;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod orchestrator;
pub mod outputs;
pub mod publish;
pub mod resolver;
pub mod strategy;
pub mod ui;

pub use error::{GitFlowError, Result};
