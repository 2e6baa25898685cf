use std::io;
use thiserror::Error;
use crate::model::ComponentName;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("component not found: {0}")]
    NameNotFound(ComponentName),
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("entry has nothing to run")]
    EmptyCommand,

    #[error("cannot resolve target component: {0}")]
    Component(#[from] LookupError),

    #[error("failed to spawn process: {0}")]
    Spawn(#[from] io::Error),
}
