use std::fmt;
use thiserror::Error;

/// The kind of remote resource a name lookup was performed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Server,
    Image,
    Flavor,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Server => write!(f, "server"),
            ResourceKind::Image => write!(f, "image"),
            ResourceKind::Flavor => write!(f, "flavor"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ComputectlError {
    #[error("Error parsing metadata: expected key=value format but got '{0}'")]
    MalformedMetadata(String),

    #[error("Duplicate metadata key: {0}")]
    DuplicateMetadataKey(String),

    #[error("{0}")]
    MalformedInput(String),

    #[error("{count} {kind}s are named '{name}'; use an ID instead")]
    AmbiguousName {
        kind: ResourceKind,
        name: String,
        count: usize,
    },

    #[error("No {kind} named '{name}' was found")]
    NotFound { kind: ResourceKind, name: String },

    #[error("{0}")]
    Upstream(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Error {verb} server ({target}): {source}")]
    Command {
        verb: &'static str,
        target: String,
        #[source]
        source: Box<ComputectlError>,
    },
}

impl ComputectlError {
    /// Wraps an error with the operation and server it happened on, producing
    /// `Error <verb> server (<target>): <cause>`.
    pub fn during(self, verb: &'static str, target: impl Into<String>) -> Self {
        ComputectlError::Command {
            verb,
            target: target.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComputectlError>;
