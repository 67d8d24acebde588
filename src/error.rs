use miette::Diagnostic;
use thiserror::Error;

pub type CompatResult<T> = Result<T, CompatError>;

#[derive(Debug, Error, Diagnostic)]
pub enum CompatError {
    #[error("protocol provider is not available")]
    #[diagnostic(
        code("compat.unavailable"),
        help("the protocol subsystem is missing or has not finished initializing")
    )]
    Unavailable,
    #[error("protocol provider failed during {operation}: {message}")]
    #[diagnostic(code("compat.foreign_fault"))]
    ForeignFault {
        operation: &'static str,
        message: String,
    },
    #[error("protocol version {0} is not registered")]
    #[diagnostic(code("compat.unregistered_protocol"))]
    UnregisteredProtocol(i32),
    #[error("unknown reference point '{0}'")]
    #[diagnostic(code("compat.unknown_reference"))]
    UnknownReferencePoint(String),
    #[error("config error: {0}")]
    #[diagnostic(code("compat.config"))]
    Config(String),
    #[error("io error: {0}")]
    #[diagnostic(code("compat.io"))]
    Io(#[from] std::io::Error),
}
