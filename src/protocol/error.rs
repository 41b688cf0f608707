use thiserror::Error;

/// Reportable, non-fatal problems with a server frame
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("empty server frame")]
    EmptyMessage,
    #[error("unknown packet: {0}")]
    UnknownMessage(u8),
}
