use thiserror::Error;

use crate::RegionInfo;

/// Reasons a region snapshot cannot be turned into a report.
///
/// Every variant aborts the whole build; no partial report is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("No usage snapshot was provided")]
    NullSnapshot,

    #[error("Missing size measurement for region {region}")]
    NullMeasurement { region: RegionInfo },

    #[error("Negative size {size} measured for region {region}")]
    NegativeSize { region: RegionInfo, size: i64 },
}

impl BuildError {
    /// Short label used when recording the failure as a metric.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NullSnapshot => "null_snapshot",
            Self::NullMeasurement { .. } => "null_measurement",
            Self::NegativeSize { .. } => "negative_size",
        }
    }
}

/// Structural problems with an encoded region identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("Region identifier bytes could not be parsed")]
    Unparseable,

    #[error("Region identifier has no table name")]
    MissingTableName,

    #[error("Table qualifier is empty")]
    EmptyQualifier,

    #[error("Table namespace is empty")]
    EmptyNamespace,

    #[error("Illegal character {byte:#04x} in table {part}")]
    IllegalCharacter { part: &'static str, byte: u8 },

    #[error("Table qualifier must not start with {byte:#04x}")]
    IllegalLeadingCharacter { byte: u8 },
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Malformed region identifier: {0}")]
    MalformedIdentifier(#[from] IdentifierError),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Negative region size on the wire: {0}")]
    NegativeSize(i64),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_protobuf::Error> for CodecError {
    fn from(error: quick_protobuf::Error) -> Self {
        CodecError::Protocol(error.to_string())
    }
}

impl From<quick_protobuf_codec::Error> for CodecError {
    fn from(error: quick_protobuf_codec::Error) -> Self {
        CodecError::Protocol(error.to_string())
    }
}
