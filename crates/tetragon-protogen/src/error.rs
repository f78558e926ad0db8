use thiserror::Error as ThisError;

///
/// ProtogenError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ProtogenError {
    #[error("failed to decode code generator request: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("invalid plugin parameter '{param}'")]
    InvalidParameter { param: String },

    #[error("unable to determine Go import path for '{file}': set option go_package or pass M{file}=<import path>")]
    MissingGoPackage { file: String },

    #[error("protoc asked to generate unknown file '{file}'")]
    UnknownFile { file: String },

    #[error("unknown paths mode '{value}', expected 'import' or 'source_relative'")]
    UnknownPathsMode { value: String },
}
