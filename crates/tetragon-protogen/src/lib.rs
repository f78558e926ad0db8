//! Host-side model of a protoc plugin that emits Go.
//!
//! [`Plugin`] turns a `CodeGeneratorRequest` into [`File`] views whose
//! messages, fields and oneofs already carry the Go identifiers protoc-gen-go
//! would give them, hands out [`GeneratedFile`] buffers, and assembles the
//! `CodeGeneratorResponse` at the end of the run.

pub mod descriptor;
pub mod error;
pub mod generated;
pub mod ident;
pub mod path;
pub mod plugin;

pub use descriptor::{Field, File, Message, Oneof};
pub use error::ProtogenError;
pub use generated::GeneratedFile;
pub use ident::{GoIdent, GoImportPath, GoPackageName, go_camel_case};
pub use plugin::{Options, PathsMode, Plugin};
