use crate::{GeneratedFile, ProtogenError, descriptor::File, ident::GoImportPath};
use prost::Message as _;
use prost_types::compiler::{
    CodeGeneratorRequest, CodeGeneratorResponse,
    code_generator_response::{Feature, File as ResponseFile},
};
use std::{collections::BTreeMap, fmt::Display, sync::Arc};
use tracing::debug;

///
/// PathsMode
/// where generated files are placed relative to the output directory
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PathsMode {
    /// Under the Go import path of the source file.
    #[default]
    Import,
    /// Next to the source `.proto` file.
    SourceRelative,
}

///
/// Options
///
/// Plugin parameters, as passed by protoc in `--<plugin>_opt=k=v,k=v`.
/// `paths` and `M<file>=<import path>` are understood here; everything else
/// is kept in `params` for the generator to interpret.
///

#[derive(Clone, Debug, Default)]
pub struct Options {
    pub paths: PathsMode,
    pub import_paths: BTreeMap<String, String>,
    pub params: BTreeMap<String, String>,
}

impl Options {
    pub fn parse(parameter: &str) -> Result<Self, ProtogenError> {
        let mut options = Self::default();

        for param in parameter.split(',').filter(|p| !p.is_empty()) {
            let (key, value) = param.split_once('=').unwrap_or((param, ""));
            if key.is_empty() {
                return Err(ProtogenError::InvalidParameter {
                    param: param.to_string(),
                });
            }

            match key {
                "paths" => {
                    options.paths = match value {
                        "import" => PathsMode::Import,
                        "source_relative" => PathsMode::SourceRelative,
                        other => {
                            return Err(ProtogenError::UnknownPathsMode {
                                value: other.to_string(),
                            });
                        }
                    };
                }
                _ if key.len() > 1 && key.starts_with('M') => {
                    options
                        .import_paths
                        .insert(key[1..].to_string(), value.to_string());
                }
                _ => {
                    options.params.insert(key.to_string(), value.to_string());
                }
            }
        }

        Ok(options)
    }

    /// Generator parameter by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

///
/// Plugin
///
/// One protoc plugin invocation: the parsed request and every file
/// generated while handling it.
///

#[derive(Debug)]
pub struct Plugin {
    pub options: Options,
    files: Vec<Arc<File>>,
    generated: Vec<GeneratedFile>,
    error: Option<String>,
}

impl Plugin {
    /// Decode a serialized `CodeGeneratorRequest` and build the plugin from it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtogenError> {
        let request = CodeGeneratorRequest::decode(bytes)?;

        Self::from_request(request)
    }

    pub fn from_request(request: CodeGeneratorRequest) -> Result<Self, ProtogenError> {
        let options = Options::parse(request.parameter())?;

        for name in &request.file_to_generate {
            if !request.proto_file.iter().any(|f| f.name() == name) {
                return Err(ProtogenError::UnknownFile { file: name.clone() });
            }
        }

        let files = request
            .proto_file
            .iter()
            .map(|desc| {
                let generate = request.file_to_generate.iter().any(|n| n == desc.name());
                File::new(desc, &options, generate).map(Arc::new)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            files = files.len(),
            generate = request.file_to_generate.len(),
            "loaded code generator request"
        );

        Ok(Self {
            options,
            files,
            generated: Vec::new(),
            error: None,
        })
    }

    /// Files protoc asked to generate.
    #[must_use]
    pub fn files_to_generate(&self) -> Vec<Arc<File>> {
        self.files.iter().filter(|f| f.generate).cloned().collect()
    }

    /// Start a new output file and hand back its buffer.
    pub fn new_generated_file(
        &mut self,
        filename: impl Into<String>,
        go_import_path: impl Into<GoImportPath>,
    ) -> &mut GeneratedFile {
        let index = self.generated.len();
        self.generated
            .push(GeneratedFile::new(filename, go_import_path));

        &mut self.generated[index]
    }

    #[must_use]
    pub fn generated_files(&self) -> &[GeneratedFile] {
        &self.generated
    }

    /// Record a failure; the response then carries the error instead of files.
    pub fn error(&mut self, err: impl Display) {
        self.error = Some(err.to_string());
    }

    #[must_use]
    pub fn response(&self) -> CodeGeneratorResponse {
        let supported_features = Some(Feature::Proto3Optional as u64);

        if let Some(error) = &self.error {
            return CodeGeneratorResponse {
                error: Some(error.clone()),
                supported_features,
                ..Default::default()
            };
        }

        let file = self
            .generated
            .iter()
            .filter(|g| !g.is_skipped())
            .map(|g| ResponseFile {
                name: Some(g.filename().to_string()),
                content: Some(g.content()),
                ..Default::default()
            })
            .collect();

        CodeGeneratorResponse {
            file,
            supported_features,
            ..Default::default()
        }
    }
}
