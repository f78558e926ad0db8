use crate::{
    ProtogenError,
    ident::{GoIdent, GoImportPath, GoPackageName, go_camel_case},
    path,
    plugin::{Options, PathsMode},
};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};
use std::collections::HashMap;

/// Method names on generated Go messages; field and oneof names are made unique against these.
const RESERVED_METHOD_NAMES: &[&str] = &[
    "Descriptor",
    "ExtensionMap",
    "ExtensionRangeArray",
    "Marshal",
    "ProtoMessage",
    "Reset",
    "String",
    "Unmarshal",
];

///
/// File
/// one parsed `.proto` file, with the Go naming decisions already made
///

#[derive(Clone, Debug)]
pub struct File {
    pub proto_path: String,
    pub go_import_path: GoImportPath,
    pub go_package_name: GoPackageName,

    /// Path prefix for files generated from this one, e.g. `api/v1/tetragon/events`.
    pub generated_filename_prefix: String,

    /// Whether protoc asked for this file to be generated.
    pub generate: bool,

    /// Top-level messages in declaration order.
    pub messages: Vec<Message>,
}

impl File {
    /// Build a file view from its descriptor.
    pub fn new(
        desc: &FileDescriptorProto,
        options: &Options,
        generate: bool,
    ) -> Result<Self, ProtogenError> {
        let proto_path = desc.name().to_string();
        let (go_import_path, explicit_package) = go_package(desc, options, generate)?;

        let go_package_name = explicit_package.unwrap_or_else(|| go_import_path.package_name());

        let stem = proto_path
            .strip_suffix(".proto")
            .unwrap_or(&proto_path)
            .to_string();
        let generated_filename_prefix = match options.paths {
            PathsMode::Import => path::join(&[go_import_path.as_str(), path::base(&stem)]),
            PathsMode::SourceRelative => stem,
        };

        let messages = desc
            .message_type
            .iter()
            .map(|msg| Message::new(msg, None, &go_import_path))
            .collect();

        Ok(Self {
            proto_path,
            go_import_path,
            go_package_name,
            generated_filename_prefix,
            generate,
            messages,
        })
    }
}

// go_package
// resolves the import path from an M mapping or the go_package option
fn go_package(
    desc: &FileDescriptorProto,
    options: &Options,
    generate: bool,
) -> Result<(GoImportPath, Option<GoPackageName>), ProtogenError> {
    let from_option = desc
        .options
        .as_ref()
        .and_then(|opts| opts.go_package.as_deref())
        .filter(|value| !value.is_empty());

    let raw = options
        .import_paths
        .get(desc.name())
        .map(String::as_str)
        .or(from_option);

    match raw {
        Some(raw) => {
            let (import, package) = match raw.split_once(';') {
                Some((import, package)) => (import, Some(GoPackageName::sanitized(package))),
                None => (raw, None),
            };

            Ok((GoImportPath::new(import), package))
        }
        None if generate => Err(ProtogenError::MissingGoPackage {
            file: desc.name().to_string(),
        }),
        // dependencies never emit code, so their directory is a good enough stand-in
        None => Ok((GoImportPath::new(path::dir(desc.name())), None)),
    }
}

///
/// Message
///

#[derive(Clone, Debug)]
pub struct Message {
    /// Declared (unqualified) name.
    pub name: String,
    pub go_ident: GoIdent,
    pub fields: Vec<Field>,
    pub oneofs: Vec<Oneof>,
    pub messages: Vec<Message>,
    pub enums: Vec<GoIdent>,
}

impl Message {
    fn new(desc: &DescriptorProto, parent: Option<&GoIdent>, import_path: &GoImportPath) -> Self {
        let name = desc.name().to_string();
        let go_name = match parent {
            Some(parent) => format!("{}_{}", parent.go_name, go_camel_case(&name)),
            None => go_camel_case(&name),
        };
        let go_ident = GoIdent::new(import_path.clone(), go_name);

        let messages: Vec<Self> = desc
            .nested_type
            .iter()
            .map(|nested| Self::new(nested, Some(&go_ident), import_path))
            .collect();

        let enums = desc
            .enum_type
            .iter()
            .map(|e| {
                GoIdent::new(
                    import_path.clone(),
                    format!("{}_{}", go_ident.go_name, go_camel_case(e.name())),
                )
            })
            .collect();

        let mut fields: Vec<Field> = desc
            .field
            .iter()
            .map(|field| Field::new(field, &go_ident))
            .collect();

        let mut oneofs: Vec<Oneof> = desc
            .oneof_decl
            .iter()
            .map(|oneof| {
                let go_name = go_camel_case(oneof.name());
                Oneof {
                    name: oneof.name().to_string(),
                    go_ident: GoIdent::new(
                        import_path.clone(),
                        format!("{}_{go_name}", go_ident.go_name),
                    ),
                    go_name,
                    fields: Vec::new(),
                }
            })
            .collect();

        // field names first, in declaration order; a oneof's name is claimed
        // when its first member is reached
        let mut names = UsedNames::new();
        let mut named_oneofs = vec![false; oneofs.len()];
        for field in &mut fields {
            field.go_name = names.claim(&field.go_name, true);
            field.go_ident.go_name = format!("{}_{}", go_ident.go_name, field.go_name);

            if let Some(index) = field.oneof_index
                && let Some(oneof) = oneofs.get_mut(index)
                && !named_oneofs[index]
            {
                named_oneofs[index] = true;
                oneof.go_name = names.claim(&oneof.go_name, false);
                oneof.go_ident.go_name = format!("{}_{}", go_ident.go_name, oneof.go_name);
            }
        }

        let mut msg = Self {
            name,
            go_ident,
            fields: Vec::new(),
            oneofs: Vec::new(),
            messages,
            enums,
        };

        for field in fields.iter_mut().filter(|f| f.oneof_index.is_some()) {
            while msg.nested_ident_taken(&field.go_ident) {
                field.go_ident.go_name.push('_');
            }
        }

        for (index, oneof) in oneofs.iter_mut().enumerate() {
            oneof.fields = fields
                .iter()
                .filter(|f| f.oneof_index == Some(index))
                .cloned()
                .collect();
        }
        msg.oneofs = oneofs;
        msg.fields = fields;

        msg
    }

    /// Field by declared name. Exact, case-sensitive match.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Oneof group by declared name.
    #[must_use]
    pub fn oneof(&self, name: &str) -> Option<&Oneof> {
        self.oneofs.iter().find(|o| o.name == name)
    }

    fn nested_ident_taken(&self, ident: &GoIdent) -> bool {
        self.messages.iter().any(|m| &m.go_ident == ident) || self.enums.contains(ident)
    }
}

///
/// UsedNames
///
/// Go member names taken on one generated message. A name claimed with a
/// getter also reserves `Get<name>`.
///

struct UsedNames(HashMap<String, bool>);

impl UsedNames {
    fn new() -> Self {
        Self(
            RESERVED_METHOD_NAMES
                .iter()
                .map(|name| ((*name).to_string(), true))
                .collect(),
        )
    }

    fn taken(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    fn claim(&mut self, name: &str, has_getter: bool) -> String {
        let mut name = name.to_string();
        while self.taken(&name) || (has_getter && self.taken(&format!("Get{name}"))) {
            name.push('_');
        }

        self.0.insert(name.clone(), true);
        self.0.insert(format!("Get{name}"), has_getter);

        name
    }
}

///
/// Field
///

#[derive(Clone, Debug)]
pub struct Field {
    /// Declared name.
    pub name: String,
    pub go_name: String,

    /// `<Message>_<Field>`; for oneof members this is the wrapper type name.
    pub go_ident: GoIdent,

    /// Fully-qualified type reference for message and enum fields.
    pub type_name: Option<String>,
    pub oneof_index: Option<usize>,
}

impl Field {
    fn new(desc: &FieldDescriptorProto, parent: &GoIdent) -> Self {
        let go_name = go_camel_case(desc.name());
        let go_ident = GoIdent::new(
            parent.go_import_path.clone(),
            format!("{}_{go_name}", parent.go_name),
        );

        Self {
            name: desc.name().to_string(),
            go_name,
            go_ident,
            type_name: desc.type_name.clone().filter(|t| !t.is_empty()),
            oneof_index: desc
                .oneof_index
                .and_then(|index| usize::try_from(index).ok()),
        }
    }
}

///
/// Oneof
///

#[derive(Clone, Debug)]
pub struct Oneof {
    /// Declared name.
    pub name: String,
    pub go_name: String,
    pub go_ident: GoIdent,

    /// Member fields in declaration order.
    pub fields: Vec<Field>,
}
