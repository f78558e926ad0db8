//! Descriptor builders shared by the unit tests.

use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileOptions, OneofDescriptorProto,
    field_descriptor_proto::Type,
};
use tetragon_protogen::{File, Options};

pub const API_IMPORT_PATH: &str = "github.com/cilium/tetragon/api/v1/tetragon";

/// A message with plain scalar fields.
pub fn message(name: &str, fields: &[&str]) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields
            .iter()
            .zip(1..)
            .map(|(field, number)| FieldDescriptorProto {
                name: Some((*field).to_string()),
                number: Some(number),
                r#type: Some(Type::String as i32),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// A container message with a single union whose members wrap `events`.
/// Member field names are the snake_case of the event names.
pub fn container(name: &str, union: &str, events: &[&str]) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: events
            .iter()
            .zip(1..)
            .map(|(event, number)| FieldDescriptorProto {
                name: Some(snake_case(event)),
                number: Some(number),
                r#type: Some(Type::Message as i32),
                type_name: Some(format!(".tetragon.{event}")),
                oneof_index: Some(0),
                ..Default::default()
            })
            .collect(),
        oneof_decl: vec![OneofDescriptorProto {
            name: Some(union.to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub fn file(messages: Vec<DescriptorProto>) -> File {
    let desc = FileDescriptorProto {
        name: Some("tetragon/events.proto".to_string()),
        package: Some("tetragon".to_string()),
        message_type: messages,
        options: Some(FileOptions {
            go_package: Some(API_IMPORT_PATH.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let options = Options::parse("paths=source_relative").expect("valid options");

    File::new(&desc, &options, true).expect("valid descriptor")
}

fn snake_case(name: &str) -> String {
    let mut out = String::new();
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
