use crate::path;
use derive_more::{Display, From};

/// Go keywords; a sanitized package name may not be one of these.
const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Identifiers predeclared in the Go universe block. Generated files treat
/// them as already-used package names.
pub(crate) const GO_PREDECLARED: &[&str] = &[
    "any",
    "append",
    "bool",
    "byte",
    "cap",
    "clear",
    "close",
    "comparable",
    "complex",
    "complex128",
    "complex64",
    "copy",
    "delete",
    "error",
    "false",
    "float32",
    "float64",
    "imag",
    "int",
    "int16",
    "int32",
    "int64",
    "int8",
    "iota",
    "len",
    "make",
    "max",
    "min",
    "new",
    "nil",
    "panic",
    "print",
    "println",
    "real",
    "recover",
    "rune",
    "string",
    "true",
    "uint",
    "uint16",
    "uint32",
    "uint64",
    "uint8",
    "uintptr",
];

///
/// GoImportPath
///

#[derive(Clone, Debug, Default, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd)]
pub struct GoImportPath(String);

impl GoImportPath {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Import path with `elems` appended, `path.Join` style.
    #[must_use]
    pub fn join(&self, elems: &[&str]) -> Self {
        let mut parts = Vec::with_capacity(elems.len() + 1);
        parts.push(self.as_str());
        parts.extend_from_slice(elems);

        Self(path::join(&parts))
    }

    /// Default package name for this import path.
    #[must_use]
    pub fn package_name(&self) -> GoPackageName {
        GoPackageName::sanitized(path::base(self.as_str()))
    }
}

impl From<&str> for GoImportPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

///
/// GoPackageName
///

#[derive(Clone, Debug, Default, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd)]
pub struct GoPackageName(String);

impl GoPackageName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Turn an arbitrary string into a valid Go package name.
    #[must_use]
    pub fn sanitized(name: &str) -> Self {
        Self(go_sanitized(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// GoIdent
/// a Go identifier together with the import path of the package declaring it
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct GoIdent {
    pub go_name: String,
    pub go_import_path: GoImportPath,
}

impl GoIdent {
    #[must_use]
    pub fn new(go_import_path: impl Into<GoImportPath>, go_name: impl Into<String>) -> Self {
        Self {
            go_name: go_name.into(),
            go_import_path: go_import_path.into(),
        }
    }
}

/// Camel-case a proto name the way protoc-gen-go names Go identifiers.
///
/// `_` followed by a lowercase letter and `.` followed by a lowercase letter
/// are dropped and the letter upper-cased; a leading `_` becomes `X`; other
/// `.` become `_`.
#[must_use]
pub fn go_camel_case(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(s.len());
    let next_is_lower = |i: usize| bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase);

    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b'.' if next_is_lower(i) => {}
            b'.' => out.push(b'_'),
            b'_' if i == 0 || bytes[i - 1] == b'.' => out.push(b'X'),
            b'_' if next_is_lower(i) => {}
            c if c.is_ascii_digit() => out.push(c),
            c => {
                out.push(c.to_ascii_uppercase());
                while next_is_lower(i) {
                    i += 1;
                    out.push(bytes[i]);
                }
            }
        }
        i += 1;
    }

    // only ascii bytes are rewritten, so multi-byte sequences pass through whole
    String::from_utf8(out)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

// go_sanitized
// non letter/digit runes become '_', keywords and non-letter starts get a '_' prefix
fn go_sanitized(s: &str) -> String {
    let mapped: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();

    let starts_with_letter = mapped.chars().next().is_some_and(char::is_alphabetic);
    if GO_KEYWORDS.contains(&mapped.as_str()) || !starts_with_letter {
        format!("_{mapped}")
    } else {
        mapped
    }
}
