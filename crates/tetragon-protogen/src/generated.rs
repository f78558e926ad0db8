use crate::ident::{GO_PREDECLARED, GoIdent, GoImportPath, GoPackageName};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

///
/// GeneratedFile
///
/// Output buffer for one generated Go file. Owns the import bookkeeping for
/// that file: every identifier qualified through it records its package once,
/// and `content` splices the import block in after the package clause.
///

#[derive(Clone, Debug)]
pub struct GeneratedFile {
    filename: String,
    go_import_path: GoImportPath,
    buf: String,
    package_names: BTreeMap<GoImportPath, GoPackageName>,
    used_package_names: BTreeSet<GoPackageName>,
    skip: bool,
}

impl GeneratedFile {
    #[must_use]
    pub fn new(filename: impl Into<String>, go_import_path: impl Into<GoImportPath>) -> Self {
        let used_package_names = GO_PREDECLARED
            .iter()
            .map(|name| GoPackageName::new(*name))
            .collect();

        Self {
            filename: filename.into(),
            go_import_path: go_import_path.into(),
            buf: String::new(),
            package_names: BTreeMap::new(),
            used_package_names,
            skip: false,
        }
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub const fn go_import_path(&self) -> &GoImportPath {
        &self.go_import_path
    }

    /// Write the concatenation of `parts` followed by a newline.
    pub fn p<I, S>(&mut self, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for part in parts {
            self.buf.push_str(part.as_ref());
        }
        self.buf.push('\n');
    }

    /// Write an empty line.
    pub fn newline(&mut self) {
        self.buf.push('\n');
    }

    /// Render `ident` for use inside this file, importing its package if needed.
    ///
    /// Identifiers from the file's own package come back bare. Otherwise the
    /// package is given a local name (its sanitized base name, with a numeric
    /// suffix if already taken) the first time it is seen.
    pub fn qualified_go_ident(&mut self, ident: &GoIdent) -> String {
        if ident.go_import_path == self.go_import_path {
            return ident.go_name.clone();
        }

        if let Some(package) = self.package_names.get(&ident.go_import_path) {
            return format!("{package}.{}", ident.go_name);
        }

        let original = ident.go_import_path.package_name();
        let mut package = original.clone();
        let mut suffix = 1;
        while self.used_package_names.contains(&package) {
            package = GoPackageName::new(format!("{original}{suffix}"));
            suffix += 1;
        }

        debug!(
            file = %self.filename,
            import = %ident.go_import_path,
            package = %package,
            "registered import"
        );

        self.used_package_names.insert(package.clone());
        self.package_names
            .insert(ident.go_import_path.clone(), package.clone());

        format!("{package}.{}", ident.go_name)
    }

    /// Imports recorded so far, ordered by import path.
    pub fn imports(&self) -> impl Iterator<Item = (&GoImportPath, &GoPackageName)> {
        self.package_names.iter()
    }

    /// Drop this file from the plugin response.
    pub const fn skip(&mut self) {
        self.skip = true;
    }

    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        self.skip
    }

    /// Raw buffer, without the import block.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buf
    }

    /// Final file content with the import block inserted after the package clause.
    #[must_use]
    pub fn content(&self) -> String {
        if self.package_names.is_empty() {
            return self.buf.clone();
        }

        let mut block = String::from("\nimport (\n");
        for (path, package) in &self.package_names {
            block.push_str(&format!("\t{package} \"{path}\"\n"));
        }
        block.push_str(")\n");

        let split = package_clause_end(&self.buf);
        let (head, tail) = self.buf.split_at(split);

        let mut out = String::with_capacity(self.buf.len() + block.len());
        out.push_str(head);
        out.push_str(&block);
        out.push_str(tail);

        out
    }
}

// byte offset just past the `package` line, or 0 when there is none
fn package_clause_end(buf: &str) -> usize {
    let mut offset = 0;
    for line in buf.split_inclusive('\n') {
        offset += line.len();
        if line.starts_with("package ") {
            return offset;
        }
    }

    0
}
