use crate::config::Project;
use tetragon_protogen::{File, GeneratedFile, GoImportPath, Plugin, path};
use tracing::info;

/// Directory, next to the source's generated files, that holds codegen packages.
pub const CODEGEN_DIR: &str = "codegen";

/// Create a new codegen package and file in the project.
pub fn new_generated_file<'a>(
    plugin: &'a mut Plugin,
    file: &File,
    pkg: &str,
) -> &'a mut GeneratedFile {
    Project::TETRAGON.new_generated_file(plugin, file, pkg)
}

/// Output path `dirname(prefix)/codegen/<pkg>/<pkg>.pb.go`.
#[must_use]
pub fn generated_file_path(prefix: &str, pkg: &str) -> String {
    let dir = prefix.strip_suffix(path::base(prefix)).unwrap_or(prefix);
    let file_name = format!("{pkg}.pb.go");

    path::join(&[dir, CODEGEN_DIR, pkg, &file_name])
}

/// Go import path of the codegen package `pkg` under `import_path`.
#[must_use]
pub fn codegen_import_path(import_path: &GoImportPath, pkg: &str) -> GoImportPath {
    import_path.join(&[CODEGEN_DIR, pkg])
}

impl Project {
    pub fn new_generated_file<'a>(
        &self,
        plugin: &'a mut Plugin,
        file: &File,
        pkg: &str,
    ) -> &'a mut GeneratedFile {
        let import_path = codegen_import_path(&file.go_import_path, pkg);
        let file_name = generated_file_path(&file.generated_filename_prefix, pkg);
        info!(path = %file_name, "creating generated file");

        let g = plugin.new_generated_file(file_name, import_path);
        self.write_preamble(g, pkg);

        g
    }

    /// License header, generated-code marker and package clause.
    pub fn write_preamble(&self, g: &mut GeneratedFile, pkg: &str) {
        g.p([&*self.copyright_header]);
        g.newline();

        g.p([
            "// Code generated by ",
            &*self.plugin_name,
            ". DO NOT EDIT",
        ]);
        g.newline();

        g.p(["package ", pkg]);
        g.newline();
    }
}
