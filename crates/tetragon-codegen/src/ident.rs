use crate::config::Project;
use tetragon_protogen::{GeneratedFile, GoIdent, path};

/// Logger package, relative to the project root.
pub const LOGGER_PACKAGE: &str = "pkg/logger";

/// Qualified Go identifier for `name` in the package at `import_path`.
/// Imports the package into `g` as a side effect.
pub fn go_ident(g: &mut GeneratedFile, import_path: &str, name: &str) -> String {
    g.qualified_go_ident(&GoIdent::new(import_path, name))
}

/// [`go_ident`] for a package inside the Tetragon module.
pub fn tetragon_ident(g: &mut GeneratedFile, import_path: &str, name: &str) -> String {
    Project::TETRAGON.ident(g, import_path, name)
}

/// [`go_ident`] for the Tetragon API package.
pub fn tetragon_api_ident(g: &mut GeneratedFile, name: &str) -> String {
    Project::TETRAGON.api_ident(g, name)
}

/// Call expression for the project logger, e.g. `logger.GetLogger()`.
pub fn logger(g: &mut GeneratedFile) -> String {
    Project::TETRAGON.logger(g)
}

/// Call expression `fmt.Errorf("<format>", args...)`.
pub fn fmt_errorf(g: &mut GeneratedFile, format: &str, args: &[&str]) -> String {
    let errorf = go_ident(g, "fmt", "Errorf");
    let quoted = format!("\"{format}\"");

    let mut all = Vec::with_capacity(args.len() + 1);
    all.push(quoted.as_str());
    all.extend_from_slice(args);

    format!("{errorf}({})", all.join(", "))
}

impl Project {
    /// Import path of `import_path` inside this project.
    #[must_use]
    pub fn import_path(&self, import_path: &str) -> String {
        path::join(&[&*self.package_path, import_path])
    }

    pub fn ident(&self, g: &mut GeneratedFile, import_path: &str, name: &str) -> String {
        go_ident(g, &self.import_path(import_path), name)
    }

    pub fn api_ident(&self, g: &mut GeneratedFile, name: &str) -> String {
        self.ident(g, &self.api_package, name)
    }

    pub fn logger(&self, g: &mut GeneratedFile) -> String {
        format!("{}()", self.ident(g, LOGGER_PACKAGE, "GetLogger"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::borrow::Cow;

    fn out_file() -> GeneratedFile {
        GeneratedFile::new(
            "api/v1/tetragon/codegen/helpers/helpers.pb.go",
            "github.com/cilium/tetragon/api/v1/tetragon/codegen/helpers",
        )
    }

    #[test]
    fn api_ident_imports_api_package() {
        let mut g = out_file();

        let name = tetragon_api_ident(&mut g, "ProcessExec");

        assert_eq!(name, "tetragon.ProcessExec");
        let imports: Vec<_> = g.imports().map(|(p, n)| (p.as_str(), n.as_str())).collect();
        assert_eq!(
            imports,
            [("github.com/cilium/tetragon/api/v1/tetragon", "tetragon")]
        );
    }

    #[test]
    fn tetragon_ident_joins_project_root() {
        let mut g = out_file();

        let name = tetragon_ident(&mut g, "pkg/reader/node/", "GetNodeNameForExport");

        assert_eq!(name, "node.GetNodeNameForExport");
        assert_eq!(
            g.imports().next().map(|(p, _)| p.as_str()),
            Some("github.com/cilium/tetragon/pkg/reader/node")
        );
    }

    #[test]
    fn ident_in_own_package_is_bare() {
        let mut g = GeneratedFile::new("x.pb.go", "github.com/cilium/tetragon/api/v1/tetragon");

        assert_eq!(tetragon_api_ident(&mut g, "ProcessExec"), "ProcessExec");
        assert_eq!(g.imports().count(), 0);
    }

    #[test]
    fn logger_call() {
        let mut g = out_file();

        assert_eq!(logger(&mut g), "logger.GetLogger()");
    }

    #[test]
    fn errorf_call_quotes_format_only() {
        let mut g = out_file();

        let call = fmt_errorf(&mut g, "unknown event %T", &["event"]);

        assert_eq!(call, "fmt.Errorf(\"unknown event %T\", event)");
        assert_eq!(fmt_errorf(&mut g, "empty", &[]), "fmt.Errorf(\"empty\")");
    }

    #[test]
    fn custom_project_root() {
        let project = Project {
            package_path: Cow::Borrowed("example.com/agent"),
            api_package: Cow::Borrowed("api/v2"),
            ..Project::TETRAGON
        };
        let mut g = out_file();

        assert_eq!(project.api_ident(&mut g, "Event"), "v2.Event");
        assert_eq!(project.import_path("pkg/x"), "example.com/agent/pkg/x");
    }

    proptest! {
        #[test]
        fn qualification_is_deterministic(
            segments in prop::collection::vec("[a-z][a-z0-9]{0,7}", 1..4),
            name in "[A-Z][A-Za-z0-9]{0,12}",
        ) {
            let import_path = segments.join("/");
            let mut first = out_file();
            let mut second = out_file();

            let a = go_ident(&mut first, &import_path, &name);
            let b = go_ident(&mut second, &import_path, &name);
            let again = go_ident(&mut first, &import_path, &name);

            prop_assert_eq!(&a, &b);
            prop_assert_eq!(&a, &again);
            prop_assert_eq!(first.imports().count(), second.imports().count());
        }
    }
}
