use crate::compliance::domain::Dependency;
use crate::ports::outbound::DependencyLister;
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One object of `go list -m -json` output
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoModule {
    path: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    dir: Option<PathBuf>,
    #[serde(default)]
    replace: Option<Box<GoModule>>,
    #[serde(default)]
    main: bool,
}

/// GoModuleLister adapter listing the modules of a Go project
///
/// Runs `go list -m -json all` in the project directory. The command prints
/// one JSON object per module, concatenated without separators.
pub struct GoModuleLister {
    go_binary: String,
}

impl GoModuleLister {
    pub fn new() -> Self {
        Self {
            go_binary: "go".to_string(),
        }
    }

    /// Uses a specific `go` executable instead of the one on `PATH`
    pub fn with_binary(go_binary: impl Into<String>) -> Self {
        Self {
            go_binary: go_binary.into(),
        }
    }

    fn run_go_list(&self, project_path: &Path) -> Result<String> {
        let output = Command::new(&self.go_binary)
            .args(["list", "-m", "-json", "all"])
            .current_dir(project_path)
            .output()
            .with_context(|| {
                format!(
                    "Failed to run `{} list`. Make sure the Go toolchain is installed and on PATH",
                    self.go_binary
                )
            })?;

        if !output.status.success() {
            anyhow::bail!(
                "`{} list -m -json all` failed in {}: {}",
                self.go_binary,
                project_path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for GoModuleLister {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyLister for GoModuleLister {
    fn list_dependencies(&self, project_path: &Path) -> Result<Vec<Dependency>> {
        let output = self.run_go_list(project_path)?;
        parse_go_list_output(&output)
    }
}

/// Decodes concatenated `go list -m -json` objects into dependencies
///
/// A replaced module keeps its own path but takes the replacement's version
/// and directory. The main module is reported with an empty version.
pub fn parse_go_list_output(output: &str) -> Result<Vec<Dependency>> {
    let stream = serde_json::Deserializer::from_str(output).into_iter::<GoModule>();
    let mut dependencies = Vec::new();

    for module in stream {
        let module = module.context("Failed to parse `go list -m -json` output")?;
        let (version, dir) = match module.replace {
            Some(replacement) => (replacement.version, replacement.dir.or(module.dir)),
            None => (module.version, module.dir),
        };
        let version = if module.main { String::new() } else { version };

        dependencies.push(
            Dependency::new(module.path.clone(), version, dir)
                .with_context(|| format!("Invalid module path {:?}", module.path))?,
        );
    }

    Ok(dependencies)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GO_LIST_OUTPUT: &str = r#"{
	"Path": "example.com/app",
	"Main": true,
	"Dir": "/src/app",
	"GoMod": "/src/app/go.mod",
	"GoVersion": "1.22"
}
{
	"Path": "github.com/acme/widget",
	"Version": "v1.4.0",
	"Time": "2024-01-02T03:04:05Z",
	"Dir": "/go/pkg/mod/github.com/acme/widget@v1.4.0",
	"GoMod": "/go/pkg/mod/cache/download/github.com/acme/widget/@v/v1.4.0.mod"
}
{
	"Path": "golang.org/x/text",
	"Version": "v0.14.0",
	"Replace": {
		"Path": "../text",
		"Dir": "/src/text",
		"GoMod": "/src/text/go.mod"
	},
	"Dir": "/src/text"
}
{
	"Path": "github.com/not/downloaded",
	"Version": "v0.1.0"
}
"#;

    #[test]
    fn test_parse_go_list_output() {
        let deps = parse_go_list_output(GO_LIST_OUTPUT).unwrap();
        assert_eq!(deps.len(), 4);

        assert_eq!(deps[0].name(), "example.com/app");
        assert_eq!(deps[0].version(), "");
        assert_eq!(deps[0].dir(), Some(Path::new("/src/app")));

        assert_eq!(deps[1].name(), "github.com/acme/widget");
        assert_eq!(deps[1].version(), "v1.4.0");

        assert_eq!(deps[2].name(), "golang.org/x/text");
        assert_eq!(deps[2].version(), "");
        assert_eq!(deps[2].dir(), Some(Path::new("/src/text")));

        assert_eq!(deps[3].dir(), None);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_go_list_output("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_output() {
        let err = parse_go_list_output("{\"Path\": ").unwrap_err();
        assert!(err.to_string().contains("go list"));
    }

    #[test]
    fn test_missing_binary_is_reported() {
        let lister = GoModuleLister::with_binary("depcomply-no-such-go-binary");
        let err = lister.list_dependencies(Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("Go toolchain"));
    }
}
