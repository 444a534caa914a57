//! Renders the on-disk skill package: capability manifest, executor script
//! and persisted provider configuration. No session I/O happens here.

use std::path::{Path, PathBuf};

use minijinja::{context, Environment};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::{ProviderConfig, ProviderKind, CONFIG_FILE_NAME};
use crate::error::{Result, SkillError};

pub const MANIFEST_FILE_NAME: &str = "SKILL.md";
pub const EXECUTOR_FILE_NAME: &str = "executor";

const MANIFEST_TEMPLATE: &str = "SKILL.md";
const STDIO_EXECUTOR_TEMPLATE: &str = "executor-stdio.sh";
const HTTP_EXECUTOR_TEMPLATE: &str = "executor-http.sh";

/// Binary name used when the running executable cannot be located.
const FALLBACK_BINARY: &str = "mcp-skill";

#[derive(Serialize)]
struct ToolLine {
    name: String,
    description: String,
}

/// Paths of the files written for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFiles {
    pub manifest: PathBuf,
    pub executor: PathBuf,
    pub config: PathBuf,
}

pub struct PackageRenderer {
    env: Environment<'static>,
    /// Binary the executor runs unless `MCP_SKILL_BIN` overrides it.
    executor_bin: String,
}

impl PackageRenderer {
    /// Renderer whose executors fall back to the currently running binary.
    pub fn new() -> Result<Self> {
        let executor_bin = match std::env::current_exe() {
            Ok(path) => path.to_string_lossy().into_owned(),
            Err(e) => {
                tracing::warn!(error = %e, "Cannot locate own executable, executors will rely on PATH");
                FALLBACK_BINARY.to_string()
            }
        };
        Self::with_executor_bin(executor_bin)
    }

    pub fn with_executor_bin(executor_bin: impl Into<String>) -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        for (name, source) in [
            (MANIFEST_TEMPLATE, include_str!("../templates/SKILL.md.j2")),
            (STDIO_EXECUTOR_TEMPLATE, include_str!("../templates/executor-stdio.sh.j2")),
            (HTTP_EXECUTOR_TEMPLATE, include_str!("../templates/executor-http.sh.j2")),
        ] {
            env.add_template(name, source)
                .map_err(|source| SkillError::Render { template: name, source })?;
        }
        Ok(Self {
            env,
            executor_bin: executor_bin.into(),
        })
    }

    /// The human/agent-facing capability manifest.
    pub fn render_manifest(&self, name: &str, catalog: &Catalog) -> Result<String> {
        let tools: Vec<ToolLine> = catalog
            .iter()
            .map(|t| ToolLine {
                name: single_line(&t.name),
                description: single_line(t.description.as_deref().unwrap_or("No description")),
            })
            .collect();
        self.render(
            MANIFEST_TEMPLATE,
            context! {
                name => single_line(name),
                tool_count => catalog.len(),
                tools => tools,
                version => env!("CARGO_PKG_VERSION"),
            },
        )
    }

    /// The executor script, shaped after the provider's transport.
    pub fn render_executor(&self, name: &str, config: &ProviderConfig) -> Result<String> {
        let (template, endpoint) = match config.kind() {
            ProviderKind::Stdio(p) => {
                let mut line = vec![p.command.as_str()];
                line.extend(p.args.iter().map(String::as_str));
                (STDIO_EXECUTOR_TEMPLATE, line.join(" "))
            }
            ProviderKind::Http(p) => (HTTP_EXECUTOR_TEMPLATE, p.url.clone()),
        };
        self.render(
            template,
            context! {
                name => single_line(name),
                endpoint => single_line(&endpoint),
                config_file => CONFIG_FILE_NAME,
                default_bin => shell_single_quote(&self.executor_bin),
                version => env!("CARGO_PKG_VERSION"),
            },
        )
    }

    /// Write the full package into `dest`, creating it if needed.
    pub fn write_package(
        &self,
        dest: &Path,
        name: &str,
        config: &ProviderConfig,
        catalog: &Catalog,
    ) -> Result<PackageFiles> {
        std::fs::create_dir_all(dest).map_err(|e| SkillError::io(dest, e))?;

        let files = PackageFiles {
            manifest: dest.join(MANIFEST_FILE_NAME),
            executor: dest.join(EXECUTOR_FILE_NAME),
            config: dest.join(CONFIG_FILE_NAME),
        };

        write_file(&files.manifest, &self.render_manifest(name, catalog)?)?;
        tracing::debug!(path = %files.manifest.display(), "Generated manifest");

        write_file(&files.executor, &self.render_executor(name, config)?)?;
        make_executable(&files.executor)?;
        tracing::debug!(path = %files.executor.display(), "Generated executor");

        config.persist(&files.config)?;
        tracing::debug!(path = %files.config.display(), "Generated config");

        Ok(files)
    }

    fn render(&self, template: &'static str, ctx: minijinja::Value) -> Result<String> {
        self.env
            .get_template(template)
            .and_then(|t| t.render(ctx))
            .map_err(|source| SkillError::Render { template, source })
    }
}

/// Values interpolated into shell comments or one-line manifest entries
/// must not break out of the line.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Quote a value as a single POSIX shell word.
fn shell_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| SkillError::io(path, e))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| SkillError::io(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
