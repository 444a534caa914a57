use std::path::{Path, PathBuf};

use crate::config::{self, NamedProvider, TransportKind};
use crate::discovery;
use crate::error::{Result, SkillError};
use crate::render::{PackageFiles, PackageRenderer};

/// Base directory used when no `--output-dir` is given.
pub const DEFAULT_OUTPUT_BASE: &str = "./skills";

/// Inputs of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub config_path: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub server: Option<String>,
}

/// What was written for one provider.
#[derive(Debug, Clone)]
pub struct GeneratedPackage {
    pub name: String,
    pub dir: PathBuf,
    pub transport: TransportKind,
    pub tool_count: usize,
    /// The provider could not be introspected and the placeholder was used.
    pub degraded: bool,
    pub files: PackageFiles,
}

/// Convert every selected provider of a config file into a skill package.
///
/// Providers are processed one after another; a provider that cannot be
/// reached still gets a package built around the placeholder tool.
pub async fn generate(options: &GenerateOptions) -> Result<Vec<GeneratedPackage>> {
    let providers = config::load_providers(&options.config_path)?;
    let providers = config::select_provider(providers, options.server.as_deref())?;
    for provider in &providers {
        validate_name(&provider.name)?;
    }

    tracing::info!(count = providers.len(), "Converting {} server(s)", providers.len());

    let renderer = PackageRenderer::new()?;
    let single = providers.len() == 1;
    let mut packages = Vec::with_capacity(providers.len());
    for provider in &providers {
        let dest = destination(options.output_dir.as_deref(), &provider.name, single);
        packages.push(generate_package(&renderer, provider, &dest).await?);
    }
    Ok(packages)
}

/// Introspect one provider and write its package into `dest`.
pub async fn generate_package(
    renderer: &PackageRenderer,
    provider: &NamedProvider,
    dest: &Path,
) -> Result<GeneratedPackage> {
    let transport = provider.config.transport();
    tracing::info!(
        provider = %provider.name,
        transport = %transport,
        "Generating skill for MCP server: {} (transport: {})",
        provider.name,
        transport
    );

    let catalog = discovery::discover(&provider.config).await;
    let files = renderer.write_package(dest, &provider.name, &provider.config, &catalog)?;

    tracing::info!(
        provider = %provider.name,
        dir = %dest.display(),
        tools = catalog.len(),
        "Skill generated"
    );

    Ok(GeneratedPackage {
        name: provider.name.clone(),
        dir: dest.to_path_buf(),
        transport,
        tool_count: catalog.len(),
        degraded: catalog.is_placeholder(),
        files,
    })
}

/// A lone provider goes straight into `--output-dir`; otherwise each one
/// gets `<base>/<name>`.
pub fn destination(output_dir: Option<&Path>, name: &str, single: bool) -> PathBuf {
    match output_dir {
        Some(dir) if single => dir.to_path_buf(),
        Some(dir) => dir.join(name),
        None => Path::new(DEFAULT_OUTPUT_BASE).join(name),
    }
}

/// Provider names become directory names.
fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name must not be empty"
    } else if name == "." || name == ".." {
        "name must not be a relative path component"
    } else if name.contains(['/', '\\']) {
        "name must not contain path separators"
    } else {
        return Ok(());
    };
    Err(SkillError::InvalidProvider {
        name: name.to_string(),
        reason: reason.into(),
    })
}
