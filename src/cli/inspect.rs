//! Print the resolved metadata of a module descriptor.
//!
//! The report lists identity and status, every resolved configuration with
//! its hierarchy, artifacts and dependencies, and every explicit variant.
//! With `--immutable` the report is taken from a frozen snapshot instead of
//! the mutable container; both must agree.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::debug;

use crate::core::ImmutableAttributes;
use crate::descriptor::{self, LoadedMetadata};
use crate::metadata::{ComponentResolveMetadata, ModuleFlavor, MutableModuleResolveMetadata};
use crate::model::{ComponentArtifactMetadata, ModuleDependencyMetadata};

/// Output format for reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Coloured, human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Arguments of `modmeta inspect`.
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Module descriptor to load
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Report from an immutable snapshot of the metadata
    #[arg(long)]
    pub immutable: bool,
}

impl InspectCommand {
    /// Load the descriptor and print the report.
    pub async fn execute(self) -> Result<()> {
        let loaded = descriptor::load(&self.descriptor).await?;
        let report = match &loaded {
            LoadedMetadata::Maven(metadata) => self.report(metadata),
            LoadedMetadata::Ivy(metadata) => self.report(metadata),
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print!("{}", report.render_text()),
        }
        Ok(())
    }

    fn report<F: ModuleFlavor>(&self, metadata: &MutableModuleResolveMetadata<F>) -> ModuleReport {
        if self.immutable {
            debug!("Reporting from an immutable snapshot");
            ModuleReport::new(&metadata.as_immutable(), metadata.flavor().kind())
        } else {
            ModuleReport::new(metadata, metadata.flavor().kind())
        }
    }
}

/// Serializable summary of one module version.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    pub component: String,
    pub kind: String,
    pub status: String,
    pub status_scheme: Vec<String>,
    pub changing: bool,
    pub missing: bool,
    pub source: Option<String>,
    pub content_hash: String,
    /// Whether explicit variants replace the configuration table for graph traversal
    pub explicit_variants: bool,
    pub configurations: Vec<ConfigurationReport>,
    pub variants: Vec<VariantReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationReport {
    pub name: String,
    pub extends: Vec<String>,
    pub hierarchy: Vec<String>,
    pub transitive: bool,
    pub visible: bool,
    pub artifacts: Vec<String>,
    pub dependencies: Vec<DependencyReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DependencyReport {
    pub target: String,
    pub transitive: bool,
    pub excludes: Vec<String>,
}

impl From<&ModuleDependencyMetadata> for DependencyReport {
    fn from(dependency: &ModuleDependencyMetadata) -> Self {
        Self {
            target: dependency.selector.to_string(),
            transitive: dependency.transitive,
            excludes: dependency.excludes.iter().map(|e| format!("{}:{}", e.group, e.module)).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantReport {
    pub name: String,
    pub attributes: ImmutableAttributes,
    pub artifacts: Vec<String>,
    /// Dependencies after rules ran
    pub dependencies: Vec<DependencyReport>,
}

impl ModuleReport {
    /// Summarise any metadata view.
    pub fn new(metadata: &impl ComponentResolveMetadata, kind: &str) -> Self {
        let configurations = metadata
            .configurations()
            .values()
            .map(|c| ConfigurationReport {
                name: c.name().to_string(),
                extends: c.parents().iter().map(|p| p.name().to_string()).collect(),
                hierarchy: c.hierarchy().to_vec(),
                transitive: c.is_transitive(),
                visible: c.is_visible(),
                artifacts: c.artifacts().iter().map(|a| a.name.to_string()).collect(),
                dependencies: c.dependencies().iter().map(DependencyReport::from).collect(),
            })
            .collect();

        let variants = metadata
            .variants_for_graph_traversal()
            .iter()
            .map(|v| VariantReport {
                name: v.name().to_string(),
                attributes: v.attributes().clone(),
                artifacts: v.artifacts().iter().map(artifact_label).collect(),
                dependencies: v.dependencies().iter().map(DependencyReport::from).collect(),
            })
            .collect();

        Self {
            component: metadata.component_id().to_string(),
            kind: kind.to_string(),
            status: metadata.status().to_string(),
            status_scheme: metadata.status_scheme().to_vec(),
            changing: metadata.is_changing(),
            missing: metadata.is_missing(),
            source: metadata.source().map(|s| s.describe()),
            content_hash: metadata.content_hash().to_string(),
            explicit_variants: !metadata.variants().is_empty(),
            configurations,
            variants,
        }
    }

    /// Render the report as coloured text.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} ({}, {})",
            self.component.bold(),
            self.kind,
            self.status.cyan()
        );
        if let Some(source) = &self.source {
            let _ = writeln!(out, "  source: {source}");
        }
        let _ = writeln!(out, "  content: {}", self.content_hash.dimmed());
        let _ = writeln!(out, "  status scheme: {}", self.status_scheme.join(" < "));
        if self.changing {
            let _ = writeln!(out, "  {}", "changing".yellow());
        }
        if self.missing {
            let _ = writeln!(out, "  {}", "missing descriptor".yellow());
        }

        let _ = writeln!(out, "\n{}", "Configurations:".bold());
        for configuration in &self.configurations {
            let mut flags = Vec::new();
            if !configuration.transitive {
                flags.push("intransitive");
            }
            if !configuration.visible {
                flags.push("private");
            }
            let _ = write!(out, "  {}", configuration.name.green());
            if !configuration.extends.is_empty() {
                let _ = write!(out, " extends {}", configuration.extends.join(", "));
            }
            if !flags.is_empty() {
                let _ = write!(out, " [{}]", flags.join(", "));
            }
            let _ = writeln!(out);
            for artifact in &configuration.artifacts {
                let _ = writeln!(out, "    artifact {artifact}");
            }
            for dependency in &configuration.dependencies {
                write_dependency(&mut out, dependency);
            }
        }

        if self.explicit_variants {
            let _ = writeln!(out, "\n{}", "Variants:".bold());
            for variant in &self.variants {
                let _ = writeln!(out, "  {} {}", variant.name.green(), variant.attributes);
                for artifact in &variant.artifacts {
                    let _ = writeln!(out, "    file {artifact}");
                }
                for dependency in &variant.dependencies {
                    write_dependency(&mut out, dependency);
                }
            }
        }
        out
    }
}

fn write_dependency(out: &mut String, dependency: &DependencyReport) {
    let _ = write!(out, "    depends on {}", dependency.target);
    if !dependency.transitive {
        let _ = write!(out, " (intransitive)");
    }
    if !dependency.excludes.is_empty() {
        let _ = write!(out, " excluding {}", dependency.excludes.join(", "));
    }
    let _ = writeln!(out);
}

fn artifact_label(artifact: &ComponentArtifactMetadata) -> String {
    match artifact {
        ComponentArtifactMetadata::Module(a) => a.name.to_string(),
        ComponentArtifactMetadata::UrlBacked(a) => a.file_name.clone(),
    }
}
