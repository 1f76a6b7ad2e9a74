//! Generate command: model XML to nested config XML and metadata JSON.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::Settings;
use crate::export::{CardinalityPolicy, MetadataExporter};
use crate::index::RelationIndex;
use crate::io::{self, XmlOptions};
use crate::tree::TreeBuilder;

/// Inputs of one generate run, resolved from CLI flags and settings.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: PathBuf,
    pub root: String,
    pub out_dir: PathBuf,
    pub config_xml: String,
    pub metadata: String,
    pub policy: CardinalityPolicy,
    pub xml: XmlOptions,
}

impl GenerateRequest {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            model: settings.input_path(&settings.files.model),
            root: settings.model.root_class.clone(),
            out_dir: settings.output_dir.clone(),
            config_xml: settings.files.config_xml.clone(),
            metadata: settings.files.metadata.clone(),
            policy: settings.model.cardinality,
            xml: settings.model.xml_options(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub config_xml: PathBuf,
    pub metadata: PathBuf,
    pub classes: usize,
    pub rendered: usize,
}

/// Build both outputs in memory first; nothing touches the output directory
/// unless indexing, tree building, export and rendering all succeed.
pub fn generate(request: &GenerateRequest) -> anyhow::Result<GenerateSummary> {
    let elements = io::load_model(&request.model)
        .with_context(|| format!("Cannot read model {}", request.model.display()))?;
    let index = RelationIndex::build(elements)
        .with_context(|| format!("Malformed model {}", request.model.display()))?;

    let tree = TreeBuilder::new(&index).build(&request.root)?;
    let records = MetadataExporter::new(&index)
        .with_policy(request.policy)
        .export()?;
    let xml = io::render_tree(&tree, &request.xml)?;
    let json = io::to_json_string(&records)?;

    io::prepare_output_dir(&request.out_dir)?;
    let config_xml = request.out_dir.join(&request.config_xml);
    let metadata = request.out_dir.join(&request.metadata);
    write(&config_xml, &xml)?;
    write(&metadata, &json)?;

    Ok(GenerateSummary {
        config_xml,
        metadata,
        classes: index.len(),
        rendered: tree.node_count(),
    })
}

fn write(path: &Path, content: &str) -> anyhow::Result<()> {
    io::write_string(path, content)?;
    tracing::info!("[generate] wrote {}", path.display());
    Ok(())
}

/// Run generate command with CLI overrides applied on top of settings.
pub fn run_generate(
    settings: &Settings,
    model: Option<PathBuf>,
    root: Option<String>,
    out: Option<PathBuf>,
    cardinality: Option<CardinalityPolicy>,
) -> anyhow::Result<GenerateSummary> {
    let mut request = GenerateRequest::from_settings(settings);
    if let Some(model) = model {
        request.model = model;
    }
    if let Some(root) = root {
        request.root = root;
    }
    if let Some(out) = out {
        request.out_dir = out;
    }
    if let Some(policy) = cardinality {
        request.policy = policy;
    }

    let summary = generate(&request)?;
    println!(
        "Generated {} ({} of {} classes under '{}')",
        summary.config_xml.display(),
        summary.rendered,
        summary.classes,
        request.root
    );
    println!("Metadata written to {}", summary.metadata.display());
    Ok(summary)
}
