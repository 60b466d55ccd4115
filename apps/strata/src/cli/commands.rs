//! # CLI Command Implementations
//!
//! Every command writes its result to stdout, as text or (with
//! `--json-mode`) as pretty-printed JSON. Logs go to stderr.

use super::{Context, Outcome};
use crate::config::{DEFAULT_REQUIREMENTS_TOML, read_fingerprint_file, validate_output_path};
use serde::Serialize;
use std::path::Path;
use strata_core::levers::{capabilities_by_category, position_index};
use strata_core::{
    CAPABILITY_LEVERS, CONSTRAINT_LEVERS, CanonicalArchitecture, CapabilityCategory,
    ComponentDetail, ComponentId, ComposedArchitecture, DiagramNode, Layer, LayerType,
    SLIDER_LEVERS, SnippetKind, StrataError, canonical_checksum, canonical_crypto_hash,
    component_for_node, export_canonical, import_canonical,
};

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), StrataError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| StrataError::SerializationError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

/// Diagram labels carry line breaks for rendering; flatten them for a terminal.
fn one_line(label: &str) -> String {
    label.replace('\n', " ")
}

fn layer_ids(layers: &[&Layer]) -> Vec<String> {
    layers.iter().map(|l| l.id.clone()).collect()
}

// =============================================================================
// COMPOSE COMMAND
// =============================================================================

/// Compose and describe the architecture.
pub fn cmd_compose(ctx: &Context) -> Result<Outcome, StrataError> {
    let arch = ctx.compose();

    if ctx.json_mode {
        print_json(&arch)?;
        return Ok(Outcome::Done);
    }

    println!("Strata Architecture");
    println!("===================");
    println!("{}", arch.summary());
    println!();
    println!("Complexity: {}", arch.complexity);
    println!();

    println!("Layers:");
    print_layer_rows(&arch);
    println!();

    let profile = &arch.volume_profile;
    println!("Volume Profile ({}):", profile.tier);
    println!("  Replicas:      {}", profile.replicas);
    println!("  Placement:     {}", profile.placement);
    if arch.needs_load_balancer {
        println!("  Load Balancer: {}", profile.load_balancer_type);
    }

    if !arch.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &arch.warnings {
            println!("  ! {}", warning);
        }
    }

    if !arch.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for rec in &arch.recommendations {
            println!("  - {}", rec);
        }
    }

    if ctx.verbose {
        println!();
        println!("Capabilities: {}", arch.capabilities().join(", "));
    }

    Ok(Outcome::Done)
}

fn print_layer_rows(arch: &ComposedArchitecture<'_>) {
    let rows = arch
        .edge
        .iter()
        .chain(arch.processing_or_none())
        .chain(std::iter::once(&arch.buffering));

    for layer in rows {
        println!(
            "  {:<11} {:<17} {}",
            layer.layer_type.as_str(),
            layer.id,
            layer.name
        );
    }
}

// =============================================================================
// DIAGRAM COMMAND
// =============================================================================

#[derive(Serialize)]
struct NodeRow<'a> {
    #[serde(flatten)]
    node: &'a DiagramNode,
    component: Option<&'static str>,
}

/// Show the diagram graph, annotated with component references.
pub fn cmd_diagram(ctx: &Context) -> Result<Outcome, StrataError> {
    let arch = ctx.compose();
    let graph = &arch.diagram;

    if ctx.json_mode {
        let nodes: Vec<_> = graph
            .nodes
            .iter()
            .map(|node| NodeRow {
                node,
                component: component_for_node(node.kind).map(|c| c.as_str()),
            })
            .collect();
        let output = serde_json::json!({
            "nodes": nodes,
            "edges": graph.edges,
        });
        print_json(&output)?;
        return Ok(Outcome::Done);
    }

    println!("Nodes:");
    for node in &graph.nodes {
        let component = component_for_node(node.kind)
            .map(|c| format!("  ({})", c.name()))
            .unwrap_or_default();
        println!(
            "  {:<18} {:<13} {}{}",
            node.id,
            format!("[{}]", node.kind.as_str()),
            one_line(&node.label),
            component
        );
    }

    println!();
    println!("Edges:");
    for edge in &graph.edges {
        match &edge.label {
            Some(label) => println!("  {} -> {} [{}]", edge.from, edge.to, one_line(label)),
            None => println!("  {} -> {}", edge.from, edge.to),
        }
    }

    if ctx.verbose {
        let mut seen = Vec::new();
        for component in graph.nodes.iter().filter_map(|n| component_for_node(n.kind)) {
            if !seen.contains(&component) {
                seen.push(component);
            }
        }
        println!();
        println!("Components:");
        for component in seen {
            println!("  {}: {}", component.name(), component.short_description());
        }
    }

    Ok(Outcome::Done)
}

// =============================================================================
// CONFIG COMMAND
// =============================================================================

/// Show merged config snippets.
pub fn cmd_config(ctx: &Context, kind: Option<SnippetKind>) -> Result<Outcome, StrataError> {
    let arch = ctx.compose();
    let snippets = &arch.config_snippets;

    if let Some(kind) = kind {
        let text = snippets.get(kind);
        if ctx.json_mode {
            print_json(&serde_json::json!({ kind.as_str(): text }))?;
        } else if let Some(text) = text {
            println!("{}", text);
        } else {
            println!("No {} configuration for this architecture", kind.as_str());
        }
        return Ok(if text.is_some() {
            Outcome::Done
        } else {
            Outcome::Absent
        });
    }

    if ctx.json_mode {
        print_json(snippets)?;
        return Ok(Outcome::Done);
    }

    let mut first = true;
    for kind in SnippetKind::ALL {
        if let Some(text) = snippets.get(kind) {
            if !first {
                println!();
            }
            first = false;
            println!("# ---------------------------------------------------------------");
            println!("# {}", kind.as_str());
            println!("# ---------------------------------------------------------------");
            println!("{}", text);
        }
    }

    Ok(Outcome::Done)
}

// =============================================================================
// LAYERS COMMAND
// =============================================================================

/// List the catalog.
pub fn cmd_layers(ctx: &Context, layer_type: Option<LayerType>) -> Result<Outcome, StrataError> {
    let catalog = ctx.catalog();
    let types: Vec<LayerType> = match layer_type {
        Some(t) => vec![t],
        None => LayerType::ALL.to_vec(),
    };

    if ctx.json_mode {
        let layers: Vec<&Layer> = types
            .iter()
            .flat_map(|t| catalog.layers_by_type(*t))
            .collect();
        print_json(&layers)?;
        return Ok(Outcome::Done);
    }

    for (i, t) in types.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} layers:", t);
        for layer in catalog.layers_by_type(*t) {
            println!("  {:<17} {}", layer.id, layer.name);
            if ctx.verbose {
                println!("      {}", layer.description);
                if !layer.provides().is_empty() {
                    println!("      provides: {}", layer.provides().join(", "));
                }
                if !layer.requires().is_empty() {
                    println!("      requires: {}", layer.requires().join(", "));
                }
            }
        }
    }

    Ok(Outcome::Done)
}

// =============================================================================
// LEVERS COMMAND
// =============================================================================

/// Show decision levers with their positions for the resolved requirements.
pub fn cmd_levers(ctx: &Context) -> Result<Outcome, StrataError> {
    let req = &ctx.requirements;

    if ctx.json_mode {
        let sliders: Vec<_> = SLIDER_LEVERS
            .iter()
            .map(|lever| {
                serde_json::json!({
                    "lever": lever,
                    "current": position_index(lever, lever.current(req)),
                })
            })
            .collect();
        let capabilities = CAPABILITY_LEVERS
            .iter()
            .map(|lever| {
                Ok(serde_json::json!({
                    "lever": lever,
                    "enabled": req.capability(lever.id)?,
                }))
            })
            .collect::<Result<Vec<_>, StrataError>>()?;
        let constraints = CONSTRAINT_LEVERS
            .iter()
            .map(|lever| {
                Ok(serde_json::json!({
                    "lever": lever,
                    "enabled": req.capability(lever.id)?,
                }))
            })
            .collect::<Result<Vec<_>, StrataError>>()?;

        print_json(&serde_json::json!({
            "sliders": sliders,
            "capabilities": capabilities,
            "constraints": constraints,
        }))?;
        return Ok(Outcome::Done);
    }

    for lever in SLIDER_LEVERS {
        let current = position_index(lever, lever.current(req));
        println!("{} ({}): {}", lever.name, lever.id, lever.description);
        for (i, position) in lever.positions.iter().enumerate() {
            let marker = if i == current { '*' } else { ' ' };
            println!(
                "  {} {:<14} {:<11} {}",
                marker,
                position.label,
                position.value.to_string(),
                position.description
            );
        }
        println!();
    }

    for category in CapabilityCategory::ALL {
        println!("Capabilities: {}", category);
        for lever in capabilities_by_category(category) {
            let mark = if req.capability(lever.id)? { 'x' } else { ' ' };
            println!("  [{}] {:<15} {}", mark, lever.id, lever.name);
            if ctx.verbose {
                println!("        {}", lever.impact);
            }
        }
        println!();
    }

    println!("Constraints:");
    for lever in &CONSTRAINT_LEVERS {
        let mark = if req.capability(lever.id)? { 'x' } else { ' ' };
        println!("  [{}] {:<22} {}", mark, lever.id, lever.name);
        if ctx.verbose {
            println!("        {}", lever.impact);
        }
    }

    Ok(Outcome::Done)
}

// =============================================================================
// CAPABILITIES COMMAND
// =============================================================================

/// List capabilities, or check for one.
pub fn cmd_capabilities(ctx: &Context, check: Option<&str>) -> Result<Outcome, StrataError> {
    let arch = ctx.compose();

    if let Some(capability) = check {
        let provided = arch.provides(capability);
        tracing::debug!(capability, provided, "capability check");
        if ctx.json_mode {
            print_json(&serde_json::json!({
                "capability": capability,
                "provided": provided,
            }))?;
        } else {
            println!("{}: {}", capability, if provided { "yes" } else { "no" });
        }
        return Ok(if provided {
            Outcome::Done
        } else {
            Outcome::Absent
        });
    }

    let capabilities = arch.capabilities();
    if ctx.json_mode {
        print_json(&capabilities)?;
    } else {
        for capability in capabilities {
            println!("{}", capability);
        }
    }
    Ok(Outcome::Done)
}

// =============================================================================
// FINGERPRINT COMMAND
// =============================================================================

/// Show the canonical checksum and BLAKE3 hash, optionally exporting the
/// canonical encoding or verifying a stored one.
pub fn cmd_fingerprint(
    ctx: &Context,
    export: Option<&Path>,
    verify: Option<&Path>,
) -> Result<Outcome, StrataError> {
    let arch = ctx.compose();

    if let Some(path) = verify {
        return verify_fingerprint(ctx, &arch, path);
    }

    let bytes = export_canonical(&arch)?;
    let checksum = canonical_checksum(&arch);
    let hash = canonical_crypto_hash(&arch)?;

    if let Some(path) = export {
        let validated = validate_output_path(path)?;
        std::fs::write(&validated, &bytes)
            .map_err(|e| StrataError::IoError(format!("Write file: {}", e)))?;
        tracing::info!(path = %validated.display(), bytes = bytes.len(), "exported fingerprint");
    }

    if ctx.json_mode {
        print_json(&serde_json::json!({
            "checksum": format!("{:016x}", checksum),
            "blake3": hash,
            "bytes": bytes.len(),
            "edge": layer_ids(&arch.edge),
            "processing": layer_ids(&arch.processing),
            "buffering": arch.buffering.id,
        }))?;
        return Ok(Outcome::Done);
    }

    println!("Checksum: {:016x}", checksum);
    println!("BLAKE3:   {}", hash);
    println!("Size:     {} bytes", bytes.len());
    if let Some(path) = export {
        println!("Exported: {}", path.display());
    }

    Ok(Outcome::Done)
}

fn verify_fingerprint(
    ctx: &Context,
    arch: &ComposedArchitecture<'_>,
    path: &Path,
) -> Result<Outcome, StrataError> {
    let data = read_fingerprint_file(path)?;
    // Invalid data fails here, before any comparison.
    let stored = import_canonical(&data)?;
    let current = CanonicalArchitecture::from_architecture(arch);
    let matches = stored == current;
    tracing::debug!(path = %path.display(), matches, "verified fingerprint");

    if ctx.json_mode {
        print_json(&serde_json::json!({
            "matches": matches,
            "stored_checksum": format!("{:016x}", stored.checksum()),
            "current_checksum": format!("{:016x}", current.checksum()),
        }))?;
    } else if matches {
        println!("Fingerprint matches ({:016x})", current.checksum());
    } else {
        println!("Fingerprint differs");
        println!(
            "  stored:  {:016x}  {} | {} | {}",
            stored.checksum(),
            stored.edge.join(" + "),
            stored.processing.join(" → "),
            stored.buffering
        );
        println!(
            "  current: {:016x}  {} | {} | {}",
            current.checksum(),
            current.edge.join(" + "),
            current.processing.join(" → "),
            current.buffering
        );
    }

    Ok(if matches {
        Outcome::Done
    } else {
        Outcome::Absent
    })
}

// =============================================================================
// COMPONENTS COMMAND
// =============================================================================

/// List the component reference, or show one entry in full.
pub fn cmd_components(
    id: Option<ComponentId>,
    json_mode: bool,
    verbose: bool,
) -> Result<Outcome, StrataError> {
    let Some(id) = id else {
        if json_mode {
            let all: Vec<ComponentDetail> = ComponentId::ALL.iter().map(|c| c.detail()).collect();
            print_json(&all)?;
            return Ok(Outcome::Done);
        }
        for c in ComponentId::ALL {
            println!("  {:<23} {}", c.as_str(), c.name());
            if verbose {
                println!("      {}", c.short_description());
            }
        }
        return Ok(Outcome::Done);
    };

    let detail = id.detail();
    if json_mode {
        print_json(&detail)?;
        return Ok(Outcome::Done);
    }

    println!("{} ({})", detail.name, detail.id);
    println!("{}", detail.short_description);
    println!();
    println!("{}", detail.description);

    let sections = [
        ("What it does", detail.what_it_does),
        ("When to use", detail.when_to_use),
        ("When not to use", detail.when_not_to_use),
        ("Related layers", detail.related_layers),
    ];
    for (title, items) in sections.iter().filter(|(_, items)| !items.is_empty()) {
        println!();
        println!("{}:", title);
        for item in *items {
            println!("  - {}", item);
        }
    }

    for example in detail.configuration {
        println!();
        println!("--- {} ---", example.title);
        println!("{}", example.description);
        if verbose {
            println!();
            println!("{}", example.yaml);
        }
    }

    println!();
    println!("Links:");
    for link in detail.external_links {
        println!("  {}: {}", link.label, link.url);
    }

    Ok(Outcome::Done)
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Write a default requirements file.
pub fn cmd_init(output: &Path, force: bool) -> Result<Outcome, StrataError> {
    let validated = validate_output_path(output)?;

    if validated.exists() && !force {
        return Err(StrataError::IoError(format!(
            "{} already exists. Use --force to overwrite.",
            validated.display()
        )));
    }

    std::fs::write(&validated, DEFAULT_REQUIREMENTS_TOML)
        .map_err(|e| StrataError::IoError(format!("Write file: {}", e)))?;
    tracing::info!(path = %validated.display(), "wrote requirements file");
    println!("Initialized requirements file at {}", validated.display());

    Ok(Outcome::Done)
}
