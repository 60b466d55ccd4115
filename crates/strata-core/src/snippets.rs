//! # Config Snippet Merge
//!
//! Concatenates the opaque configuration fragments of the selected layers,
//! one output block per [`SnippetKind`].
//!
//! Contribution order is edge layers, then active processing layers, then
//! the buffering layer. Each fragment is introduced by a header line naming
//! its layer, and fragments are separated by a blank line. A kind nobody
//! contributes to stays absent.

use crate::{ConfigSnippets, Layer, SnippetKind};

/// Header line introducing a layer's fragment.
#[must_use]
pub fn section_header(layer: &Layer) -> String {
    format!("# === {} ===", layer.name)
}

/// Merge the fragments of `layers`, taken in the given order.
#[must_use]
pub fn merge<'a, I>(layers: I) -> ConfigSnippets
where
    I: IntoIterator<Item = &'a Layer>,
{
    let mut sections: [Vec<String>; 3] = Default::default();

    for layer in layers {
        for (slot, kind) in sections.iter_mut().zip(SnippetKind::ALL) {
            // Empty fragments contribute nothing, not even a header.
            if let Some(text) = layer.config_snippets.get(kind).filter(|t| !t.is_empty()) {
                slot.push(format!("{}\n{}", section_header(layer), text));
            }
        }
    }

    let [agent, gateway, deployment] = sections.map(join);
    ConfigSnippets {
        agent,
        gateway,
        deployment,
    }
}

fn join(parts: Vec<String>) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayerType;

    #[test]
    fn fragments_keep_contribution_order() {
        let first = Layer::new("a", LayerType::Edge, "First").snippet(SnippetKind::Agent, "one");
        let second = Layer::new("b", LayerType::Buffering, "Second")
            .snippet(SnippetKind::Agent, "two")
            .snippet(SnippetKind::Deployment, "manifest");

        let merged = merge([&first, &second]);

        assert_eq!(
            merged.agent.as_deref(),
            Some("# === First ===\none\n\n# === Second ===\ntwo")
        );
        assert_eq!(
            merged.deployment.as_deref(),
            Some("# === Second ===\nmanifest")
        );
        assert!(merged.gateway.is_none());
    }

    #[test]
    fn no_contributions_means_empty() {
        let bare = Layer::new("none", LayerType::Processing, "Nothing");
        let merged = merge([&bare]);
        assert!(merged.is_empty());
    }

    #[test]
    fn empty_fragment_is_skipped() {
        let blank = Layer::new("a", LayerType::Edge, "Blank").snippet(SnippetKind::Agent, "");
        let real = Layer::new("b", LayerType::Buffering, "Real").snippet(SnippetKind::Agent, "two");

        assert!(merge([&blank]).is_empty());
        assert_eq!(
            merge([&blank, &real]).agent.as_deref(),
            Some("# === Real ===\ntwo")
        );
    }

    #[test]
    fn header_names_layer() {
        let layer = Layer::new("x", LayerType::Edge, "DaemonSet Agent");
        assert_eq!(section_header(&layer), "# === DaemonSet Agent ===");
    }
}
