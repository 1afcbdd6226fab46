//! Detail panels shown when a node is selected.
//!
//! Every press on a node opens a fresh [`DetailPanel`] that snapshots the
//! node's current label and detail text. Panels live in the [`Inspector`]
//! until closed. Closing a panel never touches the node it was opened for.

use std::fmt;

use indexmap::IndexMap;
use log::{debug, info};

use meshview_core::{draw::RichText, geometry::Size, identifier::Id, scene::Node};

use crate::{diagram::Diagram, error::MeshviewError};

/// Smallest size of a panel.
pub const MIN_PANEL_SIZE: Size = Size::new(300.0, 200.0);

/// Handle of an open panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u32);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// Informational panel for a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    node: Id,
    title: String,
    markup: String,
    body: RichText,
}

impl DetailPanel {
    /// Snapshots the label and detail text of `node`.
    pub fn for_node(node: &Node) -> Self {
        Self {
            node: node.id(),
            title: node.label().to_string(),
            markup: node.detail_text().to_string(),
            body: RichText::parse(node.detail_text()),
        }
    }

    pub fn node(&self) -> Id {
        self.node
    }

    /// The node label at the time the panel was opened.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The detail text exactly as stored on the node.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn body(&self) -> &RichText {
        &self.body
    }

    /// Title and body as plain text, separated by a blank line.
    pub fn to_plain_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.body.to_plain_text())
    }
}

/// Tracks the panels opened by node presses.
#[derive(Debug, Default)]
pub struct Inspector {
    next_id: u32,
    open: IndexMap<PanelId, DetailPanel>,
}

impl Inspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new panel for `node`. Each call opens another panel.
    ///
    /// # Errors
    ///
    /// Returns [`MeshviewError::UnknownNode`] if the diagram has no such node.
    pub fn press(&mut self, diagram: &Diagram, node: impl Into<Id>) -> Result<PanelId, MeshviewError> {
        let node = node.into();
        let target = diagram.node(node).ok_or(MeshviewError::UnknownNode(node))?;

        let id = PanelId(self.next_id);
        self.next_id += 1;
        self.open.insert(id, DetailPanel::for_node(target));

        info!(node = node.to_string(), panel = id.to_string(); "Detail panel opened");
        Ok(id)
    }

    /// Closes and returns the panel, `None` if it is not open.
    pub fn close(&mut self, id: PanelId) -> Option<DetailPanel> {
        let panel = self.open.shift_remove(&id);
        if panel.is_some() {
            debug!(panel = id.to_string(); "Detail panel closed");
        }
        panel
    }

    pub fn panel(&self, id: PanelId) -> Option<&DetailPanel> {
        self.open.get(&id)
    }

    /// Open panels, oldest first.
    pub fn open_panels(&self) -> impl Iterator<Item = (PanelId, &DetailPanel)> {
        self.open.iter().map(|(id, panel)| (*id, panel))
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}
