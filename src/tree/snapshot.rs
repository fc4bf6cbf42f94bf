//! Point-in-time copies of a tree and JSON persistence.

use crate::distance::Distance;
use crate::domain::Domain;
use crate::types::NodeId;

use super::{DooTree, Node};

/// A plain-data copy of a tree's state.
///
/// The distance function and the random generator are not captured; the
/// snapshot is meant for inspection and export, not for resuming a search.
///
/// # Schema versioning
///
/// The `version` field enables future schema evolution. The current version is `1`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeSnapshot {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// The search domain.
    pub domain: Domain,
    /// Weight of the exploration bonus.
    pub exploration_constant: f64,
    /// Every node, in creation order.
    pub nodes: Vec<Node>,
    /// The leaf set, in insertion order.
    pub leaves: Vec<NodeId>,
    /// Expanded nodes, in expansion order.
    pub expanded: Vec<NodeId>,
    /// The outstanding pending node.
    pub pending: Option<NodeId>,
}

impl<D: Distance> DooTree<D> {
    /// Copies the tree's current state into a [`TreeSnapshot`].
    #[must_use]
    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            version: 1,
            domain: self.domain.clone(),
            exploration_constant: self.exploration,
            nodes: self.nodes.clone(),
            leaves: self.leaves.clone(),
            expanded: self.expanded.clone(),
            pending: self.pending,
        }
    }
}

#[cfg(feature = "serde")]
impl<D: Distance> DooTree<D> {
    /// Save a snapshot of the tree to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let snapshot = self.snapshot();

        // Write to a sibling temp file, then rename over the target.
        let parent = path.parent().unwrap_or(std::path::Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
        let file = std::fs::File::create(&tmp_path)?;
        serde_json::to_writer_pretty(file, &snapshot).map_err(std::io::Error::other)?;
        std::fs::rename(&tmp_path, path)
    }
}
