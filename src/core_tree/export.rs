use crate::core_tree::node::Node;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeDocument<'a> {
    file_type: &'static str,
    name: &'a str,
    user_rights: &'a str,
    group_rights: &'a str,
    other_rights: &'a str,
    pathname: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<Vec<NodeDocument<'a>>>,
}

impl<'a> From<&'a Node> for NodeDocument<'a> {
    fn from(node: &'a Node) -> Self {
        let permissions = node.permissions();
        NodeDocument {
            file_type: node.file_type().export_name(),
            name: node.name(),
            user_rights: permissions.user.as_str(),
            group_rights: permissions.group.as_str(),
            other_rights: permissions.other.as_str(),
            pathname: node.pathname(),
            files: node
                .is_directory()
                .then(|| node.children().iter().map(NodeDocument::from).collect()),
        }
    }
}

pub fn to_json(node: &Node) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(NodeDocument::from(node))
}

/// Writes the tree as pretty-printed JSON, adding a `.json` extension when missing.
pub fn export_json(node: &Node, path: &Path) -> Result<PathBuf> {
    let target = if path.extension().map_or(false, |ext| ext == "json") {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".json");
        PathBuf::from(name)
    };

    let text = serde_json::to_string_pretty(&NodeDocument::from(node))
        .context("Failed to serialize tree")?;
    fs::write(&target, text)
        .with_context(|| format!("Failed to write tree to {}", target.display()))?;
    Ok(target)
}
