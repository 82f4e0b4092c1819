use crate::core_tree::node::Node;

const ROOT: &str = ".";
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// Draws the tree the way the `tree` command does.
pub fn render_tree(root: &Node) -> String {
    let mut out = String::new();
    out.push_str(ROOT);
    out.push('\n');
    render_children(root, "", &mut out);
    out
}

fn render_children(node: &Node, prefix: &str, out: &mut String) {
    let children = node.children();
    for (index, child) in children.iter().enumerate() {
        let last = index + 1 == children.len();
        out.push_str(prefix);
        out.push_str(if last { LAST_BRANCH } else { BRANCH });
        out.push_str(child.name());
        out.push('\n');

        if child.is_directory() {
            let indent = if last { SPACE_INDENT } else { PIPE_INDENT };
            render_children(child, &format!("{}{}", prefix, indent), out);
        }
    }
}
