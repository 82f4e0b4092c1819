//! In-memory model of a remote directory tree.

use crate::constants::PATH_SEPARATOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Regular,
    Symbolic,
    Directory,
}

impl FileType {
    /// Maps the first character of a Unix permission string.
    pub fn from_selector(selector: char) -> Option<Self> {
        match selector {
            '-' => Some(FileType::Regular),
            'l' => Some(FileType::Symbolic),
            'd' => Some(FileType::Directory),
            _ => None,
        }
    }

    pub fn export_name(&self) -> &'static str {
        match self {
            FileType::Regular => "REGULAR_FILE",
            FileType::Symbolic => "SYMBOLIC_FILE",
            FileType::Directory => "DIRECTORY_FILE",
        }
    }
}

/// One `rwx` triad as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rights(String);

impl Rights {
    pub fn new(triad: &str) -> Self {
        Rights(triad.to_string())
    }

    pub fn full() -> Self {
        Rights::new("rwx")
    }

    fn flag(&self, index: usize, expected: u8) -> bool {
        self.0.as_bytes().get(index) == Some(&expected)
    }

    pub fn can_read(&self) -> bool {
        self.flag(0, b'r')
    }

    pub fn can_write(&self) -> bool {
        self.flag(1, b'w')
    }

    pub fn can_execute(&self) -> bool {
        self.flag(2, b'x')
    }

    pub fn is_full(&self) -> bool {
        self.can_read() && self.can_write() && self.can_execute()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permissions {
    pub user: Rights,
    pub group: Rights,
    pub other: Rights,
}

impl Permissions {
    /// Parses the nine characters that follow the type selector.
    pub fn from_mode(mode: &str) -> Option<Self> {
        let user = mode.get(0..3)?;
        let group = mode.get(3..6)?;
        let other = mode.get(6..9)?;
        Some(Permissions {
            user: Rights::new(user),
            group: Rights::new(group),
            other: Rights::new(other),
        })
    }

    pub fn full() -> Self {
        Permissions {
            user: Rights::full(),
            group: Rights::full(),
            other: Rights::full(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum NodeKind {
    Regular,
    Symbolic,
    Directory { children: Vec<Node> },
}

/// A remote file, link or directory.
///
/// Name, type and pathname are fixed at construction. Only directories
/// hold children, in the order the server listed them.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    pathname: String,
    parent: Option<String>,
    permissions: Permissions,
    depth: i32,
    kind: NodeKind,
}

/// Joins a parent pathname and a child name with exactly one separator.
pub fn join_pathname(parent: &str, name: &str) -> String {
    let base = parent.trim_end_matches(PATH_SEPARATOR);
    format!("{}{}{}", base, PATH_SEPARATOR, name)
}

impl Node {
    /// The traversal root. Its rights are assumed to be full so exploration can enter it.
    pub fn root(pathname: &str) -> Self {
        Node {
            name: pathname.to_string(),
            pathname: pathname.to_string(),
            parent: None,
            permissions: Permissions::full(),
            depth: 0,
            kind: NodeKind::Directory {
                children: Vec::new(),
            },
        }
    }

    pub fn new(name: &str, file_type: FileType, permissions: Permissions, parent: &Node) -> Self {
        let kind = match file_type {
            FileType::Regular => NodeKind::Regular,
            FileType::Symbolic => NodeKind::Symbolic,
            FileType::Directory => NodeKind::Directory {
                children: Vec::new(),
            },
        };
        Node {
            name: name.to_string(),
            pathname: join_pathname(&parent.pathname, name),
            parent: Some(parent.pathname.clone()),
            permissions,
            depth: parent.depth + 1,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Pathname of the directory this node was listed in.
    pub fn parent_pathname(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn permissions(&self) -> &Permissions {
        &self.permissions
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: i32) {
        self.depth = depth;
    }

    pub fn file_type(&self) -> FileType {
        match self.kind {
            NodeKind::Regular => FileType::Regular,
            NodeKind::Symbolic => FileType::Symbolic,
            NodeKind::Directory { .. } => FileType::Directory,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        match &mut self.kind {
            NodeKind::Directory { children } => children,
            _ => &mut [],
        }
    }

    /// Appends children in order. Returns `false` and drops them for non-directories.
    pub fn append_children(&mut self, nodes: Vec<Node>) -> bool {
        match &mut self.kind {
            NodeKind::Directory { children } => {
                children.extend(nodes);
                true
            }
            _ => false,
        }
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children()
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}
