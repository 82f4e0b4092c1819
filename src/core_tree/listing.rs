use crate::core_error::{FtpClientError, FtpResult};
use crate::core_tree::node::{FileType, Node, Permissions};

const LINK_ARROW: &str = "->";

/// Parses one Unix-style `LIST` line into a child of `parent`.
///
/// The name is the last whitespace-separated token, or the token before
/// `-> target` for symbolic links. Names containing spaces keep only
/// their last word.
pub fn parse_listing_line(line: &str, parent: &Node) -> FtpResult<Node> {
    let unparseable = || FtpClientError::ListingParse(line.to_string());

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(unparseable());
    }

    let mode = tokens[0];
    let file_type = mode
        .chars()
        .next()
        .and_then(FileType::from_selector)
        .ok_or_else(unparseable)?;
    let permissions = mode
        .get(1..10)
        .and_then(Permissions::from_mode)
        .ok_or_else(unparseable)?;

    let name = if tokens.contains(&LINK_ARROW) {
        if tokens.len() < 4 {
            return Err(unparseable());
        }
        tokens[tokens.len() - 3]
    } else {
        tokens[tokens.len() - 1]
    };

    Ok(Node::new(name, file_type, permissions, parent))
}
