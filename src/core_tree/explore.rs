//! Depth-first discovery of the remote tree.
//!
//! Inside the descent a successful CWD is always paired with a CDUP, so
//! each level returns to the directory it was entered from.

use crate::client::FtpClient;
use crate::core_error::FtpResult;
use crate::core_tree::node::Node;
use log::{debug, warn};
use std::future::Future;
use std::pin::Pin;

pub type ExploreFuture<'a> = Pin<Box<dyn Future<Output = FtpResult<()>> + Send + 'a>>;

fn enterable(node: &Node, max_depth: i32) -> bool {
    if max_depth >= 0 && node.depth() >= max_depth {
        return false;
    }
    if !node.is_directory() {
        return false;
    }
    if !node.permissions().user.is_full() {
        debug!("Not entering {}: insufficient rights", node.pathname());
        return false;
    }
    true
}

impl FtpClient {
    /// Populates `node` with its descendants down to `max_depth` (unbounded when negative).
    ///
    /// Subtrees the server refuses are left unexplored. Failures that end
    /// the session, such as a closed control channel, propagate. The
    /// working directory is read first and restored at the end, so the
    /// starting point does not have to be the parent of `node`.
    pub async fn explore_depth(&mut self, node: &mut Node, max_depth: i32) -> FtpResult<()> {
        if !enterable(node, max_depth) {
            return Ok(());
        }

        let origin = match self.working_directory_name().await {
            Ok(origin) => origin,
            Err(e) if e.is_recoverable() => {
                warn!("Not exploring {}: {}", node.pathname(), e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match self.descend(node, max_depth).await {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                warn!("Exploration of {} cut short: {}", node.pathname(), e);
            }
            Err(e) => return Err(e),
        }

        if let Err(e) = self.change_working_directory(&origin).await {
            if !e.is_recoverable() {
                return Err(e);
            }
            warn!("Cannot return to {}: {}", origin, e);
        }
        Ok(())
    }

    fn descend<'a>(&'a mut self, node: &'a mut Node, max_depth: i32) -> ExploreFuture<'a> {
        Box::pin(async move {
            if !enterable(node, max_depth) {
                return Ok(());
            }

            let pathname = node.pathname().to_string();
            let parent = node.parent_pathname().map(str::to_string);
            if let Err(e) = self.change_working_directory(&pathname).await {
                if e.is_recoverable() {
                    warn!("Skipping {}: {}", pathname, e);
                    return Ok(());
                }
                return Err(e);
            }

            let children = match self.list_working_directory(node).await {
                Ok(children) => children,
                Err(e) if e.is_recoverable() => {
                    warn!("Cannot list {}: {}", pathname, e);
                    return self.leave(parent.as_deref()).await;
                }
                Err(e) => return Err(e),
            };

            node.append_children(children);
            for child in node.children_mut() {
                match self.descend(child, max_depth).await {
                    Ok(()) => {}
                    Err(e) if e.is_recoverable() => {
                        // The child could not back out; come back here before the next sibling.
                        warn!("Lost track below {}: {}", pathname, e);
                        self.change_working_directory(&pathname).await?;
                    }
                    Err(e) => return Err(e),
                }
            }
            self.leave(parent.as_deref()).await
        })
    }

    /// Steps back to the parent directory, by CWD to its pathname when CDUP is refused.
    async fn leave(&mut self, parent: Option<&str>) -> FtpResult<()> {
        match self.change_to_parent_directory().await {
            Ok(()) => Ok(()),
            Err(e) if e.is_recoverable() => match parent {
                Some(parent) => {
                    warn!("{}, returning to {} instead", e, parent);
                    self.change_working_directory(parent).await
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    async fn list_working_directory(&mut self, node: &Node) -> FtpResult<Vec<Node>> {
        let current = self.working_directory_name().await?;
        self.list(Some(&current), node).await
    }
}
