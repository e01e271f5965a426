use super::*;
use thiserror::Error as ThisError;

/// Handle to a node slot inside a [`JointTree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointId(usize);

impl JointId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum TreeError {
    #[error("Joint {0:?} does not exist")]
    UnknownJoint(JointId),
    #[error("Joint {child:?} can't be attached to {parent:?} without forming a cycle")]
    Cycle {
        parent: JointId,
        child: JointId,
    },
    #[error("Joint {child:?} is not a child of {parent:?}")]
    NotAChild {
        parent: JointId,
        child: JointId,
    },
    #[error("End site {0:?} can't own children")]
    EndSiteParent(JointId),
}

/// Arena owning every joint of a skeleton.
///
/// Nodes reference each other through [`JointId`]s. A node attached to a parent is
/// listed in that parent's children and points back to it; a detached node keeps
/// living in the arena (with its subtree) until it is re-attached or removed.
#[derive(Clone, Debug, Default)]
pub struct JointTree {
    slots: Vec<Option<JointNode>>,
    free: Vec<usize>,
    root: Option<JointId>,
}

impl JointTree {
    pub fn new() -> JointTree {
        JointTree::default()
    }

    pub fn with_root(node: JointNode) -> JointTree {
        let mut tree = JointTree::new();
        tree.set_root(node);
        tree
    }

    pub fn root(&self) -> Option<JointId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&JointNode> {
        self.root.and_then(|id| self.get(id))
    }

    /// Replaces the root. The previous root subtree is destroyed.
    pub fn set_root(&mut self, node: JointNode) -> JointId {
        if let Some(old) = self.root.take() {
            self.free_subtree(old);
        }

        let id = self.alloc(node);
        self.root = Some(id);
        id
    }

    /// Number of live nodes, detached ones included
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: JointId) -> Option<&JointNode> {
        self.slots.get(id.0).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, id: JointId) -> Option<&mut JointNode> {
        self.slots.get_mut(id.0).and_then(|s| s.as_mut())
    }

    fn node(&self, id: JointId) -> Result<&JointNode, TreeError> {
        self.get(id).ok_or(TreeError::UnknownJoint(id))
    }

    fn node_mut(&mut self, id: JointId) -> Result<&mut JointNode, TreeError> {
        self.get_mut(id).ok_or(TreeError::UnknownJoint(id))
    }

    fn alloc(&mut self, mut node: JointNode) -> JointId {
        node.parent = None;
        node.children.clear();

        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                JointId(idx)
            },
            None => {
                self.slots.push(Some(node));
                JointId(self.slots.len() - 1)
            }
        }
    }

    fn free_subtree(&mut self, id: JointId) {
        let Some(node) = self.slots.get_mut(id.0).and_then(|s| s.take()) else {
            return;
        };

        self.free.push(id.0);

        for child in node.children {
            self.free_subtree(child);
        }
    }

    /// Creates a node, attached to `parent` when given or left detached otherwise
    pub fn insert(&mut self, parent: Option<JointId>, node: JointNode) -> Result<JointId, TreeError> {
        if let Some(parent) = parent {
            if self.node(parent)?.is_end_site() {
                return Err(TreeError::EndSiteParent(parent));
            }
        }

        let id = self.alloc(node);

        if let Some(parent) = parent {
            self.link(parent, id)?;
        }

        Ok(id)
    }

    pub fn add_child(&mut self, parent: JointId, node: JointNode) -> Result<JointId, TreeError> {
        self.insert(Some(parent), node)
    }

    fn link(&mut self, parent: JointId, child: JointId) -> Result<(), TreeError> {
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Moves `child` (with its subtree) to the end of `parent`'s children,
    /// removing it from any previous parent first
    pub fn append_child(&mut self, parent: JointId, child: JointId) -> Result<(), TreeError> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;

        if parent_node.is_end_site() {
            return Err(TreeError::EndSiteParent(parent));
        }

        if child_node.parent == Some(parent) {
            return Ok(());
        }

        if parent == child || self.is_in_subtree(child, parent, true) {
            return Err(TreeError::Cycle { parent, child });
        }

        self.detach(child)?;
        self.link(parent, child)
    }

    /// Unlinks `child` from its parent. The subtree stays alive in the arena.
    pub fn detach(&mut self, child: JointId) -> Result<(), TreeError> {
        let old_parent = self.node_mut(child)?.parent.take();

        if let Some(parent) = old_parent {
            self.node_mut(parent)?.children.retain(|c| *c != child);
        }

        if self.root == Some(child) {
            self.root = None;
        }

        Ok(())
    }

    pub fn remove_child(&mut self, parent: JointId, child: JointId) -> Result<(), TreeError> {
        if self.node(child)?.parent != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }

        self.detach(child)
    }

    /// Destroys `id` and everything below it
    pub fn remove(&mut self, id: JointId) -> Result<(), TreeError> {
        self.detach(id)?;
        self.free_subtree(id);
        Ok(())
    }

    /// Checks whether `node` is below `ancestor`. Only direct children are
    /// considered when `recursive` is false.
    pub fn is_in_subtree(&self, ancestor: JointId, node: JointId, recursive: bool) -> bool {
        let Some(anc) = self.get(ancestor) else {
            return false;
        };

        if !recursive {
            return anc.children.contains(&node);
        }

        // Walk up from node instead of searching down
        let mut current = self.get(node).and_then(|n| n.parent);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }

            current = self.get(p).and_then(|n| n.parent);
        }

        false
    }

    pub fn index_of_child(&self, parent: JointId, child: JointId) -> Option<usize> {
        self.get(parent)?
            .children
            .iter()
            .position(|c| *c == child)
    }

    pub fn child_at(&self, parent: JointId, index: usize) -> Option<JointId> {
        self.get(parent)?
            .children
            .get(index)
            .copied()
    }

    pub fn parent_of(&self, id: JointId) -> Option<JointId> {
        self.get(id)?.parent
    }

    /// Distance from the top of the node's subtree, 0 for a node without parent
    pub fn depth(&self, id: JointId) -> Option<usize> {
        let mut depth = 0;
        let mut current = self.get(id)?.parent;

        while let Some(p) = current {
            depth += 1;
            current = self.get(p)?.parent;
        }

        Some(depth)
    }

    pub fn find_by_name(&self, name: &str) -> Option<JointId> {
        self.iter_depth_first()
            .find(|id| self.get(*id).is_some_and(|n| n.name == name))
    }

    /// Frame count of the root joint
    pub fn frame_count(&self) -> usize {
        self.root_node()
            .map(|n| n.frame_count())
            .unwrap_or_default()
    }

    /// Every node under the root in file order, end sites included
    pub fn iter_depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            tree: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Joints that carry motion channels, in the order their columns appear
    /// on every frame line
    pub fn channel_joints(&self) -> Vec<JointId> {
        self.iter_depth_first()
            .filter(|id| self.get(*id).is_some_and(|n| !n.is_end_site()))
            .collect()
    }

    /// Total values on one frame line
    pub fn channel_count(&self) -> usize {
        self.iter_depth_first()
            .filter_map(|id| self.get(id))
            .map(|n| n.channel_count())
            .sum()
    }

    /// Deep copy of the subtree at `id` into a new tree rooted at the copy
    pub fn copy_subtree(&self, id: JointId) -> Result<JointTree, TreeError> {
        let node = self.node(id)?;

        let mut tree = JointTree::new();
        let root = tree.set_root(node.clone());
        self.copy_children_into(id, &mut tree, root)?;

        Ok(tree)
    }

    fn copy_children_into(&self, src: JointId, dst: &mut JointTree, dst_parent: JointId) -> Result<(), TreeError> {
        for child in self.node(src)?.children.iter() {
            let copy = dst.add_child(dst_parent, self.node(*child)?.clone())?;
            self.copy_children_into(*child, dst, copy)?;
        }

        Ok(())
    }

    /// Moves the subtree at `id` out into its own tree
    pub fn take_subtree(&mut self, id: JointId) -> Result<JointTree, TreeError> {
        let tree = self.copy_subtree(id)?;
        self.remove(id)?;
        Ok(tree)
    }

    /// Grafts a copy of `other`'s root subtree below `parent`
    pub fn graft(&mut self, parent: JointId, other: &JointTree) -> Result<Option<JointId>, TreeError> {
        let Some(other_root) = other.root else {
            return Ok(None);
        };

        let copy = self.add_child(parent, other.node(other_root)?.clone())?;
        other.copy_children_into(other_root, self, copy)?;

        Ok(Some(copy))
    }

    fn subtree_eq(&self, id: JointId, other: &JointTree, other_id: JointId) -> bool {
        let (Some(a), Some(b)) = (self.get(id), other.get(other_id)) else {
            return false;
        };

        a.name == b.name
            && a.offset == b.offset
            && a.kind == b.kind
            && a.frame_data == b.frame_data
            && a.children.len() == b.children.len()
            && a.children
                .iter()
                .zip(b.children.iter())
                .all(|(x, y)| self.subtree_eq(*x, other, *y))
    }
}

/// Structural comparison from the roots down, ignoring slot layout
impl PartialEq for JointTree {
    fn eq(&self, other: &JointTree) -> bool {
        match (self.root, other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => self.subtree_eq(a, other, b),
            _ => false,
        }
    }
}

pub struct DepthFirst<'a> {
    tree: &'a JointTree,
    stack: Vec<JointId>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = JointId;

    fn next(&mut self) -> Option<JointId> {
        let id = self.stack.pop()?;

        if let Some(node) = self.tree.get(id) {
            // Reversed so the first child is visited first
            self.stack.extend(node.children.iter().rev());
        }

        Some(id)
    }
}
