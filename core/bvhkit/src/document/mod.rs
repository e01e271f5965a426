mod io;

use crate::hierarchy::HierarchyError;
use crate::joint::*;
use crate::motion::{MotionError, MotionHeader};
use thiserror::Error as ThisError;
pub use io::*;

#[derive(Debug, ThisError)]
pub enum BvhError {
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    #[error(transparent)]
    Motion(#[from] MotionError),
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error("Document has no root joint")]
    EmptyDocument,
    #[error("Root joint can't be an end site")]
    EndSiteRoot,
    #[error("Joint \"{joint}\" holds {found} samples, expected {expected}")]
    FrameDataMismatch {
        joint: String,
        expected: usize,
        found: usize,
    },
    #[error("Joint name \"{0}\" can't be written")]
    InvalidJointName(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Accept a motion section that ends before its declared frame count
    pub lenient_motion: bool,
}

/// A skeleton plus its animation.
///
/// The document owns at most one root joint tree. Replacing it with
/// [`BvhDocument::load_root`] drops the previous tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BvhDocument {
    tree: JointTree,
    frame_time: f32,
}

impl BvhDocument {
    pub fn new() -> BvhDocument {
        BvhDocument::default()
    }

    pub fn from_tree(tree: JointTree, frame_time: f32) -> BvhDocument {
        BvhDocument { tree, frame_time }
    }

    pub fn is_empty(&self) -> bool {
        self.tree.root().is_none()
    }

    pub fn tree(&self) -> &JointTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut JointTree {
        &mut self.tree
    }

    pub fn root(&self) -> Option<&JointNode> {
        self.tree.root_node()
    }

    /// Gives up ownership of the tree, leaving the document empty
    pub fn unload_root(&mut self) -> JointTree {
        self.frame_time = 0.0;
        std::mem::take(&mut self.tree)
    }

    pub fn load_root(&mut self, tree: JointTree) {
        self.tree = tree;
    }

    /// Seconds per frame
    pub fn frame_time(&self) -> f32 {
        self.frame_time
    }

    pub fn set_frame_time(&mut self, frame_time: f32) {
        self.frame_time = frame_time;
    }

    pub fn frame_count(&self) -> usize {
        self.tree.frame_count()
    }

    pub fn motion_header(&self) -> MotionHeader {
        MotionHeader {
            frame_count: self.frame_count(),
            frame_time: self.frame_time,
        }
    }

    /// Copy of the document with finger nub joints turned into end sites
    pub fn strip_finger_nubs(&self) -> Result<BvhDocument, BvhError> {
        let Some(root) = self.tree.root() else {
            return Ok(BvhDocument::from_tree(JointTree::new(), self.frame_time));
        };

        let tree = crate::transform::strip_finger_nubs(&self.tree, root)?;
        Ok(BvhDocument::from_tree(tree, self.frame_time))
    }
}
