mod tree;

use crate::axis::AxisOrder;
pub use tree::*;

/// Name given to the root when a tree does not declare one
pub const ROOT_JOINT_NAME: &str = "Hips";

/// Synthetic name of every `End Site` marker
pub const END_SITE_NAME: &str = "EndSite";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Vector3 {
        Vector3 { x, y, z }
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Vector3 {
        Vector3 { x, y, z }
    }
}

/// Channel layout of a node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JointKind {
    /// Leaf with only an offset (`End Site`)
    EndSite,
    Joint {
        position_order: Option<AxisOrder>,
        rotation_order: AxisOrder,
    },
}

impl JointKind {
    pub const fn rotation_only(rotation_order: AxisOrder) -> JointKind {
        JointKind::Joint {
            position_order: None,
            rotation_order,
        }
    }

    pub const fn with_position(position_order: AxisOrder, rotation_order: AxisOrder) -> JointKind {
        JointKind::Joint {
            position_order: Some(position_order),
            rotation_order,
        }
    }

    /// Values per frame: 0, 3 or 6
    pub const fn channel_count(&self) -> usize {
        match self {
            JointKind::EndSite => 0,
            JointKind::Joint { position_order: None, .. } => 3,
            JointKind::Joint { position_order: Some(_), .. } => 6,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JointNode {
    pub name: String,
    pub offset: Vector3,
    pub kind: JointKind,
    /// Samples in canonical x, y, z order. Position (when present) then rotation for every frame.
    pub frame_data: Vec<f32>,
    pub(crate) parent: Option<JointId>,
    pub(crate) children: Vec<JointId>,
}

impl JointNode {
    pub fn new<T: Into<String>>(name: T, offset: Vector3, kind: JointKind) -> JointNode {
        JointNode {
            name: name.into(),
            offset,
            kind,
            frame_data: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn end_site(offset: Vector3) -> JointNode {
        JointNode::new(END_SITE_NAME, offset, JointKind::EndSite)
    }

    pub fn is_end_site(&self) -> bool {
        matches!(self.kind, JointKind::EndSite)
    }

    pub fn position_order(&self) -> Option<AxisOrder> {
        match self.kind {
            JointKind::Joint { position_order, .. } => position_order,
            JointKind::EndSite => None,
        }
    }

    pub fn rotation_order(&self) -> Option<AxisOrder> {
        match self.kind {
            JointKind::Joint { rotation_order, .. } => Some(rotation_order),
            JointKind::EndSite => None,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.kind.channel_count()
    }

    pub fn frame_count(&self) -> usize {
        match self.channel_count() {
            0 => 0,
            width => self.frame_data.len() / width,
        }
    }

    /// Canonical samples for a single frame
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        let width = self.channel_count();
        if width == 0 {
            return None;
        }

        self.frame_data.get((index * width)..((index + 1) * width))
    }

    pub fn parent(&self) -> Option<JointId> {
        self.parent
    }

    pub fn children(&self) -> &[JointId] {
        &self.children
    }

    pub fn children_count(&self) -> usize {
        self.children.len()
    }
}
