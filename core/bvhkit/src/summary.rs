use crate::axis::ChannelKind;
use crate::joint::*;
use crate::BvhDocument;

/// Flat, read only view of a joint for reporting
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointSummary {
    pub name: String,
    pub depth: usize,
    pub offset: Vector3,
    pub end_site: bool,
    /// Channel names in file order
    pub channels: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkeletonSummary {
    pub joint_count: usize,
    pub end_site_count: usize,
    pub channel_count: usize,
    pub frame_count: usize,
    pub frame_time: f32,
    /// Depth first, end sites included
    pub joints: Vec<JointSummary>,
}

impl JointSummary {
    fn from_node(node: &JointNode, depth: usize) -> JointSummary {
        let position = node
            .position_order()
            .map(|o| o.channel_names(ChannelKind::Position))
            .into_iter()
            .flatten();

        let rotation = node
            .rotation_order()
            .map(|o| o.channel_names(ChannelKind::Rotation))
            .into_iter()
            .flatten();

        JointSummary {
            name: node.name.to_owned(),
            depth,
            offset: node.offset,
            end_site: node.is_end_site(),
            channels: position.chain(rotation).map(String::from).collect(),
        }
    }
}

impl BvhDocument {
    pub fn summary(&self) -> SkeletonSummary {
        let tree = self.tree();

        let joints = tree
            .iter_depth_first()
            .filter_map(|id| {
                let node = tree.get(id)?;
                let depth = tree.depth(id)?;
                Some(JointSummary::from_node(node, depth))
            })
            .collect::<Vec<_>>();

        let end_site_count = joints.iter().filter(|j| j.end_site).count();

        SkeletonSummary {
            joint_count: joints.len() - end_site_count,
            end_site_count,
            channel_count: tree.channel_count(),
            frame_count: self.frame_count(),
            frame_time: self.frame_time(),
            joints,
        }
    }
}
