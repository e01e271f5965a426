use crate::joint::*;

/// Leaf joints that some exporters emit past the last finger segment
pub const FINGER_NUB_NAMES: [&str; 8] = [
    "LeftFinger1Nub",
    "LeftFinger2Nub",
    "LeftFinger3Nub",
    "LeftFinger4Nub",
    "RightFinger1Nub",
    "RightFinger2Nub",
    "RightFinger3Nub",
    "RightFinger4Nub",
];

pub fn is_finger_nub(name: &str) -> bool {
    FINGER_NUB_NAMES.contains(&name)
}

/// Deep copy of the subtree at `start` where every finger nub becomes an end site.
///
/// A converted nub keeps its name, offset and samples but loses its children and
/// channels. Everything else is copied as is. `source` is left untouched.
pub fn strip_finger_nubs(source: &JointTree, start: JointId) -> Result<JointTree, TreeError> {
    let node = source.get(start).ok_or(TreeError::UnknownJoint(start))?;

    let mut tree = JointTree::new();
    let root = tree.set_root(stripped_copy(node));

    if !tree.get(root).is_some_and(|n| n.is_end_site()) {
        copy_stripped_children(source, start, &mut tree, root)?;
    }

    Ok(tree)
}

fn stripped_copy(node: &JointNode) -> JointNode {
    let mut copy = node.clone();

    if is_finger_nub(&node.name) {
        copy.kind = JointKind::EndSite;
    }

    copy
}

fn copy_stripped_children(source: &JointTree, src: JointId, dst: &mut JointTree, dst_parent: JointId) -> Result<(), TreeError> {
    let children = source
        .get(src)
        .ok_or(TreeError::UnknownJoint(src))?
        .children();

    for child in children.iter() {
        let node = source.get(*child).ok_or(TreeError::UnknownJoint(*child))?;
        let copy = dst.add_child(dst_parent, stripped_copy(node))?;

        if node.is_end_site() || is_finger_nub(&node.name) {
            continue;
        }

        copy_stripped_children(source, *child, dst, copy)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::*;
    use super::*;
    use crate::axis::AxisOrder;

    fn joint(name: &str) -> JointNode {
        let mut node = JointNode::new(name, Vector3::new(1.0, 2.0, 3.0), JointKind::rotation_only(AxisOrder::ZXY));
        node.frame_data = vec![4.0, 5.0, 6.0];
        node
    }

    #[fixture]
    fn hand() -> JointTree {
        // Hips -> LeftHand -> (LeftFinger1 -> LeftFinger1Nub -> EndSite), LeftFinger2
        let mut tree = JointTree::with_root(joint("Hips"));
        let hips = tree.root().unwrap();
        let hand = tree.add_child(hips, joint("LeftHand")).unwrap();
        let finger = tree.add_child(hand, joint("LeftFinger1")).unwrap();
        let nub = tree.add_child(finger, joint("LeftFinger1Nub")).unwrap();
        tree.add_child(nub, JointNode::end_site(Vector3::new(0.0, 1.0, 0.0))).unwrap();
        tree.add_child(hand, joint("LeftFinger2")).unwrap();
        tree
    }

    #[rstest]
    #[case("LeftFinger1Nub", true)]
    #[case("RightFinger4Nub", true)]
    #[case("LeftFinger5Nub", false)]
    #[case("leftfinger1nub", false)]
    #[case("LeftFinger1", false)]
    fn nub_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(expected, is_finger_nub(name));
    }

    #[rstest]
    fn nubs_become_end_sites(hand: JointTree) {
        let stripped = strip_finger_nubs(&hand, hand.root().unwrap()).unwrap();

        let nub_id = stripped.find_by_name("LeftFinger1Nub").unwrap();
        let nub = stripped.get(nub_id).unwrap();

        assert!(nub.is_end_site());
        assert_eq!(0, nub.children_count());
        assert_eq!(Vector3::new(1.0, 2.0, 3.0), nub.offset);
        assert_eq!(&[4.0, 5.0, 6.0], nub.frame_data.as_slice());

        // One end site fewer, everything else kept
        assert_eq!(hand.len() - 1, stripped.len());
        assert!(stripped.find_by_name("LeftFinger2").is_some());
    }

    #[rstest]
    fn source_is_untouched(hand: JointTree) {
        let before = hand.clone();
        let stripped = strip_finger_nubs(&hand, hand.root().unwrap()).unwrap();

        assert_eq!(before, hand);
        assert_ne!(stripped, hand);

        let nub = hand.get(hand.find_by_name("LeftFinger1Nub").unwrap()).unwrap();
        assert!(!nub.is_end_site());
        assert_eq!(1, nub.children_count());
    }

    #[rstest]
    fn tree_without_nubs_is_copied_whole(hand: JointTree) {
        let finger = hand.find_by_name("LeftFinger2").unwrap();
        let copy = strip_finger_nubs(&hand, finger).unwrap();

        assert_eq!(hand.copy_subtree(finger).unwrap(), copy);
    }

    #[rstest]
    fn nub_as_start_is_a_lone_end_site(hand: JointTree) {
        let nub = hand.find_by_name("LeftFinger1Nub").unwrap();
        let copy = strip_finger_nubs(&hand, nub).unwrap();

        assert_eq!(1, copy.len());
        assert!(copy.root_node().unwrap().is_end_site());
    }
}
