use super::*;
use crate::hierarchy::{load_hierarchy, save_hierarchy};
use crate::io::TextStream;
use crate::motion::{load_motion, save_motion};
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

impl BvhDocument {
    pub fn from_str_with(text: &str, options: &LoadOptions) -> Result<BvhDocument, BvhError> {
        let mut stream = TextStream::new(text);

        let mut tree = load_hierarchy(&mut stream)?;
        let header = load_motion(&mut stream, &mut tree, options)?;

        log::debug!(
            "Loaded {} joints with {} frames ({}s per frame)",
            tree.channel_joints().len(),
            header.frame_count,
            header.frame_time
        );

        Ok(BvhDocument::from_tree(tree, header.frame_time))
    }

    pub fn read_from<R: Read>(mut reader: R, options: &LoadOptions) -> Result<BvhDocument, BvhError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        BvhDocument::from_str_with(&text, options)
    }

    pub fn load<T: AsRef<Path>>(path: T) -> Result<BvhDocument, BvhError> {
        BvhDocument::load_with(path, &LoadOptions::default())
    }

    pub fn load_with<T: AsRef<Path>>(path: T, options: &LoadOptions) -> Result<BvhDocument, BvhError> {
        let path = path.as_ref();
        log::debug!("Loading {}", path.display());

        let text = std::fs::read_to_string(path)?;
        BvhDocument::from_str_with(&text, options)
    }

    /// Checks that the document can be written, returning its frame count
    pub fn validate(&self) -> Result<usize, BvhError> {
        let root = self.tree.root().ok_or(BvhError::EmptyDocument)?;
        if self.tree.get(root).is_some_and(|n| n.is_end_site()) {
            return Err(BvhError::EndSiteRoot);
        }

        let frame_count = self.tree.frame_count();

        for id in self.tree.iter_depth_first() {
            let Some(node) = self.tree.get(id) else {
                continue;
            };

            if node.is_end_site() {
                continue;
            }

            // Root is always written as `ROOT Hips`
            let writable_name = id == root
                || (!node.name.is_empty() && !node.name.contains(char::is_whitespace));

            if !writable_name {
                return Err(BvhError::InvalidJointName(node.name.to_owned()));
            }

            let expected = frame_count * node.channel_count();
            if node.frame_data.len() != expected {
                return Err(BvhError::FrameDataMismatch {
                    joint: node.name.to_owned(),
                    expected,
                    found: node.frame_data.len(),
                });
            }
        }

        Ok(frame_count)
    }

    /// Writes the whole document. Nothing is written if validation fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), BvhError> {
        self.validate()?;

        save_hierarchy(&self.tree, writer)?;
        save_motion(&self.tree, &self.motion_header(), writer)?;

        Ok(())
    }

    pub fn to_bvh_string(&self) -> Result<String, BvhError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;

        // Only ascii and joint names (already utf8) are written
        String::from_utf8(buffer)
            .map_err(|e| BvhError::IO(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Writes the document to `path`. The file is only touched once the whole
    /// document has been serialized.
    pub fn save<T: AsRef<Path>>(&self, path: T) -> Result<(), BvhError> {
        let path = path.as_ref();

        let text = self.to_bvh_string()?;
        std::fs::write(path, text)?;

        log::debug!("Saved {}", path.display());
        Ok(())
    }
}

impl FromStr for BvhDocument {
    type Err = BvhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BvhDocument::from_str_with(s, &LoadOptions::default())
    }
}

pub fn load<T: AsRef<Path>>(path: T) -> Result<BvhDocument, BvhError> {
    BvhDocument::load(path)
}

pub fn save<T: AsRef<Path>>(document: &BvhDocument, path: T) -> Result<(), BvhError> {
    document.save(path)
}

#[cfg(test)]
mod tests {
    use rstest::*;
    use super::*;
    use crate::axis::AxisOrder;

    const SCENARIO: &str = "\
HIERARCHY
ROOT Hips
{
    OFFSET 0.00000000 0.00000000 0.00000000
    CHANNELS 6 Zposition Xposition Yposition Zrotation Xrotation Yrotation
}
MOTION
Frames: 1
Frame Time: 0.00833333
1 2 3 10 20 30
";

    #[rstest]
    fn scenario_round_trip() {
        let doc = SCENARIO.parse::<BvhDocument>().unwrap();

        let root = doc.root().unwrap();
        assert_eq!(&[2.0, 3.0, 1.0, 20.0, 30.0, 10.0], root.frame_data.as_slice());
        assert_eq!(1, doc.frame_count());

        assert_eq!(SCENARIO, doc.to_bvh_string().unwrap());
    }

    #[rstest]
    fn empty_document_is_not_writable() {
        let doc = BvhDocument::new();

        assert!(doc.is_empty());
        assert!(matches!(doc.to_bvh_string(), Err(BvhError::EmptyDocument)));
    }

    #[rstest]
    fn ragged_frame_data_is_not_writable() {
        let mut doc = SCENARIO.parse::<BvhDocument>().unwrap();

        let tree = doc.tree_mut();
        let root = tree.root().unwrap();
        let child = tree
            .add_child(root, JointNode::new("Spine", Vector3::default(), JointKind::rotation_only(AxisOrder::XYZ)))
            .unwrap();

        let err = doc.to_bvh_string().unwrap_err();
        assert!(matches!(
            err,
            BvhError::FrameDataMismatch { ref joint, expected: 3, found: 0 } if joint == "Spine"
        ));

        doc.tree_mut().get_mut(child).unwrap().frame_data = vec![1.0, 2.0, 3.0];
        assert!(doc.to_bvh_string().is_ok());
    }

    #[rstest]
    #[case("Left Arm")]
    #[case("")]
    fn unwritable_names(#[case] name: &str) {
        let mut doc = SCENARIO.parse::<BvhDocument>().unwrap();

        let tree = doc.tree_mut();
        let root = tree.root().unwrap();
        let mut node = JointNode::new(name, Vector3::default(), JointKind::rotation_only(AxisOrder::XYZ));
        node.frame_data = vec![0.0; 3];
        tree.add_child(root, node).unwrap();

        assert!(matches!(doc.to_bvh_string(), Err(BvhError::InvalidJointName(n)) if n == name));
    }

    #[rstest]
    fn end_site_root_is_not_writable() {
        let mut tree = JointTree::with_root(JointNode::end_site(Vector3::new(1.0, 0.0, 0.0)));
        let root = tree.root().unwrap();
        tree.get_mut(root).unwrap().frame_data = vec![1.0, 2.0, 3.0];

        let doc = BvhDocument::from_tree(tree, 0.1);
        assert!(matches!(doc.to_bvh_string(), Err(BvhError::EndSiteRoot)));
    }

    #[rstest]
    fn stripping_a_nub_root_is_not_writable() {
        let mut doc = SCENARIO.parse::<BvhDocument>().unwrap();
        let root = doc.tree().root().unwrap();
        doc.tree_mut().get_mut(root).unwrap().name = String::from("LeftFinger1Nub");

        let stripped = doc.strip_finger_nubs().unwrap();
        assert!(matches!(stripped.to_bvh_string(), Err(BvhError::EndSiteRoot)));
    }

    #[rstest]
    fn root_name_is_fixed() {
        let mut doc = SCENARIO.parse::<BvhDocument>().unwrap();
        let root = doc.tree().root().unwrap();
        doc.tree_mut().get_mut(root).unwrap().name = String::from("Pelvis Root");

        let text = doc.to_bvh_string().unwrap();
        assert_eq!(SCENARIO, text);

        let pelvis = SCENARIO.replace("ROOT Hips", "ROOT Pelvis");
        assert!(matches!(
            pelvis.parse::<BvhDocument>(),
            Err(BvhError::Hierarchy(HierarchyError::MissingRoot { line: 2 }))
        ));
    }

    #[rstest]
    fn unload_and_load_root() {
        let mut doc = SCENARIO.parse::<BvhDocument>().unwrap();

        let tree = doc.unload_root();
        assert!(doc.is_empty());
        assert_eq!(0.0, doc.frame_time());
        assert_eq!(Some("Hips"), tree.root_node().map(|n| n.name.as_str()));

        doc.load_root(tree);
        doc.set_frame_time(0.00833333);
        assert_eq!(SCENARIO, doc.to_bvh_string().unwrap());
    }

    #[rstest]
    fn errors_are_categorized() {
        assert!(matches!("HIERARCHY\n".parse::<BvhDocument>(), Err(BvhError::Hierarchy(_))));

        let truncated = SCENARIO.replace("1 2 3 10 20 30\n", "1 2 3 10 20\n");
        assert!(matches!(truncated.parse::<BvhDocument>(), Err(BvhError::Motion(MotionError::ValueCount { .. }))));

        assert!(matches!(BvhDocument::load("does/not/exist.bvh"), Err(BvhError::IO(_))));
    }

    #[rstest]
    fn read_from_reader() {
        let doc = BvhDocument::read_from(SCENARIO.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(1, doc.frame_count());
    }
}
