use bvhkit::joint::JointKind;
use bvhkit::{load, save, BvhDocument, BvhError, LoadOptions};
use rstest::*;
use std::path::PathBuf;
use tempfile::TempDir;

const WALK: &str = "\
HIERARCHY
ROOT Hips
{
    OFFSET 0.0 0.0 0.0
    CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation
    JOINT Spine
    {
        OFFSET 0.0 10.5 -0.25
        CHANNELS 3 Zrotation Xrotation Yrotation
        JOINT LeftHand
        {
            OFFSET 4.0 0.0 0.0
            CHANNELS 3 Zrotation Yrotation Xrotation
            JOINT LeftFinger1Nub
            {
                OFFSET 1.0 0.0 0.0
                CHANNELS 3 Zrotation Xrotation Yrotation
                End Site
                {
                    OFFSET 0.5 0.0 0.0
                }
            }
        }
    }
    JOINT LeftUpLeg
    {
        OFFSET 3.0 -2.0 0.0
        CHANNELS 3 Yrotation Xrotation Zrotation
        End Site
        {
            OFFSET 0.0 -8.0 0.0
        }
    }
}
MOTION
Frames: 3
Frame Time: 0.0333333
0.0 90.0 0.0 0.0 0.0 0.0 1.5 2.5 3.5 4 5 6 7 8 9 10 11 12
0.1 90.1 0.2 1.0 -1.0 0.5 1.5 2.5 3.5 4 5 6 7 8 9 10 11 12
0.2 90.2 0.4 2.0 -2.0 1.0 1.5 2.5 3.5 4 5 6 7 8 9 10 11 12.125
";

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn write_input(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("input.bvh");
    std::fs::write(&path, text).unwrap();
    path
}

#[rstest]
fn save_then_load_is_idempotent(dir: TempDir) {
    let input = write_input(&dir, WALK);
    let first = load(&input).unwrap();

    let output = dir.path().join("first.bvh");
    save(&first, &output).unwrap();
    let second = load(&output).unwrap();

    assert_eq!(first, second);

    // Second pass is byte stable
    let again = dir.path().join("second.bvh");
    save(&second, &again).unwrap();
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        std::fs::read_to_string(&again).unwrap()
    );
}

#[rstest]
fn frame_lines_survive_reordered_channels(dir: TempDir) {
    let input = write_input(&dir, WALK);
    let doc = load(&input).unwrap();

    let text = doc.to_bvh_string().unwrap();
    let frames = text.lines().skip_while(|l| !l.starts_with("Frame Time")).skip(1).collect::<Vec<_>>();

    assert_eq!(3, frames.len());
    assert_eq!("0.2 90.2 0.4 2 -2 1 1.5 2.5 3.5 4 5 6 7 8 9 10 11 12.125", frames[2]);
}

#[rstest]
fn strip_nubs_round_trip(dir: TempDir) {
    let input = write_input(&dir, WALK);
    let doc = load(&input).unwrap();
    let stripped = doc.strip_finger_nubs().unwrap();

    let output = dir.path().join("stripped.bvh");
    save(&stripped, &output).unwrap();
    let reloaded = load(&output).unwrap();

    let tree = reloaded.tree();
    let nub = tree.get(tree.find_by_name("LeftHand").unwrap()).unwrap();
    let nub_end = tree.get(nub.children()[0]).unwrap();
    assert_eq!(JointKind::EndSite, nub_end.kind);
    assert_eq!(1.0, nub_end.offset.x);

    // Nub channels are gone from the frame lines
    assert_eq!(15, tree.channel_count());
    assert_eq!(3, reloaded.frame_count());

    // Source document keeps its nub
    assert_eq!(18, doc.tree().channel_count());
}

#[rstest]
fn failed_save_leaves_no_file(dir: TempDir) {
    let output = dir.path().join("empty.bvh");

    assert!(matches!(save(&BvhDocument::new(), &output), Err(BvhError::EmptyDocument)));
    assert!(!output.exists());
}

#[rstest]
fn lenient_load_accepts_truncated_motion(dir: TempDir) {
    let truncated = WALK.replace("Frames: 3", "Frames: 5");
    let input = write_input(&dir, &truncated);

    assert!(load(&input).is_err());

    let doc = BvhDocument::load_with(&input, &LoadOptions { lenient_motion: true }).unwrap();
    assert_eq!(3, doc.frame_count());
}
