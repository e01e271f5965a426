//! Well known joint names of the Biped and BioVision skeleton conventions

use lazy_static::lazy_static;
use std::collections::HashMap;

macro_rules! joint_table {
    ($(#[$meta:meta])* $ty:ident, $map:ident, { $($variant:ident => $name:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $ty {
            $($variant,)+
        }

        lazy_static! {
            static ref $map: HashMap<&'static str, $ty> = $ty::ALL
                .iter()
                .map(|j| (j.name(), *j))
                .collect();
        }

        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant,)+];

            pub const fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }

            /// Exact, case sensitive lookup
            pub fn from_name(name: &str) -> Option<$ty> {
                $map.get(name).copied()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

joint_table!(
    /// 3ds Max Biped skeleton
    BipedJoint, BIPED_NAMES, {
        Hips => "Hips",
        LeftHip => "LeftHip",
        LeftUpLeg => "LeftUpLeg",
        LeftKnee => "LeftKnee",
        LeftLowLeg => "LeftLowLeg",
        LeftAnkle => "LeftAnkle",
        LeftFoot => "LeftFoot",
        RightHip => "RightHip",
        RightUpLeg => "RightUpLeg",
        RightKnee => "RightKnee",
        RightLowLeg => "RightLowLeg",
        RightAnkle => "RightAnkle",
        RightFoot => "RightFoot",
        Chest => "Chest",
        Chest2 => "Chest2",
        Chest3 => "Chest3",
        Chest4 => "Chest4",
        LeftCollar => "LeftCollar",
        LeftShoulder => "LeftShoulder",
        LeftUpArm => "LeftUpArm",
        LeftElbow => "LeftElbow",
        LeftWrist => "LeftWrist",
        LeftHand => "LeftHand",
        LeftFinger0 => "LeftFinger0",
        LeftFinger01 => "LeftFinger01",
        LeftFinger02 => "LeftFinger02",
        LeftFinger1 => "LeftFinger1",
        LeftFinger11 => "LeftFinger11",
        LeftFinger12 => "LeftFinger12",
        LeftFinger2 => "LeftFinger2",
        LeftFinger21 => "LeftFinger21",
        LeftFinger22 => "LeftFinger22",
        LeftFinger3 => "LeftFinger3",
        LeftFinger31 => "LeftFinger31",
        LeftFinger32 => "LeftFinger32",
        LeftFinger4 => "LeftFinger4",
        LeftFinger41 => "LeftFinger41",
        LeftFinger42 => "LeftFinger42",
        RightCollar => "RightCollar",
        RightShoulder => "RightShoulder",
        RightUpArm => "RightUpArm",
        RightElbow => "RightElbow",
        RightWrist => "RightWrist",
        RightHand => "RightHand",
        RightFinger0 => "RightFinger0",
        RightFinger01 => "RightFinger01",
        RightFinger02 => "RightFinger02",
        RightFinger1 => "RightFinger1",
        RightFinger11 => "RightFinger11",
        RightFinger12 => "RightFinger12",
        RightFinger2 => "RightFinger2",
        RightFinger21 => "RightFinger21",
        RightFinger22 => "RightFinger22",
        RightFinger3 => "RightFinger3",
        RightFinger31 => "RightFinger31",
        RightFinger32 => "RightFinger32",
        RightFinger4 => "RightFinger4",
        RightFinger41 => "RightFinger41",
        RightFinger42 => "RightFinger42",
        Neck => "Neck",
        Head => "Head",
    }
);

joint_table!(
    /// BioVision skeleton
    BioVisionJoint, BIOVISION_NAMES, {
        Hips => "Hips",
        LeftUpLeg => "LeftUpLeg",
        LeftLeg => "LeftLeg",
        LeftFoot => "LeftFoot",
        RightUpLeg => "RightUpLeg",
        RightLeg => "RightLeg",
        RightFoot => "RightFoot",
        Spine => "Spine",
        Spine1 => "Spine1",
        Spine2 => "Spine2",
        Spine3 => "Spine3",
        Neck => "Neck",
        Head => "Head",
        LeftShoulder => "LeftShoulder",
        LeftArm => "LeftArm",
        LeftForeArm => "LeftForeArm",
        LeftHand => "LeftHand",
        LeftHandThumb1 => "LeftHandThumb1",
        LeftHandThumb2 => "LeftHandThumb2",
        LeftHandThumb3 => "LeftHandThumb3",
        LeftInHandIndex => "LeftInHandIndex",
        LeftHandIndex1 => "LeftHandIndex1",
        LeftHandIndex2 => "LeftHandIndex2",
        LeftHandIndex3 => "LeftHandIndex3",
        LeftInHandMiddle => "LeftInHandMiddle",
        LeftHandMiddle1 => "LeftHandMiddle1",
        LeftHandMiddle2 => "LeftHandMiddle2",
        LeftHandMiddle3 => "LeftHandMiddle3",
        LeftInHandRing => "LeftInHandRing",
        LeftHandRing1 => "LeftHandRing1",
        LeftHandRing2 => "LeftHandRing2",
        LeftHandRing3 => "LeftHandRing3",
        LeftInHandPinky => "LeftInHandPinky",
        LeftHandPinky1 => "LeftHandPinky1",
        LeftHandPinky2 => "LeftHandPinky2",
        LeftHandPinky3 => "LeftHandPinky3",
        RightShoulder => "RightShoulder",
        RightArm => "RightArm",
        RightForeArm => "RightForeArm",
        RightHand => "RightHand",
        RightHandThumb1 => "RightHandThumb1",
        RightHandThumb2 => "RightHandThumb2",
        RightHandThumb3 => "RightHandThumb3",
        RightInHandIndex => "RightInHandIndex",
        RightHandIndex1 => "RightHandIndex1",
        RightHandIndex2 => "RightHandIndex2",
        RightHandIndex3 => "RightHandIndex3",
        RightInHandMiddle => "RightInHandMiddle",
        RightHandMiddle1 => "RightHandMiddle1",
        RightHandMiddle2 => "RightHandMiddle2",
        RightHandMiddle3 => "RightHandMiddle3",
        RightInHandRing => "RightInHandRing",
        RightHandRing1 => "RightHandRing1",
        RightHandRing2 => "RightHandRing2",
        RightHandRing3 => "RightHandRing3",
        RightInHandPinky => "RightInHandPinky",
        RightHandPinky1 => "RightHandPinky1",
        RightHandPinky2 => "RightHandPinky2",
        RightHandPinky3 => "RightHandPinky3",
    }
);

#[cfg(test)]
mod tests {
    use rstest::*;
    use super::*;

    #[rstest]
    fn table_sizes() {
        assert_eq!(61, BipedJoint::ALL.len());
        assert_eq!(59, BioVisionJoint::ALL.len());
    }

    #[rstest]
    #[case("Hips", Some(BipedJoint::Hips))]
    #[case("LeftFinger02", Some(BipedJoint::LeftFinger02))]
    #[case("Head", Some(BipedJoint::Head))]
    #[case("hips", None)]
    #[case("LeftHandIndex1", None)]
    #[case("Invalid", None)]
    fn biped_from_name(#[case] name: &str, #[case] expected: Option<BipedJoint>) {
        assert_eq!(expected, BipedJoint::from_name(name));
    }

    #[rstest]
    #[case("Spine3", Some(BioVisionJoint::Spine3))]
    #[case("RightInHandPinky", Some(BioVisionJoint::RightInHandPinky))]
    #[case("LeftKnee", None)]
    #[case("", None)]
    fn biovision_from_name(#[case] name: &str, #[case] expected: Option<BioVisionJoint>) {
        assert_eq!(expected, BioVisionJoint::from_name(name));
    }

    #[rstest]
    fn names_map_back() {
        for joint in BipedJoint::ALL {
            assert_eq!(Some(*joint), BipedJoint::from_name(joint.name()));
        }

        for joint in BioVisionJoint::ALL {
            assert_eq!(Some(*joint), BioVisionJoint::from_name(&joint.to_string()));
        }
    }

    #[rstest]
    fn first_table_entry_is_root() {
        assert_eq!(crate::joint::ROOT_JOINT_NAME, BipedJoint::ALL[0].name());
        assert_eq!(crate::joint::ROOT_JOINT_NAME, BioVisionJoint::ALL[0].name());
    }
}
