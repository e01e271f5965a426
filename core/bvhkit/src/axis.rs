use std::fmt;
use thiserror::Error as ThisError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Slot of the axis in canonical (x, y, z) storage
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    const fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }

    fn from_letter(c: char) -> Option<Axis> {
        match c {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Position,
    Rotation,
}

impl ChannelKind {
    const fn suffix(self) -> &'static str {
        match self {
            ChannelKind::Position => "position",
            ChannelKind::Rotation => "rotation",
        }
    }
}

const POSITION_NAMES: [&str; 3] = ["Xposition", "Yposition", "Zposition"];
const ROTATION_NAMES: [&str; 3] = ["Xrotation", "Yrotation", "Zrotation"];

/// Order in which a joint declares its x/y/z channels on disk.
///
/// Values are always kept in canonical x, y, z order in memory. [`AxisOrder::decode`]
/// turns a triplet read from a file into canonical order and [`AxisOrder::encode`]
/// turns it back into file order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisOrder {
    #[default]
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    ZYX,
}

#[derive(Debug, ThisError, PartialEq, Eq)]
#[error("\"{0}\" is not an axis order")]
pub struct AxisOrderParseError(pub String);

impl AxisOrder {
    pub const ALL: [AxisOrder; 6] = [
        AxisOrder::XYZ,
        AxisOrder::XZY,
        AxisOrder::YXZ,
        AxisOrder::YZX,
        AxisOrder::ZXY,
        AxisOrder::ZYX,
    ];

    pub const fn axes(self) -> [Axis; 3] {
        use Axis::*;

        match self {
            AxisOrder::XYZ => [X, Y, Z],
            AxisOrder::XZY => [X, Z, Y],
            AxisOrder::YXZ => [Y, X, Z],
            AxisOrder::YZX => [Y, Z, X],
            AxisOrder::ZXY => [Z, X, Y],
            AxisOrder::ZYX => [Z, Y, X],
        }
    }

    /// Returns `None` if an axis repeats
    pub fn from_axes(axes: [Axis; 3]) -> Option<AxisOrder> {
        AxisOrder::ALL
            .into_iter()
            .find(|order| order.axes() == axes)
    }

    /// File order -> canonical (x, y, z)
    pub fn decode(self, values: [f32; 3]) -> [f32; 3] {
        let mut canonical = [0.0; 3];

        for (axis, value) in self.axes().into_iter().zip(values) {
            canonical[axis.index()] = value;
        }

        canonical
    }

    /// Canonical (x, y, z) -> file order
    pub fn encode(self, canonical: [f32; 3]) -> [f32; 3] {
        self.axes().map(|axis| canonical[axis.index()])
    }

    pub fn channel_names(self, kind: ChannelKind) -> [&'static str; 3] {
        let names = match kind {
            ChannelKind::Position => &POSITION_NAMES,
            ChannelKind::Rotation => &ROTATION_NAMES,
        };

        self.axes().map(|axis| names[axis.index()])
    }

    /// Matches three channel names such as `Zrotation Xrotation Yrotation`.
    /// Names of the wrong kind, unknown names, and repeated axes all give `None`.
    pub fn from_channel_names(names: &[&str], kind: ChannelKind) -> Option<AxisOrder> {
        let [a, b, c] = names else {
            return None;
        };

        let axes = [
            parse_channel_axis(a, kind)?,
            parse_channel_axis(b, kind)?,
            parse_channel_axis(c, kind)?,
        ];

        AxisOrder::from_axes(axes)
    }
}

fn parse_channel_axis(name: &str, kind: ChannelKind) -> Option<Axis> {
    let mut chars = name.chars();
    let axis = chars.next().and_then(Axis::from_letter)?;

    (chars.as_str() == kind.suffix()).then_some(axis)
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in self.axes() {
            write!(f, "{}", axis.letter())?;
        }

        Ok(())
    }
}

impl std::str::FromStr for AxisOrder {
    type Err = AxisOrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters = s
            .chars()
            .map(|c| Axis::from_letter(c.to_ascii_uppercase()))
            .collect::<Option<Vec<_>>>();

        letters
            .and_then(|l| <[Axis; 3]>::try_from(l).ok())
            .and_then(AxisOrder::from_axes)
            .ok_or_else(|| AxisOrderParseError(s.to_owned()))
    }
}
