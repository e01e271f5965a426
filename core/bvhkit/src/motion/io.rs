use super::*;
use crate::axis::AxisOrder;
use crate::io::{Line, TextStream};
use crate::joint::*;
use crate::LoadOptions;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{Error as IOError, ErrorKind, Write};

lazy_static! {
    // Spacing around the colon varies between exporters
    static ref FRAMES_REGEX: Regex = Regex::new(r"^\s*Frames\s*:\s*(\S+)\s*$").unwrap();
    static ref FRAME_TIME_REGEX: Regex = Regex::new(r"^\s*Frame\s+Time\s*:\s*(\S+)\s*$").unwrap();
}

/// One x/y/z group of columns on a frame line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ChannelTriplet {
    joint: JointId,
    order: AxisOrder,
    /// Offset of the group inside the joint's samples for one frame
    start: usize,
    /// Samples per frame for the joint
    stride: usize,
}

/// Column layout of a frame line, computed once from the tree's traversal order
fn channel_triplets(tree: &JointTree) -> Vec<ChannelTriplet> {
    let mut triplets = Vec::new();

    for id in tree.channel_joints() {
        let Some(JointKind::Joint { position_order, rotation_order }) = tree.get(id).map(|n| n.kind) else {
            continue;
        };

        let stride = if position_order.is_some() { 6 } else { 3 };

        if let Some(order) = position_order {
            triplets.push(ChannelTriplet { joint: id, order, start: 0, stride });
        }

        triplets.push(ChannelTriplet {
            joint: id,
            order: rotation_order,
            start: stride - 3,
            stride,
        });
    }

    triplets
}

/// Parses the `MOTION` section and appends every frame to the channel-bearing
/// joints of `tree`, in canonical axis order
pub fn load_motion(stream: &mut TextStream, tree: &mut JointTree, options: &LoadOptions) -> Result<MotionHeader, MotionError> {
    read_motion_keyword(stream)?;
    let frame_count = read_frame_count(stream)?;
    let frame_time = read_frame_time(stream)?;

    let triplets = channel_triplets(tree);
    let width = triplets.len() * 3;

    log::debug!("Reading {frame_count} frames of {width} values");

    let mut frames_read = 0;
    while frames_read < frame_count {
        let Some(line) = stream.next_line() else {
            if options.lenient_motion {
                log::warn!("Expected {frame_count} frames but only found {frames_read}, truncating");
                break;
            }

            return Err(MotionError::MissingFrames {
                expected: frame_count,
                found: frames_read,
            });
        };

        let values = read_frame_values(&line, width)?;
        bind_frame(tree, &triplets, &values);

        frames_read += 1;
    }

    if let Some(line) = stream.next_line() {
        return Err(MotionError::TrailingData { line: line.number });
    }

    Ok(MotionHeader {
        frame_count: frames_read,
        frame_time,
    })
}

fn read_motion_keyword(stream: &mut TextStream) -> Result<(), MotionError> {
    let line = stream
        .next_line()
        .ok_or(MotionError::UnexpectedEof { expected: "MOTION" })?;

    let mut tokens = line.tokens();
    match (tokens.next(), tokens.next()) {
        (Some("MOTION"), None) => Ok(()),
        _ => Err(MotionError::MissingMotion { found: line.text.trim().to_owned() }),
    }
}

fn read_frame_count(stream: &mut TextStream) -> Result<usize, MotionError> {
    let line = stream
        .next_line()
        .ok_or(MotionError::UnexpectedEof { expected: "Frames" })?;

    FRAMES_REGEX
        .captures(line.text)
        .and_then(|c| c[1].parse::<usize>().ok())
        .ok_or(MotionError::InvalidFrameCount { line: line.number })
}

fn read_frame_time(stream: &mut TextStream) -> Result<f32, MotionError> {
    let line = stream
        .next_line()
        .ok_or(MotionError::UnexpectedEof { expected: "Frame Time" })?;

    FRAME_TIME_REGEX
        .captures(line.text)
        .and_then(|c| c[1].parse::<f32>().ok())
        .ok_or(MotionError::InvalidFrameTime { line: line.number })
}

fn read_frame_values(line: &Line, width: usize) -> Result<Vec<f32>, MotionError> {
    let values = line
        .tokens()
        .map(|t| t.parse::<f32>().map_err(|_| MotionError::InvalidValue {
            line: line.number,
            token: t.to_owned(),
        }))
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() != width {
        return Err(MotionError::ValueCount {
            line: line.number,
            expected: width,
            found: values.len(),
        });
    }

    Ok(values)
}

fn bind_frame(tree: &mut JointTree, triplets: &[ChannelTriplet], values: &[f32]) {
    for (triplet, chunk) in triplets.iter().zip(values.chunks_exact(3)) {
        let (Some(node), [a, b, c]) = (tree.get_mut(triplet.joint), chunk) else {
            continue;
        };

        node.frame_data.extend(triplet.order.decode([*a, *b, *c]));
    }
}

/// Writes the `MOTION` section. Every channel-bearing joint must hold
/// `frame_count` frames of samples.
pub fn save_motion<W: Write>(tree: &JointTree, header: &MotionHeader, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "MOTION")?;
    writeln!(writer, "Frames: {}", header.frame_count)?;
    writeln!(writer, "Frame Time: {:.8}", header.frame_time)?;

    let triplets = channel_triplets(tree);
    let mut values = Vec::with_capacity(triplets.len() * 3);

    for frame in 0..header.frame_count {
        values.clear();

        for triplet in triplets.iter() {
            let start = frame * triplet.stride + triplet.start;
            let samples = tree
                .get(triplet.joint)
                .and_then(|n| n.frame_data.get(start..(start + 3)));

            let Some([x, y, z]) = samples else {
                return Err(IOError::new(ErrorKind::InvalidData, format!("Missing samples for frame {frame}")));
            };

            values.extend(triplet.order.encode([*x, *y, *z]));
        }

        writeln!(writer, "{}", values.iter().format(" "))?;
    }

    Ok(())
}
