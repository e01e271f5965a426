use super::HierarchyError;
use crate::axis::{AxisOrder, ChannelKind};
use crate::io::{Line, TextStream};
use crate::joint::*;
use itertools::Itertools;
use std::io::Write;

const INDENT: &str = "    ";

fn next_line<'a>(stream: &mut TextStream<'a>, expected: &'static str) -> Result<Line<'a>, HierarchyError> {
    stream
        .next_line()
        .ok_or(HierarchyError::UnexpectedEof { expected })
}

fn unexpected(line: &Line, expected: &'static str) -> HierarchyError {
    HierarchyError::Unexpected {
        line: line.number,
        expected,
        found: line.text.trim().to_owned(),
    }
}

/// Parses the structural section into a new tree.
///
/// On failure the stream is left where it was before the call.
pub fn load_hierarchy(stream: &mut TextStream) -> Result<JointTree, HierarchyError> {
    let start = stream.checkpoint();

    let result = read_hierarchy(stream);
    if result.is_err() {
        stream.rewind(start);
    }

    result
}

fn read_hierarchy(stream: &mut TextStream) -> Result<JointTree, HierarchyError> {
    read_hierarchy_keyword(stream)?;
    read_root_declaration(stream)?;

    let mut tree = JointTree::new();
    let root = load_joint(stream, &mut tree, None, String::from(ROOT_JOINT_NAME))?;

    log::debug!(
        "Parsed hierarchy with root \"{}\" and {} nodes",
        tree.get(root).map(|n| n.name.as_str()).unwrap_or_default(),
        tree.len()
    );

    Ok(tree)
}

fn read_hierarchy_keyword(stream: &mut TextStream) -> Result<(), HierarchyError> {
    while let Some(line) = stream.next_line() {
        if line.tokens().any(|t| t == "HIERARCHY") {
            return Ok(());
        }
    }

    Err(HierarchyError::MissingHierarchy)
}

/// Only `ROOT Hips` is accepted, the root name is fixed
fn read_root_declaration(stream: &mut TextStream) -> Result<(), HierarchyError> {
    let line = stream
        .next_line()
        .ok_or(HierarchyError::UnexpectedEof { expected: "ROOT" })?;

    let mut tokens = line.tokens();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some("ROOT"), Some(ROOT_JOINT_NAME), None) => Ok(()),
        _ => Err(HierarchyError::MissingRoot { line: line.number }),
    }
}

/// Parses a `{ OFFSET CHANNELS ... }` joint block and attaches it below `parent`
/// (or as a detached node when `parent` is `None`, which becomes the root of an
/// empty tree).
///
/// Failure anywhere inside the block, including in nested joints, removes the
/// partially built node and rewinds the stream to where the block started.
pub fn load_joint(stream: &mut TextStream, tree: &mut JointTree, parent: Option<JointId>, name: String) -> Result<JointId, HierarchyError> {
    let checkpoint = stream.checkpoint();

    let result = read_joint(stream, tree, parent, name);
    if result.is_err() {
        stream.rewind(checkpoint);
    }

    result
}

fn read_joint(stream: &mut TextStream, tree: &mut JointTree, parent: Option<JointId>, name: String) -> Result<JointId, HierarchyError> {
    read_open_brace(stream)?;
    let offset = read_offset(stream)?;
    let kind = read_channels(stream)?;

    let node = JointNode::new(name, offset, kind);
    let id = match parent {
        Some(parent) => tree.add_child(parent, node)?,
        None if tree.root().is_none() => tree.set_root(node),
        None => tree.insert(None, node)?,
    };

    if let Err(err) = read_children(stream, tree, id) {
        tree.remove(id)?;
        return Err(err);
    }

    Ok(id)
}

fn read_children(stream: &mut TextStream, tree: &mut JointTree, id: JointId) -> Result<(), HierarchyError> {
    const EXPECTED: &str = "JOINT, End Site or }";

    loop {
        let line = next_line(stream, EXPECTED)?;

        let mut tokens = line.tokens();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some("}"), None, _) => return Ok(()),
            (Some("JOINT"), Some(name), None) => {
                load_joint(stream, tree, Some(id), name.to_owned())?;
            },
            (Some("End"), Some("Site"), None) => {
                let offset = read_end_site(stream)?;
                tree.add_child(id, JointNode::end_site(offset))?;
            },
            _ => return Err(unexpected(&line, EXPECTED)),
        }
    }
}

fn read_end_site(stream: &mut TextStream) -> Result<Vector3, HierarchyError> {
    read_open_brace(stream)?;
    let offset = read_offset(stream)?;
    read_close_brace(stream)?;

    Ok(offset)
}

fn read_open_brace(stream: &mut TextStream) -> Result<(), HierarchyError> {
    read_single_token(stream, "{")
}

fn read_close_brace(stream: &mut TextStream) -> Result<(), HierarchyError> {
    read_single_token(stream, "}")
}

fn read_single_token(stream: &mut TextStream, token: &'static str) -> Result<(), HierarchyError> {
    let line = next_line(stream, token)?;

    let mut tokens = line.tokens();
    match (tokens.next(), tokens.next()) {
        (Some(t), None) if t == token => Ok(()),
        _ => Err(unexpected(&line, token)),
    }
}

fn read_offset(stream: &mut TextStream) -> Result<Vector3, HierarchyError> {
    let line = next_line(stream, "OFFSET")?;

    let mut tokens = line.tokens();
    if tokens.next() != Some("OFFSET") {
        return Err(unexpected(&line, "OFFSET"));
    }

    let values = tokens
        .map(|t| t.parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| HierarchyError::InvalidOffset { line: line.number })?;

    match values.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(HierarchyError::InvalidOffset { line: line.number }),
    }
}

fn read_channels(stream: &mut TextStream) -> Result<JointKind, HierarchyError> {
    let line = next_line(stream, "CHANNELS")?;

    let mut tokens = line.tokens();
    if tokens.next() != Some("CHANNELS") {
        return Err(unexpected(&line, "CHANNELS"));
    }

    let invalid = |reason: String| HierarchyError::InvalidChannels {
        line: line.number,
        reason,
    };

    let count = tokens
        .next()
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(|| invalid(String::from("missing channel count")))?;

    let names = tokens.collect::<Vec<_>>();
    if names.len() != count {
        return Err(invalid(format!("declares {count} channels but lists {}", names.len())));
    }

    let order = |names: &[&str], kind: ChannelKind| {
        AxisOrder::from_channel_names(names, kind)
            .ok_or_else(|| invalid(format!("\"{}\" is not a {kind:?} axis order", names.join(" "))))
    };

    match count {
        3 => Ok(JointKind::rotation_only(
            order(&names[..3], ChannelKind::Rotation)?,
        )),
        6 => Ok(JointKind::with_position(
            order(&names[..3], ChannelKind::Position)?,
            order(&names[3..], ChannelKind::Rotation)?,
        )),
        _ => Err(invalid(format!("channel count of {count} not supported"))),
    }
}

/// Writes the structural section for the tree's root
pub fn save_hierarchy<W: Write>(tree: &JointTree, writer: &mut W) -> std::io::Result<()> {
    let Some(root) = tree.root_node() else {
        return Ok(());
    };

    writeln!(writer, "HIERARCHY")?;
    writeln!(writer, "ROOT {ROOT_JOINT_NAME}")?;

    save_joint(tree, root, 0, writer)
}

fn save_joint<W: Write>(tree: &JointTree, node: &JointNode, depth: usize, writer: &mut W) -> std::io::Result<()> {
    let indent = INDENT.repeat(depth);
    let inner = INDENT.repeat(depth + 1);

    writeln!(writer, "{indent}{{")?;
    writeln!(
        writer,
        "{inner}OFFSET {:.8} {:.8} {:.8}",
        node.offset.x,
        node.offset.y,
        node.offset.z
    )?;

    if let JointKind::Joint { position_order, rotation_order } = node.kind {
        let names = position_order
            .map(|o| o.channel_names(ChannelKind::Position))
            .into_iter()
            .flatten()
            .chain(rotation_order.channel_names(ChannelKind::Rotation));

        writeln!(writer, "{inner}CHANNELS {} {}", node.channel_count(), names.format(" "))?;

        for child in node.children().iter().filter_map(|c| tree.get(*c)) {
            if child.is_end_site() {
                writeln!(writer, "{inner}End Site")?;
            } else {
                writeln!(writer, "{inner}JOINT {}", child.name)?;
            }

            save_joint(tree, child, depth + 1, writer)?;
        }
    }

    writeln!(writer, "{indent}}}")
}
