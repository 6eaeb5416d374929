//! Group bounding boxes.

use archway_core::geometry::{Bounds, Insets};

use crate::{
    diagnostic::{Diagnostics, WarningCode},
    layout::PositionedGroup,
    structure::ArchitectureGraph,
};

/// Padding between a group's outline and its members.
pub const GROUP_PADDING: f32 = 20.0;

/// Bounds every group around its resolved members.
///
/// Unknown member ids are dropped. A group left without members is omitted.
/// `node_bounds` is indexed like [`ArchitectureGraph::entries`].
pub fn bound_groups<'a>(
    graph: &ArchitectureGraph<'a>,
    node_bounds: &[Bounds],
    diagnostics: &mut Diagnostics,
) -> Vec<PositionedGroup<'a>> {
    let mut positioned = Vec::new();

    for group in graph.architecture().groups() {
        let mut members = Vec::new();
        for member in group.members() {
            match graph.entry_index(member.as_str()) {
                Some(entry) if !members.contains(&entry) => members.push(entry),
                Some(_) => {}
                None => diagnostics.emit(
                    WarningCode::W002,
                    format!("group `{}` member `{member}` dropped: unknown node", group.id()),
                ),
            }
        }

        let Some(union) = members
            .iter()
            .map(|&entry| node_bounds[entry])
            .reduce(|acc, bounds| acc.merge(&bounds))
        else {
            diagnostics.emit(
                WarningCode::W003,
                format!("group `{}` omitted: no resolvable members", group.id()),
            );
            continue;
        };

        positioned.push(PositionedGroup::new(
            group,
            union.add_padding(Insets::uniform(GROUP_PADDING)),
            members,
        ));
    }

    positioned
}
