use super::neighbor::find_neighbor;
use crate::core::{
    CopyReport,
    Direction,
    FieldRule,
    FieldWrite,
    LinkError,
    MissingField,
    Note,
    NoteRole,
    RuleSet,
    RuleSide,
};

/// Copy fields between the note `note_id` and its neighbor in sort order,
/// per the note type's rule set.
///
/// `notes` is the full unsorted set of notes sharing the note type;
/// mutation happens in place on the two notes involved. `NoNeighbor`,
/// `NoRuleSet` and `TypeMismatch` abort before anything is written.
/// Rules whose fields are absent are skipped and reported as warnings;
/// writes already applied before a warning stand.
pub fn link(
    notes: &mut [Note],
    note_id: u64,
    ruleset: Option<&RuleSet>,
    direction: Direction,
    bothways: bool,
) -> Result<CopyReport, LinkError> {
    let neighbor_idx = find_neighbor(notes, note_id, direction)?;
    let note_idx = notes
        .iter()
        .position(|n| n.id == note_id)
        .ok_or(LinkError::NoNeighbor)?;

    let ruleset = match ruleset {
        Some(r) => r,
        None => return Err(LinkError::NoRuleSet(notes[note_idx].note_type_name.clone())),
    };

    // Should not occur when the caller groups notes by type correctly,
    // but a mismatched neighbor means the candidate list is inconsistent.
    if notes[neighbor_idx].note_type_name != notes[note_idx].note_type_name {
        return Err(LinkError::TypeMismatch {
            expected: notes[note_idx].note_type_name.clone(),
            found: notes[neighbor_idx].note_type_name.clone(),
        });
    }

    // Former/latter is anchored to sort order: with `Previous` the
    // neighbor is the former note, so pulling into the current note is a
    // former -> latter copy, which is what backward_rules declare. With
    // `Next` the roles flip and the pull uses forward_rules.
    let (pull_rules, push_rules) = match direction {
        Direction::Previous => (&ruleset.backward_rules, &ruleset.forward_rules),
        Direction::Next => (&ruleset.forward_rules, &ruleset.backward_rules),
    };

    let (note, neighbor) = pair_mut(notes, note_idx, neighbor_idx);
    let mut report = CopyReport::default();

    apply_rules(pull_rules, neighbor, note, NoteRole::Current, &mut report);
    if bothways {
        apply_rules(push_rules, note, neighbor, NoteRole::Neighbor, &mut report);
    }

    Ok(report)
}

/// Apply one rule list in declared order, copying verbatim from `source`
/// into `dest`. Later rules may overwrite earlier targets; last write
/// wins. A rule naming a field absent on either note is skipped and
/// recorded, never applied partially.
fn apply_rules(
    rules: &[FieldRule],
    source: &Note,
    dest: &mut Note,
    dest_role: NoteRole,
    report: &mut CopyReport,
) {
    for rule in rules {
        let value = match source.fields.get(&rule.source_field) {
            Some(v) => v.clone(),
            None => {
                report.warnings.push(MissingField {
                    rule: rule.clone(),
                    side: RuleSide::Source,
                    role: dest_role,
                });
                continue;
            }
        };

        // Field sets are fixed by the note type; a target the note does
        // not have is not ours to invent.
        if !dest.fields.contains_key(&rule.target_field) {
            report.warnings.push(MissingField {
                rule: rule.clone(),
                side: RuleSide::Target,
                role: dest_role,
            });
            continue;
        }

        let old = dest.fields.insert(rule.target_field.clone(), value.clone());
        report.writes.push(FieldWrite {
            note_id: dest.id,
            role: dest_role,
            field: rule.target_field.clone(),
            old,
            new: value,
        });
    }
}

fn pair_mut(notes: &mut [Note], a: usize, b: usize) -> (&mut Note, &mut Note) {
    debug_assert!(a != b);
    if a < b {
        let (left, right) = notes.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = notes.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
