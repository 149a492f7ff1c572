use todotxt_core::{Document, DocumentEvent, EditDelta, Position};

fn sample_document() -> Document {
    Document::from_text("todo", "Line1\nLine2\nLine3\nLine4")
}

fn delta(from: (usize, usize), to: (usize, usize), inserted: &[&str]) -> EditDelta {
    EditDelta::new(
        Position::new(from.0, from.1),
        Position::new(to.0, to.1),
        inserted.iter().map(|s| s.to_string()).collect(),
    )
}

/// Replaces the addressed range on the joined text directly; `apply_change`
/// must be equivalent to this.
fn replace_range(full: &str, from: (usize, usize), to: (usize, usize), inserted: &[&str]) -> String {
    let lines: Vec<&str> = full.split('\n').collect();
    let offset = |(line, column): (usize, usize)| -> usize {
        lines[..line].iter().map(|l| l.len() + 1).sum::<usize>() + column
    };
    format!(
        "{}{}{}",
        &full[..offset(from)],
        inserted.join("\n"),
        &full[offset(to)..]
    )
}

#[test]
fn mid_line_insert_rewrites_one_line_in_place() {
    let mut document = sample_document();
    let edited_id = document.line(1).unwrap().id();

    let events = document.apply_change(&delta((1, 3), (1, 3), &["Sample"]));

    assert_eq!(document.serialize(), "Line1\nLinSamplee2\nLine3\nLine4");
    assert!(events.is_empty(), "in-place edit must not emit events");
    assert_eq!(document.line(1).unwrap().id(), edited_id);
}

#[test]
fn whole_line_deletion_merges_head_and_tail() {
    let mut document = sample_document();
    let kept_id = document.line(1).unwrap().id();

    let events = document.apply_change(&delta((1, 0), (2, 0), &[""]));

    assert_eq!(document.serialize(), "Line1\nLine3\nLine4");
    // The line that keeps its identity is the one at `from.line`; it now
    // carries the merged text.
    assert_eq!(document.line(1).unwrap().id(), kept_id);
    assert_eq!(document.line(1).unwrap().text(), "Line3");

    match events.as_slice() {
        [DocumentEvent::LinesRemoved(removed)] => {
            assert_eq!(removed.len(), 1);
            assert_eq!(removed[0].text(), "Line3");
        }
        other => panic!("expected one removal event, got {other:?}"),
    }
}

#[test]
fn cross_line_replace_merges_prefix_and_suffix() {
    let mut document = sample_document();

    document.apply_change(&delta((1, 3), (2, 0), &["testing"]));

    assert_eq!(document.serialize(), "Line1\nLintestingLine3\nLine4");
}

#[test]
fn empty_document_bootstrap_appends_all_inserted_lines() {
    let mut document = Document::new("todo");

    let events = document.apply_change(&delta((0, 0), (0, 0), &["Line 1", "Line 2", "Line 3"]));

    assert_eq!(document.serialize(), "Line 1\nLine 2\nLine 3");
    match events.as_slice() {
        [DocumentEvent::LinesAdded { at, lines }] => {
            assert_eq!(*at, 0);
            assert_eq!(lines.len(), 3);
            assert_eq!(lines[0].text(), "Line 1");
        }
        other => panic!("expected one addition event, got {other:?}"),
    }
}

#[test]
fn multi_line_insert_splits_one_line_into_many() {
    let mut document = sample_document();

    let events = document.apply_change(&delta((0, 2), (0, 2), &["ab", "cd"]));

    assert_eq!(document.serialize(), "Liab\ncdne1\nLine2\nLine3\nLine4");
    match events.as_slice() {
        [DocumentEvent::LinesAdded { at, lines }] => {
            assert_eq!(*at, 0);
            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].text(), "cdne1");
        }
        other => panic!("expected one addition event, got {other:?}"),
    }
}

#[test]
fn removals_are_reported_before_additions() {
    let mut document = sample_document();

    let events = document.apply_change(&delta((0, 2), (2, 2), &["X", "Y"]));

    assert_eq!(document.serialize(), "LiX\nYne3\nLine4");
    match events.as_slice() {
        [DocumentEvent::LinesRemoved(removed), DocumentEvent::LinesAdded { at, lines }] => {
            let removed_texts: Vec<&str> = removed.iter().map(|l| l.text()).collect();
            assert_eq!(removed_texts, ["Line2", "Line3"]);
            assert_eq!(*at, 0);
            assert_eq!(lines[0].text(), "Yne3");
        }
        other => panic!("expected removal then addition, got {other:?}"),
    }
}

#[test]
fn apply_change_equals_substring_replace_on_joined_text() {
    let original = "2014-01-01 alpha\nbeta\ngamma\ndelta";
    let cases: &[((usize, usize), (usize, usize), &[&str])] = &[
        ((0, 0), (0, 0), &["inserted at start"]),
        ((0, 5), (1, 2), &["one"]),
        ((1, 0), (3, 5), &["a", "b", "c"]),
        ((2, 5), (2, 5), &["", ""]),
        ((0, 16), (1, 0), &[""]),
    ];

    for &(from, to, inserted) in cases {
        let mut document = Document::from_text("todo", original);
        document.apply_change(&delta(from, to, inserted));
        assert_eq!(
            document.serialize(),
            replace_range(original, from, to, inserted),
            "delta {from:?}..{to:?} {inserted:?}"
        );
    }
}

#[test]
fn empty_inserted_list_acts_as_pure_deletion() {
    let mut document = sample_document();

    document.apply_change(&delta((0, 2), (1, 2), &[]));

    // Prefix "Li" of line 0 merges with suffix "ne2" of line 1.
    assert_eq!(document.serialize(), "Line2\nLine3\nLine4");
    assert_eq!(document.line(0).unwrap().text(), "Line2");
    assert_eq!(document.len(), 3);
}

#[test]
fn delta_without_endpoints_is_ignored() {
    let mut document = sample_document();
    let before = document.serialize();

    let mut missing_to = EditDelta::default();
    missing_to.from = Some(Position::new(0, 0));
    missing_to.inserted = vec!["x".to_string()];

    assert!(document.apply_change(&EditDelta::default()).is_empty());
    assert!(document.apply_change(&missing_to).is_empty());
    assert_eq!(document.serialize(), before);
}

#[test]
fn delta_outside_the_document_is_ignored() {
    let mut document = sample_document();
    let before = document.serialize();

    assert!(document
        .apply_change(&delta((7, 0), (7, 0), &["x"]))
        .is_empty());
    assert!(document
        .apply_change(&delta((2, 0), (9, 0), &["x"]))
        .is_empty());
    assert_eq!(document.serialize(), before);
}

#[test]
fn remove_lines_batches_descending_and_reports_original_order() {
    let raw = (0..7).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let mut document = Document::from_text("todo", &raw);

    let events = document.remove_lines(&[5, 2, 3, 0]);

    assert_eq!(document.serialize(), "line 1\nline 4\nline 6");
    match events.as_slice() {
        [DocumentEvent::LinesRemoved(removed)] => {
            let texts: Vec<&str> = removed.iter().map(|l| l.text()).collect();
            assert_eq!(texts, ["line 0", "line 2", "line 3", "line 5"]);
        }
        other => panic!("expected a single removal event, got {other:?}"),
    }
}

#[test]
fn remove_lines_orders_two_digit_indices_numerically() {
    let raw = (0..12).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let mut document = Document::from_text("todo", &raw);

    document.remove_lines(&[10, 2]);

    let texts: Vec<&str> = document.lines().iter().map(|l| l.text()).collect();
    assert_eq!(texts.len(), 10);
    assert!(!texts.contains(&"line 2"));
    assert!(!texts.contains(&"line 10"));
    assert!(texts.contains(&"line 11"));
}

#[test]
fn remove_lines_ignores_out_of_range_and_duplicate_indices() {
    let raw = (0..7).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let mut document = Document::from_text("todo", &raw);

    let events = document.remove_lines(&[4, 4, 5, 6, 42]);
    assert_eq!(document.serialize(), "line 0\nline 1\nline 2\nline 3");
    match events.as_slice() {
        [DocumentEvent::LinesRemoved(removed)] => assert_eq!(removed.len(), 3),
        other => panic!("expected a single removal event, got {other:?}"),
    }

    // Same index set again: everything is now out of range, so nothing
    // happens and no event is emitted.
    let repeat = document.remove_lines(&[4, 5, 6, 42]);
    assert!(repeat.is_empty());
    assert_eq!(document.serialize(), "line 0\nline 1\nline 2\nline 3");
}

#[test]
fn load_text_replaces_the_whole_sequence() {
    let mut document = sample_document();

    document.load_text("fresh\ncontent");
    assert_eq!(document.serialize(), "fresh\ncontent");
    assert_eq!(document.len(), 2);

    // Loading the empty string yields one empty line, which still
    // serializes back to the empty string.
    document.load_text("");
    assert_eq!(document.len(), 1);
    assert_eq!(document.serialize(), "");
}

#[test]
fn edit_delta_matches_the_editor_wire_shape() {
    let delta: EditDelta = serde_json::from_str(
        r#"{"from":{"line":1,"ch":3},"to":{"line":1,"ch":3},"text":["Sample"]}"#,
    )
    .unwrap();

    assert_eq!(delta.from, Some(Position::new(1, 3)));
    assert_eq!(delta.to, Some(Position::new(1, 3)));
    assert_eq!(delta.inserted, vec!["Sample".to_string()]);

    // Partial payloads decode to the tolerated no-op shape.
    let partial: EditDelta = serde_json::from_str(r#"{"text":["x"]}"#).unwrap();
    assert_eq!(partial.from, None);
    assert_eq!(partial.to, None);

    let mut document = sample_document();
    let before = document.serialize();
    assert!(document.apply_change(&partial).is_empty());
    assert_eq!(document.serialize(), before);
}
