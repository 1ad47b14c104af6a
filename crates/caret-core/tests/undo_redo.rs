use caret_core::{ActionKind, EditorSession, LastPosition, Motion, Request, TextPos};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SOURCE: &str = "package main\n\nfunc main() {\n\tx := f(a, (b), c)\n    if x {\n\t\treturn\n\t}\n}";

fn open_at(text: &str, line: usize, byte: usize) -> EditorSession {
    EditorSession::open(text, Some(LastPosition { line, byte }))
}

#[test]
fn test_undo_redo_single_insert() {
    let mut session = open_at("", 0, 0);
    session.execute(Request::Insert("a".into())).unwrap();
    assert_eq!(session.text(), "a");
    assert!(session.history().can_undo());
    assert!(!session.history().can_redo());

    session.execute(Request::Undo).unwrap();
    assert_eq!(session.text(), "");
    assert!(!session.history().can_undo());
    assert!(session.history().can_redo());

    session.execute(Request::Redo).unwrap();
    assert_eq!(session.text(), "a");
    assert_eq!(session.cursor().pos(), TextPos::new(0, 1));
}

#[test]
fn test_each_edit_kind_round_trips() {
    let cases: Vec<(Vec<Request>, ActionKind)> = vec![
        (vec![Request::Insert("zz\nq".into())], ActionKind::Insert),
        (vec![Request::Delete], ActionKind::Delete),
        (vec![Request::Backspace], ActionKind::Backspace),
        (
            vec![
                Request::SelectionOn,
                Request::Move(Motion::Down),
                Request::DeleteSelection,
            ],
            ActionKind::DeleteSelection,
        ),
        (vec![Request::Indent], ActionKind::Indent),
        (vec![Request::Outdent], ActionKind::Outdent),
        (vec![Request::Replace("r".into())], ActionKind::Replace),
        (vec![Request::Copy, Request::Paste], ActionKind::Paste),
    ];
    for (requests, kind) in cases {
        let mut session = open_at(SOURCE, 3, 1);
        let outcome = session.execute_batch(requests.clone()).unwrap();
        assert_eq!(outcome.actions.len(), 1, "{requests:?}");
        assert_eq!(outcome.actions[0].kind(), kind);
        let edited = session.text();
        let edited_at = session.cursor().pos();

        session.execute(Request::Undo).unwrap();
        assert_eq!(session.text(), SOURCE, "{kind}");
        assert_eq!(session.cursor().pos(), outcome.actions[0].before().pos(), "{kind}");

        session.execute(Request::Redo).unwrap();
        assert_eq!(session.text(), edited, "{kind}");
        assert_eq!(session.cursor().pos(), edited_at, "{kind}");
    }
}

#[test]
fn test_new_edit_after_partial_undo_discards_redo() {
    let mut session = open_at("", 0, 0);
    for ch in ["a", "b", "c"] {
        session.execute(Request::Insert(ch.into())).unwrap();
    }
    session.execute(Request::Undo).unwrap();
    session.execute(Request::Undo).unwrap();
    assert_eq!(session.history().redo_depth(), 2);

    session.execute(Request::Insert("x".into())).unwrap();
    assert_eq!(session.text(), "ax");
    assert_eq!(session.history().redo_depth(), 0);

    let outcome = session.execute(Request::Redo).unwrap();
    assert!(outcome.actions.is_empty());
    assert_eq!(session.text(), "ax");
}

#[test]
fn test_undo_redo_at_boundaries_are_noops() {
    let mut session = open_at("abc", 0, 1);
    let outcome = session.execute(Request::Undo).unwrap();
    assert!(outcome.actions.is_empty());
    assert_eq!(session.cursor().pos(), TextPos::new(0, 1));
    let outcome = session.execute(Request::Redo).unwrap();
    assert!(outcome.actions.is_empty());
}

#[test]
fn test_multi_line_outdent_restores_exact_whitespace() {
    let text = "\tone\n  two\n      three\nfour";
    let mut session = open_at(text, 0, 0);
    session
        .execute_batch([
            Request::SelectionOn,
            Request::Move(Motion::Down),
            Request::Move(Motion::Down),
            Request::Move(Motion::Down),
            Request::Outdent,
        ])
        .unwrap();
    // Selection ends at column 0 of "four": that line is not touched.
    assert_eq!(session.text(), "one\ntwo\n  three\nfour");
    session.execute(Request::Undo).unwrap();
    assert_eq!(session.text(), text);
    session.execute(Request::Redo).unwrap();
    assert_eq!(session.text(), "one\ntwo\n  three\nfour");
}

fn random_motion(rng: &mut StdRng) -> Motion {
    let motions = [
        Motion::Left,
        Motion::Right,
        Motion::Up,
        Motion::Down,
        Motion::WordForward,
        Motion::WordBackward,
        Motion::LineEnd,
        Motion::LineStartSkippingIndent,
        Motion::LineEndAdvance,
        Motion::PageUp,
        Motion::PageDown,
        Motion::DocumentEnd,
        Motion::MatchingBracket,
        Motion::NextArgument,
    ];
    motions.choose(rng).cloned().unwrap_or(Motion::Right)
}

fn random_batch(rng: &mut StdRng) -> Vec<Request> {
    const TEXTS: [&str; 7] = ["a", "é", "你", "\t", "\n", "(x)", "ab\n  cd"];
    match rng.gen_range(0..12) {
        0 | 1 => vec![Request::Insert(TEXTS.choose(rng).unwrap_or(&"a").to_string())],
        2 => vec![Request::Delete],
        3 => vec![Request::Backspace],
        4 => vec![Request::NewlineAutoIndent],
        5 => vec![Request::Indent],
        6 => vec![Request::Outdent],
        7 => vec![
            Request::SelectionOn,
            Request::Move(random_motion(rng)),
            Request::Move(random_motion(rng)),
            Request::DeleteSelection,
            Request::SelectionOff,
        ],
        8 => vec![Request::SelectWord, Request::Cut, Request::SelectionOff],
        9 => vec![Request::Paste],
        10 => vec![Request::Replace("R\n".into())],
        _ => vec![Request::Move(random_motion(rng))],
    }
}

#[test]
fn test_random_edit_sequences_undo_and_redo_exactly() {
    for seed in 0..40u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = open_at(SOURCE, 2, 5);
        let mut texts_before = Vec::new();
        let mut befores = Vec::new();

        for _ in 0..60 {
            let text_before = session.text();
            let outcome = session.execute_batch(random_batch(&mut rng)).unwrap();
            assert!(outcome.actions.len() <= 1);
            if let Some(action) = outcome.actions.first() {
                texts_before.push(text_before);
                befores.push(action.before().pos());
            }
        }
        let final_text = session.text();
        assert_eq!(session.history().len(), texts_before.len());

        for (expected, before) in texts_before.iter().zip(&befores).rev() {
            session.execute(Request::Undo).unwrap();
            assert_eq!(&session.text(), expected, "seed {seed}");
            assert_eq!(session.cursor().pos(), *before, "seed {seed}");
        }
        assert_eq!(session.text(), SOURCE, "seed {seed}");
        assert!(!session.is_modified());

        while session.history().can_redo() {
            session.execute(Request::Redo).unwrap();
        }
        assert_eq!(session.text(), final_text, "seed {seed}");
    }
}
