use caret_core::offsets::{byte_from_visual, visual_from_byte};
use caret_core::{Buffer, Cursor, TextPos};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const ALPHABET: [char; 10] = ['a', 'Z', '7', ' ', '\t', '.', 'é', '你', '\u{301}', '🦀'];

fn random_line(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..24);
    (0..len)
        .map(|_| *ALPHABET.choose(rng).unwrap_or(&'a'))
        .collect()
}

#[test]
fn test_visual_round_trip_on_random_lines() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let line = random_line(&mut rng);
        let tab_width = rng.gen_range(1..9);
        let boundaries = line
            .char_indices()
            .map(|(b, _)| b)
            .chain(std::iter::once(line.len()));
        for byte in boundaries {
            let visual = visual_from_byte(&line, byte, tab_width);
            assert_eq!(byte_from_visual(&line, visual, tab_width), byte, "{line:?}");
        }
        // Every column maps to a boundary whose column does not exceed it.
        for column in 0..visual_from_byte(&line, line.len(), tab_width) + 2 {
            let byte = byte_from_visual(&line, column, tab_width);
            assert!(line.is_char_boundary(byte));
            assert!(visual_from_byte(&line, byte, tab_width) <= column);
        }
    }
}

#[test]
fn test_right_then_left_restores_position_everywhere() {
    let mut rng = StdRng::seed_from_u64(11);
    let text = (0..6)
        .map(|_| random_line(&mut rng))
        .collect::<Vec<_>>()
        .join("\n");
    let buffer = Buffer::from_text(&text);
    for (line, content) in buffer.lines().enumerate() {
        let boundaries = content
            .char_indices()
            .map(|(b, _)| b)
            .chain(std::iter::once(content.len()));
        for byte in boundaries {
            let mut cursor = Cursor::at(&buffer, TextPos::new(line, byte), 4);
            let start = (cursor.line(), cursor.byte(), cursor.visual());
            if cursor.at_buffer_end(&buffer) {
                cursor.move_right(&buffer);
                assert_eq!((cursor.line(), cursor.byte(), cursor.visual()), start);
                continue;
            }
            cursor.move_right(&buffer);
            cursor.move_left(&buffer);
            assert_eq!((cursor.line(), cursor.byte(), cursor.visual()), start);
        }
    }
}

#[test]
fn test_vertical_motion_never_splits_a_glyph() {
    let mut rng = StdRng::seed_from_u64(3);
    let text = (0..30)
        .map(|_| random_line(&mut rng))
        .collect::<Vec<_>>()
        .join("\n");
    let buffer = Buffer::from_text(&text);
    let mut cursor = Cursor::new(4);
    for _ in 0..400 {
        match rng.gen_range(0..4) {
            0 => cursor.move_up(&buffer),
            1 => cursor.move_down(&buffer),
            2 => cursor.move_left(&buffer),
            _ => cursor.move_right(&buffer),
        }
        let line = buffer.line(cursor.line());
        assert!(line.is_char_boundary(cursor.byte()));
        assert_eq!(cursor.visual(), visual_from_byte(line, cursor.byte(), 4));
    }
}
