//! Board tests - grid construction and border variants

use std::collections::HashSet;

use board_view::core::{Board, BoardError};
use board_view::types::{BorderStyle, Coord};

#[test]
fn test_board_has_size_squared_unique_cells() {
    for (size, section_size) in [(4u8, 2u8), (9, 3), (16, 4)] {
        let board = Board::new(size, section_size).unwrap();

        let coords: HashSet<Coord> = board.cells().map(|cell| cell.coord()).collect();
        assert_eq!(coords.len(), size as usize * size as usize);

        for coord in &coords {
            assert!(coord.x < size, "x {} out of range for size {}", coord.x, size);
            assert!(coord.y < size, "y {} out of range for size {}", coord.y, size);
        }
    }
}

#[test]
fn test_border_variant_rule() {
    // Right border is "section" iff (x + 1) % section_size == 0 and
    // x + 1 < size; same rule for bottom over y.
    for (size, section_size) in [(4u8, 2u8), (9, 3), (16, 4)] {
        let board = Board::new(size, section_size).unwrap();

        for cell in board.cells() {
            let Coord { x, y } = cell.coord();

            let expect_right = if (x + 1) % section_size == 0 && x + 1 < size {
                BorderStyle::Section
            } else {
                BorderStyle::Normal
            };
            assert_eq!(cell.border_right(), expect_right, "right border at x={}", x);

            let expect_bottom = if (y + 1) % section_size == 0 && y + 1 < size {
                BorderStyle::Section
            } else {
                BorderStyle::Normal
            };
            assert_eq!(
                cell.border_bottom(),
                expect_bottom,
                "bottom border at y={}",
                y
            );
        }
    }
}

#[test]
fn test_section_size_equal_to_size_has_no_section_borders() {
    let board = Board::new(4, 4).unwrap();
    for cell in board.cells() {
        assert_eq!(cell.border_right(), BorderStyle::Normal);
        assert_eq!(cell.border_bottom(), BorderStyle::Normal);
    }
}

#[test]
fn test_invalid_dimensions_are_rejected() {
    assert!(matches!(
        Board::new(0, 1),
        Err(BoardError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        Board::new(9, 0),
        Err(BoardError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        Board::new(4, 5),
        Err(BoardError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        Board::new(32, 4),
        Err(BoardError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_unknown_coordinate_is_cell_not_found() {
    let board = Board::new(9, 3).unwrap();
    assert_eq!(
        board.get(Coord::new(9, 3)).unwrap_err(),
        BoardError::CellNotFound { x: 9, y: 3 }
    );
    assert_eq!(
        board.get(Coord::new(3, 9)).unwrap_err(),
        BoardError::CellNotFound { x: 3, y: 9 }
    );
}

#[test]
fn test_cells_start_blank() {
    let board = Board::new(9, 3).unwrap();
    for cell in board.cells() {
        assert_eq!(cell.character(), "");
        assert_eq!(cell.pencil_text(), "");
        assert!(!cell.is_word());
        assert!(!cell.is_locked());
        assert!(!cell.is_selected());
        assert!(!cell.is_highlighted());
    }
    assert_eq!(board.selected(), None);
    assert!(board.highlighted().is_empty());
}

#[test]
fn test_marker_classes_for_a_fresh_cell() {
    let board = Board::new(9, 3).unwrap();
    let cell = board.get(Coord::new(2, 3)).unwrap();
    assert_eq!(
        cell.classes(),
        vec![
            "game-field",
            "size-9",
            "xpos-2",
            "ypos-3",
            "border-right-section",
            "border-bottom-normal",
        ]
    );
}
