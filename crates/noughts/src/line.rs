//! The eight fixed lines of the board.

use crate::Position;

/// A row, column, or diagonal: three cells that win when uniformly marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    /// Row 0.
    TopRow,
    /// Row 1.
    MiddleRow,
    /// Row 2.
    BottomRow,
    /// Column 0.
    LeftColumn,
    /// Column 1.
    CenterColumn,
    /// Column 2.
    RightColumn,
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Line {
    /// Rows, then columns, then the main and anti diagonal.
    pub const ALL: [Line; 8] = [
        Line::TopRow,
        Line::MiddleRow,
        Line::BottomRow,
        Line::LeftColumn,
        Line::CenterColumn,
        Line::RightColumn,
        Line::MainDiagonal,
        Line::AntiDiagonal,
    ];

    /// Order in which win detection inspects lines: diagonals, rows, columns.
    pub const DETECTION_ORDER: [Line; 8] = [
        Line::MainDiagonal,
        Line::AntiDiagonal,
        Line::TopRow,
        Line::MiddleRow,
        Line::BottomRow,
        Line::LeftColumn,
        Line::CenterColumn,
        Line::RightColumn,
    ];

    /// The three positions on this line.
    pub fn cells(self) -> [Position; 3] {
        use Position::*;

        match self {
            Line::TopRow => [TopLeft, TopCenter, TopRight],
            Line::MiddleRow => [MiddleLeft, Center, MiddleRight],
            Line::BottomRow => [BottomLeft, BottomCenter, BottomRight],
            Line::LeftColumn => [TopLeft, MiddleLeft, BottomLeft],
            Line::CenterColumn => [TopCenter, Center, BottomCenter],
            Line::RightColumn => [TopRight, MiddleRight, BottomRight],
            Line::MainDiagonal => [TopLeft, Center, BottomRight],
            Line::AntiDiagonal => [TopRight, Center, BottomLeft],
        }
    }

    /// True if `pos` lies on this line.
    pub fn contains(self, pos: Position) -> bool {
        self.cells().contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cell_is_on_some_line() {
        for pos in Position::ALL {
            assert!(Line::ALL.iter().any(|line| line.contains(pos)));
        }
    }

    #[test]
    fn test_center_is_on_four_lines() {
        let count = Line::ALL
            .iter()
            .filter(|line| line.contains(Position::Center))
            .count();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_lines_are_distinct() {
        for (i, a) in Line::ALL.iter().enumerate() {
            for b in &Line::ALL[i + 1..] {
                let mut x = a.cells();
                let mut y = b.cells();
                x.sort();
                y.sort();
                assert_ne!(x, y, "{:?} and {:?} cover the same cells", a, b);
            }
        }
    }

    #[test]
    fn test_rows_and_columns_follow_grid() {
        let rows = [Line::TopRow, Line::MiddleRow, Line::BottomRow];
        let cols = [Line::LeftColumn, Line::CenterColumn, Line::RightColumn];
        for (i, line) in rows.into_iter().enumerate() {
            assert!(line.cells().iter().all(|pos| pos.row() == i));
        }
        for (i, line) in cols.into_iter().enumerate() {
            assert!(line.cells().iter().all(|pos| pos.col() == i));
        }
    }

    #[test]
    fn test_detection_order_covers_all_lines() {
        for line in Line::ALL {
            assert!(Line::DETECTION_ORDER.contains(&line));
        }
    }
}
