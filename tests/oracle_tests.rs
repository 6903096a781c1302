use tictactoe::oracle::find_winner;
use tictactoe::{evaluate, Board, Move, Symbol, Verdict, WIN_LENGTH};

/// Build a board from rows of `X`, `O` and `.`.
fn board(rows: &[&str]) -> Board {
    let mut board = Board::new(rows.len());
    for (r, row) in rows.iter().enumerate() {
        for (c, ch) in row.chars().enumerate() {
            let symbol = match ch {
                'X' => Symbol::X,
                'O' => Symbol::O,
                _ => continue,
            };
            board.apply(Move::new(r, c), symbol).unwrap();
        }
    }
    board
}

#[test]
fn empty_board_is_undecided() {
    assert_eq!(evaluate(&Board::new(3), WIN_LENGTH), Verdict::Undecided);
    assert_eq!(evaluate(&Board::new(10), WIN_LENGTH), Verdict::Undecided);
}

#[test]
fn top_row_win() {
    let b = board(&["XXX", ".O.", "..O"]);
    assert_eq!(evaluate(&b, 3), Verdict::Win(Symbol::X));
}

#[test]
fn column_win() {
    let b = board(&["XO.", "XO.", ".OX"]);
    assert_eq!(evaluate(&b, 3), Verdict::Win(Symbol::O));
}

#[test]
fn main_diagonals_win() {
    assert_eq!(
        evaluate(&board(&["X.O", ".XO", "..X"]), 3),
        Verdict::Win(Symbol::X)
    );
    assert_eq!(
        evaluate(&board(&["X.O", ".OX", "O.X"]), 3),
        Verdict::Win(Symbol::O)
    );
}

#[test]
fn full_board_without_line_is_draw() {
    let b = board(&["XOX", "XOO", "OXX"]);
    assert_eq!(evaluate(&b, 3), Verdict::Draw);
}

#[test]
fn winning_last_move_beats_draw() {
    let b = board(&["XOX", "XOO", "XXO"]);
    assert!(b.is_full());
    assert_eq!(evaluate(&b, 3), Verdict::Win(Symbol::X));
}

#[test]
fn off_main_diagonal_on_larger_board() {
    let b = board(&[".....", "..O..", "...O.", "....O", "....."]);
    assert_eq!(evaluate(&b, 3), Verdict::Win(Symbol::O));
}

#[test]
fn off_main_anti_diagonal_on_larger_board() {
    let b = board(&[
        "......", "......", ".....X", "....X.", "...X..", "......",
    ]);
    assert_eq!(evaluate(&b, 3), Verdict::Win(Symbol::X));
}

#[test]
fn interrupted_run_does_not_win() {
    let b = board(&["XXOXX", ".....", ".....", ".....", "....."]);
    assert_eq!(evaluate(&b, 3), Verdict::Undecided);
    let b = board(&["XX.XX", ".....", ".....", ".....", "....."]);
    assert_eq!(evaluate(&b, 3), Verdict::Undecided);
}

#[test]
fn run_in_middle_of_long_row() {
    let b = board(&["......", "......", ".OOOX.", "......", "......", "......"]);
    assert_eq!(evaluate(&b, 3), Verdict::Win(Symbol::O));
}

#[test]
fn longer_win_length() {
    let b = board(&["XXX..", ".....", ".....", ".....", "....."]);
    assert_eq!(evaluate(&b, 4), Verdict::Undecided);
    let b = board(&["XXXX.", ".....", ".....", ".....", "....."]);
    assert_eq!(evaluate(&b, 4), Verdict::Win(Symbol::X));
}

#[test]
fn win_length_above_size_never_wins() {
    let b = board(&["XXX", "...", "..."]);
    assert_eq!(find_winner(&b, 4), None);
    assert_eq!(find_winner(&b, 0), None);
}

#[test]
fn first_line_in_scan_order_decides() {
    // impossible in real play, both rows complete
    let b = board(&["OOO", "XXX", "..."]);
    assert_eq!(evaluate(&b, 3), Verdict::Win(Symbol::O));
    let b = board(&["XXX", "OOO", "..."]);
    assert_eq!(evaluate(&b, 3), Verdict::Win(Symbol::X));
    // rows are scanned before columns
    let b = board(&["XOOO", "X...", "X...", "...."]);
    assert_eq!(evaluate(&b, 3), Verdict::Win(Symbol::O));
}
