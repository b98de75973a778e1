use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use minimax_ai::board::{Addressing, Board, Cell};

/// Draws the board to stdout, with 1-based move numbers as the player types them
pub fn draw(board: &Board) -> Result<()> {
    match board.addressing() {
        Addressing::Gravity => draw_columns(board),
        Addressing::Direct => draw_cells(board),
    }
}

// connect four: coloured discs under a row of column numbers
fn draw_columns(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=board.cols()).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.get(row, col) {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}

// tic-tac-toe: marks, with the cell number shown in free cells
fn draw_cells(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let number = (row * board.cols() + col + 1).to_string();
            let content = match board.get(row, col) {
                Cell::PlayerOne => style("X".to_string())
                    .attribute(Attribute::Bold)
                    .with(Color::Red),
                Cell::PlayerTwo => style("O".to_string())
                    .attribute(Attribute::Bold)
                    .with(Color::Yellow),
                Cell::Empty => style(number).with(Color::DarkGrey),
            };
            stdout
                .queue(PrintStyledContent(style(" ".to_string())))?
                .queue(PrintStyledContent(content))?;
        }
        stdout.queue(PrintStyledContent(style("\n".to_string())))?;
    }
    stdout.flush()?;
    Ok(())
}
