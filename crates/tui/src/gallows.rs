const FRAME: [&str; 7] = [
    "  +---+",
    "  |   |",
    "      |",
    "      |",
    "      |",
    "      |",
    "=========",
];

/// Body parts in the order they appear, as (row, column, glyph).
const PARTS: [(usize, usize, char); 6] = [
    (2, 2, 'O'),
    (3, 2, '|'),
    (3, 1, '/'),
    (3, 3, '\\'),
    (4, 1, '/'),
    (4, 3, '\\'),
];

/// Draw the gallows with one body part per life lost.
pub fn render(lives_lost: u8) -> Vec<String> {
    let mut canvas: Vec<Vec<char>> = FRAME.iter().map(|row| row.chars().collect()).collect();
    for &(y, x, ch) in PARTS.iter().take(lives_lost as usize) {
        place(&mut canvas, y, x, ch);
    }
    canvas
        .into_iter()
        .map(|row| row.into_iter().collect())
        .collect()
}

fn place(canvas: &mut [Vec<char>], y: usize, x: usize, ch: char) {
    if y >= canvas.len() || x >= canvas[y].len() {
        return;
    }
    canvas[y][x] = ch;
}
