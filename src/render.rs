//! Per-row composition of the scrolling marquee.

use crate::data::{Asset, StyledLine, StyledRun};

/// Rotate `line` left by `offset` display columns.
///
/// Content that leaves the left edge re-enters on the right. Offsets are
/// taken modulo the line width, so 0 and `width` are both identity.
///
/// ## Example
///
/// ```rust
/// use pipe_strip_view::{render::rotate_left, Color, Style, StyledLine, StyledRun};
///
/// let red = Style::fg(Color::Rgb(255, 0, 0));
/// let blue = Style::fg(Color::Rgb(0, 0, 255));
/// let line = StyledLine::from_runs([StyledRun::new("AAA", red), StyledRun::new("BBB", blue)]);
///
/// let rotated = rotate_left(&line, 2);
/// assert_eq!(
///     rotated.runs(),
///     &[StyledRun::new("A", red), StyledRun::new("BBB", blue), StyledRun::new("AA", red)]
/// );
/// ```
pub fn rotate_left(line: &StyledLine, offset: usize) -> StyledLine {
    let width = line.width();
    if width == 0 {
        return line.clone();
    }
    let offset = offset % width;
    if offset == 0 {
        return line.clone();
    }
    let (before, mut after) = line.split_at_column(offset);
    after.extend_from(&before);
    after
}

/// Visible runs of row `row` of `tiled`, scrolled by `offset` columns.
///
/// Rows past the bottom of the content render as an empty line.
pub fn render_row(tiled: &Asset, row: usize, offset: usize) -> Vec<StyledRun> {
    match tiled.lines.get(row) {
        Some(line) => rotate_left(line, offset).into_runs(),
        None => Vec::new(),
    }
}

/// All rows of a `height`-row surface, scrolled by `offset` columns.
pub fn render_frame(tiled: &Asset, height: usize, offset: usize) -> Vec<StyledLine> {
    (0..height)
        .map(|row| StyledLine::from_runs(render_row(tiled, row, offset)))
        .collect()
}
