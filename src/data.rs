//! Core data structures for styled artwork.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::color::Color;

/// Visual attributes shared by a run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl Style {
    /// A style with only a foreground color.
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::default()
        }
    }

    /// A style with only a background color.
    pub fn bg(color: Color) -> Self {
        Self {
            bg: Some(color),
            ..Self::default()
        }
    }

    /// Replace the background color.
    #[must_use]
    pub fn on(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }
}

/// Display width of a string in terminal columns.
#[inline]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// A contiguous span of text sharing one style.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyledRun {
    pub text: String,
    pub style: Style,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Width in terminal columns.
    #[inline]
    pub fn width(&self) -> usize {
        display_width(&self.text)
    }

    /// Split at a display column, keeping the style on both halves.
    ///
    /// The cut lands on a grapheme boundary; a wide cluster straddling
    /// `column` goes to the right half.
    pub fn split_at_column(&self, column: usize) -> (StyledRun, StyledRun) {
        let byte_pos = byte_at_column(&self.text, column);
        let (left, right) = self.text.split_at(byte_pos);
        (
            StyledRun::new(left, self.style),
            StyledRun::new(right, self.style),
        )
    }
}

fn byte_at_column(text: &str, column: usize) -> usize {
    let mut cells = 0;
    let mut byte_pos = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if cells + w > column {
            break;
        }
        cells += w;
        byte_pos += grapheme.len();
        if cells >= column {
            break;
        }
    }
    byte_pos
}

/// One row of artwork: runs in left-to-right display order.
///
/// Lines are kept normalized: no run is empty and no two adjacent runs
/// share a style.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyledLine {
    runs: Vec<StyledRun>,
}

impl StyledLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_runs(runs: impl IntoIterator<Item = StyledRun>) -> Self {
        let mut line = Self::new();
        for run in runs {
            line.push(run);
        }
        line
    }

    /// Append a run, coalescing with the previous one when the styles match.
    pub fn push(&mut self, run: StyledRun) {
        if run.text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.style == run.style => last.text.push_str(&run.text),
            _ => self.runs.push(run),
        }
    }

    /// Append every run of `other`.
    pub fn extend_from(&mut self, other: &StyledLine) {
        for run in &other.runs {
            self.push(run.clone());
        }
    }

    #[inline]
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    #[inline]
    pub fn into_runs(self) -> Vec<StyledRun> {
        self.runs
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Total width in terminal columns.
    pub fn width(&self) -> usize {
        self.runs.iter().map(StyledRun::width).sum()
    }

    /// Text without styling.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Split at a display column into `(before, after)`.
    ///
    /// A run crossing the cut is bisected into two runs of the same style.
    /// Cutting at 0 or at/after the line width leaves one side empty.
    pub fn split_at_column(&self, column: usize) -> (StyledLine, StyledLine) {
        if column == 0 {
            return (StyledLine::new(), self.clone());
        }

        let mut before = StyledLine::new();
        let mut after = StyledLine::new();
        let mut consumed = 0;

        for run in &self.runs {
            let w = run.width();
            if consumed >= column {
                after.push(run.clone());
            } else if consumed + w <= column {
                before.push(run.clone());
            } else {
                let (left, right) = run.split_at_column(column - consumed);
                before.push(left);
                after.push(right);
            }
            consumed += w;
        }

        (before, after)
    }
}

/// A decoded multi-line image. Index is the row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Asset {
    pub lines: Vec<StyledLine>,
}

impl Asset {
    pub fn new(lines: Vec<StyledLine>) -> Self {
        Self { lines }
    }

    /// Width of the first line.
    ///
    /// Lines of one asset are assumed to share a width; ragged art is
    /// measured by its first row only.
    pub fn width(&self) -> usize {
        self.lines.first().map(StyledLine::width).unwrap_or(0)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// `(width, height)` in terminal cells.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

/// Visible terminal area in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}
