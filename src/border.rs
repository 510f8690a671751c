//! Decorative seam appended to every row of wrapping artwork.

use crate::color::{palette, Color};
use crate::data::{Asset, Style, StyledRun};

/// Two-column seam drawn between successive repeats of the artwork.
///
/// Both glyphs are drawn in `ink` on `paper`, so the ink/paper pair is
/// emitted as a single run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Border {
    /// Glyph color.
    pub ink: Color,
    /// Cell background behind the glyphs.
    pub paper: Color,
    pub glyphs: String,
}

impl Default for Border {
    fn default() -> Self {
        Self::new(palette::PEN, palette::PAPER)
    }
}

impl Border {
    pub fn new(ink: Color, paper: Color) -> Self {
        Self {
            ink,
            paper,
            glyphs: "▌▐".to_string(),
        }
    }

    /// The run appended to each line.
    pub fn run(&self) -> StyledRun {
        StyledRun::new(self.glyphs.as_str(), Style::fg(self.ink).on(self.paper))
    }

    /// Width of the seam in columns.
    pub fn width(&self) -> usize {
        self.run().width()
    }

    /// A copy of `asset` with the seam appended to every line.
    pub fn apply(&self, asset: &Asset) -> Asset {
        let run = self.run();
        let lines = asset
            .lines
            .iter()
            .map(|line| {
                let mut line = line.clone();
                line.push(run.clone());
                line
            })
            .collect();
        Asset::new(lines)
    }
}
