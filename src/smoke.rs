//! Animated smoke screen, used to check terminal colors and frame pacing
//! without any artwork.

use crate::color::{palette, Color};
use crate::data::{Style, StyledLine, StyledRun, Viewport};
use crate::sizing::Theme;

/// Full-screen wavy column of smoke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmokeEffect {
    pub smoke: Style,
    pub background: Style,
    pub outline: Style,
}

impl SmokeEffect {
    pub fn new(smoke: Color, background: Color, outline: Color) -> Self {
        Self {
            smoke: Style::bg(smoke),
            background: Style::bg(background),
            outline: Style::bg(outline),
        }
    }

    /// Colors matching a theme's artwork.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Original => Self::new(palette::PAPER, palette::WALLPAPER, palette::PEN),
            Theme::Sequel => Self::new(palette::SEQUEL_SMOKE, palette::SEQUEL_WALLPAPER, palette::PEN),
        }
    }

    /// Row `y` of the effect at animation time `time`.
    ///
    /// Segments that would have negative length are dropped, so rows near a
    /// swing extreme can come out narrower than the viewport.
    pub fn render_row(&self, viewport: Viewport, time: f64, y: usize) -> StyledLine {
        let w = viewport.width as f64;
        let center = |row: f64| (w * 0.2 * (time + row / 5.0).sin() + w * 0.5) as i64;

        let x = center(y as f64);
        let x_above = center(y as f64 - 1.0);
        let half = (w * 0.2) as i64;
        let left = x - half;
        let right = x + half;
        let outline = (x - x_above).abs() + 1;

        let spaces = |n: i64| " ".repeat(usize::try_from(n).unwrap_or(0));
        StyledLine::from_runs([
            StyledRun::new(spaces(left), self.background),
            StyledRun::new(spaces(outline), self.outline),
            StyledRun::new(spaces(right - left - outline * 2), self.smoke),
            StyledRun::new(spaces(outline), self.outline),
            StyledRun::new(spaces(viewport.width as i64 - right), self.background),
        ])
    }
}

impl Default for SmokeEffect {
    fn default() -> Self {
        Self::for_theme(Theme::Original)
    }
}
