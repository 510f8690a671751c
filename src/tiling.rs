//! Border augmentation and repetition of artwork to fill a viewport.

use tracing::info;

use crate::border::Border;
use crate::data::{Asset, StyledLine, Viewport};

/// How aggressively artwork wraps and repeats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TilingPolicy {
    /// Shown once, no scrolling.
    #[default]
    None,
    /// Seam added so the marquee wraps cleanly.
    Border,
    /// Seam plus horizontal repeats to cover the viewport width.
    Horizontal,
    /// Seam plus horizontal and vertical repeats.
    Full,
}

impl TilingPolicy {
    /// Map a repeat count (e.g. of a `--cyclic` flag) to a policy. Levels
    /// above 3 saturate.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => TilingPolicy::None,
            1 => TilingPolicy::Border,
            2 => TilingPolicy::Horizontal,
            _ => TilingPolicy::Full,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            TilingPolicy::None => 0,
            TilingPolicy::Border => 1,
            TilingPolicy::Horizontal => 2,
            TilingPolicy::Full => 3,
        }
    }

    /// Whether the content wraps and should be animated.
    #[inline]
    pub fn is_cyclic(self) -> bool {
        self != TilingPolicy::None
    }
}

/// Build the line set to render for `asset` in `viewport`.
///
/// Never mutates `asset`. The result is clipped to `viewport.height` rows
/// at every level so the host never grows a scrollbar; with
/// [`TilingPolicy::Full`] it has exactly that many rows.
pub fn build(asset: &Asset, viewport: Viewport, policy: TilingPolicy, border: &Border) -> Asset {
    let mut tiled = if policy >= TilingPolicy::Border {
        border.apply(asset)
    } else {
        asset.clone()
    };

    if policy >= TilingPolicy::Horizontal {
        tiled = repeat_horizontally(&tiled, viewport.width);
    }

    if policy >= TilingPolicy::Full {
        tiled = repeat_vertically(&tiled, viewport.height);
    } else {
        tiled.lines.truncate(viewport.height);
    }

    info!(
        level = policy.level(),
        width = tiled.width(),
        height = tiled.height(),
        "tiled artwork rebuilt"
    );
    tiled
}

/// Append `ceil(width / asset_width)` copies of each line to itself.
///
/// The result is always at least `width` wide. A zero-width asset is
/// returned unchanged.
pub fn repeat_horizontally(asset: &Asset, width: usize) -> Asset {
    let unit = asset.width();
    if unit == 0 {
        return asset.clone();
    }
    let reps = width.div_ceil(unit);
    let lines = asset
        .lines
        .iter()
        .map(|original| {
            let mut line = original.clone();
            for _ in 0..reps {
                line.extend_from(original);
            }
            line
        })
        .collect();
    Asset::new(lines)
}

/// Cycle the rows of `asset` until there are exactly `height` of them.
///
/// Output never exceeds `height` rows. An empty asset stays empty.
pub fn repeat_vertically(asset: &Asset, height: usize) -> Asset {
    let lines: Vec<StyledLine> = asset.lines.iter().cycle().take(height).cloned().collect();
    Asset::new(lines)
}
