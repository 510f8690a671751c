//! Viewport-driven choice between the large, medium and small artwork.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::data::Viewport;

/// Size tier of an artwork variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariantTier {
    Large,
    Medium,
    Small,
}

impl VariantTier {
    /// Position in a [`VariantSet`], largest first.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            VariantTier::Large => 0,
            VariantTier::Medium => 1,
            VariantTier::Small => 2,
        }
    }
}

/// Minimum viewport sizes for the larger tiers.
///
/// Defaults match the original artwork: 80x12 for the large strip and
/// 40x6 for the medium one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeThresholds {
    pub large_width: usize,
    pub large_height: usize,
    pub medium_width: usize,
    pub medium_height: usize,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            large_width: 80,
            large_height: 12,
            medium_width: 40,
            medium_height: 6,
        }
    }
}

impl SizeThresholds {
    /// Pick a tier for `viewport`.
    ///
    /// A `force_large_level` of 2 or more waives the width floors (wrapping
    /// marquees stay legible at any width). Height floors always apply.
    pub fn select(&self, viewport: Viewport, force_large_level: u8) -> VariantTier {
        let ignore_width = force_large_level >= 2;
        if (viewport.width >= self.large_width || ignore_width)
            && viewport.height >= self.large_height
        {
            VariantTier::Large
        } else if (viewport.width >= self.medium_width || ignore_width)
            && viewport.height >= self.medium_height
        {
            VariantTier::Medium
        } else {
            VariantTier::Small
        }
    }
}

/// Pick a tier with the default thresholds.
pub fn select_tier(viewport: Viewport, force_large_level: u8) -> VariantTier {
    SizeThresholds::default().select(viewport, force_large_level)
}

/// Which artwork family to show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Theme {
    #[default]
    Original,
    Sequel,
}

impl Theme {
    /// Asset file names, largest first.
    pub fn file_names(self) -> [&'static str; 3] {
        match self {
            Theme::Original => [
                "pipe_strip_v12.ans",
                "pipe_strip_mini_v2.ans",
                "pipe_strip_micro_v1.ans",
            ],
            Theme::Sequel => [
                "pipe_strip_sequel_v7.ans",
                "pipe_strip_sequel_mini_v1.ans",
                "pipe_strip_sequel_micro_v4.ans",
            ],
        }
    }
}

/// Three variants of one artwork ordered large, medium, small.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantSet<T = PathBuf> {
    variants: [T; 3],
}

impl<T> VariantSet<T> {
    pub fn new(large: T, medium: T, small: T) -> Self {
        Self {
            variants: [large, medium, small],
        }
    }

    #[inline]
    pub fn get(&self, tier: VariantTier) -> &T {
        &self.variants[tier.index()]
    }

    /// Select the variant for `viewport` using `thresholds`.
    pub fn select_with(
        &self,
        thresholds: &SizeThresholds,
        viewport: Viewport,
        force_large_level: u8,
    ) -> (VariantTier, &T) {
        let tier = thresholds.select(viewport, force_large_level);
        debug!(?tier, width = viewport.width, height = viewport.height, "variant selected");
        (tier, self.get(tier))
    }

    /// Select the variant for `viewport` using the default thresholds.
    pub fn select(&self, viewport: Viewport, force_large_level: u8) -> &T {
        self.select_with(&SizeThresholds::default(), viewport, force_large_level)
            .1
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.variants.iter()
    }
}

impl VariantSet<PathBuf> {
    /// Paths of a theme's artwork under `dir`.
    pub fn for_theme(theme: Theme, dir: impl AsRef<Path>) -> Self {
        let [large, medium, small] = theme.file_names().map(|name| dir.as_ref().join(name));
        Self::new(large, medium, small)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use crate::data::{Asset, Style, StyledLine, StyledRun};

    fn vp(width: usize, height: usize) -> Viewport {
        Viewport::new(width, height)
    }

    #[test]
    fn tiers_by_size() {
        assert_eq!(select_tier(vp(80, 24), 0), VariantTier::Large);
        assert_eq!(select_tier(vp(79, 24), 0), VariantTier::Medium);
        assert_eq!(select_tier(vp(40, 6), 0), VariantTier::Medium);
        assert_eq!(select_tier(vp(39, 24), 0), VariantTier::Small);
        assert_eq!(select_tier(vp(200, 5), 0), VariantTier::Small);
        assert_eq!(select_tier(vp(200, 11), 0), VariantTier::Medium);
        assert_eq!(select_tier(vp(0, 0), 0), VariantTier::Small);
    }

    #[test]
    fn force_level_waives_width_only() {
        assert_eq!(select_tier(vp(10, 12), 1), VariantTier::Small);
        assert_eq!(select_tier(vp(10, 12), 2), VariantTier::Large);
        assert_eq!(select_tier(vp(10, 8), 3), VariantTier::Medium);
        assert_eq!(select_tier(vp(10, 5), 3), VariantTier::Small);
    }

    #[test]
    fn narrow_viewport_ignores_sufficient_height() {
        let asset = |w: usize| {
            Asset::new(vec![StyledLine::from_runs([StyledRun::new(
                "x".repeat(w),
                Style::default(),
            )])])
        };
        let set = VariantSet::new(asset(100), asset(50), asset(20));
        assert_eq!(set.select(vp(30, 20), 0).width(), 20);
    }

    #[test]
    fn theme_paths() {
        let set = VariantSet::for_theme(Theme::Sequel, "resources");
        assert_eq!(
            set.get(VariantTier::Large),
            &Path::new("resources").join("pipe_strip_sequel_v7.ans")
        );
        assert_eq!(
            set.get(VariantTier::Small),
            &Path::new("resources").join("pipe_strip_sequel_micro_v4.ans")
        );
        assert_eq!(set.iter().count(), 3);
    }

    #[test]
    fn custom_thresholds() {
        let thresholds = SizeThresholds {
            large_width: 100,
            large_height: 30,
            ..SizeThresholds::default()
        };
        assert_eq!(thresholds.select(vp(90, 40), 0), VariantTier::Medium);
        assert_eq!(thresholds.select(vp(100, 30), 0), VariantTier::Large);
    }

    proptest! {
        #[test]
        fn tier_matches_thresholds(width in 0usize..200, height in 0usize..40) {
            let tier = select_tier(vp(width, height), 0);
            let expected = if width >= 80 && height >= 12 {
                VariantTier::Large
            } else if width >= 40 && height >= 6 {
                VariantTier::Medium
            } else {
                VariantTier::Small
            };
            prop_assert_eq!(tier, expected);
        }
    }
}
