//! The marquee component: owns the asset store, the current tiled artwork
//! and the scroll clock, and answers per-row render requests.

use std::path::PathBuf;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::animation::ScrollClock;
use crate::border::Border;
use crate::config::MarqueeConfig;
use crate::data::{Asset, StyledRun, Viewport};
use crate::loader::{AssetLoadError, AssetSource, AssetStore, FsSource};
use crate::render;
use crate::sizing::{SizeThresholds, VariantSet, VariantTier};
use crate::tiling::{self, TilingPolicy};

/// Input events driving the marquee.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarqueeEvent {
    /// The host viewport changed size (also sent once at startup).
    Resize(Viewport),
    /// The host timer fired; advance animation time by the given amount.
    Tick(f64),
}

/// Artwork prepared for one viewport and policy.
///
/// Rebuilt from scratch on every resize and swapped in whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TiledState {
    pub viewport: Viewport,
    pub policy: TilingPolicy,
    pub tier: VariantTier,
    pub source: Rc<Asset>,
    pub tiled: Asset,
}

impl TiledState {
    /// Select, load and tile the artwork for `viewport`.
    pub fn build<S: AssetSource>(
        store: &mut AssetStore<S>,
        variants: &VariantSet,
        thresholds: &SizeThresholds,
        border: &Border,
        viewport: Viewport,
        policy: TilingPolicy,
    ) -> Result<Self, AssetLoadError> {
        let (tier, path) = variants.select_with(thresholds, viewport, policy.level());
        let source = store.load(path)?;
        let tiled = tiling::build(&source, viewport, policy, border);
        Ok(Self {
            viewport,
            policy,
            tier,
            source,
            tiled,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.tiled.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.tiled.height()
    }
}

/// Scrolling strip widget.
///
/// ## Example
///
/// ```rust
/// use pipe_strip_view::{
///     AssetStore, Marquee, MarqueeEvent, MemorySource, TilingPolicy, VariantSet, Viewport,
/// };
///
/// let source = MemorySource::new()
///     .with("big.ans", "0123456789\n")
///     .with("mid.ans", "01234\n")
///     .with("small.ans", "012\n");
/// let variants = VariantSet::new("big.ans".into(), "mid.ans".into(), "small.ans".into());
///
/// let mut marquee = Marquee::new(AssetStore::new(source), variants, TilingPolicy::Border);
/// marquee.handle(MarqueeEvent::Resize(Viewport::new(50, 8))).unwrap();
/// assert_eq!(marquee.content_width(), 7); // "01234" plus a two-column seam
///
/// marquee.handle(MarqueeEvent::Tick(2.0)).unwrap();
/// assert_eq!(marquee.render_row(0)[0].text, "234");
/// ```
#[derive(Debug)]
pub struct Marquee<S = FsSource> {
    store: AssetStore<S>,
    variants: VariantSet,
    policy: TilingPolicy,
    thresholds: SizeThresholds,
    border: Border,
    clock: ScrollClock,
    state: Option<TiledState>,
}

impl Marquee<FsSource> {
    /// Build a filesystem-backed marquee from configuration.
    pub fn from_config(config: &MarqueeConfig) -> Self {
        Self::new(AssetStore::from_fs(), config.variant_paths(), config.tiling_policy())
            .with_border(config.border())
            .with_clock(config.scroll_clock())
    }
}

impl<S: AssetSource> Marquee<S> {
    pub fn new(store: AssetStore<S>, variants: VariantSet, policy: TilingPolicy) -> Self {
        Self {
            store,
            variants,
            policy,
            thresholds: SizeThresholds::default(),
            border: Border::default(),
            clock: ScrollClock::default(),
            state: None,
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: SizeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: ScrollClock) -> Self {
        self.clock = clock;
        self
    }

    /// Apply one event. Returns whether the visible content may have changed.
    ///
    /// Ticks are ignored when the policy does not wrap, matching a host
    /// that never starts its timer for a static strip.
    pub fn handle(&mut self, event: MarqueeEvent) -> Result<bool, AssetLoadError> {
        match event {
            MarqueeEvent::Resize(viewport) => {
                self.recompute_on_resize(viewport)?;
                Ok(true)
            }
            MarqueeEvent::Tick(dt) => {
                if !self.policy.is_cyclic() {
                    return Ok(false);
                }
                let before = self.offset();
                self.clock.advance(dt);
                Ok(self.offset() != before)
            }
        }
    }

    /// Rebuild the tiled artwork for `viewport` and replace the current one.
    ///
    /// On error the previous artwork is kept, clipped to the new viewport
    /// height. Its `viewport` still names the size it was built for.
    pub fn recompute_on_resize(&mut self, viewport: Viewport) -> Result<&TiledState, AssetLoadError> {
        let built = TiledState::build(
            &mut self.store,
            &self.variants,
            &self.thresholds,
            &self.border,
            viewport,
            self.policy,
        );
        let state = match built {
            Ok(state) => state,
            Err(err) => {
                if let Some(kept) = self.state.as_mut() {
                    kept.tiled.lines.truncate(viewport.height);
                }
                warn!(path = %err.path().display(), "resize failed, keeping previous artwork");
                return Err(err);
            }
        };
        info!(
            width = viewport.width,
            height = viewport.height,
            tier = ?state.tier,
            "marquee resized"
        );
        Ok(self.state.insert(state))
    }

    /// Change the tiling policy. Takes effect on the next resize, or
    /// immediately if a viewport is already known.
    pub fn set_policy(&mut self, policy: TilingPolicy) -> Result<(), AssetLoadError> {
        self.policy = policy;
        if let Some(viewport) = self.state.as_ref().map(|s| s.viewport) {
            self.recompute_on_resize(viewport)?;
        }
        Ok(())
    }

    /// Current marquee offset in columns.
    pub fn offset(&self) -> usize {
        self.clock.offset(self.content_width())
    }

    /// Visible runs for row `y`.
    pub fn render_row(&self, y: usize) -> Vec<StyledRun> {
        match &self.state {
            Some(state) => render::render_row(&state.tiled, y, self.offset()),
            None => Vec::new(),
        }
    }

    /// Width the host should give the drawing surface.
    pub fn content_width(&self) -> usize {
        self.state.as_ref().map(TiledState::width).unwrap_or(0)
    }

    /// Height the host should give the drawing surface.
    pub fn content_height(&self) -> usize {
        self.state.as_ref().map(TiledState::height).unwrap_or(0)
    }

    /// Restart the animation from offset 0.
    pub fn restart(&mut self) {
        debug!("marquee clock reset");
        self.clock.reset();
    }

    pub fn state(&self) -> Option<&TiledState> {
        self.state.as_ref()
    }

    pub fn policy(&self) -> TilingPolicy {
        self.policy
    }

    pub fn clock(&self) -> &ScrollClock {
        &self.clock
    }

    pub fn store(&self) -> &AssetStore<S> {
        &self.store
    }

    /// Artwork paths this marquee chooses from.
    pub fn variant_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.variants.iter()
    }
}
