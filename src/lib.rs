//! # pipe-strip-view
//!
//! Adaptive marquee renderer for styled ANSI art in the terminal.
//!
//! This crate provides the platform-agnostic core of a scrolling art strip:
//! - Decoding ANSI-styled `.ans` artwork into styled runs, memoized per path
//! - Choosing a large, medium or small variant for the viewport
//! - Adding a wrap seam and repeating the art to fill the viewport
//! - A tick-driven scroll clock and per-row rotation that keeps style runs
//!   intact
//!
//! Turning runs into escape sequences is left to the host's terminal
//! backend.
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Enable loading [`MarqueeConfig`] from TOML
//!
//! ## Example
//!
//! ```rust,ignore
//! use pipe_strip_view::{Marquee, MarqueeConfig, MarqueeEvent, Viewport};
//!
//! let config = MarqueeConfig::from_toml_file("pipe_strip.toml")?;
//! let mut marquee = Marquee::from_config(&config);
//!
//! // On startup and on every resize
//! marquee.handle(MarqueeEvent::Resize(Viewport::new(120, 40)))?;
//!
//! // From the host timer, every `config.scroll_clock().interval_ms()`
//! marquee.handle(MarqueeEvent::Tick(0.1))?;
//!
//! // While drawing
//! for y in 0..marquee.content_height() {
//!     let runs = marquee.render_row(y);
//!     // hand `runs` to the terminal backend
//! }
//! ```

mod animation;
mod border;
mod color;
mod config;
mod data;
mod loader;
mod marquee;
mod parser;
pub mod render;
mod sizing;
pub mod smoke;
pub mod tiling;

pub use animation::{ScrollClock, DEFAULT_INTERVAL_MS, DEFAULT_STEP};
pub use border::Border;
pub use color::{palette, parse_color, Color};
pub use config::{ConfigError, MarqueeConfig};
pub use data::{display_width, Asset, Style, StyledLine, StyledRun, Viewport};
pub use loader::{AssetLoadError, AssetSource, AssetStore, FsSource, MemorySource};
pub use marquee::{Marquee, MarqueeEvent, TiledState};
pub use parser::{parse_ansi, parse_ansi_line, ParseError};
pub use render::render_row;
pub use sizing::{select_tier, SizeThresholds, Theme, VariantSet, VariantTier};
pub use smoke::SmokeEffect;
pub use tiling::TilingPolicy;
