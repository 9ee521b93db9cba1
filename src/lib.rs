#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/ring-progress/")]

//! # ring-progress
//!
//! An animated circular progress ring for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications and for embedding in graphical widget trees.
//!
//! ## Overview
//!
//! The widget is a decorative progress indicator: a rotating two-tone
//! conic-gradient track, a percentage label in the center and an optional
//! caption beneath it. A reveal mask anchored at 270° uncovers the track
//! proportionally to the current value, which is what makes the ring read
//! as "progress" rather than a spinner.
//!
//! The component follows the Elm Architecture pattern used by
//! bubbletea-rs — `init()`, `update()`, `view()` — and animates on a
//! recurring ~60 Hz tick. It does not render pixels itself: every frame it
//! computes a [`style::FrameStyle`] (ring gradient, mask gradient, label
//! panel, label markup) that a host applies to its own widget tree, either
//! through the [`style::Surface`] trait or by using the descriptors'
//! CSS-style string forms.
//!
//! ## Quick Start
//!
//! ```rust
//! use ring_progress::prelude::*;
//!
//! let mut ring = ring_new(&[
//!     with_size(160),
//!     with_caption("Downloading"),
//! ]);
//!
//! ring.set_value(64.0);
//! let frame = ring.frame();
//! assert_eq!(frame.label.plain_text(), "64%\nDownloading");
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_rs::{Model, Cmd, Msg};
//! use ring_progress::prelude::*;
//!
//! struct App {
//!     ring: Ring,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let ring = ring_new(&[with_palette(FOREST.clone())]);
//!         let cmd = ring.init();
//!         (Self { ring }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         // Keep the rotation going
//!         self.ring.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.ring.view()
//!     }
//! }
//! ```
//!
//! ## Behavior Notes
//!
//! - `set_value` accepts any `f64` without validation; the mask stop
//!   computation clamps only derived stops that come out negative.
//! - A value of exactly 0 shows an empty label: progress that has not
//!   started displays nothing, caption or not.
//! - Captions longer than eleven characters shrink proportionally so they
//!   stay inside the circular footprint.
//! - Color properties accept loose CSS-flavored input and normalize on
//!   write; getters hand back the canonical form.

pub mod color;
pub mod ring;
pub mod style;

pub use color::Color;
pub use ring::{
    new as ring_new, with_caption, with_mask_color, with_palette, with_panel_color,
    with_ring_colors, with_size, with_text_color, Model as Ring, Palette, RingOption,
    TickMsg as RingTickMsg, AQUA, DEFAULT_SIZE, FOREST, MAX_CAPTION_CHARS,
};
pub use style::{
    mask_stops, Alignment, ColorStop, ConicGradient, FrameStyle, LabelMarkup, LabelSpan,
    LayoutHints, MaskStyle, PanelStyle, RingStyle, Surface,
};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use ring_progress::prelude::*;
///
/// let ring = ring_new(&[with_size(120)]);
/// assert_eq!(ring.size(), 120);
/// ```
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::ring::{
        new as ring_new, with_caption, with_mask_color, with_palette, with_panel_color,
        with_ring_colors, with_size, with_text_color, Model as Ring, Palette, RingOption,
        TickMsg as RingTickMsg, AQUA, FOREST,
    };
    pub use crate::style::{
        Alignment, FrameStyle, LabelMarkup, LayoutHints, MaskStyle, PanelStyle, RingStyle, Surface,
    };
}
