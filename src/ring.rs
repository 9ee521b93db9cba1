//! Circular progress ring component.
//!
//! The ring is a decorative progress indicator for embedding in a host
//! widget tree: a rotating two-tone conic-gradient track, a percentage
//! label in the middle, and an optional caption underneath. The component
//! owns the value, the caption, five color properties and the animation
//! phase; every tick it produces a fresh [`FrameStyle`](crate::style::FrameStyle)
//! for the host to apply.
//!
//! # Basic Usage
//!
//! ```rust
//! use ring_progress::ring::{new, with_caption, with_size};
//!
//! // Create a ring with default settings
//! let ring = new(&[]);
//!
//! // Create a ring with custom settings using the option pattern
//! let mut ring = new(&[
//!     with_size(200),
//!     with_caption("Loading..."),
//! ]);
//! ring.set_value(42.0);
//! assert_eq!(ring.frame().label.plain_text(), "42%\nLoading...");
//! ```
//!
//! # Animation
//!
//! The rotation runs on a recurring ~60 Hz tick scheduled through the
//! bubbletea-rs runtime; it never stops on its own. Value and color
//! changes do not force a repaint of their own — they surface on the next
//! tick's frame.
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use ring_progress::ring::{new, Model};
//!
//! struct MyApp {
//!     ring: Model,
//! }
//!
//! impl BubbleTeaModel for MyApp {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let ring = new(&[]);
//!         let cmd = ring.init();
//!         (Self { ring }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         // Forward tick messages to the ring
//!         self.ring.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.ring.view()
//!     }
//! }
//! ```
//!
//! # The reveal mask
//!
//! The "progress" illusion comes from a second conic gradient anchored at
//! 270° whose two stops track the value: transparent up to `stop1`, the
//! mask color from `stop2`. When the value overshoots 100 the derived
//! stops go negative and are floored independently — `stop1` at 0.001,
//! `stop2` at 0.000. The uneven floors keep the transparent band from
//! collapsing to zero width; preserve them if you port this logic.

use crate::color::Color;
use crate::style::{
    Alignment, ColorStop, ConicGradient, FrameStyle, LabelMarkup, LabelSpan, LayoutHints,
    MaskStyle, PanelStyle, RingStyle, Surface,
};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::{Color as TermColor, Style};
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for ring instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Default edge length of the square widget footprint, in pixels.
pub const DEFAULT_SIZE: u32 = 160;

/// Captions longer than this shrink proportionally to fit the panel.
pub const MAX_CAPTION_CHARS: usize = 11;

/// Fixed anchor angle of the reveal mask, in degrees.
const MASK_ANGLE: i32 = 270;

/// Time between animation frames (~60 FPS).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// The five colors that style a ring.
///
/// `ring_a`/`ring_b` are the two tones of the rotating track, `mask` is
/// the fill of the reveal overlay (usually close to the window
/// background), `text` colors both label lines, and `panel` fills the
/// rounded disc behind the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// First ring tone, at the gradient's 0.0 and 1.0 stops.
    pub ring_a: Color,
    /// Second ring tone, at the gradient's 0.5 stop.
    pub ring_b: Color,
    /// Fill of the reveal mask.
    pub mask: Color,
    /// Label text color.
    pub text: Color,
    /// Fill of the label panel.
    pub panel: Color,
}

/// Cyan-on-deep-blue, the stock look.
pub static AQUA: Lazy<Palette> = Lazy::new(|| Palette {
    ring_a: Color::from("rgb(0, 255, 255)"),
    ring_b: Color::from("rgb(0, 69, 142)"),
    mask: Color::from("rgb(227, 227, 227)"),
    text: Color::from("rgb(0, 0, 0)"),
    panel: Color::from("rgb(255, 255, 255)"),
});

/// Green-on-dark-green, for success-flavored displays.
pub static FOREST: Lazy<Palette> = Lazy::new(|| Palette {
    ring_a: Color::from("#0F0"),
    ring_b: Color::from("#006600"),
    mask: Color::from("#afa"),
    text: Color::from("#006600"),
    panel: Color::from("#dfd"),
});

impl Default for Palette {
    fn default() -> Self {
        *AQUA
    }
}

/// Message indicating the animation timer has ticked and the ring should
/// advance one frame.
///
/// Each message carries the identity of the ring it belongs to; rings
/// reject ticks addressed to other instances and stale ticks from before
/// the last accepted one, so several rings can animate side by side
/// without speeding each other up.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Time at which the tick occurred.
    pub time: std::time::SystemTime,
    /// Identifier of the ring this message belongs to.
    pub id: i64,
    /// Used internally to prevent the ring from receiving too many
    /// messages and thus spinning too fast.
    tag: i64,
}

/// Configuration option for creating a ring with custom settings.
///
/// Implements the options pattern used by [`new`]:
///
/// ```rust
/// use ring_progress::ring::{new, with_palette, with_size, FOREST};
///
/// let ring = new(&[
///     with_size(120),
///     with_palette(FOREST.clone()),
/// ]);
/// ```
pub enum RingOption {
    /// Sets the widget footprint edge length and rescales the geometry.
    WithSize(u32),
    /// Applies all five colors at once.
    WithPalette(Palette),
    /// Sets the two ring tones.
    WithRingColors(Color, Color),
    /// Sets the reveal mask fill.
    WithMaskColor(Color),
    /// Sets the label text color.
    WithTextColor(Color),
    /// Sets the label panel fill.
    WithPanelColor(Color),
    /// Sets the caption shown under the percentage.
    WithCaption(String),
}

impl RingOption {
    fn apply(&self, m: &mut Model) {
        match self {
            RingOption::WithSize(size) => m.set_size(*size),
            RingOption::WithPalette(palette) => m.apply_palette(palette),
            RingOption::WithRingColors(a, b) => {
                m.ring_color_a = *a;
                m.ring_color_b = *b;
            }
            RingOption::WithMaskColor(color) => m.mask_color = *color,
            RingOption::WithTextColor(color) => m.text_color = *color,
            RingOption::WithPanelColor(color) => m.panel_color = *color,
            RingOption::WithCaption(text) => m.set_format(text.clone()),
        }
    }
}

/// Sets the widget footprint edge length (default 160).
pub fn with_size(size: u32) -> RingOption {
    RingOption::WithSize(size)
}

/// Applies a [`Palette`] to all five color properties.
pub fn with_palette(palette: Palette) -> RingOption {
    RingOption::WithPalette(palette)
}

/// Sets the two tones of the rotating track.
pub fn with_ring_colors(a: impl Into<Color>, b: impl Into<Color>) -> RingOption {
    RingOption::WithRingColors(a.into(), b.into())
}

/// Sets the fill of the reveal mask.
pub fn with_mask_color(color: impl Into<Color>) -> RingOption {
    RingOption::WithMaskColor(color.into())
}

/// Sets the label text color.
pub fn with_text_color(color: impl Into<Color>) -> RingOption {
    RingOption::WithTextColor(color.into())
}

/// Sets the fill of the label panel.
pub fn with_panel_color(color: impl Into<Color>) -> RingOption {
    RingOption::WithPanelColor(color.into())
}

/// Sets the caption shown under the percentage.
pub fn with_caption(text: impl Into<String>) -> RingOption {
    RingOption::WithCaption(text.into())
}

/// The ring model: value, caption, colors, geometry and animation phase.
///
/// All mutators are plain state writes; the visual consequences appear in
/// the next computed [`frame`](Model::frame). Nothing here validates its
/// input — out-of-range values flow through to the stop computation,
/// which clamps only derived stops that come out negative.
#[derive(Debug, Clone)]
pub struct Model {
    id: i64,
    tag: i64,

    /// Edge length of the square footprint.
    size: u32,
    /// Ring thickness; the mask element is inset by this on all sides.
    chunk: u32,
    /// Corner radius of the label panel.
    center_radius: u32,
    /// Font size of the percentage, in pixels.
    percent_font: u32,
    /// Font size of the caption, in pixels.
    caption_font: u32,

    /// Current value, conceptually 0–100. Never clamped on write.
    value: f64,
    /// Caption under the percentage; empty means percentage only.
    caption: String,
    /// Rotation phase of the track gradient, degrees, wrapped into 0..360.
    angle: i32,

    ring_color_a: Color,
    ring_color_b: Color,
    mask_color: Color,
    text_color: Color,
    panel_color: Color,

    alignment: Option<Alignment>,
    min_width: u32,
}

/// Creates a new ring with the given configuration options.
///
/// # Examples
///
/// ```rust
/// use ring_progress::ring::{new, with_ring_colors, with_caption};
///
/// let basic = new(&[]);
/// assert_eq!(basic.size(), 160);
///
/// let styled = new(&[
///     with_ring_colors("#ff6b6b", "#4ecdc4"),
///     with_caption("Uploading"),
/// ]);
/// assert_eq!(styled.ring_color_a().name(), "#ff6b6b");
/// ```
pub fn new(opts: &[RingOption]) -> Model {
    let mut m = Model::new();
    for opt in opts {
        opt.apply(&mut m);
    }
    m
}

impl Model {
    /// Creates a ring with the default size and the [`AQUA`] palette.
    pub fn new() -> Self {
        let palette = Palette::default();
        let mut m = Self {
            id: next_id(),
            tag: 0,
            size: 0,
            chunk: 0,
            center_radius: 0,
            percent_font: 0,
            caption_font: 0,
            value: 0.0,
            caption: String::new(),
            angle: 0,
            ring_color_a: palette.ring_a,
            ring_color_b: palette.ring_b,
            mask_color: palette.mask,
            text_color: palette.text,
            panel_color: palette.panel,
            alignment: None,
            min_width: 0,
        };
        m.set_size(DEFAULT_SIZE);
        m
    }

    /// Returns the ring's unique identifier.
    ///
    /// Used to route tick messages when several rings animate in the same
    /// program.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current value. Whatever was last passed to [`set_value`](Model::set_value),
    /// including out-of-range input.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sets the value.
    ///
    /// No validation and no immediate repaint: the new value is picked up
    /// by the next frame. Values outside 0–100 are stored as-is; the mask
    /// computation clamps what it must.
    ///
    /// ```rust
    /// use ring_progress::ring::new;
    ///
    /// let mut ring = new(&[]);
    /// ring.set_value(120.0);
    /// assert_eq!(ring.value(), 120.0);
    /// ```
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Current caption.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Sets the caption and immediately recomputes its font size.
    ///
    /// Captions up to [`MAX_CAPTION_CHARS`] characters render at the base
    /// caption size (12% of the widget size). Longer captions shrink by
    /// the overflow ratio so they stay inside the circular footprint:
    /// `trunc(0.14 * size * MAX_CAPTION_CHARS / chars)`.
    ///
    /// ```rust
    /// use ring_progress::ring::new;
    ///
    /// let mut ring = new(&[]);
    /// ring.set_format("Hello");
    /// assert_eq!(ring.caption_font(), 19); // trunc(0.12 * 160)
    ///
    /// ring.set_format("a rather verbose note");
    /// assert!(ring.caption_font() < 19);
    /// ```
    pub fn set_format(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
        self.update_caption_font();
    }

    /// First ring tone.
    pub fn ring_color_a(&self) -> Color {
        self.ring_color_a
    }

    /// Sets the first ring tone.
    pub fn set_ring_color_a(&mut self, color: impl Into<Color>) {
        self.ring_color_a = color.into();
    }

    /// Second ring tone.
    pub fn ring_color_b(&self) -> Color {
        self.ring_color_b
    }

    /// Sets the second ring tone.
    pub fn set_ring_color_b(&mut self, color: impl Into<Color>) {
        self.ring_color_b = color.into();
    }

    /// Reveal mask fill.
    pub fn mask_color(&self) -> Color {
        self.mask_color
    }

    /// Sets the reveal mask fill.
    pub fn set_mask_color(&mut self, color: impl Into<Color>) {
        self.mask_color = color.into();
    }

    /// Label text color.
    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// Sets the label text color.
    pub fn set_text_color(&mut self, color: impl Into<Color>) {
        self.text_color = color.into();
    }

    /// Label panel fill.
    pub fn panel_color(&self) -> Color {
        self.panel_color
    }

    /// Sets the label panel fill.
    pub fn set_panel_color(&mut self, color: impl Into<Color>) {
        self.panel_color = color.into();
    }

    /// Applies all five colors of a palette.
    pub fn apply_palette(&mut self, palette: &Palette) {
        self.ring_color_a = palette.ring_a;
        self.ring_color_b = palette.ring_b;
        self.mask_color = palette.mask;
        self.text_color = palette.text;
        self.panel_color = palette.panel;
    }

    /// Stores a placement hint for the host container.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = Some(alignment);
    }

    /// The stored placement hint, if any.
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    /// Overrides the minimum width hint (defaults to the widget size).
    pub fn set_minimum_width(&mut self, width: u32) {
        self.min_width = width;
    }

    /// The current minimum width hint.
    pub fn minimum_width(&self) -> u32 {
        self.min_width
    }

    /// Edge length of the square footprint.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Ring thickness (7% of the size).
    pub fn chunk(&self) -> u32 {
        self.chunk
    }

    /// Corner radius of the label panel (43% of the size).
    pub fn center_radius(&self) -> u32 {
        self.center_radius
    }

    /// Current percentage font size, in pixels.
    pub fn percent_font(&self) -> u32 {
        self.percent_font
    }

    /// Current caption font size, in pixels.
    pub fn caption_font(&self) -> u32 {
        self.caption_font
    }

    /// Current rotation phase in degrees, always in `0..360`.
    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// Sizing and placement hints for the host container.
    ///
    /// The widget asks for a fixed `size × size` footprint with the mask
    /// element inset by [`chunk`](Model::chunk) on all sides.
    pub fn layout(&self) -> LayoutHints {
        LayoutHints {
            size: self.size,
            inset: self.chunk,
            min_width: self.min_width,
            alignment: self.alignment,
        }
    }

    /// Creates a tick message addressed to this ring.
    ///
    /// Useful in tests and when driving the animation by hand; normal
    /// integrations let [`init`](Model::init) and
    /// [`update`](Model::update) schedule ticks through the runtime.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            time: std::time::SystemTime::now(),
            id: self.id,
            tag: self.tag,
        }
    }

    /// Schedules the next animation frame.
    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;

        bubbletea_tick(FRAME_INTERVAL, move |_| {
            Box::new(TickMsg {
                time: std::time::SystemTime::now(),
                id,
                tag,
            }) as Msg
        })
    }

    /// Starts the animation; returns the command for the first tick.
    ///
    /// The tick recurs for as long as the model lives and is never stopped
    /// by the component itself — teardown happens when the host drops the
    /// model and stops forwarding messages.
    pub fn init(&self) -> Cmd {
        self.tick()
    }

    /// Processes messages and advances the animation.
    ///
    /// Accepts this ring's [`TickMsg`] (wrong-instance and stale ticks are
    /// rejected), steps the rotation phase by -1°, and returns the command
    /// that schedules the next frame. All other messages are ignored.
    ///
    /// ```rust
    /// use ring_progress::ring::new;
    ///
    /// let mut ring = new(&[]);
    /// assert_eq!(ring.angle(), 0);
    ///
    /// let msg = ring.tick_msg();
    /// let cmd = ring.update(Box::new(msg));
    /// assert!(cmd.is_some());
    /// assert_eq!(ring.angle(), 359);
    /// ```
    pub fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            // If an ID is set, and the ID doesn't belong to this ring, reject the message.
            if tick_msg.id > 0 && tick_msg.id != self.id {
                return std::option::Option::None;
            }

            // If a tag is set, and it's not the one we expect, reject the message.
            // This prevents the ring from receiving too many messages and thus
            // rotating too fast.
            if tick_msg.tag > 0 && tick_msg.tag != self.tag {
                return std::option::Option::None;
            }

            self.angle = (self.angle - 1).rem_euclid(360);
            if self.caption.is_empty() {
                self.percent_font = scaled(self.size, 0.25);
            }

            self.tag += 1;
            return std::option::Option::Some(self.tick());
        }

        std::option::Option::None
    }

    /// Computes the full style of the current frame.
    ///
    /// Pure with respect to the model: calling it any number of times
    /// between ticks yields the same frame.
    ///
    /// ```rust
    /// use ring_progress::ring::new;
    ///
    /// let mut ring = new(&[]);
    /// ring.set_value(50.0);
    ///
    /// let frame = ring.frame();
    /// assert_eq!(frame.mask.progress, 0.5);
    /// assert_eq!(frame.mask.gradient.stops[0].at, 0.5);
    /// assert_eq!(frame.panel.corner_radius, 68);
    /// ```
    pub fn frame(&self) -> FrameStyle {
        let ring = RingStyle {
            gradient: ConicGradient {
                angle: self.angle,
                stops: vec![
                    ColorStop {
                        at: 0.0,
                        color: self.ring_color_a,
                    },
                    ColorStop {
                        at: 0.5,
                        color: self.ring_color_b,
                    },
                    ColorStop {
                        at: 1.0,
                        color: self.ring_color_a,
                    },
                ],
            },
            corner_radius: self.size / 2,
        };

        let (stop1, stop2) = crate::style::mask_stops(self.value);
        let mask = MaskStyle {
            gradient: ConicGradient {
                angle: MASK_ANGLE,
                stops: vec![
                    ColorStop {
                        at: stop1,
                        color: Color::TRANSPARENT,
                    },
                    ColorStop {
                        at: stop2,
                        color: self.mask_color,
                    },
                ],
            },
            progress: self.value / 100.0,
            indicator_angle: 270.0 - self.value * 3.6,
        };

        let panel = PanelStyle {
            corner_radius: self.center_radius,
            background: self.panel_color,
        };

        FrameStyle {
            ring,
            mask,
            panel,
            label: self.label_markup(),
        }
    }

    /// Pushes the current frame into a host [`Surface`].
    pub fn render_to<S: Surface>(&self, surface: &mut S) {
        let frame = self.frame();
        surface.apply_ring(&frame.ring);
        surface.apply_mask(&frame.mask);
        surface.apply_panel(&frame.panel);
        surface.set_label(&frame.label);
    }

    /// Renders the label as styled terminal text.
    ///
    /// This is the textual projection of the widget for terminal hosts:
    /// the percentage (and caption, when set) in the text color. Empty at
    /// value 0, like the graphical label.
    pub fn view(&self) -> String {
        if self.value == 0.0 {
            return String::new();
        }

        let style = Style::new().foreground(TermColor::from(self.text_color.name().as_str()));
        let mut out = style.render(&format!("{}%", self.rounded_percent()));
        if !self.caption.is_empty() {
            out.push('\n');
            out.push_str(&style.render(&self.caption));
        }
        out
    }

    fn rounded_percent(&self) -> i64 {
        self.value.round() as i64
    }

    fn label_markup(&self) -> LabelMarkup {
        // Value 0 means not yet started: the label shows nothing, caption
        // or not.
        if self.value == 0.0 {
            return LabelMarkup::default();
        }

        let sup_size = scaled(self.percent_font, 0.75);
        let mut lines = vec![vec![
            LabelSpan {
                text: self.rounded_percent().to_string(),
                color: self.text_color,
                size: self.percent_font,
                weight: 500,
                superscript: false,
            },
            LabelSpan {
                text: "%".to_string(),
                color: self.text_color,
                size: sup_size,
                weight: 400,
                superscript: true,
            },
        ]];

        if !self.caption.is_empty() {
            lines.push(vec![LabelSpan {
                text: self.caption.clone(),
                color: self.text_color,
                size: self.caption_font,
                weight: 400,
                superscript: false,
            }]);
        }

        LabelMarkup { lines }
    }

    /// Rescales the geometry for a new footprint size.
    fn set_size(&mut self, size: u32) {
        self.size = size;
        self.chunk = scaled(size, 0.07);
        // Panel radius + ring thickness = half the footprint.
        self.center_radius = scaled(size, 0.43);
        self.percent_font = scaled(size, 0.25);
        self.min_width = size;
        self.update_caption_font();
    }

    fn update_caption_font(&mut self) {
        let chars = self.caption.chars().count();
        self.caption_font = if chars > MAX_CAPTION_CHARS {
            let shrink = MAX_CAPTION_CHARS as f64 / chars as f64;
            (f64::from(self.size) * 0.14 * shrink) as u32
        } else {
            scaled(self.size, 0.12)
        };
    }
}

/// Truncating scale of a base length, matching how the geometry constants
/// are derived.
fn scaled(base: u32, factor: f64) -> u32 {
    (f64::from(base) * factor) as u32
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, std::option::Option<Cmd>) {
        let model = Model::new();
        let cmd = model.init();
        (model, std::option::Option::Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{mask_stops, LabelMarkup, MaskStyle, PanelStyle, RingStyle};

    fn advance(ring: &mut Model) {
        let msg = ring.tick_msg();
        let cmd = ring.update(Box::new(msg));
        assert!(cmd.is_some(), "the tick must reschedule itself");
    }

    #[test]
    fn test_new_with_no_options() {
        let ring = new(&[]);

        assert_eq!(ring.size(), DEFAULT_SIZE);
        assert_eq!(ring.value(), 0.0);
        assert_eq!(ring.caption(), "");
        assert_eq!(ring.angle(), 0);
        assert_eq!(ring.ring_color_a().name(), "#00ffff");
        assert_eq!(ring.ring_color_b().name(), "#00458e");
        assert_eq!(ring.mask_color().name(), "#e3e3e3");
        assert_eq!(ring.text_color().name(), "#000000");
        assert_eq!(ring.panel_color().name(), "#ffffff");
    }

    #[test]
    fn test_geometry_at_default_size() {
        let ring = new(&[]);
        assert_eq!(ring.chunk(), 11); // trunc(0.07 * 160)
        assert_eq!(ring.center_radius(), 68); // trunc(0.43 * 160)
        assert_eq!(ring.percent_font(), 40); // 0.25 * 160
        assert_eq!(ring.caption_font(), 19); // trunc(0.12 * 160)
        assert_eq!(ring.minimum_width(), 160);
    }

    #[test]
    fn test_geometry_scales_with_size() {
        let ring = new(&[with_size(200)]);
        assert_eq!(ring.chunk(), 14);
        assert_eq!(ring.center_radius(), 86);
        assert_eq!(ring.percent_font(), 50);
        assert_eq!(ring.caption_font(), 24);
        assert_eq!(ring.layout().size, 200);
        assert_eq!(ring.layout().inset, 14);
    }

    #[test]
    fn test_set_value_does_not_clamp() {
        let mut ring = new(&[]);
        ring.set_value(120.0);
        assert_eq!(ring.value(), 120.0);
        ring.set_value(-5.0);
        assert_eq!(ring.value(), -5.0);
    }

    #[test]
    fn test_percent_label_matches_rounded_value() {
        let ring_at = |v: f64| {
            let mut ring = new(&[]);
            ring.set_value(v);
            ring.frame().label.plain_text()
        };

        for v in 1..=100u32 {
            assert_eq!(ring_at(f64::from(v)), format!("{v}%"));
        }
        assert_eq!(ring_at(49.4), "49%");
        assert_eq!(ring_at(49.6), "50%");
    }

    #[test]
    fn test_value_zero_shows_nothing() {
        let mut ring = new(&[with_caption("Loading...")]);
        ring.set_value(0.0);
        assert!(ring.frame().label.is_empty());
        assert_eq!(ring.view(), "");

        // Same without a caption.
        let mut bare = new(&[]);
        bare.set_format("");
        bare.set_value(0.0);
        assert!(bare.frame().label.is_empty());
        assert_eq!(bare.view(), "");
    }

    #[test]
    fn test_midway_frame() {
        let mut ring = new(&[]);
        ring.set_value(50.0);
        let mask = ring.frame().mask;

        assert_eq!(mask.progress, 0.5);
        assert!((mask.indicator_angle - 90.0).abs() < 1e-9);
        assert_eq!(mask.gradient.stops[0].at, 0.5);
        assert!((mask.gradient.stops[1].at - 0.499).abs() < 1e-12);
        assert_eq!(mask.gradient.angle, 270);
    }

    #[test]
    fn test_full_value_stops() {
        // 1.0 - 1.0 is exactly 0.0 and stays unfloored; only the second
        // stop goes negative and is floored.
        let (stop1, stop2) = mask_stops(100.0);
        assert_eq!(stop1, 0.0);
        assert_eq!(stop2, 0.0);
    }

    #[test]
    fn test_overfull_value_stops() {
        let mut ring = new(&[]);
        ring.set_value(120.0);
        let mask = ring.frame().mask;
        assert_eq!(mask.gradient.stops[0].at, 0.001);
        assert_eq!(mask.gradient.stops[1].at, 0.0);
    }

    #[test]
    fn test_caption_font_shrinks_past_limit() {
        let mut ring = new(&[]);

        ring.set_format("Hello"); // 5 chars, under the limit
        assert_eq!(ring.caption_font(), 19); // trunc(0.12 * 160)

        ring.set_format("abcdefghijklmnopqrstuv"); // 22 chars
        assert_eq!(ring.caption_font(), 11); // trunc(0.14 * 160 * 11/22)
    }

    #[test]
    fn test_caption_font_recomputes_synchronously() {
        let mut ring = new(&[]);
        let before = ring.caption_font();
        ring.set_format("a caption far too long for the panel");
        assert!(ring.caption_font() < before, "no tick needed");
    }

    #[test]
    fn test_rotation_decrements_and_wraps() {
        let mut ring = new(&[]);

        advance(&mut ring);
        assert_eq!(ring.angle(), 359);
        advance(&mut ring);
        assert_eq!(ring.angle(), 358);
    }

    #[test]
    fn test_rotation_survives_ten_thousand_ticks() {
        let mut ring = new(&[]);
        for _ in 0..10_000 {
            advance(&mut ring);
            assert!((0..360).contains(&ring.angle()));
        }
        // 10_000 ticks of -1°, wrapped: (-10_000).rem_euclid(360).
        assert_eq!(ring.angle(), 80);
    }

    #[test]
    fn test_ring_gradient_follows_rotation() {
        let mut ring = new(&[]);
        advance(&mut ring);
        let style = ring.frame().ring;

        assert_eq!(style.gradient.angle, 359);
        assert_eq!(style.gradient.stops.len(), 3);
        assert_eq!(style.gradient.stops[0].color, ring.ring_color_a());
        assert_eq!(style.gradient.stops[1].at, 0.5);
        assert_eq!(style.gradient.stops[1].color, ring.ring_color_b());
        assert_eq!(style.gradient.stops[2].color, ring.ring_color_a());
        assert_eq!(style.corner_radius, 80);
    }

    #[test]
    fn test_color_round_trip() {
        let mut ring = new(&[]);
        ring.set_ring_color_a("#0F0");
        assert_eq!(ring.ring_color_a().name(), "#00ff00");
        ring.set_mask_color("rgb(170, 255, 170)");
        assert_eq!(ring.mask_color().name(), "#aaffaa");
        ring.set_text_color("#006600");
        assert_eq!(ring.text_color().to_string(), "#006600");
    }

    #[test]
    fn test_palette_option() {
        let ring = new(&[with_palette(FOREST.clone())]);
        assert_eq!(ring.ring_color_a().name(), "#00ff00");
        assert_eq!(ring.ring_color_b().name(), "#006600");
        assert_eq!(ring.mask_color().name(), "#aaffaa");
        assert_eq!(ring.text_color().name(), "#006600");
        assert_eq!(ring.panel_color().name(), "#ddffdd");
    }

    #[test]
    fn test_label_without_caption_is_one_line() {
        let mut ring = new(&[]);
        ring.set_format("");
        ring.set_value(42.0);
        let label = ring.frame().label;

        assert_eq!(label.lines.len(), 1);
        assert_eq!(label.plain_text(), "42%");
        // Percentage is the heavy span, percent sign a smaller superscript.
        assert_eq!(label.lines[0][0].weight, 500);
        assert_eq!(label.lines[0][0].size, 40);
        assert!(label.lines[0][1].superscript);
        assert_eq!(label.lines[0][1].size, 30); // trunc(0.75 * 40)
    }

    #[test]
    fn test_label_with_caption_is_two_lines() {
        let mut ring = new(&[with_caption("Syncing")]);
        ring.set_value(7.0);
        let label = ring.frame().label;

        assert_eq!(label.lines.len(), 2);
        assert_eq!(label.plain_text(), "7%\nSyncing");
        assert_eq!(label.lines[1][0].size, ring.caption_font());
        assert_eq!(label.lines[1][0].color, ring.text_color());
    }

    #[test]
    fn test_percent_font_resets_when_caption_empty() {
        let mut ring = new(&[]);
        assert_eq!(ring.percent_font(), 40);
        advance(&mut ring);
        assert_eq!(ring.percent_font(), 40);

        // With a caption present the tick leaves the size alone.
        ring.set_format("note");
        advance(&mut ring);
        assert_eq!(ring.percent_font(), 40);
    }

    #[test]
    fn test_update_with_wrong_id() {
        let mut ring = new(&[]);
        let wrong = TickMsg {
            time: std::time::SystemTime::now(),
            id: ring.id() + 999,
            tag: 0,
        };
        assert!(ring.update(Box::new(wrong)).is_none());
        assert_eq!(ring.angle(), 0);
    }

    #[test]
    fn test_update_with_stale_tag() {
        let mut ring = new(&[]);
        advance(&mut ring); // tag is now 1

        let stale = TickMsg {
            time: std::time::SystemTime::now(),
            id: ring.id(),
            tag: 999,
        };
        assert!(ring.update(Box::new(stale)).is_none());
        assert_eq!(ring.angle(), 359);
    }

    #[test]
    fn test_update_ignores_other_messages() {
        let mut ring = new(&[]);
        assert!(ring.update(Box::new("unrelated".to_string())).is_none());
    }

    #[test]
    fn test_unique_ids() {
        let a = new(&[]);
        let b = new(&[]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_view_shows_percentage_and_caption() {
        let mut ring = new(&[with_caption("Syncing")]);
        ring.set_value(42.0);
        let view = ring.view();
        assert!(view.contains("42%"));
        assert!(view.contains("Syncing"));
    }

    #[test]
    fn test_default_implementation() {
        let ring = Model::default();
        assert_eq!(ring.size(), DEFAULT_SIZE);
        assert_eq!(ring.value(), 0.0);
    }

    #[derive(Default)]
    struct RecordingSurface {
        ring: Option<RingStyle>,
        mask: Option<MaskStyle>,
        panel: Option<PanelStyle>,
        label: Option<LabelMarkup>,
    }

    impl Surface for RecordingSurface {
        fn apply_ring(&mut self, style: &RingStyle) {
            self.ring = Some(style.clone());
        }
        fn apply_mask(&mut self, style: &MaskStyle) {
            self.mask = Some(style.clone());
        }
        fn apply_panel(&mut self, style: &PanelStyle) {
            self.panel = Some(*style);
        }
        fn set_label(&mut self, markup: &LabelMarkup) {
            self.label = Some(markup.clone());
        }
    }

    #[test]
    fn test_render_to_pushes_all_four_artifacts() {
        let mut ring = new(&[with_caption("Copying")]);
        ring.set_value(75.0);

        let mut surface = RecordingSurface::default();
        ring.render_to(&mut surface);

        let mask = surface.mask.expect("mask applied");
        assert!((mask.progress - 0.75).abs() < 1e-12);
        assert_eq!(surface.panel.expect("panel applied").corner_radius, 68);
        assert_eq!(
            surface.label.expect("label applied").plain_text(),
            "75%\nCopying"
        );
        assert!(surface
            .ring
            .expect("ring applied")
            .to_string()
            .contains("conic-gradient"));
    }
}
