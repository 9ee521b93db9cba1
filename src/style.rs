//! Per-frame style descriptors for the ring widget.
//!
//! The widget never talks to a rendering backend directly. Every tick it
//! computes one [`FrameStyle`] — plain data describing the rotating ring
//! gradient, the reveal mask, the inner label panel and the label text —
//! and a host applies those descriptors to whatever widget tree it owns.
//! Keeping the descriptors pure keeps all of the interesting arithmetic
//! testable without a display server.
//!
//! Each visual descriptor also implements `Display`, emitting a CSS-style
//! declaration string for hosts whose style system is string-based:
//!
//! ```rust
//! use ring_progress::ring;
//!
//! let m = ring::new(&[]);
//! let frame = m.frame();
//! assert!(frame.ring.to_string().contains("conic-gradient"));
//! ```

use crate::color::Color;
use std::fmt;

/// A single stop of a conic gradient: a position in `0.0..=1.0` around the
/// circle and the color at that position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient, as a fraction of a full turn.
    pub at: f64,
    /// Color at this stop.
    pub color: Color,
}

/// A conic (angular) gradient centered on the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ConicGradient {
    /// Starting angle in degrees.
    pub angle: i32,
    /// Gradient stops, in the order the host should receive them.
    pub stops: Vec<ColorStop>,
}

impl ConicGradient {
    fn write_stops(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stop) in self.stops.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", stop.color, fmt_fraction(stop.at))?;
        }
        Ok(())
    }
}

impl fmt::Display for ConicGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conic-gradient(from {}deg at 50% 50%, ", self.angle)?;
        self.write_stops(f)?;
        write!(f, ")")
    }
}

/// Style of the outer rotating ring element.
#[derive(Debug, Clone, PartialEq)]
pub struct RingStyle {
    /// The two-tone gradient, rotated by the current animation phase.
    pub gradient: ConicGradient,
    /// Corner radius that turns the square element into a circle, in
    /// pixels (half the widget size).
    pub corner_radius: u32,
}

impl fmt::Display for RingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "border: 0px; background: {}; border-radius: {}px;",
            self.gradient, self.corner_radius
        )
    }
}

/// Style of the mask element that reveals the ring proportionally to the
/// current value.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskStyle {
    /// Two-stop gradient: transparent up to the first stop, the mask color
    /// from the second. Anchored at 270° regardless of the ring rotation.
    pub gradient: ConicGradient,
    /// The value as a fraction, `value / 100`.
    pub progress: f64,
    /// Where the leading edge of the revealed arc sits, in degrees
    /// (`270 - value * 3.6`). Exposed for hosts that want to attach a
    /// marker to the arc tip; nothing in this crate consumes it.
    pub indicator_angle: f64,
}

impl fmt::Display for MaskStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "background: {};", self.gradient)
    }
}

/// Style of the rounded panel behind the label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStyle {
    /// Corner radius of the panel, in pixels.
    pub corner_radius: u32,
    /// Panel fill color.
    pub background: Color,
}

impl fmt::Display for PanelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "border-radius: {}px; background-color: {};",
            self.corner_radius, self.background
        )
    }
}

/// One styled run of text inside the label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpan {
    /// The text of this run.
    pub text: String,
    /// Foreground color.
    pub color: Color,
    /// Font size in pixels.
    pub size: u32,
    /// Font weight (500 for the percentage, 400 otherwise).
    pub weight: u32,
    /// Render as a superscript (the percent sign).
    pub superscript: bool,
}

/// The label content: lines of styled spans, centered in the panel.
///
/// An empty markup means the label shows nothing — the not-yet-started
/// state at value 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMarkup {
    /// Lines of text, top to bottom; each line is a run of spans.
    pub lines: Vec<Vec<LabelSpan>>,
}

impl LabelMarkup {
    /// Whether the label shows nothing at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Plain text content, lines joined with `\n`, styling dropped.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                line.iter()
                    .map(|span| span.text.as_str())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the label as a centered rich-text block for hosts with an
    /// HTML-ish text element.
    ///
    /// ```rust
    /// use ring_progress::ring::{new, with_caption};
    ///
    /// let mut m = new(&[with_caption("Loading...")]);
    /// m.set_value(42.0);
    /// let html = m.frame().label.to_html();
    /// assert!(html.contains("<sup>%</sup>"));
    /// assert!(html.contains("Loading..."));
    /// ```
    pub fn to_html(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut out = String::from("<p align=\"center\">");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push_str("<br>");
            }
            for span in line {
                let weight = if span.weight != 400 {
                    format!("font-weight: {};", span.weight)
                } else {
                    String::new()
                };
                out.push_str(&format!(
                    "<span style=\"{}color:{};font-size:{}px;\">",
                    weight, span.color, span.size
                ));
                if span.superscript {
                    out.push_str("<sup>");
                    out.push_str(&span.text);
                    out.push_str("</sup>");
                } else {
                    out.push_str(&span.text);
                }
                out.push_str("</span>");
            }
        }
        out.push_str("</p>");
        out
    }
}

/// Everything a host needs to paint one frame of the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStyle {
    /// Outer rotating gradient ring.
    pub ring: RingStyle,
    /// Inner reveal mask.
    pub mask: MaskStyle,
    /// Rounded panel behind the label.
    pub panel: PanelStyle,
    /// Label text content.
    pub label: LabelMarkup,
}

/// Where the host should place the widget inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Flush with the leading edge.
    Start,
    /// Centered (the usual placement).
    Center,
    /// Flush with the trailing edge.
    End,
}

/// Sizing and placement hints for the host container.
///
/// The widget wants a fixed `size × size` footprint, a mask element inset
/// by `inset` on all four sides, and a text element inside that. These are
/// hints only; the host's layout system has the final word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutHints {
    /// Edge length of the square footprint.
    pub size: u32,
    /// Inward offset of the mask element on all sides (the ring
    /// thickness).
    pub inset: u32,
    /// Minimum width of the outer element.
    pub min_width: u32,
    /// Optional horizontal placement inside the parent.
    pub alignment: Option<Alignment>,
}

/// The seam between the widget and a rendering host.
///
/// A host implements this with whatever its widget tree offers — an outer
/// circular element for the ring, an inset element for the mask, and a
/// rich-text label on a rounded panel — and the widget pushes a frame into
/// it via [`crate::ring::Model::render_to`].
pub trait Surface {
    /// Applies the ring style to the outer element.
    fn apply_ring(&mut self, style: &RingStyle);
    /// Applies the mask style to the inset element.
    fn apply_mask(&mut self, style: &MaskStyle);
    /// Applies the panel style to the label background.
    fn apply_panel(&mut self, style: &PanelStyle);
    /// Replaces the label content.
    fn set_label(&mut self, markup: &LabelMarkup);
}

/// Computes the mask gradient stop positions for a value in percent.
///
/// `stop1` marks the end of the transparent band, `stop2` the start of the
/// masked band. Both derive from `value / 100` and each is floored
/// independently, and only when it comes out negative: `stop1` at 0.001,
/// `stop2` at 0.000. The floors differ on purpose — see the module docs of
/// [`crate::ring`] — so a full or overfull value keeps a sliver of
/// transparent band instead of collapsing the gradient.
///
/// # Examples
///
/// ```rust
/// use ring_progress::style::mask_stops;
///
/// assert_eq!(mask_stops(50.0), (0.5, 0.499));
/// assert_eq!(mask_stops(120.0), (0.001, 0.0));
/// ```
pub fn mask_stops(value: f64) -> (f64, f64) {
    let progress = value / 100.0;
    let mut stop1 = 1.0 - progress;
    let mut stop2 = 0.999 - progress;
    if stop1 < 0.0 {
        stop1 = 0.001;
    }
    if stop2 < 0.0 {
        stop2 = 0.0;
    }
    (stop1, stop2)
}

/// Formats a gradient position as a percentage with up to three decimals,
/// trailing zeros trimmed.
fn fmt_fraction(at: f64) -> String {
    let mut text = format!("{:.3}", at * 100.0);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text.push('%');
    text
}
