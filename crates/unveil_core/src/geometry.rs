//! Vertical geometry for the document model
//!
//! The reveal core only reasons about the vertical axis: where an element
//! sits in document coordinates and which slice of the document the viewport
//! currently shows. Horizontal extent never participates in visibility
//! decisions, so rects carry `y` and `height` only.

/// An element's extent in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Distance from the document top to the element's top edge.
    pub y: f32,
    /// Element height. Zero-height rects are valid (empty anchors).
    pub height: f32,
}

impl Rect {
    pub const fn new(y: f32, height: f32) -> Self {
        Self { y, height }
    }

    /// Bottom edge in document coordinates.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Height of the overlap between this rect and the span `[top, bottom)`.
    ///
    /// Returns 0.0 when they do not overlap. For zero-height rects this is
    /// always 0.0; callers that care about point containment should use
    /// [`Rect::point_within`].
    pub fn overlap_height(&self, top: f32, bottom: f32) -> f32 {
        (self.bottom().min(bottom) - self.y.max(top)).max(0.0)
    }

    /// Whether the rect's top edge lies inside the span `[top, bottom]`.
    pub fn point_within(&self, top: f32, bottom: f32) -> bool {
        self.y >= top && self.y <= bottom
    }
}

/// The currently visible slice of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Scroll offset: document coordinate of the viewport's top edge.
    pub scroll_y: f32,
    /// Viewport height.
    pub height: f32,
}

impl Viewport {
    pub const fn new(scroll_y: f32, height: f32) -> Self {
        Self { scroll_y, height }
    }

    pub fn top(&self) -> f32 {
        self.scroll_y
    }

    pub fn bottom(&self) -> f32 {
        self.scroll_y + self.height
    }

    /// The effective visible span after raising the bottom boundary by
    /// `bottom_margin_fraction` of the viewport height.
    ///
    /// A fraction of 0.10 means elements must cross 10% higher up the
    /// viewport before they count as visible, making visibility fire
    /// slightly before an element reaches the literal screen edge.
    pub fn trigger_span(&self, bottom_margin_fraction: f32) -> (f32, f32) {
        let inset = self.height * bottom_margin_fraction.clamp(0.0, 1.0);
        (self.scroll_y, self.scroll_y + self.height - inset)
    }
}
