//! Style snapshots and CSS declaration formatting.

use core::fmt;

use crate::geometry::Vec2;

/// Name of the CSS transform property in the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransformProperty {
    /// Unprefixed `transform`.
    #[default]
    Standard,
    /// `-webkit-transform`, for hosts without the unprefixed property.
    Webkit,
}

impl TransformProperty {
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Standard => "transform",
            Self::Webkit => "-webkit-transform",
        }
    }
}

/// Cursor affordances used while zooming.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cursor {
    Default,
    ZoomIn,
    ZoomOut,
    Grab,
    Move,
}

impl Cursor {
    pub const fn css_value(self) -> &'static str {
        match self {
            Self::Default => "auto",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::Grab => "grab",
            Self::Move => "move",
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_value())
    }
}

/// A translate followed by a scale, in CSS transform syntax.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub translate: Vec2,
    pub scale: Vec2,
}

impl Transform {
    /// The value that clears any transform.
    pub const NONE: &'static str = "none";

    pub const fn new(translate: Vec2, scale: Vec2) -> Self {
        Self { translate, scale }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({},{})",
            self.translate.x, self.translate.y, self.scale.x, self.scale.y
        )
    }
}

/// Transition declaration on the transform property.
pub fn transition(property: TransformProperty, duration_secs: f64, timing: &str) -> String {
    format!("{} {}s {}", property.css_name(), duration_secs, timing)
}

/// Ordered mapping of style property name to value.
///
/// Insertion order is preserved so snapshots apply properties in the same
/// order they were built. An empty value means "not set inline".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(&'static str, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing an existing entry in place.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(n, v)| (*n, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
