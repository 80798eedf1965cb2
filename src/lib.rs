//! Zoom transition geometry and lifecycle for a single image element.
//!
//! Moves one element between its inline position and a centered, enlarged
//! presentation, optionally following the pointer while zoomed. The host
//! (a DOM binding, a test double) is reached only through the traits in
//! [`host`].
//!
//! # Modules
//!
//! - [`geometry`] — Translate and scale computation
//! - [`target`] — Zoom lifecycle of one element
//! - [`style`] — Style snapshots, cursors, transform declarations
//! - [`clipping`] — Reference-counted ancestor clipping registry
//! - [`host`] — Element and environment traits, shared stage
//! - [`options`] — Configuration record

#![forbid(unsafe_code)]

pub mod clipping;
pub mod geometry;
pub mod host;
pub mod options;
pub mod style;
#[cfg(feature = "svg")]
pub mod svg;
pub mod target;

pub use clipping::ClipRegistry;
pub use geometry::{
    GeometryError, Rect, Size, Vec2, ZoomGeometry, compute_scale, compute_translate, half,
};
pub use host::{Element, Environment, Stage, TargetId, TaskId};
pub use options::{Options, OptionsError};
pub use style::{Cursor, StyleMap, Transform, TransformProperty};
pub use target::{Snapshot, Target, UPGRADE_DELAY, ZoomError, ZoomState};
