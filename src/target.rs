//! Zoom lifecycle of a single element.
//!
//! A [`Target`] moves its element between the inline position and the
//! zoomed presentation. The caller drives the sequence:
//!
//! ```text
//! Closed ──zoom_in──▶ Zoomed ──grab / move_to──▶ Zoomed
//!    ▲                  │
//!    └─────zoom_out─────┘
//! ```
//!
//! Out-of-order calls fail with [`ZoomError`] instead of applying a
//! transform computed from missing geometry.

use core::time::Duration;

use thiserror::Error;

use crate::geometry::{GeometryError, Vec2, ZoomGeometry};
use crate::host::{Element, Environment, Stage, StageLink, TargetId, TaskId};
use crate::options::{Options, OptionsError};
use crate::style::{Cursor, StyleMap, Transform, transition};

/// Delay between inserting the hi-res probe and swapping the live source.
///
/// A decode heuristic, not a load-completion guarantee.
pub const UPGRADE_DELAY: Duration = Duration::from_millis(100);

/// Invalid call sequence or unusable geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoomError {
    #[error("target is not zoomed")]
    NotZoomed,
    #[error("target is already zoomed")]
    AlreadyZoomed,
    #[error("no style snapshot captured yet")]
    NoSnapshot,
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Where the target is in its lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum ZoomState {
    #[default]
    Closed,
    Zoomed(ZoomGeometry),
}

/// Styles captured by the most recent zoom-in.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Snapshot {
    #[default]
    Unset,
    Captured {
        /// Zoomed presentation.
        open: StyleMap,
        /// Inline values the open style replaced.
        close: StyleMap,
    },
}

struct PendingUpgrade<P> {
    task: TaskId,
    src: String,
    probe: P,
}

/// An element under zoom management.
///
/// Dropping a target is its whole teardown: ancestors it unclipped get their
/// overflow back and a pending upgrade probe is removed. The upgrade task
/// itself is cancelled in the host on the stage's next
/// [`settle`](Stage::settle).
pub struct Target<E: Element> {
    id: TargetId,
    link: StageLink<E::Ancestor>,
    el: E,
    options: Options,
    thumbnail: Option<String>,
    state: ZoomState,
    snapshot: Snapshot,
    pending: Option<PendingUpgrade<E::Probe>>,
}

impl<E: Element> Target<E> {
    /// Take ownership of `el`, capturing its current source as the thumbnail.
    pub fn new<V: Environment>(
        el: E,
        options: Options,
        stage: &mut Stage<V, E::Ancestor>,
    ) -> Result<Self, OptionsError> {
        options.validate()?;
        let thumbnail = el.source();
        Ok(Self {
            id: stage.allocate_target(),
            link: stage.link(),
            el,
            options,
            thumbnail,
            state: ZoomState::Closed,
            snapshot: Snapshot::Unset,
            pending: None,
        })
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn element(&self) -> &E {
        &self.el
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.el
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options. Takes effect on the next zoom-in.
    pub fn set_options(&mut self, options: Options) -> Result<(), OptionsError> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    pub fn state(&self) -> &ZoomState {
        &self.state
    }

    pub fn is_zoomed(&self) -> bool {
        matches!(self.state, ZoomState::Zoomed(_))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Translate computed by the current zoom, if zoomed.
    pub fn translate(&self) -> Option<Vec2> {
        self.geometry().map(|g| g.translate)
    }

    /// Scale computed by the current zoom, if zoomed.
    pub fn scale(&self) -> Option<Vec2> {
        self.geometry().map(|g| g.scale)
    }

    pub fn geometry(&self) -> Option<&ZoomGeometry> {
        match &self.state {
            ZoomState::Zoomed(g) => Some(g),
            ZoomState::Closed => None,
        }
    }

    /// Task id of the in-flight source upgrade, if any.
    pub fn pending_upgrade(&self) -> Option<TaskId> {
        self.pending.as_ref().map(|p| p.task)
    }

    /// Enlarge the element and center it in the viewport.
    ///
    /// Geometry is computed from a fresh layout read before anything is
    /// mutated, so a degenerate element leaves the host untouched.
    pub fn zoom_in<V: Environment>(
        &mut self,
        stage: &mut Stage<V, E::Ancestor>,
    ) -> Result<(), ZoomError> {
        if self.is_zoomed() {
            return Err(ZoomError::AlreadyZoomed);
        }
        stage.settle();

        let rect = self.el.bounding_rect();
        let center = stage.env().viewport_center();
        let geometry = ZoomGeometry::compute(
            rect,
            center,
            self.options.scale_base,
            self.options.custom_size,
        )?;

        self.link.borrow_mut().clips.disable(self.id, &mut self.el);
        self.el.force_layout();

        let prop = stage.env().transform_property();
        let o = &self.options;
        let cursor = if o.enable_grab {
            Cursor::Grab
        } else {
            Cursor::ZoomOut
        };
        let open = StyleMap::new()
            .with("position", "relative")
            .with("z-index", o.z_index.saturating_add(1).to_string())
            .with("cursor", cursor.css_value())
            .with(
                "transition",
                transition(prop, o.transition_duration, &o.transition_timing_function),
            )
            .with(
                prop.css_name(),
                Transform::new(geometry.translate, geometry.scale).to_string(),
            )
            .with("width", format!("{}px", rect.width))
            .with("height", format!("{}px", rect.height));

        let close = self.el.apply_style(&open);
        log::debug!(
            "{:?} zoomed in: translate {:?}, scale {:?}",
            self.id,
            geometry.translate,
            geometry.scale
        );

        self.snapshot = Snapshot::Captured { open, close };
        self.state = ZoomState::Zoomed(geometry);
        Ok(())
    }

    /// Shrink the element back by clearing its transform.
    ///
    /// The rest of the open style stays in place until
    /// [`restore_close_style`](Self::restore_close_style).
    pub fn zoom_out<V: Environment>(
        &mut self,
        stage: &mut Stage<V, E::Ancestor>,
    ) -> Result<(), ZoomError> {
        if !self.is_zoomed() {
            return Err(ZoomError::NotZoomed);
        }
        stage.settle();

        self.link.borrow_mut().clips.enable(self.id, &mut self.el);
        self.el.force_layout();

        let prop = stage.env().transform_property();
        self.el
            .apply_style(&StyleMap::new().with(prop.css_name(), Transform::NONE));

        log::debug!("{:?} zoomed out", self.id);
        self.state = ZoomState::Closed;
        Ok(())
    }

    /// Follow the pointer at (`x`, `y`) immediately, without a transition.
    ///
    /// `scale_extra` is added to the zoomed scale; `None` uses
    /// [`Options::scale_extra`].
    pub fn grab<V: Environment>(
        &mut self,
        stage: &Stage<V, E::Ancestor>,
        x: f64,
        y: f64,
        scale_extra: Option<f64>,
    ) -> Result<(), ZoomError> {
        let transform = self.tracking_transform(stage.env(), x, y, scale_extra)?;
        let prop = stage.env().transform_property();
        self.el.apply_style(
            &StyleMap::new()
                .with("cursor", Cursor::Move.css_value())
                .with("transition", "none")
                .with(prop.css_name(), transform.to_string()),
        );
        log::trace!("{:?} grabbed at ({x}, {y})", self.id);
        Ok(())
    }

    /// Recenter on the pointer at (`x`, `y`) with a transition on the
    /// transform property. `scale_extra` as in [`grab`](Self::grab).
    pub fn move_to<V: Environment>(
        &mut self,
        stage: &Stage<V, E::Ancestor>,
        x: f64,
        y: f64,
        scale_extra: Option<f64>,
    ) -> Result<(), ZoomError> {
        let transform = self.tracking_transform(stage.env(), x, y, scale_extra)?;
        let prop = stage.env().transform_property();
        self.el.apply_style(
            &StyleMap::new()
                .with("transition", prop.css_name())
                .with(prop.css_name(), transform.to_string()),
        );
        log::trace!("{:?} moved to ({x}, {y})", self.id);
        Ok(())
    }

    fn tracking_transform<V: Environment>(
        &self,
        env: &V,
        x: f64,
        y: f64,
        scale_extra: Option<f64>,
    ) -> Result<Transform, ZoomError> {
        let geometry = self.geometry().ok_or(ZoomError::NotZoomed)?;
        let scale_extra = scale_extra.unwrap_or(self.options.scale_extra);
        let (translate, scale) =
            geometry.shifted(env.viewport_center(), Vec2::new(x, y), scale_extra);
        Ok(Transform::new(translate, scale))
    }

    /// Reapply the inline style the element had before the last zoom-in.
    pub fn restore_close_style(&mut self) -> Result<(), ZoomError> {
        match &self.snapshot {
            Snapshot::Captured { close, .. } => {
                self.el.apply_style(close);
                Ok(())
            }
            Snapshot::Unset => Err(ZoomError::NoSnapshot),
        }
    }

    /// Reapply the zoomed style computed by the last zoom-in.
    ///
    /// Only valid while zoomed: after [`zoom_out`](Self::zoom_out) the
    /// ancestors clip again and the enlarged element would be cut off.
    pub fn restore_open_style(&mut self) -> Result<(), ZoomError> {
        match &self.snapshot {
            Snapshot::Captured { .. } if !self.is_zoomed() => Err(ZoomError::NotZoomed),
            Snapshot::Captured { open, .. } => {
                self.el.apply_style(open);
                Ok(())
            }
            Snapshot::Unset => Err(ZoomError::NoSnapshot),
        }
    }

    /// Start swapping to the high-resolution `src`.
    ///
    /// A hidden probe carrying `src` is inserted so the host decodes it
    /// before the visible swap. The swap happens in
    /// [`complete_upgrade`](Self::complete_upgrade) once the scheduled task
    /// fires. An upgrade already in flight is cancelled first. Returns the
    /// scheduled task, or `None` when `src` is absent.
    pub fn upgrade_source<V: Environment>(
        &mut self,
        stage: &mut Stage<V, E::Ancestor>,
        src: Option<&str>,
    ) -> Option<TaskId> {
        let src = src.filter(|s| !s.is_empty())?;
        stage.settle();
        self.cancel_upgrade(stage);

        let probe = self.el.insert_probe(src);
        let task = stage.env_mut().schedule(UPGRADE_DELAY);
        log::debug!("{:?} upgrading source to {src:?} ({task:?})", self.id);
        self.pending = Some(PendingUpgrade {
            task,
            src: src.to_owned(),
            probe,
        });
        Some(task)
    }

    /// Finish the upgrade scheduled as `task`.
    ///
    /// Returns `false` and changes nothing when `task` is not the in-flight
    /// upgrade (it was cancelled or superseded).
    pub fn complete_upgrade(&mut self, task: TaskId) -> bool {
        match self.pending.take() {
            Some(p) if p.task == task => {
                self.el.set_source(&p.src);
                self.el.remove_probe(p.probe);
                true
            }
            other => {
                self.pending = other;
                log::trace!("{:?} ignored stale upgrade {task:?}", self.id);
                false
            }
        }
    }

    /// Revert to the thumbnail source. No-op when `src` is absent, mirroring
    /// [`upgrade_source`](Self::upgrade_source).
    pub fn downgrade_source<V: Environment>(
        &mut self,
        stage: &mut Stage<V, E::Ancestor>,
        src: Option<&str>,
    ) {
        if src.is_none_or(str::is_empty) {
            return;
        }
        stage.settle();
        self.cancel_upgrade(stage);
        match &self.thumbnail {
            Some(thumb) => self.el.set_source(thumb),
            None => log::warn!("{:?} has no thumbnail source to revert to", self.id),
        }
    }

    fn cancel_upgrade<V: Environment>(&mut self, stage: &mut Stage<V, E::Ancestor>) {
        if let Some(p) = self.pending.take() {
            log::warn!("{:?} cancelled in-flight upgrade {:?}", self.id, p.task);
            stage.env_mut().cancel(p.task);
            self.el.remove_probe(p.probe);
        }
    }
}

impl<E: Element> Drop for Target<E> {
    fn drop(&mut self) {
        let Ok(mut shared) = self.link.try_borrow_mut() else {
            log::warn!("{:?} dropped while its stage was busy; clipping left as is", self.id);
            return;
        };
        if let Some(p) = self.pending.take() {
            self.el.remove_probe(p.probe);
            shared.abandoned.push(p.task);
        }
        shared.clips.enable(self.id, &mut self.el);
        log::trace!("{:?} dropped", self.id);
    }
}
