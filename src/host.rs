//! Host seams: the element being zoomed and the environment around it.
//!
//! A browser binding implements [`Element`] over a DOM node and
//! [`Environment`] over the window and its timers. Tests implement both over
//! plain structs.

use core::fmt;
use core::hash::Hash;
use core::time::Duration;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::clipping::ClipRegistry;
use crate::geometry::{Rect, Vec2};
use crate::style::{StyleMap, TransformProperty};

/// Handle for a deferred task scheduled through an [`Environment`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Identity of a [`Target`](crate::Target) within one [`Stage`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// The element under zoom management.
pub trait Element {
    /// Identity of an ancestor node.
    type Ancestor: Clone + Eq + Hash + fmt::Debug;
    /// Hidden copy of the element used to pre-decode a source.
    type Probe;

    /// Current bounding rectangle in viewport coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Flush pending layout so the next style change is observed as a
    /// discrete change.
    fn force_layout(&mut self);

    /// Inline value of a style property, empty when unset.
    fn style_property(&self, name: &str) -> String;

    fn set_style_property(&mut self, name: &str, value: &str);

    /// Apply every property in `style`, returning the previous inline values
    /// of the same properties.
    fn apply_style(&mut self, style: &StyleMap) -> StyleMap {
        let mut previous = StyleMap::new();
        for (name, value) in style.iter() {
            previous.set(name, self.style_property(name));
            self.set_style_property(name, value);
        }
        previous
    }

    /// The `src` attribute, if any.
    fn source(&self) -> Option<String>;

    fn set_source(&mut self, src: &str);

    /// Insert a hidden, off-screen shallow copy of the element carrying `src`
    /// next to it so the host starts loading and decoding `src`.
    fn insert_probe(&mut self, src: &str) -> Self::Probe;

    fn remove_probe(&mut self, probe: Self::Probe);

    /// All ancestors, nearest first.
    fn ancestors(&self) -> Vec<Self::Ancestor>;

    /// Whether `ancestor` currently clips its overflow.
    fn clips(&self, ancestor: &Self::Ancestor) -> bool;

    /// Inline overflow value of `ancestor`, empty when unset.
    fn ancestor_overflow(&self, ancestor: &Self::Ancestor) -> String;

    fn set_ancestor_overflow(&mut self, ancestor: &Self::Ancestor, value: &str);
}

/// The window around the element.
pub trait Environment {
    /// Center of the viewport; must reflect the live viewport size.
    fn viewport_center(&self) -> Vec2;

    /// Name of the transform property this host understands.
    fn transform_property(&self) -> TransformProperty {
        TransformProperty::Standard
    }

    /// Schedule a deferred task. The host later reports it back through
    /// [`Target::complete_upgrade`](crate::Target::complete_upgrade).
    fn schedule(&mut self, delay: Duration) -> TaskId;

    /// Cancel a task scheduled with [`schedule`](Self::schedule). Cancelling
    /// a task that already fired is a no-op.
    fn cancel(&mut self, task: TaskId);
}

/// State a [`Target`](crate::Target) shares with its stage, so a dropped
/// target can still release what it holds.
#[derive(Debug)]
pub(crate) struct Shared<A> {
    pub(crate) clips: ClipRegistry<A>,
    /// Upgrade tasks of dropped targets, not yet cancelled in the host.
    pub(crate) abandoned: Vec<TaskId>,
}

pub(crate) type StageLink<A> = Rc<RefCell<Shared<A>>>;

/// Shared context for every target in one document.
#[derive(Debug)]
pub struct Stage<V, A> {
    env: V,
    shared: StageLink<A>,
    next_target: u64,
}

impl<V: Environment, A: Clone + Eq + Hash + fmt::Debug> Stage<V, A> {
    pub fn new(env: V) -> Self {
        Self {
            env,
            shared: Rc::new(RefCell::new(Shared {
                clips: ClipRegistry::new(),
                abandoned: Vec::new(),
            })),
            next_target: 0,
        }
    }

    pub fn env(&self) -> &V {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut V {
        &mut self.env
    }

    pub fn clips(&self) -> Ref<'_, ClipRegistry<A>> {
        Ref::map(self.shared.borrow(), |s| &s.clips)
    }

    /// Cancel the upgrade tasks of targets dropped since the last call.
    ///
    /// Every target operation that takes the stage mutably settles first;
    /// hosts that drop targets outside of those calls can settle directly.
    pub fn settle(&mut self) {
        let abandoned = core::mem::take(&mut self.shared.borrow_mut().abandoned);
        for task in abandoned {
            log::debug!("cancelling {task:?} of a dropped target");
            self.env.cancel(task);
        }
    }

    pub(crate) fn link(&self) -> StageLink<A> {
        Rc::clone(&self.shared)
    }

    pub(crate) fn allocate_target(&mut self) -> TargetId {
        let id = TargetId(self.next_target);
        self.next_target += 1;
        id
    }
}
