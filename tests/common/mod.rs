//! In-memory host for driving targets without a browser.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use zenzoom::*;

/// One ancestor node: whether the stylesheet clips it, and its inline overflow.
#[derive(Clone, Debug, Default)]
pub struct Node {
    pub sheet_hidden: bool,
    pub inline_overflow: String,
}

/// Ancestor nodes shared by every element in a document.
#[derive(Clone, Debug, Default)]
pub struct Dom(pub Rc<RefCell<HashMap<u32, Node>>>);

impl Dom {
    pub fn add(&self, id: u32, sheet_hidden: bool, inline_overflow: &str) {
        self.0.borrow_mut().insert(
            id,
            Node {
                sheet_hidden,
                inline_overflow: inline_overflow.to_owned(),
            },
        );
    }

    pub fn overflow(&self, id: u32) -> String {
        self.0.borrow()[&id].inline_overflow.clone()
    }

    pub fn clipped(&self, id: u32) -> bool {
        let nodes = self.0.borrow();
        let node = &nodes[&id];
        if node.inline_overflow.is_empty() {
            node.sheet_hidden
        } else {
            node.inline_overflow == "hidden"
        }
    }
}

#[derive(Debug)]
pub struct FakeElement {
    pub rect: Rect,
    pub styles: HashMap<String, String>,
    pub src: Option<String>,
    pub layout_flushes: usize,
    pub probes: Vec<(u32, String)>,
    pub next_probe: u32,
    pub ancestors: Vec<u32>,
    pub dom: Dom,
}

impl FakeElement {
    pub fn new(rect: Rect, src: Option<&str>, dom: &Dom, ancestors: &[u32]) -> Self {
        Self {
            rect,
            styles: HashMap::new(),
            src: src.map(str::to_owned),
            layout_flushes: 0,
            probes: Vec::new(),
            next_probe: 0,
            ancestors: ancestors.to_vec(),
            dom: dom.clone(),
        }
    }

    pub fn style(&self, name: &str) -> &str {
        self.styles.get(name).map_or("", String::as_str)
    }
}

impl Element for FakeElement {
    type Ancestor = u32;
    type Probe = u32;

    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn force_layout(&mut self) {
        self.layout_flushes += 1;
    }

    fn style_property(&self, name: &str) -> String {
        self.style(name).to_owned()
    }

    fn set_style_property(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.styles.remove(name);
        } else {
            self.styles.insert(name.to_owned(), value.to_owned());
        }
    }

    fn source(&self) -> Option<String> {
        self.src.clone()
    }

    fn set_source(&mut self, src: &str) {
        self.src = Some(src.to_owned());
    }

    fn insert_probe(&mut self, src: &str) -> u32 {
        let id = self.next_probe;
        self.next_probe += 1;
        self.probes.push((id, src.to_owned()));
        id
    }

    fn remove_probe(&mut self, probe: u32) {
        self.probes.retain(|(id, _)| *id != probe);
    }

    fn ancestors(&self) -> Vec<u32> {
        self.ancestors.clone()
    }

    fn clips(&self, ancestor: &u32) -> bool {
        self.dom.clipped(*ancestor)
    }

    fn ancestor_overflow(&self, ancestor: &u32) -> String {
        self.dom.overflow(*ancestor)
    }

    fn set_ancestor_overflow(&mut self, ancestor: &u32, value: &str) {
        if let Some(node) = self.dom.0.borrow_mut().get_mut(ancestor) {
            node.inline_overflow = value.to_owned();
        }
    }
}

#[derive(Debug)]
pub struct FakeEnv {
    pub center: Vec2,
    pub property: TransformProperty,
    pub next_task: u64,
    pub scheduled: Vec<(TaskId, Duration)>,
    pub cancelled: Vec<TaskId>,
}

impl FakeEnv {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            property: TransformProperty::Standard,
            next_task: 1,
            scheduled: Vec::new(),
            cancelled: Vec::new(),
        }
    }
}

impl Environment for FakeEnv {
    fn viewport_center(&self) -> Vec2 {
        self.center
    }

    fn transform_property(&self) -> TransformProperty {
        self.property
    }

    fn schedule(&mut self, delay: Duration) -> TaskId {
        let id = TaskId(self.next_task);
        self.next_task += 1;
        self.scheduled.push((id, delay));
        id
    }

    fn cancel(&mut self, task: TaskId) {
        self.cancelled.push(task);
    }
}

pub type FakeStage = Stage<FakeEnv, u32>;

/// 1000×600 viewport.
pub fn stage() -> FakeStage {
    Stage::new(FakeEnv::new(Vec2::new(500.0, 300.0)))
}

/// The reference element: 200×100 at (100, 100).
pub fn reference_rect() -> Rect {
    Rect::new(100.0, 100.0, 200.0, 100.0)
}
