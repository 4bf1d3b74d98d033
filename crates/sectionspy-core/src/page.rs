//! Arena-based page model standing in for the host document.
//!
//! Nodes live in a flat `Vec` and link by index. Each element carries its
//! attributes and, once laid out, its bounds in document coordinates. The
//! layout is a plain vertical block stack: enough to drive scroll geometry
//! without a CSS engine.

use std::collections::HashMap;

use serde::Deserialize;

use sectionspy_types::error::{Result, SpyError};
use sectionspy_types::geometry::Rect;

use crate::observer::GeometrySource;
use crate::registry::RegionId;

/// Index into the [`Page`]'s node arena.
pub type NodeId = usize;

/// An element attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Tag and attributes of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    pub attributes: Vec<Attribute>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        }
    }

    /// Builder-style attribute setter. Replaces an existing value.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name,
                value: value.to_string(),
            }),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// The `id` attribute, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|v| !v.is_empty())
    }

    pub fn href(&self) -> Option<&str> {
        self.attr("href")
    }

    /// Whitespace-separated class list.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

/// A single node in the page tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub element: Element,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Layout box, if the node has been laid out.
    pub bounds: Option<Rect>,
}

/// The page: an element tree with layout boxes.
#[derive(Debug, Clone)]
pub struct Page {
    nodes: Vec<Node>,
    root: NodeId,
    width: i32,
    /// `id` attribute to node, attached nodes only. The first element to
    /// claim an id keeps it.
    ids: HashMap<String, NodeId>,
}

impl Page {
    /// An empty page whose root `<body>` spans `width` pixels.
    pub fn new(width: i32) -> Self {
        let body = Node {
            element: Element::new("body"),
            parent: None,
            children: Vec::new(),
            bounds: Some(Rect::new(0, 0, width, 0)),
        };
        Self {
            nodes: vec![body],
            root: 0,
            width,
            ids: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id).map(|n| &n.element)
    }

    /// Append `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Result<NodeId> {
        if parent >= self.nodes.len() {
            return Err(SpyError::Page(format!("no parent node {parent}")));
        }
        let id = self.nodes.len();
        if let Some(key) = element.id() {
            if self.is_attached(parent) && !self.ids.contains_key(key) {
                self.ids.insert(key.to_string(), id);
            }
        }
        self.nodes.push(Node {
            element,
            parent: Some(parent),
            children: Vec::new(),
            bounds: None,
        });
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Whether `id` is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.nodes.get(node).and_then(|n| n.parent);
        }
        false
    }

    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.bounds = Some(bounds);
        }
    }

    /// Attached nodes in document (pre-)order, root first.
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.nodes[id].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// The attached element that claimed `id` first. Once it is removed the
    /// id resolves to nothing, even if a later duplicate remains.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Detach the first element with the given id. Returns `false` when no
    /// such element is attached. The arena slot is kept so existing
    /// `NodeId`s stay valid, and the remaining boxes are not re-laid out.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let Some(node) = self.find_by_id(id) else {
            return false;
        };
        let Some(parent) = self.nodes[node].parent else {
            return false;
        };
        self.nodes[parent].children.retain(|&c| c != node);
        self.nodes[node].parent = None;

        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if let Some(key) = self.nodes[n].element.id() {
                if self.ids.get(key) == Some(&n) {
                    self.ids.remove(key);
                }
            }
            stack.extend_from_slice(&self.nodes[n].children);
        }
        log::debug!("Removed element #{id} from page");
        true
    }

    /// Bottom edge of the lowest attached box.
    pub fn content_height(&self) -> i32 {
        self.document_order()
            .into_iter()
            .filter_map(|n| self.nodes[n].bounds)
            .map(|b| b.bottom())
            .max()
            .unwrap_or(0)
    }

    /// Build and lay out a page from its description.
    pub fn from_spec(spec: &PageSpec) -> Result<Self> {
        if spec.width <= 0 {
            return Err(SpyError::Page(format!("page width {} must be positive", spec.width)));
        }
        let mut page = Page::new(spec.width);
        let root = page.root;
        let mut cursor: i32 = 0;
        for child in &spec.elements {
            let height = page.build_block(root, child, cursor)?;
            cursor = cursor.checked_add(height).ok_or_else(too_tall)?;
        }
        page.nodes[root].bounds = Some(Rect::new(0, 0, spec.width, cursor));
        Ok(page)
    }

    /// Parse a TOML page description.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let spec: PageSpec = toml::from_str(src)?;
        Self::from_spec(&spec)
    }

    /// Insert `spec` under `parent` at vertical offset `top`. Returns the
    /// height it occupies.
    fn build_block(&mut self, parent: NodeId, spec: &ElementSpec, top: i32) -> Result<i32> {
        if spec.tag.trim().is_empty() {
            return Err(SpyError::Page("element with empty tag".into()));
        }
        if let Some(h) = spec.height {
            if h < 0 {
                return Err(SpyError::Page(format!(
                    "<{}> has negative height {h}",
                    spec.tag
                )));
            }
        }
        let node = self.append(parent, spec.to_element())?;
        let mut cursor = top;
        for child in &spec.children {
            let height = self.build_block(node, child, cursor)?;
            cursor = cursor.checked_add(height).ok_or_else(too_tall)?;
        }
        if let Some(h) = spec.height {
            top.checked_add(h).ok_or_else(too_tall)?;
        }
        let height = spec.height.unwrap_or(cursor - top);
        self.set_bounds(node, Rect::new(0, top, self.width, height));
        Ok(height)
    }
}

fn too_tall() -> SpyError {
    SpyError::Page("page too tall".into())
}

impl GeometrySource for Page {
    fn bounds_of(&self, region: &RegionId) -> Option<Rect> {
        let node = self.find_by_id(region.as_str())?;
        self.nodes[node].bounds
    }
}

/// Serialized page description.
///
/// ```toml
/// width = 1280
///
/// [[elements]]
/// tag = "section"
/// id = "intro"
/// height = 900
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageSpec {
    pub width: i32,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

/// One element in a page description. Without an explicit `height` a block
/// is as tall as its stacked children.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// A `<section id=...>` block of the given height.
    pub fn section(id: &str, height: i32) -> Self {
        Self::new("section").id(id).height(height)
    }

    /// An `<a class=... href=...>` with no height of its own.
    pub fn link(class: &str, href: &str) -> Self {
        Self::new("a").class(class).href(href)
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    fn to_element(&self) -> Element {
        let mut el = Element::new(&self.tag);
        if let Some(id) = &self.id {
            el.set_attr("id", id);
        }
        if let Some(class) = &self.class {
            el.set_attr("class", class);
        }
        if let Some(href) = &self.href {
            el.set_attr("href", href);
        }
        el
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Page {
        let spec = PageSpec {
            width: 800,
            elements: vec![
                ElementSpec::new("nav")
                    .child(ElementSpec::link("navigation__link", "#intro"))
                    .child(ElementSpec::link("navigation__link", "#work")),
                ElementSpec::new("header").height(100),
                ElementSpec::section("intro", 500),
                ElementSpec::new("main")
                    .child(ElementSpec::section("work", 700))
                    .child(ElementSpec::new("div").height(50)),
            ],
        };
        Page::from_spec(&spec).unwrap()
    }

    #[test]
    fn element_attributes() {
        let el = Element::new("A")
            .with_attr("class", "navigation__link navigation__link--active")
            .with_attr("HREF", "#work");
        assert_eq!(el.tag, "a");
        assert_eq!(el.href(), Some("#work"));
        assert!(el.has_class("navigation__link"));
        assert!(el.has_class("navigation__link--active"));
        assert!(!el.has_class("navigation"));
    }

    #[test]
    fn empty_id_is_none() {
        let el = Element::new("section").with_attr("id", "");
        assert_eq!(el.id(), None);
    }

    #[test]
    fn blocks_stack_vertically() {
        let page = sample();
        assert_eq!(
            page.bounds_of(&RegionId::from("intro")),
            Some(Rect::new(0, 100, 800, 500))
        );
        assert_eq!(
            page.bounds_of(&RegionId::from("work")),
            Some(Rect::new(0, 600, 800, 700))
        );
        assert_eq!(page.content_height(), 1350);
    }

    #[test]
    fn zero_height_nav_takes_no_space() {
        let page = sample();
        let nav = page.node(page.root()).unwrap().children[0];
        assert_eq!(page.node(nav).unwrap().bounds, Some(Rect::new(0, 0, 800, 0)));
    }

    #[test]
    fn document_order_is_preorder() {
        let page = sample();
        let tags: Vec<&str> = page
            .document_order()
            .into_iter()
            .map(|n| page.element(n).unwrap().tag.as_str())
            .collect();
        assert_eq!(
            tags,
            ["body", "nav", "a", "a", "header", "section", "main", "section", "div"]
        );
    }

    #[test]
    fn remove_by_id_detaches_subtree() {
        let mut page = sample();
        assert!(page.remove_by_id("work"));
        assert_eq!(page.find_by_id("work"), None);
        assert_eq!(page.bounds_of(&RegionId::from("work")), None);
        assert!(!page.remove_by_id("work"));
    }

    #[test]
    fn removing_first_duplicate_does_not_fall_through() {
        let mut page = Page::from_spec(&PageSpec {
            width: 800,
            elements: vec![
                ElementSpec::section("dup", 100),
                ElementSpec::section("dup", 200),
            ],
        })
        .unwrap();
        let first = page.find_by_id("dup").unwrap();
        assert_eq!(page.node(first).unwrap().bounds, Some(Rect::new(0, 0, 800, 100)));
        assert!(page.remove_by_id("dup"));
        assert_eq!(page.find_by_id("dup"), None);
        assert_eq!(page.bounds_of(&RegionId::from("dup")), None);
    }

    #[test]
    fn removing_a_parent_unindexes_descendants() {
        let mut page = Page::new(800);
        let main = page.append(page.root(), Element::new("main").with_attr("id", "main")).unwrap();
        let inner = page.append(main, Element::new("section").with_attr("id", "inner")).unwrap();
        assert_eq!(page.find_by_id("inner"), Some(inner));
        assert!(page.remove_by_id("main"));
        assert_eq!(page.find_by_id("inner"), None);
        assert!(!page.is_attached(inner));

        // Appending under a detached node does not index it.
        page.append(main, Element::new("section").with_attr("id", "late")).unwrap();
        assert_eq!(page.find_by_id("late"), None);
    }

    #[test]
    fn from_toml_description() {
        let src = r##"
            width = 1024

            [[elements]]
            tag = "section"
            id = "intro"
            height = 900

            [[elements]]
            tag = "section"
            id = "contact"
            height = 400
        "##;
        let page = Page::from_toml_str(src).unwrap();
        assert_eq!(
            page.bounds_of(&RegionId::from("contact")),
            Some(Rect::new(0, 900, 1024, 400))
        );
    }

    #[test]
    fn negative_height_rejected() {
        let spec = PageSpec {
            width: 800,
            elements: vec![ElementSpec::section("bad", -1)],
        };
        assert!(matches!(Page::from_spec(&spec), Err(SpyError::Page(_))));
    }

    #[test]
    fn overflowing_height_rejected() {
        let spec = PageSpec {
            width: 800,
            elements: vec![
                ElementSpec::section("a", 2_000_000_000),
                ElementSpec::section("b", 2_000_000_000),
            ],
        };
        let err = Page::from_spec(&spec).unwrap_err();
        assert!(matches!(err, SpyError::Page(ref m) if m == "page too tall"));

        let nested = PageSpec {
            width: 800,
            elements: vec![
                ElementSpec::new("header").height(1_000_000_000),
                ElementSpec::new("main")
                    .child(ElementSpec::section("c", 1_000_000_000))
                    .child(ElementSpec::section("d", 1_000_000_000)),
            ],
        };
        assert!(matches!(Page::from_spec(&nested), Err(SpyError::Page(_))));
    }

    #[test]
    fn zero_width_rejected() {
        let spec = PageSpec::default();
        assert!(Page::from_spec(&spec).is_err());
    }

    #[test]
    fn append_to_missing_parent_fails() {
        let mut page = Page::new(100);
        assert!(page.append(42, Element::new("div")).is_err());
    }
}
