//! Headless in-memory formatter implementation.
//!
//! Holds a flat display list of rectangular text runs laid out in reading
//! order. It answers the same queries a real layout engine would and keeps
//! logs of every paint, selection and link-mode request so callers can
//! inspect what the surface asked for.

use crate::display::formatter::{
    DisplayLink, Formatter, LinkId, LinkMode, ObjectId, TextOffset, TreeVersion,
};
use crate::geometry::{Point, Rect};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A link declared by a page, referenced from items by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub id: u32,
    #[serde(flatten)]
    pub link: DisplayLink,
}

/// One display object of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub rect: Rect,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: Option<u32>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A laid-out page: the input to one build of the display tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSpec {
    pub links: Vec<LinkSpec>,
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Clone)]
struct DisplayItem {
    rect: Rect,
    text_start: TextOffset,
    text_len: TextOffset,
    link: Option<LinkId>,
    alt: Option<String>,
}

pub struct HeadlessFormatter {
    items: Vec<DisplayItem>,
    links: HashMap<LinkId, DisplayLink>,
    link_modes: HashMap<LinkId, LinkMode>,
    text_max: TextOffset,
    version: TreeVersion,
    selection: (TextOffset, TextOffset),
    selection_requests: Vec<(TextOffset, TextOffset)>,
    paints: Vec<(Rect, bool)>,
    mode_changes: Vec<(LinkId, LinkMode)>,
}

impl HeadlessFormatter {
    pub fn new(page: &PageSpec) -> Self {
        info!(
            "HeadlessFormatter::new() with {} items, {} links",
            page.items.len(),
            page.links.len()
        );
        let mut formatter = Self {
            items: Vec::new(),
            links: HashMap::new(),
            link_modes: HashMap::new(),
            text_max: 0,
            version: TreeVersion::default(),
            selection: (0, 0),
            selection_requests: Vec::new(),
            paints: Vec::new(),
            mode_changes: Vec::new(),
        };
        formatter.load(page);
        formatter
    }

    /// Replaces the display tree (a reflow). Every handle handed out before
    /// this call is stale afterwards.
    pub fn rebuild(&mut self, page: &PageSpec) {
        self.load(page);
        self.version = self.version.next();
        debug!("HeadlessFormatter: rebuilt tree, now {:?}", self.version);
    }

    fn load(&mut self, page: &PageSpec) {
        self.links = page
            .links
            .iter()
            .map(|spec| (LinkId(spec.id), spec.link.clone()))
            .collect();
        self.link_modes.clear();

        let mut offset: TextOffset = 0;
        self.items = page
            .items
            .iter()
            .map(|spec| {
                let len = spec.text.chars().count() as TextOffset;
                let item = DisplayItem {
                    rect: spec.rect,
                    text_start: offset,
                    text_len: len,
                    link: spec.link.map(LinkId),
                    alt: spec.alt.clone(),
                };
                offset += len;
                item
            })
            .collect();
        self.text_max = offset;
        self.selection = (offset, offset);
    }

    /// Normalized active selection.
    pub fn selection(&self) -> (TextOffset, TextOffset) {
        self.selection
    }

    /// Every `set_selection_range` call, with arguments as passed.
    pub fn selection_requests(&self) -> &[(TextOffset, TextOffset)] {
        &self.selection_requests
    }

    /// Every `draw` call as `(area, background_only)`.
    pub fn paints(&self) -> &[(Rect, bool)] {
        &self.paints
    }

    pub fn mode_changes(&self) -> &[(LinkId, LinkMode)] {
        &self.mode_changes
    }

    pub fn link_mode(&self, link: LinkId) -> LinkMode {
        self.link_modes.get(&link).copied().unwrap_or_default()
    }

    /// Area covered by every item of `link`.
    pub fn link_bounds(&self, link: LinkId) -> Rect {
        self.items
            .iter()
            .filter(|item| item.link == Some(link))
            .fold(Rect::default(), |acc, item| acc.union(&item.rect))
    }

    fn item(&self, object: ObjectId) -> Option<&DisplayItem> {
        self.items.get(object.0 as usize)
    }

    /// Character column within `item` for a horizontal position, assuming
    /// fixed-width glyphs spread across the item's rectangle.
    fn column_in(item: &DisplayItem, x: i32) -> TextOffset {
        let width = item.rect.width();
        if width <= 0 || item.text_len == 0 {
            return 0;
        }
        let rel = (x - item.rect.left).clamp(0, width) as TextOffset;
        (rel * item.text_len / width as TextOffset).min(item.text_len)
    }
}

impl Formatter for HeadlessFormatter {
    fn draw(&mut self, area: &Rect, background_only: bool, clip: Option<ObjectId>) {
        let visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(idx, item)| {
                clip.map_or(true, |c| c.0 as usize == *idx) && item.rect.intersects(area)
            })
            .count();
        trace!(
            "HeadlessFormatter: draw {:?} background_only={} ({} items)",
            area,
            background_only,
            visible
        );
        self.paints.push((*area, background_only));
    }

    fn find_text_offset_by_position(&self, pos: Point) -> TextOffset {
        for item in &self.items {
            if pos.y < item.rect.top {
                return item.text_start;
            }
            if item.rect.spans_row(pos.y) {
                if pos.x < item.rect.left {
                    return item.text_start;
                }
                if pos.x < item.rect.right {
                    return item.text_start + Self::column_in(item, pos.x);
                }
            }
        }
        self.text_max
    }

    fn set_selection_range(&mut self, start: TextOffset, end: TextOffset) {
        self.selection_requests.push((start, end));
        let start = start.min(self.text_max);
        let end = end.min(self.text_max);
        self.selection = (start.min(end), start.max(end));
        trace!("HeadlessFormatter: selection now {:?}", self.selection);
    }

    fn max_text_offset(&self) -> TextOffset {
        self.text_max
    }

    fn find_display_object_at(&self, pos: Point, nearest: bool) -> Option<ObjectId> {
        if let Some(idx) = self.items.iter().position(|item| item.rect.contains(pos)) {
            return Some(ObjectId(idx as u32));
        }
        if !nearest {
            return None;
        }
        // Padding between objects resolves to the closest object on the same line.
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.rect.spans_row(pos.y))
            .min_by_key(|(_, item)| item.rect.horizontal_distance(pos.x))
            .map(|(idx, _)| ObjectId(idx as u32))
    }

    fn link_at(&self, object: ObjectId, pos: Point) -> Option<LinkId> {
        let item = self.item(object)?;
        if item.rect.contains(pos) {
            item.link
        } else {
            None
        }
    }

    fn alt_text(&self, object: ObjectId) -> Option<&str> {
        self.item(object)?.alt.as_deref()
    }

    fn link(&self, link: LinkId) -> Option<&DisplayLink> {
        self.links.get(&link)
    }

    fn set_link_mode(&mut self, link: LinkId, mode: LinkMode) {
        let bounds = self.link_bounds(link);
        trace!("HeadlessFormatter: link {:?} -> {:?}, redraw {:?}", link, mode, bounds);
        self.link_modes.insert(link, mode);
        self.mode_changes.push((link, mode));
        self.paints.push((bounds, false));
    }

    fn tree_version(&self) -> TreeVersion {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn page() -> PageSpec {
        PageSpec {
            links: vec![LinkSpec {
                id: 7,
                link: DisplayLink::new("north"),
            }],
            items: vec![
                ItemSpec {
                    rect: Rect::new(0, 0, 40, 10),
                    text: "You ".to_string(),
                    link: None,
                    alt: None,
                },
                ItemSpec {
                    rect: Rect::new(50, 0, 100, 10),
                    text: "north".to_string(),
                    link: Some(7),
                    alt: None,
                },
                ItemSpec {
                    rect: Rect::new(0, 10, 20, 20),
                    text: "ok".to_string(),
                    link: None,
                    alt: Some("a lamp".to_string()),
                },
            ],
        }
    }

    #[test]
    fn exact_and_nearest_hit_tests() {
        let fmt = HeadlessFormatter::new(&page());
        assert_eq!(fmt.find_display_object_at(Point::new(60, 5), false), Some(ObjectId(1)));
        // In the gap between the two runs of the first line.
        assert_eq!(fmt.find_display_object_at(Point::new(44, 5), false), None);
        assert_eq!(fmt.find_display_object_at(Point::new(44, 5), true), Some(ObjectId(0)));
        assert_eq!(fmt.find_display_object_at(Point::new(47, 5), true), Some(ObjectId(1)));
        // Below every line there is nothing, even in nearest mode.
        assert_eq!(fmt.find_display_object_at(Point::new(5, 50), true), None);
    }

    #[test]
    fn link_at_requires_exact_point() {
        let fmt = HeadlessFormatter::new(&page());
        assert_eq!(fmt.link_at(ObjectId(1), Point::new(60, 5)), Some(LinkId(7)));
        assert_eq!(fmt.link_at(ObjectId(1), Point::new(47, 5)), None);
        assert_eq!(fmt.link_at(ObjectId(0), Point::new(5, 5)), None);
        assert_eq!(fmt.alt_text(ObjectId(2)), Some("a lamp"));
    }

    #[test]
    fn text_offsets_follow_reading_order() {
        let fmt = HeadlessFormatter::new(&page());
        assert_eq!(fmt.max_text_offset(), 11);
        assert_eq!(fmt.find_text_offset_by_position(Point::new(0, 0)), 0);
        assert_eq!(fmt.find_text_offset_by_position(Point::new(45, 5)), 4);
        assert_eq!(fmt.find_text_offset_by_position(Point::new(60, 5)), 5);
        assert_eq!(fmt.find_text_offset_by_position(Point::new(500, 500)), 11);
    }

    #[test]
    fn selection_is_normalized_but_requests_are_logged_raw() {
        let mut fmt = HeadlessFormatter::new(&page());
        assert_eq!(fmt.selection(), (11, 11));
        fmt.set_selection_range(8, 2);
        assert_eq!(fmt.selection(), (2, 8));
        assert_eq!(fmt.selection_requests(), &[(8, 2)]);
    }

    #[test]
    fn rebuild_bumps_version_and_resets_modes() {
        let mut fmt = HeadlessFormatter::new(&page());
        let before = fmt.tree_version();
        fmt.set_link_mode(LinkId(7), LinkMode::Hover);
        assert_eq!(fmt.link_mode(LinkId(7)), LinkMode::Hover);
        fmt.rebuild(&page());
        assert_ne!(fmt.tree_version(), before);
        assert_eq!(fmt.link_mode(LinkId(7)), LinkMode::None);
    }
}
