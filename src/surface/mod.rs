// src/surface/mod.rs

//! The hypertext display surface.
//!
//! `DisplaySurface` sits between the host toolkit's input events and the
//! formatter. It hit-tests the pointer against the display tree, tracks which
//! link is hovered and which one is pressed, runs drag selection, and drives
//! the cursor shape, the status line and command dispatch.
//!
//! The surface never owns anything in the display tree. It keeps `LinkId`
//! handles only, and drops them unread whenever the formatter reports a new
//! tree version.

pub mod event;


pub use event::{MouseButtons, SurfaceEvent};

use crate::chrome::{self, CursorShape, HostChrome};
use crate::command::{CommandDispatcher, CommandOrigin};
use crate::config::LinkSettings;
use crate::display::{Formatter, LinkId, LinkMode, TreeVersion};
use crate::geometry::{Point, Rect};
use log::{debug, trace, warn};

/// Collaborators and settings for handling one event.
pub struct SurfaceContext<'a> {
    pub formatter: &'a mut dyn Formatter,
    pub chrome: &'a mut dyn HostChrome,
    pub dispatcher: &'a mut dyn CommandDispatcher,
    pub settings: LinkSettings,
}

impl<'a> SurfaceContext<'a> {
    pub fn new(
        formatter: &'a mut dyn Formatter,
        chrome: &'a mut dyn HostChrome,
        dispatcher: &'a mut dyn CommandDispatcher,
        settings: LinkSettings,
    ) -> Self {
        Self {
            formatter,
            chrome,
            dispatcher,
            settings,
        }
    }

    fn set_link_mode(&mut self, link: LinkId, mode: LinkMode) {
        trace!("link {:?} -> {:?}", link, mode);
        self.formatter.set_link_mode(link, mode);
    }

    fn is_clickable(&self, link: Option<LinkId>) -> bool {
        link.and_then(|l| self.formatter.link(l))
            .map_or(false, |l| l.is_clickable_link())
    }
}

/// Hover, click and selection state of the surface.
///
/// `clicked_link` is set only while the button that pressed it is down, and
/// never while `selecting` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackingState {
    /// Link under the pointer.
    pub hover_link: Option<LinkId>,
    /// Link that received the press, pending release.
    pub clicked_link: Option<LinkId>,
    /// A left-button drag selection is in progress.
    pub selecting: bool,
    /// Where the drag started. Only meaningful while `selecting`.
    pub selection_origin: Point,
}

#[derive(Debug)]
pub struct DisplaySurface {
    tracking: TrackingState,
    seen_version: Option<TreeVersion>,
    /// Non-clickable link last hit and untracked; hitting it again is a no-op.
    untracked_link: Option<LinkId>,
    /// Whether the status line may hold a message the surface put there.
    status_shown: bool,
    /// Whether the cursor may differ from the default shape.
    cursor_set: bool,
}

impl Default for DisplaySurface {
    fn default() -> Self {
        // Chrome state is unknown until the surface first resets it.
        Self {
            tracking: TrackingState::default(),
            seen_version: None,
            untracked_link: None,
            status_shown: true,
            cursor_set: true,
        }
    }
}

impl DisplaySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracking(&self) -> &TrackingState {
        &self.tracking
    }

    /// Single entry point for host events.
    pub fn handle_event(&mut self, ctx: &mut SurfaceContext<'_>, event: &SurfaceEvent) {
        match *event {
            SurfaceEvent::Repaint { area } => self.repaint(ctx, &area),
            SurfaceEvent::MouseMove { pos, buttons } => {
                self.mouse_move(ctx, pos, buttons.left_down())
            }
            SurfaceEvent::MousePress { pos, buttons } => {
                self.mouse_press(ctx, pos, buttons.left_down())
            }
            SurfaceEvent::MouseRelease { .. } => self.mouse_release(ctx),
            SurfaceEvent::MouseLeave => self.mouse_leave(ctx),
            SurfaceEvent::RefreshLinks { pos } => self.update_link_tracking(ctx, pos),
            SurfaceEvent::TreeRebuilt => self.tree_rebuilt(ctx),
        }
    }

    /// Forwards a damaged area to the formatter, which paints it synchronously.
    pub fn repaint(&mut self, ctx: &mut SurfaceContext<'_>, area: &Rect) {
        self.sync_tree(ctx);
        trace!("repaint {:?}", area);
        ctx.formatter.draw(area, false, None);
    }

    pub fn mouse_move(&mut self, ctx: &mut SurfaceContext<'_>, pos: Point, left_down: bool) {
        self.sync_tree(ctx);

        // Dragging a selection suppresses link tracking.
        if left_down && self.tracking.selecting {
            let start = ctx
                .formatter
                .find_text_offset_by_position(self.tracking.selection_origin);
            let end = ctx.formatter.find_text_offset_by_position(pos);
            ctx.formatter.set_selection_range(start, end);
            return;
        }

        self.update_link_tracking(ctx, Some(pos));
    }

    /// The pointer left the surface; nothing can be hovered any more.
    pub fn mouse_leave(&mut self, ctx: &mut SurfaceContext<'_>) {
        self.sync_tree(ctx);
        self.invalidate_link_tracking(ctx);
    }

    pub fn mouse_press(&mut self, ctx: &mut SurfaceContext<'_>, pos: Point, left_down: bool) {
        self.sync_tree(ctx);

        let Some(hover) = self.tracking.hover_link else {
            if left_down && !self.tracking.selecting && self.tracking.clicked_link.is_none() {
                self.tracking.selecting = true;
                self.tracking.selection_origin = pos;
                // Collapse any existing selection to the end of the text.
                let max = ctx.formatter.max_text_offset();
                ctx.formatter.set_selection_range(max, max);
                debug!("selection started at {:?}", pos);
            }
            return;
        };

        if self.tracking.selecting {
            // Release of the drag was lost; wait for the next one.
            return;
        }

        if ctx.settings.links_enabled && ctx.is_clickable(Some(hover)) {
            ctx.set_link_mode(hover, LinkMode::Clicked);
            self.tracking.clicked_link = Some(hover);
            debug!("click-tracking link {:?}", hover);
        }
    }

    pub fn mouse_release(&mut self, ctx: &mut SurfaceContext<'_>) {
        self.sync_tree(ctx);

        if self.tracking.selecting {
            self.tracking.selecting = false;
            debug!("selection ended");
            return;
        }

        let Some(clicked) = self.tracking.clicked_link.take() else {
            return;
        };

        if self.tracking.hover_link == Some(clicked) {
            // Released over the link it was pressed on: follow it.
            if let Some(link) = ctx.formatter.link(clicked) {
                let (href, append, auto_enter) = (link.href.clone(), link.append, !link.no_enter);
                debug!("following link {:?}: '{}'", clicked, href);
                ctx.dispatcher
                    .process_command(&href, append, auto_enter, CommandOrigin::Link);
            }
            if ctx.settings.highlight_links {
                ctx.set_link_mode(clicked, LinkMode::Hover);
            }
        } else if let Some(hover) = self.tracking.hover_link {
            ctx.set_link_mode(hover, LinkMode::Hover);
        }
    }

    /// Hit-tests `pos` (or the host's current pointer position when `None`)
    /// and updates hover tracking, the cursor shape and the status line.
    pub fn update_link_tracking(&mut self, ctx: &mut SurfaceContext<'_>, pos: Option<Point>) {
        self.sync_tree(ctx);

        let Some(pos) = pos.or_else(|| ctx.chrome.pointer_position()) else {
            trace!("no pointer position to track");
            return;
        };

        let Some(object) = ctx.formatter.find_display_object_at(pos, true) else {
            self.untracked_link = None;
            if let Some(prev) = self.tracking.hover_link.take() {
                ctx.set_link_mode(prev, LinkMode::None);
                self.reset_cursor(ctx);
                self.clear_status(ctx);
                debug!("left link {:?}", prev);
            }
            return;
        };
        trace!("pointer {:?} over {:?}", pos, object);

        if ctx.settings.links_enabled {
            let link = ctx.formatter.link_at(object, pos);
            if link == self.tracking.hover_link {
                return;
            }
            if link.is_some() && link == self.untracked_link {
                return;
            }
            self.untracked_link = None;
            if let Some(prev) = self.tracking.hover_link {
                ctx.set_link_mode(prev, LinkMode::None);
            }
            self.tracking.hover_link = link;
            debug!("hover link now {:?}", link);

            let clickable = ctx.is_clickable(link);
            if let (Some(link), true) = (link, clickable) {
                self.set_cursor(ctx, CursorShape::PointingHand);
                // A pressed link keeps its color; don't light up a second one.
                if ctx.settings.highlight_links && self.tracking.clicked_link.is_none() {
                    ctx.set_link_mode(link, LinkMode::Hover);
                }
            }

            if ctx.settings.show_alt_text {
                if let Some(alt) = ctx
                    .formatter
                    .alt_text(object)
                    .filter(|t| !t.is_empty())
                    .map(str::to_owned)
                {
                    self.show_status(ctx, &alt);
                    return;
                }
            }

            if clickable {
                if let Some(href) = link
                    .and_then(|l| ctx.formatter.link(l))
                    .map(|target| target.href.clone())
                {
                    self.show_status(ctx, &href);
                    return;
                }
            }
        } else {
            self.untracked_link = None;
        }

        // Nothing we know how to describe.
        if self.status_shown {
            self.clear_status(ctx);
        }
        if self.cursor_set {
            self.reset_cursor(ctx);
        }
        if let Some(prev) = self.tracking.hover_link.take() {
            ctx.set_link_mode(prev, LinkMode::None);
            if ctx.settings.links_enabled {
                self.untracked_link = Some(prev);
            }
        }
    }

    /// Forgets the hovered and clicked links, returning both to their normal
    /// look, and restores the cursor and status line.
    pub fn invalidate_link_tracking(&mut self, ctx: &mut SurfaceContext<'_>) {
        if let Some(clicked) = self.tracking.clicked_link.take() {
            ctx.set_link_mode(clicked, LinkMode::None);
        }
        if let Some(hover) = self.tracking.hover_link.take() {
            ctx.set_link_mode(hover, LinkMode::None);
        }
        self.untracked_link = None;
        self.reset_cursor(ctx);
        self.clear_status(ctx);
    }

    /// The formatter announced a rebuild. Any gesture in progress is
    /// cancelled. Handles are only returned to their normal look if the tree
    /// version shows they still belong to the current tree.
    pub fn tree_rebuilt(&mut self, ctx: &mut SurfaceContext<'_>) {
        let current = ctx.formatter.tree_version();
        if self.seen_version == Some(current) {
            self.invalidate_link_tracking(ctx);
            self.tracking.selecting = false;
        } else {
            self.drop_stale_tracking(ctx);
        }
        self.seen_version = Some(current);
    }

    fn sync_tree(&mut self, ctx: &mut SurfaceContext<'_>) {
        let current = ctx.formatter.tree_version();
        match self.seen_version {
            Some(seen) if seen != current => {
                warn!(
                    "display tree changed ({:?} -> {:?}); dropping link tracking",
                    seen, current
                );
                self.drop_stale_tracking(ctx);
            }
            _ => {}
        }
        self.seen_version = Some(current);
    }

    /// Like `invalidate_link_tracking`, but never touches the old handles.
    fn drop_stale_tracking(&mut self, ctx: &mut SurfaceContext<'_>) {
        let had_tracking = self.tracking.hover_link.is_some()
            || self.tracking.clicked_link.is_some()
            || self.tracking.selecting;
        self.tracking = TrackingState::default();
        self.untracked_link = None;
        if had_tracking {
            debug!("tracking reset after tree rebuild");
        }
        self.reset_cursor(ctx);
        self.clear_status(ctx);
    }

    fn set_cursor(&mut self, ctx: &mut SurfaceContext<'_>, shape: CursorShape) {
        ctx.chrome.set_cursor(shape);
        self.cursor_set = true;
    }

    fn reset_cursor(&mut self, ctx: &mut SurfaceContext<'_>) {
        ctx.chrome.reset_cursor();
        self.cursor_set = false;
    }

    fn show_status(&mut self, ctx: &mut SurfaceContext<'_>, text: &str) {
        chrome::show_status(ctx.chrome, text);
        self.status_shown = true;
    }

    fn clear_status(&mut self, ctx: &mut SurfaceContext<'_>) {
        chrome::clear_status(ctx.chrome);
        self.status_shown = false;
    }
}
