//! UI state machines for the chat drawer (mobile) and the filter panel
//! (desktop).

pub const MIN_DRAWER_HEIGHT: f64 = 50.0;
/// Largest drawer height as a fraction of the viewport.
pub const MAX_DRAWER_FRACTION: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatDrawerMode {
    Closed,
    #[default]
    Minimized,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct DragStart {
    pointer_y: f64,
    height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChatDrawerState {
    mode: ChatDrawerMode,
    custom_height: Option<f64>,
    drag: Option<DragStart>,
}

impl ChatDrawerState {
    pub fn closed() -> Self {
        Self {
            mode: ChatDrawerMode::Closed,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> ChatDrawerMode {
        self.mode
    }

    /// Height set by dragging the handle, in pixels.
    pub fn custom_height(&self) -> Option<f64> {
        self.custom_height
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Handle tap: closed -> minimized -> open -> minimized -> open ...
    pub fn toggle(&mut self) {
        self.custom_height = None;
        self.mode = match self.mode {
            ChatDrawerMode::Closed => ChatDrawerMode::Minimized,
            ChatDrawerMode::Minimized => ChatDrawerMode::Open,
            ChatDrawerMode::Open => ChatDrawerMode::Minimized,
        };
    }

    pub fn close(&mut self) {
        self.mode = ChatDrawerMode::Closed;
        self.custom_height = None;
        self.drag = None;
    }

    /// Header button: reopens a closed drawer as minimized, closes otherwise.
    pub fn header_button(&mut self) {
        match self.mode {
            ChatDrawerMode::Closed => self.mode = ChatDrawerMode::Minimized,
            ChatDrawerMode::Minimized | ChatDrawerMode::Open => self.close(),
        }
    }

    /// Press on the drag handle. A closed drawer only pops up minimized.
    pub fn begin_drag(&mut self, pointer_y: f64, current_height: f64) {
        if self.mode == ChatDrawerMode::Closed {
            self.mode = ChatDrawerMode::Minimized;
            return;
        }
        self.drag = Some(DragStart {
            pointer_y,
            height: current_height,
        });
    }

    /// Pointer moved while dragging. Dragging up grows the drawer; the height
    /// stays within `[MIN_DRAWER_HEIGHT, MAX_DRAWER_FRACTION * viewport]`.
    pub fn drag_to(&mut self, pointer_y: f64, viewport_height: f64) {
        let Some(start) = self.drag else {
            return;
        };
        let height = start.height + (start.pointer_y - pointer_y);
        let max_height = viewport_height * MAX_DRAWER_FRACTION;
        self.custom_height = Some(height.min(max_height).max(MIN_DRAWER_HEIGHT));
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPanelMode {
    Collapsed,
    Peeking,
    Expanded,
}

/// Desktop filter column: collapsed to a strip, peeking on hover, or
/// expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterPanelState {
    expanded: bool,
    peeking: bool,
}

impl FilterPanelState {
    pub fn mode(&self) -> FilterPanelMode {
        match (self.expanded, self.peeking) {
            (true, _) => FilterPanelMode::Expanded,
            (false, true) => FilterPanelMode::Peeking,
            (false, false) => FilterPanelMode::Collapsed,
        }
    }

    pub fn hover_enter(&mut self) {
        if !self.expanded {
            self.peeking = true;
        }
    }

    pub fn hover_leave(&mut self) {
        self.peeking = false;
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
        self.peeking = false;
    }

    pub fn expand(&mut self) {
        self.expanded = true;
        self.peeking = false;
    }
}
