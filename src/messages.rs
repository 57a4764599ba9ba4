// src/messages.rs
//
// The events that can occur in the editor, and the side effects the reducer
// asks the shell to perform afterwards.
//
use crate::catalog::Catalog;
use crate::models::{EdgeChange, NodeChange, Position};

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Drag & drop on the canvas element.  `screen` is relative to the
    // element's top-left corner; the reducer hit-tests against the node
    // collection and hands the event to the topmost node or to the canvas.
    DragOver {
        screen: Position,
        has_payload: bool, // transfer advertises our mime type
    },
    DragLeaveCanvas,
    Drop {
        screen: Position,
        data: Option<String>,
    },

    // Collection changes, applied as given
    NodesChanged(Vec<NodeChange>),
    EdgesChanged(Vec<EdgeChange>),
    DeleteTool {
        node_id: String,
        tool_id: String,
    },

    // Pointer, keyboard and viewport
    PointerDown { screen: Position },
    PointerMove { screen: Position },
    PointerUp { screen: Position },
    Wheel { screen: Position, delta_y: f64 },
    DeleteSelected,
    CanvasResized {
        width: f64,
        height: f64,
    },

    // Viewport controls
    ZoomIn,
    ZoomOut,
    FitView,

    // Sidebar
    CatalogLoaded(Catalog),
}

/// Side effects requested by the reducer; executed by `dispatch_global_message`
/// once the state borrow has been released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Redraw,
    RefreshSidebar,
}
