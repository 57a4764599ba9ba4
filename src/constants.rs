// Default values for the editor - these are the single source of truth for defaults

// Drag & drop wire format
pub const DRAG_MIME_TYPE: &str = "application/x-agent-canvas+json";
pub const DROP_EFFECT_MOVE: &str = "move";

// Agent defaults
pub const DEFAULT_AGENT_LABEL: &str = "Single Agent";
pub const DEFAULT_MODEL_FAMILY: &str = "Anthropic";
pub const DEFAULT_MODEL_NAME: &str = "Claude 3 Sonnet";
pub const AGENT_ID_PREFIX: &str = "agent_";

// Viewport limits
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;
pub const ZOOM_STEP_IN: f64 = 1.1;
pub const ZOOM_STEP_OUT: f64 = 0.9;
pub const CONTROL_ZOOM_STEP: f64 = 1.2;
pub const FIT_VIEW_PADDING: f64 = 40.0;
pub const FIT_VIEW_MAX_ZOOM: f64 = 1.0;

// Node geometry (canvas units)
pub const AGENT_NODE_WIDTH: f64 = 320.0;
pub const NODE_PADDING: f64 = 16.0;
pub const NODE_HEADER_HEIGHT: f64 = 56.0;
pub const TOOL_ZONE_MIN_HEIGHT: f64 = 60.0;
pub const TOOL_ZONE_TITLE_HEIGHT: f64 = 24.0;
pub const TOOL_PILL_HEIGHT: f64 = 22.0;
pub const TOOL_PILL_GAP: f64 = 8.0;
pub const TOOL_PILL_CHAR_WIDTH: f64 = 7.0;
pub const TOOL_PILL_ICON_WIDTH: f64 = 20.0;
pub const TOOL_PILL_REMOVE_SIZE: f64 = 16.0;
pub const HANDLE_RADIUS: f64 = 6.0;
pub const EDGE_HIT_TOLERANCE: f64 = 6.0; // screen pixels
pub const GRID_SPACING: f64 = 16.0;

// Colours
pub const CANVAS_BACKGROUND_COLOR: &str = "#2D2D2D";
pub const GRID_DOT_COLOR: &str = "#555555";
pub const NODE_FILL_AGENT: &str = "#2D2D2D";
pub const NODE_BORDER_AGENT: &str = "#9333ea";
pub const NODE_BORDER_SELECTED: &str = "#c084fc";
pub const TOOL_ZONE_BORDER: &str = "#6b7280";
pub const TOOL_ZONE_BORDER_ACTIVE: &str = "#c084fc";
pub const TOOL_ZONE_FILL_ACTIVE: &str = "rgba(168, 85, 247, 0.2)";
pub const TOOL_PILL_FILL: &str = "rgba(202, 138, 4, 0.8)";
pub const HANDLE_COLOR: &str = "#9ca3af";
pub const CONNECTION_LINE_COLOR: &str = "#b1b1b7";
pub const TEXT_PRIMARY: &str = "#ffffff";
pub const TEXT_MUTED: &str = "#9ca3af";
pub const TEXT_SUBTLE: &str = "#6b7280";
