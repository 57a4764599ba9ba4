use std::cell::RefCell;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::catalog::Catalog;
use crate::config::EditorConfig;
use crate::ids::IdAllocator;
use crate::messages::{Command, Message};
use crate::models::{AgentNode, AgentNodeData, Edge, Position};
use crate::update::update;
use crate::viewport::Viewport;

/// Pointer gesture in progress on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    MovingNode { node_id: String, grab_offset: Position },
    Panning { last: Position },
    Connecting { source: String, pointer: Position },
}

// Store global application state
pub struct AppState {
    pub config: EditorConfig,
    pub catalog: Catalog,

    // Graph
    pub nodes: Vec<AgentNode>,
    pub edges: Vec<Edge>,
    ids: Box<dyn IdAllocator>,

    // View
    pub viewport: Viewport,
    pub drag_over_node: Option<String>, // node currently showing the drop hint
    pub selected_node: Option<String>,
    pub selected_edge: Option<String>,
    pub gesture: Gesture,

    // Bumped on every visible change; renderers compare against it instead
    // of relying on collection identity.
    pub version: u64,

    // Canvas and rendering related
    pub canvas: Option<HtmlCanvasElement>,
    pub context: Option<CanvasRenderingContext2d>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let ids = config.id_allocator();
        Self::with_parts(config, Catalog::builtin(), ids)
    }

    pub fn with_parts(config: EditorConfig, catalog: Catalog, ids: Box<dyn IdAllocator>) -> Self {
        Self {
            config,
            catalog,
            nodes: Vec::new(),
            edges: Vec::new(),
            ids,
            viewport: Viewport::default(),
            drag_over_node: None,
            selected_node: None,
            selected_edge: None,
            gesture: Gesture::Idle,
            version: 0,
            canvas: None,
            context: None,
        }
    }

    /// Record a visible change.
    pub fn touch(&mut self) {
        self.version += 1;
    }

    pub fn node(&self, node_id: &str) -> Option<&AgentNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn node_index(&self, node_id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == node_id)
    }

    /// Append a fresh agent node with no tools and the configured default
    /// model.  Returns the new id.
    pub fn add_agent_node(&mut self, label: String, position: Position) -> String {
        let id = self.ids.next_id();
        self.nodes.push(AgentNode {
            id: id.clone(),
            position,
            data: AgentNodeData {
                label,
                model_family: self.config.default_model_family.clone(),
                model_name: self.config.default_model_name.clone(),
                tools: Vec::new(),
            },
        });
        self.touch();
        id
    }

    /// Swap in an updated copy of the node with the same id.
    pub fn replace_node(&mut self, updated: AgentNode) -> bool {
        match self.node_index(&updated.id) {
            Some(index) => {
                self.nodes[index] = updated;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Feed a message through the reducer and return the follow-up commands.
    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        update(self, msg)
    }
}

// We use thread_local to store our app state
thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

/// Dispatch a message against the global state, then run the resulting
/// commands once the borrow has been released.
pub fn dispatch_global_message(msg: Message) {
    let commands = APP_STATE.with(|state| state.borrow_mut().dispatch(msg));
    run_commands(&commands);
}

fn run_commands(commands: &[Command]) {
    let mut redraw = false;
    for cmd in commands {
        match cmd {
            Command::Redraw => redraw = true,
            Command::RefreshSidebar => {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    if let Err(e) = crate::components::sidebar::refresh_sidebar(&document) {
                        crate::console_warn!("Failed to refresh sidebar: {:?}", e);
                    }
                }
            }
        }
    }

    // Several redraw requests in one batch collapse into a single frame.
    if redraw {
        APP_STATE.with(|state| crate::canvas::renderer::draw(&state.borrow()));
    }
}
