use crate::constants::*;
use crate::ids::{IdAllocator, SequentialIds, UuidIds};

/// How fresh node ids are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdScheme {
    /// `agent_1`, `agent_2`, ...
    #[default]
    Sequential,
    /// Prefix plus a random v4 uuid, for graphs merged across sessions.
    Uuid,
}

/// Editor configuration.
///
/// Everything here has a compile-time default in `constants.rs`; tests and
/// embedders construct their own values with struct-update syntax:
///
/// ```rust,ignore
/// let config = EditorConfig { min_zoom: 0.5, ..EditorConfig::default() };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Mime type key holding the JSON drag payload.
    pub drag_mime_type: String,
    /// Prefix for node ids (`agent_1`, `agent_2`, ...).
    pub node_id_prefix: String,
    pub id_scheme: IdScheme,
    pub default_model_family: String,
    pub default_model_name: String,
    pub node_width: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub grid_spacing: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drag_mime_type: DRAG_MIME_TYPE.to_string(),
            node_id_prefix: AGENT_ID_PREFIX.to_string(),
            id_scheme: IdScheme::default(),
            default_model_family: DEFAULT_MODEL_FAMILY.to_string(),
            default_model_name: DEFAULT_MODEL_NAME.to_string(),
            node_width: AGENT_NODE_WIDTH,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            grid_spacing: GRID_SPACING,
        }
    }
}

impl EditorConfig {
    pub fn id_allocator(&self) -> Box<dyn IdAllocator> {
        match self.id_scheme {
            IdScheme::Sequential => Box::new(SequentialIds::new(self.node_id_prefix.clone())),
            IdScheme::Uuid => Box::new(UuidIds::new(self.node_id_prefix.clone())),
        }
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return 1.0_f64.clamp(self.min_zoom, self.max_zoom);
        }
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}
