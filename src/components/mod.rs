pub mod canvas_editor;
pub mod sidebar;
