use crate::messages::{Command, Message};
use crate::state::AppState;

/// Apply `msg` to `state` and return the commands the shell should run.
pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    // Delegate to the sub-reducers first
    if crate::reducers::agent_node::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::canvas::update(state, &msg, &mut commands) {
        return commands;
    }

    match msg {
        Message::CatalogLoaded(catalog) => {
            crate::console_log!("Catalog loaded with {} tools", catalog.tools.len());
            state.catalog = catalog;
            commands.push(Command::RefreshSidebar);
        }
        other => {
            crate::console_warn!("Unhandled message: {:?}", other);
        }
    }

    commands
}
