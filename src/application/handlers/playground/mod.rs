//! Playground command and query handlers.

mod access_gate;
mod execute_tool;
mod get_tool_for_display;
mod inspect_user_state;
mod list_active_tools;
mod list_tools;
mod purge_user_data;
mod register_tool;
mod remove_tool;
mod seed_catalog;
mod set_tool_active;
mod update_tool;
mod user_state;

#[cfg(test)]
mod test_support;

pub use access_gate::ActiveToolResolver;
pub use execute_tool::{ExecuteToolCommand, ExecuteToolHandler};
pub use get_tool_for_display::{GetToolForDisplayHandler, GetToolForDisplayQuery, ToolDisplay};
pub use inspect_user_state::{InspectUserStateHandler, InspectUserStateQuery, UserStateInspection};
pub use list_active_tools::{ListActiveToolsHandler, ListActiveToolsQuery};
pub use list_tools::{ListToolsHandler, ListToolsQuery, ToolInventory, ToolListing};
pub use purge_user_data::{PurgeUserDataCommand, PurgeUserDataHandler, PurgeUserDataResult};
pub use register_tool::{RegisterToolCommand, RegisterToolHandler};
pub use remove_tool::{RemoveToolCommand, RemoveToolHandler, RemoveToolResult};
pub use seed_catalog::{SeedCatalogHandler, SeedCatalogResult};
pub use set_tool_active::{SetToolActiveCommand, SetToolActiveHandler, SetToolActiveResult};
pub use update_tool::{UpdateToolCommand, UpdateToolHandler, UpdateToolResult};
pub use user_state::UserStateService;
