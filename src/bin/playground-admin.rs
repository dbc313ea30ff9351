//! Administrative CLI for the playground tool registry.
//!
//! Talks to the same PostgreSQL database as the server.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use playground::adapters::postgres::{PostgresToolRepository, PostgresUserToolStateRepository};
use playground::application::handlers::playground::{
    InspectUserStateHandler, InspectUserStateQuery, ListToolsHandler, ListToolsQuery,
    PurgeUserDataCommand, PurgeUserDataHandler, RegisterToolCommand, RegisterToolHandler,
    RemoveToolCommand, RemoveToolHandler, SeedCatalogHandler, SetToolActiveCommand,
    SetToolActiveHandler, ToolInventory,
};
use playground::config::DatabaseConfig;
use playground::domain::execution::ExecutorRegistry;
use playground::domain::foundation::UserId;
use playground::domain::playground::{NewTool, PlaygroundError, ToolLocator};
use playground::ports::{ToolFilter, ToolRepository, UserToolStateRepository};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "playground-admin", version, about = "Manage playground tools")]
struct Cli {
    /// PostgreSQL connection URL.
    #[arg(long, env = "PLAYGROUND__DATABASE__URL", hide_env_values = true)]
    database_url: String,

    /// Apply pending migrations before running the command.
    #[arg(long, global = true)]
    migrate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered tools.
    List(ListArgs),
    /// Register the built-in tools that are missing.
    Seed,
    /// Register a new tool.
    Create(CreateArgs),
    /// Make a tool reachable again.
    Activate {
        /// Tool slug or id.
        tool: String,
    },
    /// Hide a tool; saved data is kept.
    Deactivate {
        /// Tool slug or id.
        tool: String,
    },
    /// Remove a tool and every user's saved data for it.
    Remove {
        /// Tool slug or id.
        tool: String,
        /// Delete for real; without it only the impact is reported.
        #[arg(long)]
        force: bool,
    },
    /// Delete a user's saved data and release the tools they own.
    PurgeUser {
        user_id: String,
    },
    /// Show one user's saved data for a tool.
    Inspect {
        /// Tool slug or id.
        tool: String,
        user_id: String,
    },
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("state").args(["active", "inactive"])))]
struct ListArgs {
    /// Only active tools.
    #[arg(long)]
    active: bool,
    /// Only inactive tools.
    #[arg(long)]
    inactive: bool,
    /// Only tools owned by this user.
    #[arg(long, value_name = "USER_ID")]
    owner: Option<String>,
    /// Machine-readable output.
    #[arg(long)]
    json: bool,
    /// Base URL used when printing tool links.
    #[arg(long, env = "PLAYGROUND_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Display name; slug and component name are derived from it.
    name: String,
    #[arg(long)]
    icon: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Register the tool as inactive.
    #[arg(long)]
    inactive: bool,
    /// Owning user; omitted means system-owned.
    #[arg(long, value_name = "USER_ID")]
    owner: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let database = DatabaseConfig {
        url: cli.database_url.clone(),
        min_connections: 1,
        max_connections: 2,
        ..Default::default()
    };
    database.validate().context("invalid database configuration")?;

    let pool = database
        .pool_options()
        .connect(&database.url)
        .await
        .context("failed to connect to database")?;

    if cli.migrate {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run migrations")?;
    }

    let tools: Arc<dyn ToolRepository> = Arc::new(PostgresToolRepository::new(pool.clone()));
    let states: Arc<dyn UserToolStateRepository> =
        Arc::new(PostgresUserToolStateRepository::new(pool));

    run(cli.command, tools, states).await
}

async fn run(
    command: Commands,
    tools: Arc<dyn ToolRepository>,
    states: Arc<dyn UserToolStateRepository>,
) -> Result<()> {
    match command {
        Commands::List(args) => {
            let filter = ToolFilter {
                active: match (args.active, args.inactive) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                owner: args.owner.as_deref().map(parse_user).transpose()?,
            };
            let inventory = ListToolsHandler::new(tools, Arc::new(ExecutorRegistry::builtin()))
                .handle(ListToolsQuery { filter })
                .await
                .map_err(admin_error)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&listing_json(&inventory))?);
            } else {
                print_inventory(&inventory, args.base_url.trim_end_matches('/'));
            }
        }
        Commands::Seed => {
            let result = SeedCatalogHandler::new(tools).handle().await.map_err(admin_error)?;
            for tool in &result.created {
                println!("created  {}", tool.slug());
            }
            for slug in &result.skipped {
                println!("exists   {}", slug);
            }
            println!(
                "\n{} created, {} already present",
                result.created.len(),
                result.skipped.len()
            );
        }
        Commands::Create(args) => {
            let new_tool = NewTool {
                icon: args.icon,
                description: args.description,
                is_active: !args.inactive,
                owner: args.owner.as_deref().map(parse_user).transpose()?,
                ..NewTool::named(args.name)
            };
            let tool = RegisterToolHandler::new(tools)
                .handle(RegisterToolCommand { tool: new_tool })
                .await
                .map_err(admin_error)?;

            println!("Registered '{}'", tool.name());
            println!("  slug:      {}", tool.slug());
            println!("  component: {}", tool.component_name());
            println!("  view:      {}", tool.view_name());
            if !ExecutorRegistry::builtin().has_executor(tool.slug().as_str()) {
                println!("  note:      no executor registered; execute returns 'Tool not implemented'");
            }
        }
        Commands::Activate { tool } => set_active(tools, &tool, true).await?,
        Commands::Deactivate { tool } => set_active(tools, &tool, false).await?,
        Commands::Remove { tool, force } => {
            let result = RemoveToolHandler::new(tools, states)
                .handle(RemoveToolCommand {
                    locator: ToolLocator::parse(&tool),
                    force,
                })
                .await
                .map_err(admin_error)?;

            if result.removed {
                println!(
                    "Removed '{}' and {} saved state row(s)",
                    result.tool.slug(),
                    result.state_rows
                );
            } else {
                println!(
                    "Would remove '{}' ({}) and {} saved state row(s)",
                    result.tool.slug(),
                    if result.tool.is_active() { "active" } else { "inactive" },
                    result.state_rows
                );
                println!("Re-run with --force to delete.");
            }
        }
        Commands::PurgeUser { user_id } => {
            let result = PurgeUserDataHandler::new(tools, states)
                .handle(PurgeUserDataCommand {
                    user_id: parse_user(&user_id)?,
                })
                .await
                .map_err(admin_error)?;
            println!(
                "Deleted {} saved state row(s); released {} owned tool(s)",
                result.states_deleted, result.tools_released
            );
        }
        Commands::Inspect { tool, user_id } => {
            let inspection = InspectUserStateHandler::new(tools, states)
                .handle(InspectUserStateQuery {
                    locator: ToolLocator::parse(&tool),
                    user_id: parse_user(&user_id)?,
                })
                .await
                .map_err(admin_error)?;

            println!("{} ({})", inspection.tool.name(), inspection.tool.component_name());
            match &inspection.state {
                Some(state) => {
                    println!("  updated: {}", state.updated_at().to_rfc3339());
                    println!("  summary: {}", inspection.view.summary());
                    println!("{}", serde_json::to_string_pretty(state.saved_data())?);
                }
                None => println!("  user {} has not opened this tool", user_id),
            }
        }
    }

    Ok(())
}

async fn set_active(tools: Arc<dyn ToolRepository>, tool: &str, active: bool) -> Result<()> {
    let result = SetToolActiveHandler::new(tools)
        .handle(SetToolActiveCommand {
            locator: ToolLocator::parse(tool),
            active,
        })
        .await
        .map_err(admin_error)?;

    let state = if active { "active" } else { "inactive" };
    if result.changed {
        println!("'{}' is now {}", result.tool.slug(), state);
    } else {
        println!("'{}' was already {}", result.tool.slug(), state);
    }
    Ok(())
}

fn parse_user(raw: &str) -> Result<UserId> {
    UserId::new(raw).with_context(|| format!("invalid user id '{}'", raw))
}

fn admin_error(error: PlaygroundError) -> anyhow::Error {
    match error {
        PlaygroundError::NotFound(locator) => anyhow::anyhow!("no tool matches '{}'", locator),
        other => anyhow::anyhow!("{}", other),
    }
}

#[derive(Serialize)]
struct ToolRow<'a> {
    name: &'a str,
    slug: &'a str,
    component_name: &'a str,
    icon: &'a str,
    is_active: bool,
    owner: Option<&'a str>,
    has_executor: bool,
}

#[derive(Serialize)]
struct ListingJson<'a> {
    total: usize,
    active: usize,
    inactive: usize,
    tools: Vec<ToolRow<'a>>,
}

fn listing_json(inventory: &ToolInventory) -> ListingJson<'_> {
    ListingJson {
        total: inventory.total(),
        active: inventory.active(),
        inactive: inventory.inactive(),
        tools: inventory
            .tools
            .iter()
            .map(|listing| ToolRow {
                name: listing.tool.name(),
                slug: listing.tool.slug().as_str(),
                component_name: listing.tool.component_name().as_str(),
                icon: listing.tool.icon(),
                is_active: listing.tool.is_active(),
                owner: listing.tool.owner().map(UserId::as_str),
                has_executor: listing.has_executor,
            })
            .collect(),
    }
}

fn print_inventory(inventory: &ToolInventory, base_url: &str) {
    if inventory.tools.is_empty() {
        println!("No tools registered. Run `playground-admin seed` to add the built-in set.");
        return;
    }

    println!(
        "{:<24} {:<22} {:<9} {:<9} {}",
        "NAME", "SLUG", "STATUS", "EXECUTOR", "OWNER"
    );
    for listing in &inventory.tools {
        let tool = &listing.tool;
        println!(
            "{:<24} {:<22} {:<9} {:<9} {}",
            tool.name(),
            tool.slug().as_str(),
            if tool.is_active() { "active" } else { "inactive" },
            if listing.has_executor { "yes" } else { "no" },
            tool.owner().map_or("system", UserId::as_str),
        );
    }

    println!(
        "\n{} tool(s): {} active, {} inactive",
        inventory.total(),
        inventory.active(),
        inventory.inactive()
    );

    let active: Vec<_> = inventory.tools.iter().filter(|l| l.tool.is_active()).collect();
    if !active.is_empty() {
        println!("\nActive tool URLs:");
        for listing in active {
            println!("  {}/playground/tools/{}", base_url, listing.tool.slug());
        }
    }

    let missing: Vec<_> = inventory.unregistered().collect();
    if !missing.is_empty() {
        println!("\nActive tools without an executor:");
        for tool in missing {
            println!("  {}", tool.slug());
        }
    }
}
