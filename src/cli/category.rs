//! Category CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_category_list, format_default_categories};
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::{CategoryService, UpdateCategoryInput};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Include inactive categories
        #[arg(short, long)]
        all: bool,
    },

    /// Add a category
    Add {
        /// Category name
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Colour as #rrggbb
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
    },

    /// Switch a category between active and inactive
    Toggle {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> ExpenseResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { all } => {
            let categories = service.list(!all)?;
            if categories.is_empty() && !all {
                print!(
                    "{}",
                    format_default_categories(&service.names_or_default(settings)?)
                );
            } else {
                print!("{}", format_category_list(&categories));
            }
        }

        CategoryCommands::Add {
            name,
            description,
            color,
            icon,
        } => {
            let category = service.create(
                &name,
                description.as_deref(),
                color.as_deref(),
                icon.as_deref(),
            )?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Edit {
            category,
            name,
            description,
            color,
            icon,
        } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| ExpenseError::category_not_found(&category))?;

            if name.is_none() && description.is_none() && color.is_none() && icon.is_none() {
                println!("No changes specified. Use --name, --description, --color or --icon.");
                return Ok(());
            }

            let updated = service.update(
                cat.id,
                UpdateCategoryInput {
                    name,
                    description,
                    color,
                    icon,
                },
            )?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| ExpenseError::category_not_found(&category))?;
            service.delete(cat.id)?;
            println!("Deleted category: {}", cat.name);
        }

        CategoryCommands::Toggle { category } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| ExpenseError::category_not_found(&category))?;
            let toggled = service.toggle(cat.id)?;
            let state = if toggled.is_active { "active" } else { "inactive" };
            println!("Category '{}' is now {}", toggled.name, state);
        }
    }

    Ok(())
}
