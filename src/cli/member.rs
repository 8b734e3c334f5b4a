//! Family member CLI commands

use clap::Subcommand;

use crate::display::format_member_list;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::MemberRole;
use crate::services::MemberService;
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// List family members
    List,

    /// Add a family member
    Add {
        name: String,
        email: String,
        #[arg(short, long, value_enum, default_value_t = MemberRole::Member)]
        role: MemberRole,
    },

    /// Edit a family member
    Edit {
        /// Member name or ID
        member: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long, value_enum)]
        role: Option<MemberRole>,
    },

    /// Remove a family member
    Delete {
        /// Member name or ID
        member: String,
    },
}

/// Handle a member command
pub fn handle_member_command(storage: &Storage, cmd: MemberCommands) -> ExpenseResult<()> {
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::List => {
            print!("{}", format_member_list(&service.list()?));
        }

        MemberCommands::Add { name, email, role } => {
            let member = service.create(&name, &email, role)?;
            println!("Added member: {} ({})", member, member.role);
            println!("  ID: {}", member.id);
        }

        MemberCommands::Edit {
            member,
            name,
            email,
            role,
        } => {
            let existing = service
                .find(&member)?
                .ok_or_else(|| ExpenseError::member_not_found(&member))?;

            if name.is_none() && email.is_none() && role.is_none() {
                println!("No changes specified. Use --name, --email or --role.");
                return Ok(());
            }

            let updated = service.update(existing.id, name.as_deref(), email.as_deref(), role)?;
            println!("Updated member: {}", updated);
        }

        MemberCommands::Delete { member } => {
            let existing = service
                .find(&member)?
                .ok_or_else(|| ExpenseError::member_not_found(&member))?;
            service.delete(existing.id)?;
            println!("Removed member: {}", existing.name);
        }
    }

    Ok(())
}
