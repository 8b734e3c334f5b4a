use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use family_expenses::cli::{
    handle_category_command, handle_expense_command, handle_member_command,
    handle_report_command, CategoryCommands, ExpenseCommands, MemberCommands, ReportCommands,
};
use family_expenses::config::paths::DATA_DIR_ENV;
use family_expenses::config::{ExpensePaths, Settings};
use family_expenses::logging;
use family_expenses::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "famexp",
    version,
    about = "Shared household expense tracking",
    long_about = "famexp records what the family spends, who paid and under which \
                  category, and reports totals, per-person and per-category \
                  breakdowns for any month."
)]
struct Cli {
    /// Directory holding config.json and the data files
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Family member commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Dashboard, monthly report and exports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Create the data directory and the starter categories
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => ExpensePaths::with_base_dir(dir),
        None => ExpensePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    logging::init(&settings.log_level);

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, &settings, cmd)?,
        Some(Commands::Member(cmd)) => handle_member_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Init) => {
            println!("Initializing family expenses at: {}", paths.base_dir().display());
            let seeded = initialize_storage(&storage, &settings)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            if seeded > 0 {
                println!();
                println!("Created {} categories:", seeded);
                for name in &settings.default_categories {
                    println!("  - {}", name);
                }
            }
            println!();
            println!("Run 'famexp expense add --help' to record your first expense.");
        }
        Some(Commands::Config) => {
            println!("Family Expenses Configuration");
            println!("=============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Initialized:     {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            println!("  Recent expenses:    {}", settings.recent_limit);
            println!("  Log level:          {}", settings.log_level);
            println!("  Default categories: {}", settings.default_categories.join(", "));
        }
        None => {
            println!("famexp - shared household expense tracking");
            println!();
            println!("Run 'famexp --help' for usage information.");
            println!("Run 'famexp init' to get started.");
        }
    }

    Ok(())
}
