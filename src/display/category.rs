//! Category display formatting

use crate::models::Category;

/// Format a list of categories, one per line
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'famexp init' to create default categories."
            .to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.label().chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    for category in categories {
        let status = if category.is_active { "" } else { " (inactive)" };
        let label = category.label();
        let pad = name_width - label.chars().count();
        output.push_str(&format!(
            "  {}{}  {}  {}{}\n",
            label,
            " ".repeat(pad),
            category.color,
            category.description,
            status
        ));
    }

    output
}

/// Format the default category names offered when none are stored
pub fn format_default_categories(names: &[String]) -> String {
    let mut output = String::from("No categories stored; using defaults:\n");
    for name in names {
        output.push_str(&format!("  {}\n", name));
    }
    output
}
