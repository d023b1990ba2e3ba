use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use spy_core::{MAX_PLAYERS, MIN_PLAYERS, Role, role_counts};

pub fn run(has_blank: bool) -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Players", "Civilian", "Spy", "Blank"]);

    for size in MIN_PLAYERS..=MAX_PLAYERS {
        let counts = role_counts(size, has_blank).map_err(|e| e.to_string())?;
        table.add_row(vec![
            size.to_string(),
            counts.get(Role::Civilian).to_string(),
            counts.get(Role::Spy).to_string(),
            counts.get(Role::Blank).to_string(),
        ]);
    }

    let mode = if has_blank { "with blank" } else { "without blank" };
    println!("  {} {}", "Role distribution".bold(), format!("({mode})").dimmed());
    println!("{table}");
    Ok(())
}
