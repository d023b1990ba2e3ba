pub mod play;
pub mod roles;

use colored::{ColoredString, Colorize};
use spy_core::Role;

/// Role name colored by team.
fn paint_role(role: Role) -> ColoredString {
    let label = role.to_string();
    match role {
        Role::Civilian => label.green(),
        Role::Spy => label.red(),
        Role::Blank => label.yellow(),
    }
}
