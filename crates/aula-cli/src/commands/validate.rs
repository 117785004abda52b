//! The `aula validate` command.

use anyhow::Result;

use aula_core::PortalConfig;

use super::open_portal;

pub fn execute(config: &PortalConfig) -> Result<()> {
    let portal = open_portal(config);
    let courses = portal.store().path_of(&config.courses_file);
    let warnings = portal.validate_content()?;

    println!("Content: {}", courses.display());
    for w in &warnings {
        let location = w.location();
        let prefix = if location.is_empty() {
            "  ".to_string()
        } else {
            format!("  [{location}]")
        };
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Content valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
