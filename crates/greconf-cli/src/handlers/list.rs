//! List command handler.
//!
//! Displays every registered runtime of one registry in a formatted table,
//! or as JSON for scripts.

use anyhow::{Context, Result};
use greconf_core::{RegistrationScope, RegistryEntry};

use crate::bootstrap::CliContext;
use crate::presentation::{print_separator, truncate_string};

/// Execute the list command.
///
/// # Errors
///
/// This function will return an error if:
/// - The user registry is requested but `HOME` is not set
/// - The registry directory exists but cannot be read
pub fn execute(ctx: &CliContext, scope: RegistrationScope, json: bool) -> Result<()> {
    let entries = ctx.manager.entries(scope)?;

    if json {
        println!("{}", render_json(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No runtimes registered in the {scope} registry.");
        println!("Use 'greconf register [LOCATION]' to add one.");
        return Ok(());
    }

    println!("Found {} registration(s) in the {scope} registry:\n", entries.len());
    println!("{:<24} {:<20} GRE_PATH", "Key", "Build ID");
    print_separator(80);

    for entry in &entries {
        println!(
            "{:<24} {:<20} {}",
            truncate_string(&entry.key, 23),
            truncate_string(&entry.build_id, 19),
            entry.gre_path.display()
        );
    }

    Ok(())
}

fn render_json(entries: &[RegistryEntry]) -> Result<String> {
    serde_json::to_string_pretty(entries).context("failed to serialize registry entries")
}

#[cfg(test)]
mod tests {
    use super::*;
    use greconf_core::{RegistryConfig, RegistryManager};
    use std::path::PathBuf;

    #[test]
    fn json_lists_registered_locations() {
        let tmp = tempfile::tempdir().unwrap();
        let location = tmp.path().join("runtime-1");
        std::fs::create_dir(&location).unwrap();

        let config = RegistryConfig::default()
            .with_build_id("20230101120000")
            .with_global_root(tmp.path().join("gre.d"));
        let ctx = CliContext {
            manager: RegistryManager::new(config).unwrap(),
        };
        ctx.manager
            .register(RegistrationScope::Global, &location)
            .unwrap();

        let entries = ctx.manager.entries(RegistrationScope::Global).unwrap();
        let value: serde_json::Value = serde_json::from_str(&render_json(&entries).unwrap()).unwrap();

        assert_eq!(value[0]["key"], "20230101120000");
        assert_eq!(value[0]["build_id"], "20230101120000");
        assert_eq!(PathBuf::from(value[0]["gre_path"].as_str().unwrap()), location);
    }

    #[test]
    fn empty_registry_renders_empty_array() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }
}
