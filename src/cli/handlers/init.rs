use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::config_io::{self, CONFIG_FILE};

const CONFIG_TEMPLATE: &str = r##"# tasklist configuration. Every setting is optional.

[store]
# Task file, relative to this directory. `tl -f <path>` overrides it.
file = "tasks.txt"

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# show_key_hints = false
#
# [ui.colors]
# background = "#1C1C1C"
# text = "#E0E0E0"
# text_bright = "#FFFFFF"
# highlight = "#2196F3"
# dim = "#808080"
# red = "#F44336"
# pending = "#FF474C"
# done = "#90EE90"
# selection_bg = "#3A3A3A"
"##;

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE);

    if config_path.exists() && !args.force {
        return Err(format!("{} already exists (use --force to overwrite)", CONFIG_FILE).into());
    }

    fs::write(&config_path, CONFIG_TEMPLATE)?;

    // Make sure what we just wrote is something we can read back.
    config_io::read_config(&cwd)?;

    println!("Wrote {}", config_path.display());
    Ok(())
}
