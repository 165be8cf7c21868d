use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(export_dir: Option<String>, month_first: bool, decimal_comma: bool) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = export_dir {
        settings.export_dir = shellexpand_path(&dir);
    }
    settings.day_first = !month_first;
    settings.decimal_comma = decimal_comma;

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.export_dir);
    std::fs::create_dir_all(&resolved)?;

    println!("Exports go to {}", resolved.display());
    println!(
        "Dates: {}, decimal separator: '{}'",
        if settings.day_first { "dd/mm/yyyy" } else { "mm/dd/yyyy" },
        if settings.decimal_comma { ',' } else { '.' }
    );
    Ok(())
}
