mod asset;
mod format;
mod table;

pub use asset::render_asset_table;
pub use format::{fmt_bytes, short_json};
pub use table::{left, right, standard_table, truncate};

use comfy_table::{presets::UTF8_FULL, Cell, Table};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

pub fn print_value(mode: OutputMode, value: &Value) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputMode::Table => {
            if let Some(obj) = value.as_object() {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                table.set_header(vec!["Field", "Value"]);
                for (k, v) in obj {
                    table.add_row(vec![Cell::new(k), Cell::new(short_json(v))]);
                }
                println!("{table}");
            } else {
                println!("{}", serde_json::to_string_pretty(value)?);
            }
        }
    }
    Ok(())
}
