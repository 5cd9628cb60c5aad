use serde_json::Value;

use super::{format::get_u64, fmt_bytes, left, right, short_json, standard_table, truncate};

const VALUE_WIDTH: usize = 72;
const SUMMARY_FIELDS: [&str; 6] = ["uid", "title", "filename", "content_type", "url", "updated_at"];

/// Summary fields first, then everything else the asset carries.
pub fn render_asset_table(asset: &Value) -> anyhow::Result<()> {
    let mut table = standard_table(&["Field", "Value"]);

    for field in SUMMARY_FIELDS {
        if let Some(v) = asset.get(field).filter(|v| !v.is_null()) {
            table.add_row(vec![left(field), left(truncate(&short_json(v), VALUE_WIDTH))]);
        }
    }
    if asset.get("file_size").is_some() {
        table.add_row(vec![left("file_size"), right(fmt_bytes(get_u64(asset, "file_size")))]);
    }

    if let Some(obj) = asset.as_object() {
        for (k, v) in obj {
            if SUMMARY_FIELDS.contains(&k.as_str()) || k == "file_size" || v.is_null() {
                continue;
            }
            table.add_row(vec![left(k.as_str()), left(truncate(&short_json(v), VALUE_WIDTH))]);
        }
    }

    println!("{table}");
    Ok(())
}
