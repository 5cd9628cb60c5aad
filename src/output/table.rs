use comfy_table::{
    presets::UTF8_FULL, Attribute, Cell, CellAlignment, ContentArrangement, Table,
};

pub fn standard_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(*h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

pub fn left(text: impl Into<String>) -> Cell {
    Cell::new(text.into()).set_alignment(CellAlignment::Left)
}

pub fn right(text: impl Into<String>) -> Cell {
    Cell::new(text.into()).set_alignment(CellAlignment::Right)
}

/// Cuts `input` to `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars.saturating_sub(1)) {
        Some((idx, _)) if input.chars().count() > max_chars => format!("{}…", &input[..idx]),
        _ => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn leaves_short_values_alone() {
        assert_eq!(truncate("hero.png", 20), "hero.png");
    }

    #[test]
    fn marks_cut_values() {
        assert_eq!(truncate("https://images.example.com", 8), "https:/…");
        assert_eq!(truncate("ünïcödé", 3), "ün…");
    }
}
