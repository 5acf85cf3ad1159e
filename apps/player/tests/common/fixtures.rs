//! Test fixtures for generating test data.

use match_core::Pair;

/// Generate `count` pairs with ids `p0`, `p1`, ...
pub fn pairs(count: usize) -> Vec<Pair> {
    (0..count)
        .map(|i| Pair::new(format!("p{i}"), format!("word {i}"), format!("definition {i}")))
        .collect()
}

/// Generate bulk text with `count` pairs and one malformed line.
pub fn bulk_content(count: usize) -> String {
    let mut lines: Vec<String> = (0..count)
        .map(|i| format!("word {i} - definition {i}"))
        .collect();
    lines.push("this line has no separator".to_string());
    lines.join("\n")
}

/// Generate a JSON pairs file body with `count` entries.
pub fn json_content(count: usize) -> String {
    let entries: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("p{i}"),
                "word": format!("word {i}"),
                "definition": format!("definition {i}"),
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}
