use serde_json::{json, Value};

/// A margin-less page of the given size.
pub fn page(width: f32, height: f32) -> Value {
    json!({ "size": { "width": width, "height": height } })
}

pub fn body(children: Vec<Value>) -> Value {
    json!({ "name": "body", "children": children })
}

pub fn paragraph(text: &str) -> Value {
    json!({ "name": "p", "children": [text] })
}

pub fn list(name: &str, list_style_type: &str, items: Vec<Value>) -> Value {
    json!({
        "name": name,
        "style": { "listStyleType": list_style_type },
        "children": items
    })
}

pub fn item(children: Vec<Value>) -> Value {
    json!({ "name": "li", "children": children })
}

pub fn row(cells: Vec<Value>) -> Value {
    json!({ "name": "tr", "children": cells })
}

pub fn cell(text: &str) -> Value {
    json!({ "name": "td", "children": [text] })
}

pub fn fixed_cell(text: &str, measure: f32) -> Value {
    json!({ "name": "td", "style": { "measure": { "pt": measure } }, "children": [text] })
}

pub fn table(rows: Vec<Value>) -> Value {
    json!({ "name": "table", "children": rows })
}
