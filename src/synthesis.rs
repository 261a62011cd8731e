// src/synthesis.rs
//! Turns arbitrary nested data into an ordered sequence of typed elements.
//!
//! The walk is depth-first over a `serde_json::Value`: objects contribute a
//! section header and recurse, arrays collapse into one composite block,
//! scalars become single `path: value` fields. Sibling keys are visited in
//! sorted order so the same data always synthesizes the same template.
//! Pagination is not considered here; element positions stay zero until the
//! layout engine assigns them.

use crate::config::GeneratorConfig;
use crate::model::{
    Alignment, Bounds, Color, Element, ElementKind, Padding, Style, Template,
    DEFAULT_FONT_FAMILY,
};
use itertools::Itertools;
use serde_json::Value;

const TEMPLATE_NAME: &str = "Dynamic Template";
const TEMPLATE_VERSION: &str = "1.0";
const TITLE_TEXT: &str = "Data Report";

const HEADER_FONT_SIZE: f32 = 14.0;
const HEADER_FONT_COLOR: Color = Color { r: 0x33, g: 0x33, b: 0x33 };
const HEADER_BACKGROUND: Color = Color { r: 0xf5, g: 0xf5, b: 0xf5 };

pub struct TemplateSynthesizer {
    config: GeneratorConfig,
}

impl TemplateSynthesizer {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Build a template from the given data. Always emits at least the
    /// document title element, even for an empty object.
    pub fn synthesize(&self, data: &Value) -> Template {
        let mut elements = Vec::new();
        let mut cursor = self.config.margins.top;

        elements.push(self.title_element());
        cursor += self.config.line_height * 3.0;

        self.process(data, "", &mut cursor, &mut elements);

        log::debug!(
            "synthesized {} elements, estimated content height {:.1}",
            elements.len(),
            cursor
        );

        Template {
            name: TEMPLATE_NAME.to_string(),
            version: TEMPLATE_VERSION.to_string(),
            page_size: self.config.page_size,
            elements,
            schema: None,
        }
    }

    fn process(&self, data: &Value, prefix: &str, cursor: &mut f32, out: &mut Vec<Element>) {
        let lh = self.config.line_height;
        match data {
            Value::Object(map) => {
                if !prefix.is_empty() {
                    out.push(self.section_header(prefix));
                    // Header height plus a gap before the section body.
                    *cursor += lh * 1.5 + lh * 1.5;
                }
                // serde_json maps iterate in sorted key order, which keeps
                // sibling order reproducible across runs.
                for (key, value) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    self.process(value, &path, cursor, out);
                }
            }
            Value::Array(items) => {
                out.push(self.array_element(prefix, items));
                // Block height plus a gap before the next sibling.
                *cursor += lh * (items.len() + 1) as f32 + lh;
            }
            scalar => {
                out.push(self.field_element(prefix, scalar));
                *cursor += lh;
            }
        }
    }

    fn title_element(&self) -> Element {
        Element {
            id: "title".to_string(),
            kind: ElementKind::Text,
            bounds: Bounds::sized(self.config.content_width(), self.config.line_height * 2.0),
            content: Value::String(TITLE_TEXT.to_string()),
            style: Some(Style {
                font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
                font_size: Some(self.config.title_font_size),
                font_color: Some(Color::BLACK),
                alignment: Some(Alignment::Center),
                ..Style::default()
            }),
        }
    }

    fn section_header(&self, path: &str) -> Element {
        Element {
            id: format!("header-{}", path),
            kind: ElementKind::Text,
            bounds: Bounds::sized(self.config.content_width(), self.config.line_height * 1.5),
            content: Value::String(path.to_uppercase()),
            style: Some(Style {
                font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
                font_size: Some(HEADER_FONT_SIZE),
                font_color: Some(HEADER_FONT_COLOR),
                background: Some(HEADER_BACKGROUND),
                padding: Some(Padding { top: 2.0, right: 5.0, bottom: 2.0, left: 5.0 }),
                ..Style::default()
            }),
        }
    }

    fn field_element(&self, path: &str, value: &Value) -> Element {
        Element {
            id: format!("field-{}", path),
            kind: ElementKind::Text,
            bounds: Bounds::sized(self.config.content_width(), self.config.line_height),
            content: Value::String(format!("{}: {}", path, format_value(value))),
            style: Some(self.body_style()),
        }
    }

    fn array_element(&self, path: &str, items: &[Value]) -> Element {
        let mut content = format!("{}:", path);
        for item in items {
            match item {
                Value::Object(map) => {
                    let line = map
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k, format_value(v)))
                        .join(", ");
                    content.push_str(&format!("\n- {}", line));
                }
                other => content.push_str(&format!("\n- {}", format_value(other))),
            }
        }

        Element {
            id: format!("array-{}", path),
            kind: ElementKind::Text,
            bounds: Bounds::sized(
                self.config.content_width(),
                self.config.line_height * (items.len() + 1) as f32,
            ),
            content: Value::String(content),
            style: Some(self.body_style()),
        }
    }

    fn body_style(&self) -> Style {
        Style {
            font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
            font_size: Some(self.config.font_size),
            font_color: Some(Color::BLACK),
            ..Style::default()
        }
    }
}

/// Total formatting of any JSON value into its display string.
///
/// Shared by field emission, array enumeration and the table renderer so a
/// value reads the same wherever it surfaces: integers print plain, floats
/// with exactly two decimals, null as the `N/A` sentinel, and containers as
/// compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                format!("{:.2}", n.as_f64().unwrap_or(0.0))
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => "N/A".to_string(),
        container => container.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_value_is_total() {
        assert_eq!(format_value(&json!("literal")), "literal");
        assert_eq!(format_value(&json!(29.99)), "29.99");
        assert_eq!(format_value(&json!(3.0)), "3.00");
        assert_eq!(format_value(&json!(3)), "3");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(false)), "false");
        assert_eq!(format_value(&json!(null)), "N/A");
        assert_eq!(format_value(&json!([1, 2])), "[1,2]");
        assert_eq!(format_value(&json!({"a": 1})), "{\"a\":1}");
    }

    #[test]
    fn empty_object_still_yields_the_title() {
        let synthesizer = TemplateSynthesizer::new(GeneratorConfig::default());
        let template = synthesizer.synthesize(&json!({}));
        assert_eq!(template.elements.len(), 1);
        assert_eq!(template.elements[0].id, "title");
        assert_eq!(template.elements[0].content, json!("Data Report"));
    }

    #[test]
    fn scalar_fields_carry_their_dotted_path() {
        let synthesizer = TemplateSynthesizer::new(GeneratorConfig::default());
        let template = synthesizer.synthesize(&json!({
            "customer": { "name": "John" }
        }));

        let ids: Vec<&str> = template.elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["title", "header-customer", "field-customer.name"]);
        assert_eq!(
            template.elements[2].content,
            json!("customer.name: John")
        );
        assert_eq!(template.elements[1].content, json!("CUSTOMER"));
    }

    #[test]
    fn sibling_keys_are_visited_in_sorted_order() {
        let synthesizer = TemplateSynthesizer::new(GeneratorConfig::default());
        let template = synthesizer.synthesize(&json!({
            "zeta": 1, "alpha": 2, "mid": 3
        }));
        let ids: Vec<&str> = template.elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["title", "field-alpha", "field-mid", "field-zeta"]);
    }

    #[test]
    fn arrays_collapse_into_one_block_with_item_lines() {
        let synthesizer = TemplateSynthesizer::new(GeneratorConfig::default());
        let config = GeneratorConfig::default();
        let template = synthesizer.synthesize(&json!({
            "items": [
                { "name": "Product A", "price": 29.99 },
                "spare"
            ]
        }));

        let block = &template.elements[1];
        assert_eq!(block.id, "array-items");
        assert_eq!(
            block.content,
            json!("items:\n- name: Product A, price: 29.99\n- spare")
        );
        // Height = line_height * (items + 1).
        assert_eq!(block.bounds.size.height, config.line_height * 3.0);
    }

    #[test]
    fn section_headers_are_uppercased_and_backed() {
        let synthesizer = TemplateSynthesizer::new(GeneratorConfig::default());
        let template = synthesizer.synthesize(&json!({
            "order": { "status": "open" }
        }));
        let header = &template.elements[1];
        assert_eq!(header.content, json!("ORDER"));
        let style = header.style();
        assert_eq!(style.background, Some(HEADER_BACKGROUND));
        assert!(style.padding.is_some());
    }

    #[test]
    fn positions_stay_unset_until_layout() {
        let synthesizer = TemplateSynthesizer::new(GeneratorConfig::default());
        let template = synthesizer.synthesize(&json!({ "a": 1, "b": { "c": 2 } }));
        for element in &template.elements {
            assert_eq!(element.bounds.position.x, 0.0);
            assert_eq!(element.bounds.position.y, 0.0);
        }
    }
}
