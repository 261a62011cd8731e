// src/render/table.rs
use super::text::type_of;
use super::{ElementRenderer, RenderContext};
use crate::backend::{RectStyle, Stroke};
use crate::error::GenerationError;
use crate::model::{Alignment, Element};
use crate::synthesis::format_value;
use serde_json::Value;

/// Small horizontal inset for left/right aligned cell text.
const CELL_INSET: f32 = 2.0;

/// Paints a grid of equal-width columns.
///
/// Content must be an array of rows, each an array of cell values with a
/// consistent column count; anything else is a `RenderFailed`, never a
/// silent truncation. Cell values are stringified with the same formatting
/// rules as field synthesis. Cells default to center alignment.
pub struct TableRenderer;

impl ElementRenderer for TableRenderer {
    fn render(&self, ctx: &mut RenderContext<'_>, element: &Element) -> Result<(), GenerationError> {
        let rows = parse_rows(element)?;
        let Some(first) = rows.first() else {
            return Ok(()); // an empty table draws nothing
        };
        let columns = first.len();
        if columns == 0 {
            return Ok(());
        }

        let style = element.style();
        let bounds = element.bounds;
        let font_size = style.font_size();

        ctx.backend.set_font(style.font_family(), font_size);
        ctx.backend.set_text_color(style.font_color());

        let cell_width = bounds.size.width / columns as f32;
        let font_height = ctx.point_to_unit(font_size);
        let cell_height = font_height * 2.0;
        let alignment = style.alignment_or(Alignment::Center);

        for (row_index, row) in rows.iter().enumerate() {
            let y = bounds.position.y + row_index as f32 * cell_height;
            for (col_index, cell) in row.iter().enumerate() {
                let x = bounds.position.x + col_index as f32 * cell_width;

                if let Some(border) = style.border {
                    ctx.backend.draw_rect(
                        x,
                        y,
                        cell_width,
                        cell_height,
                        &RectStyle::stroked(Stroke {
                            width: border.width,
                            color: border.color,
                            style: border.style,
                        }),
                    );
                }

                let measured = ctx.backend.measure_string_width(cell);
                let text_x = match alignment {
                    Alignment::Left => x + CELL_INSET,
                    Alignment::Center => x + (cell_width - measured) / 2.0,
                    Alignment::Right => x + cell_width - measured - CELL_INSET,
                    Alignment::Justify => x,
                };
                // Vertically center the run inside the cell.
                let text_y = y + (cell_height - font_height) / 2.0 + font_height;
                ctx.backend.draw_text(text_x, text_y, cell);
            }
        }

        Ok(())
    }
}

/// Validate the 2-D shape of table content and stringify every cell.
fn parse_rows(element: &Element) -> Result<Vec<Vec<String>>, GenerationError> {
    let Value::Array(raw_rows) = &element.content else {
        return Err(GenerationError::render(
            &element.id,
            format!(
                "table content must be an array of rows, got {}",
                type_of(&element.content)
            ),
        ));
    };

    let mut rows = Vec::with_capacity(raw_rows.len());
    let mut columns = None;
    for (index, raw_row) in raw_rows.iter().enumerate() {
        let Value::Array(cells) = raw_row else {
            return Err(GenerationError::render(
                &element.id,
                format!("row {} must be an array, got {}", index, type_of(raw_row)),
            ));
        };
        match columns {
            None => columns = Some(cells.len()),
            Some(expected) if expected != cells.len() => {
                return Err(GenerationError::render(
                    &element.id,
                    format!(
                        "row {} has {} columns, expected {}",
                        index,
                        cells.len(),
                        expected
                    ),
                ));
            }
            Some(_) => {}
        }
        rows.push(cells.iter().map(format_value).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bounds, ElementKind};
    use serde_json::json;

    fn table_element(content: Value) -> Element {
        Element {
            id: "table-items".to_string(),
            kind: ElementKind::Table,
            bounds: Bounds::sized(170.0, 40.0),
            content,
            style: None,
        }
    }

    #[test]
    fn cells_round_trip_through_shared_formatting() {
        let element = table_element(json!([["Product A", 2, 29.99, true]]));
        let rows = parse_rows(&element).unwrap();
        assert_eq!(rows, vec![vec!["Product A", "2", "29.99", "true"]]);
    }

    #[test]
    fn ragged_rows_are_surfaced_not_truncated() {
        let element = table_element(json!([["a", "b"], ["c"]]));
        let err = parse_rows(&element).unwrap_err();
        assert!(matches!(err, GenerationError::RenderFailed { .. }));
    }

    #[test]
    fn non_array_content_is_rejected() {
        let element = table_element(json!("not a table"));
        assert!(parse_rows(&element).is_err());

        let element = table_element(json!([{"k": 1}]));
        assert!(parse_rows(&element).is_err());
    }
}
