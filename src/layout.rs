// src/layout.rs
//! Pagination: assigns every element an absolute position and a page.
//!
//! Single-column, single-pass greedy vertical flow. No re-flow, no element
//! reordering, no cross-page splitting: an element taller than the page body
//! is placed anyway at the top of a page and simply overflows.

use crate::error::GenerationError;
use crate::model::{Element, Padding, Size};

/// The page-indexed, positioned output of the layout engine. Page numbers
/// are 1-based and strictly increasing.
#[derive(Debug, Clone)]
pub struct Placement {
    pub pages: Vec<PlacedPage>,
}

impl Placement {
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }
}

#[derive(Debug, Clone)]
pub struct PlacedPage {
    pub number: usize,
    pub elements: Vec<Element>,
}

impl PlacedPage {
    fn new(number: usize) -> Self {
        Self { number, elements: Vec::new() }
    }
}

pub struct Paginator {
    page_size: Size,
    margins: Padding,
}

impl Paginator {
    pub fn new(page_size: Size, margins: Padding) -> Self {
        Self { page_size, margins }
    }

    /// Flow the elements onto pages in input order.
    ///
    /// Each element is placed at the left margin; the vertical cursor starts
    /// at the top margin and advances by the element height. When an element
    /// does not fit in the remaining body height, a new page is started
    /// before placing it — unless the current page is still pristine, in
    /// which case the oversized element lands at its top and overflows.
    pub fn paginate(&self, elements: Vec<Element>) -> Result<Placement, GenerationError> {
        if !self.page_size.width.is_finite()
            || !self.page_size.height.is_finite()
            || !self.margins.top.is_finite()
            || !self.margins.bottom.is_finite()
            || !self.margins.left.is_finite()
        {
            return Err(GenerationError::layout("<page>", "non-finite page geometry"));
        }

        let mut pages = vec![PlacedPage::new(1)];
        let mut cursor_y = self.margins.top;

        for mut element in elements {
            let height = element.bounds.size.height;
            if !height.is_finite() || height < 0.0 {
                return Err(GenerationError::layout(
                    &element.id,
                    format!("non-finite element height {}", height),
                ));
            }

            let available = self.page_size.height - cursor_y - self.margins.bottom;
            if height > available && !self.is_pristine(&pages, cursor_y) {
                let number = pages.len() + 1;
                pages.push(PlacedPage::new(number));
                cursor_y = self.margins.top;
            }

            element.bounds.position.x = self.margins.left;
            element.bounds.position.y = cursor_y;
            cursor_y += height;

            pages
                .last_mut()
                .expect("at least one page")
                .elements
                .push(element);
        }

        log::debug!("paginated onto {} page(s)", pages.len());
        Ok(Placement { pages })
    }

    /// A page is pristine while nothing has been placed on it and the
    /// cursor still sits at the top margin. Oversized elements go onto a
    /// pristine page directly instead of burning a blank page first.
    fn is_pristine(&self, pages: &[PlacedPage], cursor_y: f32) -> bool {
        pages
            .last()
            .is_some_and(|p| p.elements.is_empty() && cursor_y <= self.margins.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bounds, ElementKind};
    use serde_json::json;

    fn element(id: &str, height: f32) -> Element {
        Element {
            id: id.to_string(),
            kind: ElementKind::Text,
            bounds: Bounds::sized(170.0, height),
            content: json!(""),
            style: None,
        }
    }

    fn paginator() -> Paginator {
        Paginator::new(Size::a4(), Padding::uniform(20.0))
    }

    #[test]
    fn elements_flow_down_one_page() {
        let placement = paginator()
            .paginate(vec![element("a", 10.0), element("b", 20.0)])
            .unwrap();
        assert_eq!(placement.total_pages(), 1);

        let page = &placement.pages[0];
        assert_eq!(page.number, 1);
        assert_eq!(page.elements[0].bounds.position.y, 20.0);
        assert_eq!(page.elements[1].bounds.position.y, 30.0);
        assert_eq!(page.elements[1].bounds.position.x, 20.0);
    }

    #[test]
    fn non_finite_height_is_a_layout_failure() {
        let err = paginator()
            .paginate(vec![element("bad", f32::NAN)])
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::LayoutFailed { ref element, .. } if element == "bad"
        ));
    }
}
