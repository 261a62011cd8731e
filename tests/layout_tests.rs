use reportgen::{Bounds, Element, ElementKind, GenerationError, Padding, Paginator, Size};
use serde_json::json;

const PAGE: Size = Size { width: 210.0, height: 297.0 };
const MARGIN: f32 = 20.0;
const BODY_HEIGHT: f32 = PAGE.height - 2.0 * MARGIN;

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
    Paginator::new(PAGE, Padding::uniform(MARGIN))
}

#[test]
fn full_body_elements_take_one_page_each() {
    let elements = (0..3)
        .map(|i| element(&format!("e{}", i), BODY_HEIGHT))
        .collect();
    let placement = paginator().paginate(elements).unwrap();

    assert_eq!(placement.total_pages(), 3);
    for (index, page) in placement.pages.iter().enumerate() {
        assert_eq!(page.number, index + 1);
        assert_eq!(page.elements.len(), 1);
        let bounds = page.elements[0].bounds;
        assert_eq!(bounds.position.x, MARGIN);
        assert_eq!(bounds.position.y, MARGIN);
    }
}

#[test]
fn oversized_element_is_placed_not_dropped() {
    let placement = paginator()
        .paginate(vec![element("huge", BODY_HEIGHT * 2.0)])
        .unwrap();

    // Placed at the top of the first page and allowed to overflow; no blank
    // page is burned in front of it.
    assert_eq!(placement.total_pages(), 1);
    let placed = &placement.pages[0].elements[0];
    assert_eq!(placed.bounds.position.x, MARGIN);
    assert_eq!(placed.bounds.position.y, MARGIN);
}

#[test]
fn oversized_element_after_content_opens_a_fresh_page() {
    let placement = paginator()
        .paginate(vec![
            element("small", 10.0),
            element("huge", BODY_HEIGHT * 2.0),
            element("after", 10.0),
        ])
        .unwrap();

    assert_eq!(placement.total_pages(), 3);
    assert_eq!(placement.pages[0].elements[0].id, "small");
    assert_eq!(placement.pages[1].elements[0].id, "huge");
    assert_eq!(placement.pages[1].elements[0].bounds.position.y, MARGIN);
    // The overflowing page is full, so the next element starts another one.
    assert_eq!(placement.pages[2].elements[0].id, "after");
}

#[test]
fn elements_pack_until_the_body_is_exhausted() {
    // 25 elements of 10.5 each: 24 fit in 257 (252.0), the 25th starts page 2.
    let elements = (0..25)
        .map(|i| element(&format!("e{}", i), 10.5))
        .collect();
    let placement = paginator().paginate(elements).unwrap();

    assert_eq!(placement.total_pages(), 2);
    assert_eq!(placement.pages[0].elements.len(), 24);
    assert_eq!(placement.pages[1].elements.len(), 1);
    assert_eq!(placement.pages[1].elements[0].bounds.position.y, MARGIN);
}

#[test]
fn page_numbers_increase_monotonically() {
    let elements = (0..10)
        .map(|i| element(&format!("e{}", i), 100.0))
        .collect();
    let placement = paginator().paginate(elements).unwrap();

    let numbers: Vec<usize> = placement.pages.iter().map(|p| p.number).collect();
    let mut sorted = numbers.clone();
    sorted.sort_unstable();
    assert_eq!(numbers, sorted);
    assert_eq!(numbers[0], 1);
}

#[test]
fn empty_input_yields_a_single_empty_page() {
    let placement = paginator().paginate(vec![]).unwrap();
    assert_eq!(placement.total_pages(), 1);
    assert!(placement.pages[0].elements.is_empty());
}

#[test]
fn non_finite_geometry_fails_with_the_element_id() {
    let err = paginator()
        .paginate(vec![element("ok", 10.0), element("broken", f32::INFINITY)])
        .unwrap_err();
    match err {
        GenerationError::LayoutFailed { element, .. } => assert_eq!(element, "broken"),
        other => panic!("expected LayoutFailed, got {:?}", other),
    }

    let bad_page = Paginator::new(Size::new(210.0, f32::NAN), Padding::uniform(MARGIN));
    assert!(matches!(
        bad_page.paginate(vec![element("a", 10.0)]),
        Err(GenerationError::LayoutFailed { .. })
    ));
}
