use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba(px))
}

#[test]
fn empty_stack_merges_to_none() {
    let stack = LayerStack::new(Canvas::new(4, 4));
    assert!(stack.is_empty());
    assert!(stack.merge().is_none());
}

#[test]
fn merge_uses_declared_canvas_size() {
    let mut stack = LayerStack::new(Canvas::new(6, 5));
    stack.add_layer(solid(2, 2, [1, 1, 1, 255]), Offset::ORIGIN);
    let out = stack.merge().unwrap();
    assert_eq!(out.dimensions(), (6, 5));
    assert_eq!(out.get_pixel(0, 0).0, [1, 1, 1, 255]);
    assert_eq!(out.get_pixel(5, 4).0, [0, 0, 0, 0]);
}

#[test]
fn merge_does_not_mutate_layers() {
    let mut stack = LayerStack::new(Canvas::new(2, 2));
    stack.add_layer(solid(2, 2, [0, 0, 0, 255]), Offset::ORIGIN);
    stack.add_layer(solid(1, 1, [255, 0, 0, 255]), Offset::ORIGIN);
    let _ = stack.merge().unwrap();
    assert_eq!(stack.layers()[0].image.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn later_layers_paint_over_earlier_ones() {
    let mut stack = LayerStack::new(Canvas::new(3, 1));
    stack.add_layer(solid(3, 1, [0, 0, 0, 255]), Offset::ORIGIN);
    stack.add_layer(solid(1, 1, [255, 0, 0, 255]), Offset::new(1, 0));
    stack.add_layer(solid(1, 1, [0, 255, 0, 0]), Offset::new(2, 0));
    let out = stack.merge().unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(out.get_pixel(1, 0).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(2, 0).0, [0, 0, 0, 255]);
}

#[test]
fn insert_at_bottom_becomes_the_base() {
    let mut stack = LayerStack::new(Canvas::new(1, 1));
    stack.add_layer(solid(1, 1, [0, 0, 0, 0]), Offset::ORIGIN);
    stack.insert_at_bottom(solid(1, 1, [7, 7, 7, 255]), Offset::ORIGIN);
    assert_eq!(stack.layers()[0].image.get_pixel(0, 0).0, [7, 7, 7, 255]);
    assert_eq!(stack.merge().unwrap().get_pixel(0, 0).0, [7, 7, 7, 255]);
}

#[test]
fn insert_layer_shifts_later_layers() {
    let mut stack = LayerStack::new(Canvas::new(1, 1));
    stack.add_layer(solid(1, 1, [1, 0, 0, 255]), Offset::ORIGIN);
    stack.add_layer(solid(1, 1, [3, 0, 0, 255]), Offset::ORIGIN);
    stack
        .insert_layer(1, solid(1, 1, [2, 0, 0, 255]), Offset::ORIGIN)
        .unwrap();
    let reds: Vec<u8> = stack.layers().iter().map(|l| l.image.get_pixel(0, 0).0[0]).collect();
    assert_eq!(reds, vec![1, 2, 3]);

    stack
        .insert_layer(3, solid(1, 1, [4, 0, 0, 255]), Offset::ORIGIN)
        .unwrap();
    assert!(
        stack
            .insert_layer(9, solid(1, 1, [0, 0, 0, 255]), Offset::ORIGIN)
            .is_err()
    );
}

#[test]
fn remove_layer_returns_it_and_rejects_out_of_range() {
    let mut stack = LayerStack::new(Canvas::new(1, 1));
    stack.add_layer(solid(1, 1, [1, 0, 0, 255]), Offset::new(3, 4));
    let removed = stack.remove_layer(0).unwrap();
    assert_eq!(removed.offset, Offset::new(3, 4));
    assert!(stack.is_empty());
    assert!(matches!(
        stack.remove_layer(0),
        Err(StampError::Validation(_))
    ));
}
