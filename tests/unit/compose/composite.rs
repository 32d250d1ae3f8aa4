use super::*;

fn solid(w: u32, h: u32, px: Rgba8) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba(px))
}

#[test]
fn masked_paste_transparent_src_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(masked_paste(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn masked_paste_opaque_src_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(masked_paste(dst, src), src);
}

#[test]
fn masked_paste_half_alpha_blends_every_channel() {
    let dst = [0, 0, 0, 255];
    let src = [255, 255, 255, 128];
    let out = masked_paste(dst, src);
    assert_eq!(out[0], 128);
    assert_eq!(out[3], 64 + 127);
}

#[test]
fn clip_handles_negative_and_overflowing_offsets() {
    assert_eq!(
        clip(4, 4, 3, 3, Offset::new(-1, 2)),
        Some(ClipRect {
            src_x: 1,
            src_y: 0,
            dst_x: 0,
            dst_y: 2,
            width: 2,
            height: 2,
        })
    );
    assert_eq!(clip(4, 4, 3, 3, Offset::new(4, 0)), None);
    assert_eq!(clip(4, 4, 3, 3, Offset::new(0, -3)), None);
}

#[test]
fn copy_in_place_replaces_pixels_including_transparent_ones() {
    let mut canvas = solid(3, 3, [9, 9, 9, 255]);
    let src = solid(2, 1, [0, 0, 0, 0]);
    copy_in_place(&mut canvas, &src, Offset::new(1, 1));
    assert_eq!(canvas.get_pixel(1, 1).0, [0, 0, 0, 0]);
    assert_eq!(canvas.get_pixel(2, 1).0, [0, 0, 0, 0]);
    assert_eq!(canvas.get_pixel(0, 1).0, [9, 9, 9, 255]);
    assert_eq!(canvas.get_pixel(1, 2).0, [9, 9, 9, 255]);
}

#[test]
fn paste_masked_leaves_transparent_regions_untouched() {
    let mut canvas = solid(2, 2, [1, 2, 3, 255]);
    let mut src = solid(2, 2, [0, 0, 0, 0]);
    src.put_pixel(1, 0, image::Rgba([200, 100, 50, 255]));
    paste_masked_in_place(&mut canvas, &src, Offset::ORIGIN);
    assert_eq!(canvas.get_pixel(0, 0).0, [1, 2, 3, 255]);
    assert_eq!(canvas.get_pixel(1, 0).0, [200, 100, 50, 255]);
    assert_eq!(canvas.get_pixel(1, 1).0, [1, 2, 3, 255]);
}

#[test]
fn paste_masked_clips_at_canvas_edge() {
    let mut canvas = solid(2, 2, [0, 0, 0, 255]);
    let src = solid(2, 2, [255, 255, 255, 255]);
    paste_masked_in_place(&mut canvas, &src, Offset::new(1, 1));
    assert_eq!(canvas.get_pixel(1, 1).0, [255, 255, 255, 255]);
    assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(canvas.get_pixel(1, 0).0, [0, 0, 0, 255]);
}
