use image::RgbaImage;

use crate::foundation::core::Offset;
use crate::foundation::math::mul_div255_u8;

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Paint `src` over `dst` using the source alpha as the paint mask.
///
/// Every channel, alpha included, becomes `src * a + dst * (1 - a)`. A fully transparent source
/// leaves `dst` unchanged and a fully opaque one replaces it.
pub fn masked_paste(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let a = u16::from(src[3]);
    if a == 0 {
        return dst;
    }
    if a == 255 {
        return src;
    }

    let inv = 255u16 - a;
    let mut out = [0u8; 4];
    for i in 0..4 {
        let sc = mul_div255_u8(u16::from(src[i]), a);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Overlap between a placed source image and the canvas, in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ClipRect {
    pub(crate) src_x: u32,
    pub(crate) src_y: u32,
    pub(crate) dst_x: u32,
    pub(crate) dst_y: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// Intersect a `src_w x src_h` image placed at `offset` with a `dst_w x dst_h` canvas.
pub(crate) fn clip(dst_w: u32, dst_h: u32, src_w: u32, src_h: u32, offset: Offset) -> Option<ClipRect> {
    fn axis(dst_len: u32, src_len: u32, off: i64) -> Option<(u32, u32, u32)> {
        let start = off.max(0);
        let end = (off + i64::from(src_len)).min(i64::from(dst_len));
        if end <= start {
            return None;
        }
        let src_start = (start - off) as u32;
        Some((src_start, start as u32, (end - start) as u32))
    }

    let (src_x, dst_x, width) = axis(dst_w, src_w, offset.x)?;
    let (src_y, dst_y, height) = axis(dst_h, src_h, offset.y)?;
    Some(ClipRect {
        src_x,
        src_y,
        dst_x,
        dst_y,
        width,
        height,
    })
}

/// Copy `src` onto `canvas` at `offset`, replacing the covered pixels.
pub fn copy_in_place(canvas: &mut RgbaImage, src: &RgbaImage, offset: Offset) {
    let Some(r) = clip(canvas.width(), canvas.height(), src.width(), src.height(), offset) else {
        return;
    };
    let (cw, sw) = (canvas.width() as usize, src.width() as usize);
    let row_len = r.width as usize * 4;
    let src_buf: &[u8] = src.as_raw();
    let dst_buf: &mut [u8] = canvas;
    for row in 0..r.height as usize {
        let s = ((r.src_y as usize + row) * sw + r.src_x as usize) * 4;
        let d = ((r.dst_y as usize + row) * cw + r.dst_x as usize) * 4;
        dst_buf[d..d + row_len].copy_from_slice(&src_buf[s..s + row_len]);
    }
}

/// Paint `src` onto `canvas` at `offset`, masked by the source's own alpha.
pub fn paste_masked_in_place(canvas: &mut RgbaImage, src: &RgbaImage, offset: Offset) {
    let Some(r) = clip(canvas.width(), canvas.height(), src.width(), src.height(), offset) else {
        return;
    };
    let (cw, sw) = (canvas.width() as usize, src.width() as usize);
    let row_len = r.width as usize * 4;
    let src_buf: &[u8] = src.as_raw();
    let dst_buf: &mut [u8] = canvas;
    for row in 0..r.height as usize {
        let s = ((r.src_y as usize + row) * sw + r.src_x as usize) * 4;
        let d = ((r.dst_y as usize + row) * cw + r.dst_x as usize) * 4;
        for (dp, sp) in dst_buf[d..d + row_len]
            .chunks_exact_mut(4)
            .zip(src_buf[s..s + row_len].chunks_exact(4))
        {
            let out = masked_paste([dp[0], dp[1], dp[2], dp[3]], [sp[0], sp[1], sp[2], sp[3]]);
            dp.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composite.rs"]
mod tests;
