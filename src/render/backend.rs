use image::ImageEncoder;

use crate::foundation::error::{LifegridError, LifegridResult};

/// A rendered frame as RGBA8 pixels.
///
/// The raster backend produces **premultiplied alpha**; the `premultiplied` flag makes this
/// explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha RGBA of pixel `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px: [u8; 4] = self.data.get(idx..idx + 4)?.try_into().ok()?;
        Some(if self.premultiplied {
            unpremul_rgba8(px)
        } else {
            px
        })
    }

    /// Copy of the frame with straight alpha.
    pub fn to_straight(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            for px in out.chunks_exact_mut(4) {
                let straight = unpremul_rgba8([px[0], px[1], px[2], px[3]]);
                px.copy_from_slice(&straight);
            }
        }
        out
    }

    /// Encode as PNG (straight alpha).
    pub fn encode_png(&self) -> LifegridResult<Vec<u8>> {
        let expected = (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4);
        if self.data.len() != expected {
            return Err(LifegridError::render("frame byte len mismatch"));
        }
        let straight = self.to_straight();
        let mut out = Vec::new();
        image::codecs::png::PngEncoder::new(&mut out)
            .write_image(
                &straight,
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| LifegridError::render(format!("png encode failed: {e}")))?;
        Ok(out)
    }
}

fn unpremul_rgba8(px: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = px;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return px;
    }
    let a16 = u16::from(a);
    let un = |c: u8| -> u8 { ((u16::from(c) * 255 + a16 / 2) / a16).min(255) as u8 };
    [un(r), un(g), un(b), a]
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
