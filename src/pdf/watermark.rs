use std::path::Path;

use pdf_writer::{Filter, Pdf, Ref};

/// A decoded watermark, ready to be written as an image XObject.
pub(crate) struct Watermark {
    width: u32,
    height: u32,
    rgb: Vec<u8>,           // zlib-compressed
    alpha: Option<Vec<u8>>, // zlib-compressed, only when some pixel is translucent
}

/// Load and decode the watermark image. A missing file is not an error; an
/// unreadable or undecodable one is logged and skipped as well.
pub(crate) fn load(path: &Path) -> Option<Watermark> {
    if !path.exists() {
        log::debug!("no watermark at {}", path.display());
        return None;
    }
    let decoded = match image::ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| e.to_string())
        .and_then(|r| r.decode().map_err(|e| e.to_string()))
    {
        Ok(img) => img,
        Err(e) => {
            log::warn!("skipping watermark {}: {e}", path.display());
            return None;
        }
    };

    let rgba: image::RgbaImage = decoded.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

    let rgb_data: Vec<u8> = rgba
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    let rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);
    let alpha = has_alpha.then(|| {
        let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
        miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6)
    });

    log::debug!(
        "watermark {} decoded: {}x{} alpha={}",
        path.display(),
        width,
        height,
        has_alpha
    );
    Some(Watermark {
        width,
        height,
        rgb,
        alpha,
    })
}

impl Watermark {
    /// Write the image (and its soft mask) and return the XObject reference.
    pub(crate) fn embed(&self, pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> Ref {
        let xobj_ref = alloc();
        let smask_ref = self.alpha.as_ref().map(|alpha| {
            let mask_ref = alloc();
            let mut mask = pdf.image_xobject(mask_ref, alpha);
            mask.filter(Filter::FlateDecode);
            mask.width(self.width as i32);
            mask.height(self.height as i32);
            mask.color_space().device_gray();
            mask.bits_per_component(8);
            mask_ref
        });

        let mut xobj = pdf.image_xobject(xobj_ref, &self.rgb);
        xobj.filter(Filter::FlateDecode);
        xobj.width(self.width as i32);
        xobj.height(self.height as i32);
        xobj.color_space().device_rgb();
        xobj.bits_per_component(8);
        if let Some(mask_ref) = smask_ref {
            xobj.s_mask(mask_ref);
        }
        xobj_ref
    }
}
