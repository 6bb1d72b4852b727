mod decorate;
mod flow;
mod layout;
mod table;
mod watermark;

pub use decorate::{PageMark, WATERMARK_ALPHA, WATERMARK_SIZE, page_marks};
pub use flow::{
    BottomPinSpacer, Flowable, PIN_SAFETY_MARGIN, PageLayout, Placement, PlacementKind, paginate,
    stack_height,
};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};

use crate::config::RenderOptions;
use crate::error::Error;
use crate::fonts::register_fonts;
use crate::record::Record;
use crate::sections::build_sections;
use crate::style::StyleSheet;

use decorate::{WATERMARK_GSTATE, WATERMARK_XOBJECT, paint};

/// Lay out `record` without writing a PDF. Returns one entry per page with
/// the positions of everything the flow placed on it.
pub fn layout_record(record: &Record, options: &RenderOptions) -> Result<Vec<PageLayout>, Error> {
    let styles = StyleSheet::new();
    let blocks = build_sections(record, &styles, &options.geometry);
    paginate(&blocks, &options.geometry)
}

pub fn render(record: &Record, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let geometry = &options.geometry;
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    // Phase 1: resources shared by every page
    let font_pairs = register_fonts(&mut pdf, &mut alloc);

    let watermark = options.watermark.as_deref().and_then(watermark::load);
    let watermark_refs = watermark.as_ref().map(|wm| {
        let xobj_ref = wm.embed(&mut pdf, &mut alloc);
        let gs_ref = alloc();
        pdf.ext_graphics(gs_ref)
            .non_stroking_alpha(WATERMARK_ALPHA)
            .stroking_alpha(WATERMARK_ALPHA);
        (xobj_ref, gs_ref)
    });

    let t_resources = t0.elapsed();

    // Phase 2: flow the blocks across pages
    let pages = layout_record(record, options)?;

    let t_layout = t0.elapsed();

    // Phase 3: decorations go underneath the flowed content
    let marks = page_marks(
        record,
        geometry,
        &options.footer_label,
        watermark_refs.is_some(),
    );
    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, page) in pages.into_iter().enumerate() {
        let mut chrome = Content::new();
        paint(&mut chrome, &marks);
        let mut raw = chrome.finish().as_slice().to_vec();
        raw.push(b'\n');
        raw.extend_from_slice(page.content.finish().as_slice());
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, geometry.page_width, geometry.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            for (name, font_ref) in &font_pairs {
                fonts.pair(Name(name.as_bytes()), *font_ref);
            }
        }
        if let Some((xobj_ref, gs_ref)) = watermark_refs {
            resources
                .x_objects()
                .pair(Name(WATERMARK_XOBJECT.as_bytes()), xobj_ref);
            resources
                .ext_g_states()
                .pair(Name(WATERMARK_GSTATE.as_bytes()), gs_ref);
        }
    }

    let t_assembly = t0.elapsed();

    log::info!(
        "Render phases: resources={:.1}ms, layout={:.1}ms, assembly={:.1}ms ({} pages)",
        t_resources.as_secs_f64() * 1000.0,
        (t_layout - t_resources).as_secs_f64() * 1000.0,
        (t_assembly - t_layout).as_secs_f64() * 1000.0,
        n,
    );

    Ok(pdf.finish())
}
