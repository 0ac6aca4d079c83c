use std::path::Path;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};
use crate::error::ExportResult;
use super::capture::Bitmap;

const POINTS_PER_MM: f32 = 72.0 / 25.4;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Handle to an image embedded in a [`PdfDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHandle(usize);

#[derive(Debug, Clone)]
struct EmbeddedImage {
    jpeg: Vec<u8>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ImagePlacement {
    image: ImageHandle,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

/// A multi-page PDF made of placed images.
///
/// Placements use mm measured from the top-left corner of the page, like the
/// pagination does. Images are stored once and shared by every page that
/// shows them. Nothing touches the disk until [`PdfDocument::save`].
#[derive(Debug, Clone)]
pub struct PdfDocument {
    paper_width: f32,
    paper_height: f32,
    images: Vec<EmbeddedImage>,
    pages: Vec<Vec<ImagePlacement>>,
}

impl PdfDocument {
    /// Creates a document with one empty page of the given paper size (mm).
    pub fn new(paper_width: f32, paper_height: f32) -> Self {
        Self {
            paper_width,
            paper_height,
            images: Vec::new(),
            pages: vec![Vec::new()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of image placements on a page
    pub fn placements_on(&self, page: usize) -> usize {
        self.pages.get(page).map_or(0, Vec::len)
    }

    /// Encodes a bitmap as JPEG and stores it for later placement.
    pub fn embed_jpeg(&mut self, bitmap: &Bitmap, quality: u8) -> ExportResult<ImageHandle> {
        let jpeg = bitmap.to_jpeg(quality)?;
        self.images.push(EmbeddedImage {
            jpeg,
            width: bitmap.width(),
            height: bitmap.height(),
        });
        Ok(ImageHandle(self.images.len() - 1))
    }

    /// Places an image on the current (last) page.
    pub fn add_image(&mut self, image: ImageHandle, x: f32, y: f32, width: f32, height: f32) {
        let placement = ImagePlacement { image, x, y, width, height };
        if let Some(page) = self.pages.last_mut() {
            page.push(placement);
        }
    }

    /// Starts a new, empty page.
    pub fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    /// Serializes the document.
    pub fn finish(&self) -> Vec<u8> {
        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();
        let image_ids: Vec<Ref> = self.images.iter().map(|_| alloc.bump()).collect();
        let page_ids: Vec<(Ref, Ref)> = self.pages.iter().map(|_| (alloc.bump(), alloc.bump())).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(page_ids.len() as i32);

        for (image, id) in self.images.iter().zip(&image_ids) {
            let mut xobject = pdf.image_xobject(*id, &image.jpeg);
            xobject.filter(Filter::DctDecode);
            xobject.width(image.width as i32);
            xobject.height(image.height as i32);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);
        }

        let names: Vec<String> = (0..self.images.len()).map(|i| format!("Im{}", i)).collect();
        let media_box = Rect::new(0.0, 0.0, mm_to_pt(self.paper_width), mm_to_pt(self.paper_height));

        for (placements, (page_id, content_id)) in self.pages.iter().zip(&page_ids) {
            {
                let mut page = pdf.page(*page_id);
                page.media_box(media_box);
                page.parent(page_tree_id);
                page.contents(*content_id);
                let mut resources = page.resources();
                let mut x_objects = resources.x_objects();
                for (name, id) in names.iter().zip(&image_ids) {
                    x_objects.pair(Name(name.as_bytes()), *id);
                }
            }

            let mut content = Content::new();
            for placement in placements {
                let width = mm_to_pt(placement.width);
                let height = mm_to_pt(placement.height);
                // PDF space grows upwards from the bottom-left corner
                let x = mm_to_pt(placement.x);
                let y = mm_to_pt(self.paper_height - placement.y - placement.height);
                content.save_state();
                content.transform([width, 0.0, 0.0, height, x, y]);
                content.x_object(Name(names[placement.image.0].as_bytes()));
                content.restore_state();
            }
            pdf.stream(*content_id, &content.finish());
        }

        pdf.finish()
    }

    /// Writes the document to `path`.
    ///
    /// The bytes go to a sibling temporary file first and are renamed into
    /// place, so a failed write never leaves a truncated PDF at `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: &Path) -> ExportResult<()> {
        let bytes = self.finish();
        let mut partial = path.as_os_str().to_owned();
        partial.push(".part");
        let partial = std::path::PathBuf::from(partial);

        if let Err(err) = std::fs::write(&partial, &bytes) {
            let _ = std::fs::remove_file(&partial);
            return Err(err.into());
        }
        std::fs::rename(&partial, path)?;
        log::info!("Wrote {} ({} pages, {} bytes)", path.display(), self.page_count(), bytes.len());
        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self, path: &Path) -> ExportResult<()> {
        log::warn!("File saving not supported on WASM: {}", path.display());
        Err(crate::error::ExportError::Unsupported)
    }
}
