use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId};
use tracing::warn;

use crate::core::error::{ExtractError, Result};
use crate::core::geometry::BBox;
use crate::core::model::SourceKind;

/// US Letter, used when a page tree carries no usable MediaBox.
const DEFAULT_PAGE_BOX: BBox = BBox {
    x0: 0.0,
    y0: 0.0,
    x1: 612.0,
    y1: 792.0,
};

const MAX_PAGE_TREE_DEPTH: usize = 32;

/// An opened PDF. The whole document is loaded once and released on drop.
pub struct PdfReader {
    path: PathBuf,
    document: Document,
    pages: Vec<ObjectId>,
}

impl PdfReader {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }

        let document =
            Document::load(path).map_err(|err| ExtractError::open(SourceKind::Pdf, err))?;
        let pages = document.get_pages().into_values().collect();

        Ok(Self {
            path: path.to_path_buf(),
            document,
            pages,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// MediaBox of a page, inherited from the page tree when needed.
    pub fn page_box(&self, page_idx: usize) -> BBox {
        self.pages
            .get(page_idx)
            .and_then(|&page_id| self.media_box(page_id))
            .unwrap_or_else(|| {
                warn!(
                    page = page_idx + 1,
                    path = %self.path.display(),
                    "page has no usable MediaBox, assuming US Letter"
                );
                DEFAULT_PAGE_BOX
            })
    }

    /// Text of one page, one line per text object.
    pub fn page_text(&self, page_idx: usize) -> Result<String> {
        let page_number = u32::try_from(page_idx + 1)
            .map_err(|_| ExtractError::open(SourceKind::Pdf, "page number out of range"))?;
        self.document
            .extract_text(&[page_number])
            .map_err(|err| ExtractError::open(SourceKind::Pdf, format!("page {page_number}: {err}")))
    }

    fn media_box(&self, page_id: ObjectId) -> Option<BBox> {
        let mut node = self.document.get_dictionary(page_id).ok()?;
        for _ in 0..MAX_PAGE_TREE_DEPTH {
            if let Ok(rect) = node.get(b"MediaBox") {
                return self.rect(rect);
            }
            let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
            node = self.document.get_dictionary(parent).ok()?;
        }
        None
    }

    fn rect(&self, object: &Object) -> Option<BBox> {
        let object = match object {
            Object::Reference(id) => self.document.get_object(*id).ok()?,
            other => other,
        };
        let values = object.as_array().ok()?;
        if values.len() != 4 {
            return None;
        }
        let mut coords = [0.0f64; 4];
        for (slot, value) in coords.iter_mut().zip(values) {
            *slot = f64::from(value.as_float().ok()?);
        }
        let [a, b, c, d] = coords;
        Some(BBox::new(a.min(c), b.min(d), a.max(c), b.max(d)))
    }
}
