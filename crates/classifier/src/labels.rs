//! Category label file loading.

use std::path::Path;

use quickdraw_common::error::{QuickdrawError, QuickdrawResult};
use quickdraw_sketch_model::prediction::CategoryList;

/// Load the category list: one label per line, order matching the model
/// output vector.
pub fn load_labels(path: &Path) -> QuickdrawResult<CategoryList> {
    let bytes = std::fs::read(path).map_err(|e| QuickdrawError::from_io_at(e, path))?;
    let content = String::from_utf8(bytes).map_err(|e| {
        QuickdrawError::label_load(format!("{} is not valid UTF-8: {e}", path.display()))
    })?;
    let labels = CategoryList::parse(&content);
    tracing::info!(path = %path.display(), count = labels.len(), "Labels loaded");
    Ok(labels)
}
