use crate::core::model::TablePosition;

/// Maps a table's position to the `page` value reported for it.
///
/// PDF tables report their 1-based page. DOCX has no page or section
/// boundaries visible to the table walker, so the value is only a rough
/// estimate: one section per table while the document has at most
/// `bucket_size` tables, otherwise `bucket_size` tables per section.
pub fn assign_location(position: &TablePosition, bucket_size: usize) -> usize {
    match *position {
        TablePosition::Page { page_idx, .. } => page_idx + 1,
        TablePosition::Ordinal { index, total } => estimate_section(index, total, bucket_size),
    }
}

fn estimate_section(index: usize, total: usize, bucket_size: usize) -> usize {
    let bucket_size = bucket_size.max(1);
    if total <= bucket_size {
        index + 1
    } else {
        index / bucket_size + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ordinal_locations(total: usize) -> Vec<usize> {
        (0..total)
            .map(|index| assign_location(&TablePosition::Ordinal { index, total }, 5))
            .collect()
    }

    #[test]
    fn pdf_location_is_one_based_page() {
        let position = TablePosition::Page {
            page_idx: 0,
            table_idx: 3,
            width: 612.0,
            height: 792.0,
        };
        assert_eq!(assign_location(&position, 5), 1);
    }

    #[test]
    fn few_docx_tables_get_one_section_each() {
        assert_eq!(ordinal_locations(3), vec![1, 2, 3]);
        assert_eq!(ordinal_locations(5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn many_docx_tables_are_bucketed_by_five() {
        assert_eq!(
            ordinal_locations(12),
            vec![1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3]
        );
    }

    #[test]
    fn custom_bucket_size() {
        let position = TablePosition::Ordinal { index: 7, total: 10 };
        assert_eq!(assign_location(&position, 3), 3);
    }
}
