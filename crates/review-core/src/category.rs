use review_models::category::{
    BOOKS_LABEL, BOOKS_LITERATURE_LABEL, INSTANT_VIDEO_CATEGORY, VIDEO_ENTERTAINMENT_CATEGORY,
};

/// Map source category labels onto the display taxonomy.
///
/// Labels mentioning "Book" get every "Books" expanded to "Books & Literature";
/// the exact label "Amazon Instant Video" becomes "Video & Entertainment".
pub fn rewrite_category(category: &str) -> String {
    let category = if category.contains("Book") {
        category.replace(BOOKS_LABEL, BOOKS_LITERATURE_LABEL)
    } else {
        category.to_string()
    };

    if category == INSTANT_VIDEO_CATEGORY {
        VIDEO_ENTERTAINMENT_CATEGORY.to_string()
    } else {
        category
    }
}
