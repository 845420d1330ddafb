use serde::{Deserialize, Serialize};
use validator::Validate;

/// One Nobel Prize award recipient.
///
/// `id` is assigned by the dataset, not by MongoDB; the document's `_id` is
/// left to the database and never surfaces in the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct LaureateRecord {
    pub id: i64,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1901))]
    pub year: i32,
    pub country: String,
    #[validate(length(min = 1))]
    pub category: String,
    pub description: String,
}
