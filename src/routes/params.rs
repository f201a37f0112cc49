use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    /// Page and size clamped to usable values. The offset saturates instead
    /// of overflowing for absurd page numbers.
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryListQuery {
    pub top_level: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryProductsQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RelatedQuery {
    pub limit: Option<u64>,
}

impl RelatedQuery {
    pub fn normalize(&self) -> u64 {
        self.limit.unwrap_or(4).clamp(1, 20)
    }
}
