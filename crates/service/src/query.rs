//! Filter translation shared by the repositories.

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::ColumnTrait;

/// `lower(col) LIKE '%needle%'`, or no predicate for an empty needle.
pub(crate) fn contains_ci<C>(col: C, needle: &str) -> Option<SimpleExpr>
where
    C: ColumnTrait + 'static,
{
    if needle.is_empty() {
        return None;
    }
    let pattern = format!("%{}%", needle.to_lowercase());
    Some(Expr::expr(Func::lower(Expr::col(col))).like(pattern))
}

/// In-memory counterpart of [`contains_ci`], used by the test doubles.
pub(crate) fn text_contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Clamp a store-level offset/limit into slice bounds.
pub(crate) fn window(offset: u64, limit: u64) -> (usize, usize) {
    (usize::try_from(offset).unwrap_or(usize::MAX), usize::try_from(limit).unwrap_or(usize::MAX))
}
