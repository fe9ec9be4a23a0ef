use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};

const LIKE_ESCAPE: char = '\\';

/// Escape LIKE wildcards so `needle` matches literally.
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

fn contains_pattern(needle: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(needle))).escape(LIKE_ESCAPE)
}

/// `expr LIKE '%needle%'`, case-sensitive.
pub fn contains(expr: impl Into<SimpleExpr>, needle: &str) -> SimpleExpr {
    Expr::expr(expr).like(contains_pattern(needle))
}

/// `expr ILIKE '%needle%'`. Both sides are case-folded by the database,
/// under its own collation.
pub fn icontains(expr: impl Into<SimpleExpr>, needle: &str) -> SimpleExpr {
    Expr::expr(expr).ilike(contains_pattern(needle))
}

/// `expr ILIKE 'value'` with wildcards escaped: a case-insensitive equality.
pub fn iexact(expr: impl Into<SimpleExpr>, value: &str) -> SimpleExpr {
    Expr::expr(expr).ilike(LikeExpr::new(escape_like(value)).escape(LIKE_ESCAPE))
}
