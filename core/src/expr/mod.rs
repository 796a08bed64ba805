//! Predicate and expression helpers.
//!
//! Every boolean helper returns a self-contained fragment: leaf predicates are
//! wrapped in parentheses and combinators only add parentheses when they join
//! two or more children, so fragments can be nested without ambiguity.

pub mod agg;
pub mod cmp;
pub mod logical;
pub mod null;
pub mod set;
pub mod string;
pub mod subquery;
pub mod window;

pub use agg::*;
pub use cmp::*;
pub use logical::*;
pub use null::*;
pub use set::*;
pub use string::*;
pub use subquery::*;
pub use window::*;

use crate::sql::{SQL, SQLChunk, Token};
use crate::traits::SQLParam;

/// Returns true when the whole fragment is enclosed by one matching pair of
/// parentheses, e.g. `(a AND b)` but not `(a) AND (b)`.
pub(crate) fn is_parenthesized<V: SQLParam>(sql: &SQL<'_, V>) -> bool {
    let chunks = &sql.chunks;
    if !matches!(chunks.first(), Some(SQLChunk::Token(Token::LPAREN))) {
        return false;
    }
    let mut depth = 0usize;
    for (i, chunk) in chunks.iter().enumerate() {
        match chunk {
            SQLChunk::Token(Token::LPAREN) => depth += 1,
            SQLChunk::Token(Token::RPAREN) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1 == chunks.len();
                }
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::dialect::PlaceholderStyle;

    #[derive(Debug, Clone, PartialEq)]
    struct Text(&'static str);

    impl SQLParam for Text {}

    impl<'a> From<Text> for Cow<'a, Text> {
        fn from(value: Text) -> Self {
            Cow::Owned(value)
        }
    }

    type Sql = SQL<'static, Text>;

    fn col(name: &'static str) -> Sql {
        Sql::qualified("t", name)
    }

    fn p(value: &'static str) -> Sql {
        Sql::param(Text(value))
    }

    fn render(sql: &Sql) -> String {
        sql.sql(PlaceholderStyle::Numbered)
    }

    #[test]
    fn and_with_one_child_is_unwrapped() {
        let sql = and([eq(col("a"), p("x"))]);
        assert_eq!(render(&sql), r#"("t"."a" = $1)"#);
    }

    #[test]
    fn and_or_nest_with_parens() {
        let sql = and([
            eq(col("a"), p("x")),
            or([is_null(col("b")), eq(col("b"), Sql::raw("''"))]),
        ]);
        assert_eq!(
            render(&sql),
            r#"(("t"."a" = $1) AND (("t"."b" IS NULL) OR ("t"."b" = '')))"#
        );
    }

    #[test]
    fn and_skips_empty_fragments() {
        let sql = and([Sql::empty(), eq(col("a"), p("x")), Sql::empty()]);
        assert_eq!(render(&sql), r#"("t"."a" = $1)"#);
        assert!(and(Vec::<Sql>::new()).is_empty());
    }

    #[test]
    fn not_reuses_existing_parens() {
        assert_eq!(render(&not(eq(col("a"), p("x")))), r#"NOT ("t"."a" = $1)"#);
        let exists_sql = exists(Sql::token(Token::SELECT).push(SQLChunk::Number(1)));
        assert_eq!(render(&not(exists_sql)), "NOT (EXISTS (SELECT 1))");
    }

    #[test]
    fn cast_and_ilike() {
        let sql = ilike(cast_text(col("name")), p("%a%"));
        assert_eq!(render(&sql), r#"(CAST("t"."name" AS TEXT) ILIKE $1)"#);
        let sql = not_like(col("name"), p("%a%"));
        assert_eq!(render(&sql), r#"("t"."name" NOT LIKE $1)"#);
    }

    #[test]
    fn in_and_not_in_lists() {
        assert_eq!(
            render(&in_list(col("state"), [p("a"), p("b")])),
            r#"("t"."state" IN ($1, $2))"#
        );
        assert_eq!(
            render(&not_in_list(col("state"), [p("a")])),
            r#"("t"."state" NOT IN ($1))"#
        );
        assert_eq!(render(&in_list(col("state"), Vec::<Sql>::new())), "(1=0)");
    }

    #[test]
    fn in_subquery() {
        let subquery = Sql::token(Token::SELECT)
            .append(Sql::qualified("s", "id"))
            .push(Token::FROM)
            .append(Sql::ident("s"));
        assert_eq!(
            render(&in_list(col("id"), [subquery])),
            r#"("t"."id" IN (SELECT "s"."id" FROM "s"))"#
        );
    }

    #[test]
    fn not_exists_subquery() {
        let subquery = Sql::token(Token::SELECT)
            .push(SQLChunk::Number(1))
            .push(Token::FROM)
            .append(Sql::ident("s"))
            .push(Token::LIMIT)
            .push(SQLChunk::Number(1));
        assert_eq!(
            render(&not_exists(subquery)),
            r#"NOT EXISTS (SELECT 1 FROM "s" LIMIT 1)"#
        );
    }

    #[test]
    fn window_and_aggregates() {
        let rank = row_number_over(col("org_id"), col("created_at"), Direction::Desc);
        let sql = rank.alias("row_num");
        assert_eq!(
            render(&sql),
            r#"ROW_NUMBER() OVER (PARTITION BY "t"."org_id" ORDER BY "t"."created_at" DESC) AS "row_num""#
        );
        assert_eq!(render(&count_all()), "COUNT(*)");
        assert_eq!(
            render(&array_agg_distinct(col("name"))),
            r#"array_agg(DISTINCT "t"."name")"#
        );
    }

    #[test]
    fn parenthesized_detection() {
        assert!(is_parenthesized(&eq(col("a"), p("x"))));
        let left = eq(col("a"), p("x"));
        let two = left.push(Token::AND).append(eq(col("b"), p("y")));
        assert!(!is_parenthesized(&two));
    }
}
