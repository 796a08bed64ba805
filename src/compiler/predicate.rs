//! Boolean expression tree produced by the filter and search compilers.

use std::borrow::Cow;

use rql_core::{SQL, ToSQL, expr};

use crate::schema::{CmpOp, ColumnRef};
use crate::value::Value;

pub(crate) type Sql = SQL<'static, Value>;

/// Operand of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// `"table"."column"`
    Column(ColumnRef),
    /// An output column of a derived table: `"alias"."name"`.
    Output {
        qualifier: &'static str,
        name: &'static str,
    },
    /// An unqualified output name: `"name"`.
    Alias(&'static str),
    /// `CAST(term AS TEXT)`
    Text(Box<Term>),
    /// A bound parameter.
    Param(Value),
    /// Inline SQL, never user input verbatim.
    Literal(Cow<'static, str>),
    /// An unsigned integer literal.
    Number(u64),
}

impl Term {
    pub fn text(self) -> Self {
        Term::Text(Box::new(self))
    }

    pub fn param(value: impl Into<Value>) -> Self {
        Term::Param(value.into())
    }
}

impl ToSQL<'static, Value> for Term {
    fn to_sql(&self) -> Sql {
        self.clone().into_sql()
    }

    fn into_sql(self) -> Sql {
        match self {
            Term::Column(column) => column.to_sql(),
            Term::Output { qualifier, name } => SQL::qualified(qualifier, name),
            Term::Alias(name) => SQL::ident(name),
            Term::Text(inner) => expr::cast_text(inner.into_sql()),
            Term::Param(value) => SQL::param(value),
            Term::Literal(text) => SQL::raw(text),
            Term::Number(n) => SQL::number(n),
        }
    }
}

/// A compiled boolean condition.
#[derive(Debug, Clone)]
pub enum Predicate {
    Compare {
        left: Term,
        op: CmpOp,
        right: Term,
    },
    IsNull {
        term: Term,
        negated: bool,
    },
    /// `[CAST(term AS TEXT) ]{LIKE|ILIKE} pattern`
    Like {
        term: Term,
        pattern: Value,
        negated: bool,
        case_insensitive: bool,
    },
    In {
        term: Term,
        values: Vec<Value>,
        negated: bool,
    },
    /// `term IN (subquery)`
    InSubquery { term: Term, subquery: Sql },
    Exists { subquery: Sql, negated: bool },
    /// Fixed SQL from a schema definition.
    Raw(&'static str),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn compare(left: Term, op: CmpOp, right: Term) -> Self {
        Predicate::Compare { left, op, right }
    }

    pub fn eq(left: Term, right: Term) -> Self {
        Self::compare(left, CmpOp::Eq, right)
    }

    pub fn is_null(term: Term) -> Self {
        Predicate::IsNull {
            term,
            negated: false,
        }
    }

    pub fn is_not_null(term: Term) -> Self {
        Predicate::IsNull {
            term,
            negated: true,
        }
    }

    pub fn exists(subquery: Sql) -> Self {
        Predicate::Exists {
            subquery,
            negated: false,
        }
    }

    pub fn not_exists(subquery: Sql) -> Self {
        Predicate::Exists {
            subquery,
            negated: true,
        }
    }

    /// True when the predicate renders to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Predicate::And(children) | Predicate::Or(children) => {
                children.iter().all(Predicate::is_empty)
            }
            Predicate::Not(inner) => inner.is_empty(),
            _ => false,
        }
    }
}

impl ToSQL<'static, Value> for Predicate {
    fn to_sql(&self) -> Sql {
        self.clone().into_sql()
    }

    fn into_sql(self) -> Sql {
        match self {
            Predicate::Compare { left, op, right } => expr::compare(left, op.token(), right),
            Predicate::IsNull {
                term,
                negated: false,
            } => expr::is_null(term),
            Predicate::IsNull {
                term,
                negated: true,
            } => expr::is_not_null(term),
            Predicate::Like {
                term,
                pattern,
                negated,
                case_insensitive,
            } => match (case_insensitive, negated) {
                (true, false) => expr::ilike(term.text(), pattern),
                (true, true) => expr::not_ilike(term.text(), pattern),
                (false, false) => expr::like(term, pattern),
                (false, true) => expr::not_like(term, pattern),
            },
            Predicate::In {
                term,
                values,
                negated: false,
            } => expr::in_list(term, values),
            Predicate::In {
                term,
                values,
                negated: true,
            } => expr::not_in_list(term, values),
            Predicate::InSubquery { term, subquery } => expr::in_list(term, [subquery]),
            Predicate::Exists {
                subquery,
                negated: false,
            } => expr::exists(subquery),
            Predicate::Exists {
                subquery,
                negated: true,
            } => expr::not_exists(subquery),
            Predicate::Raw(sql) => SQL::raw(sql).parens(),
            Predicate::And(children) => expr::and(children),
            Predicate::Or(children) => expr::or(children),
            Predicate::Not(inner) if inner.is_empty() => SQL::empty(),
            Predicate::Not(inner) => expr::not(*inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rql_core::{PlaceholderStyle, Token};

    const NAME: ColumnRef = ColumnRef::new("users", "name");

    fn render(predicate: Predicate) -> (String, Vec<Value>) {
        predicate
            .into_sql()
            .into_statement(PlaceholderStyle::Numbered)
            .into_parts()
    }

    #[test]
    fn leaves() {
        let (sql, params) = render(Predicate::compare(
            Term::Column(NAME),
            CmpOp::Gte,
            Term::param(3i64),
        ));
        assert_eq!(sql, r#"("users"."name" >= $1)"#);
        assert_eq!(params, vec![Value::Integer(3)]);

        let (sql, _) = render(Predicate::is_not_null(Term::Alias("name")));
        assert_eq!(sql, r#"("name" IS NOT NULL)"#);
    }

    #[test]
    fn like_policies() {
        let like = |case_insensitive, negated| Predicate::Like {
            term: Term::Column(NAME),
            pattern: Value::from("%a%"),
            negated,
            case_insensitive,
        };
        assert_eq!(
            render(like(true, false)).0,
            r#"(CAST("users"."name" AS TEXT) ILIKE $1)"#
        );
        assert_eq!(
            render(like(true, true)).0,
            r#"(CAST("users"."name" AS TEXT) NOT ILIKE $1)"#
        );
        assert_eq!(render(like(false, false)).0, r#"("users"."name" LIKE $1)"#);
        assert_eq!(
            render(like(false, true)).0,
            r#"("users"."name" NOT LIKE $1)"#
        );
    }

    #[test]
    fn groups_and_params_in_order() {
        let (sql, params) = render(Predicate::And(vec![
            Predicate::eq(Term::Column(NAME), Term::param("a")),
            Predicate::Or(vec![
                Predicate::is_null(Term::Column(NAME)),
                Predicate::In {
                    term: Term::Column(NAME),
                    values: vec![Value::from("b"), Value::from("c")],
                    negated: true,
                },
            ]),
        ]));
        assert_eq!(
            sql,
            r#"(("users"."name" = $1) AND (("users"."name" IS NULL) OR ("users"."name" NOT IN ($2, $3))))"#
        );
        assert_eq!(
            params,
            vec![Value::from("a"), Value::from("b"), Value::from("c")]
        );
    }

    #[test]
    fn empty_groups_vanish() {
        assert!(Predicate::And(vec![Predicate::Or(vec![])]).is_empty());
        let not = Predicate::Not(Box::new(Predicate::And(vec![])));
        assert!(not.into_sql().is_empty());
    }

    #[test]
    fn exists_subqueries() {
        let subquery = SQL::token(Token::SELECT)
            .append(SQL::number(1))
            .push(Token::FROM)
            .append(SQL::ident("roles"));
        let (sql, _) = render(Predicate::not_exists(subquery));
        assert_eq!(sql, r#"NOT EXISTS (SELECT 1 FROM "roles")"#);
    }
}
