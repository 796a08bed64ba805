//! Filter compilation: validates each filter against its field descriptor and
//! translates it into a [`Predicate`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rql_core::{SQL, SQLChunk, ToSQL, Token};
use serde_json::Value as JsonValue;

use super::assemble::{Binder, from_clause};
use super::predicate::{Predicate, Sql, Term};
use crate::error::{CompileError, FieldContext, Result};
use crate::query::{Filter, Operator};
use crate::schema::{
    CmpOp, DataType, DatetimeBinding, FieldDescriptor, FieldTarget, Layer, LikePolicy, Relation,
};
use crate::value::Value;

/// Filter predicates split by the layer that owns their columns.
#[derive(Debug, Default)]
pub(crate) struct LayeredPredicates {
    pub inner: Vec<Predicate>,
    pub outer: Vec<Predicate>,
}

impl LayeredPredicates {
    pub fn push(&mut self, layer: Layer, predicate: Predicate) {
        match layer {
            Layer::Inner => self.inner.push(predicate),
            Layer::Outer => self.outer.push(predicate),
        }
    }
}

/// Compiles every filter in order. The first invalid filter aborts.
pub(crate) fn compile_filters(
    binder: &Binder<'_>,
    filters: &[Filter],
) -> Result<LayeredPredicates> {
    let mut out = LayeredPredicates::default();
    for filter in filters {
        let field = binder.schema.resolve(&filter.name, FieldContext::Filter)?;
        if !field.is_filterable() {
            return Err(CompileError::unsupported_field(
                binder.schema.name(),
                &filter.name,
                FieldContext::Filter,
            ));
        }
        let operator = Operator::parse(&filter.operator)
            .filter(|op| field.operators.contains(*op))
            .ok_or_else(|| CompileError::UnsupportedOperator {
                field: filter.name.clone(),
                operator: filter.operator.clone(),
            })?;

        let predicate = match &field.target {
            FieldTarget::Relation(relation) => {
                relation_predicate(binder, field, relation, operator, &filter.value)?
            }
            _ => field_predicate(
                field,
                binder.field_term(field, field.layer()),
                operator,
                &filter.value,
            )?,
        };
        out.push(field.layer(), predicate);
    }
    Ok(out)
}

/// Predicate for a column-backed field.
pub(crate) fn field_predicate(
    field: &FieldDescriptor,
    term: Term,
    operator: Operator,
    value: &JsonValue,
) -> Result<Predicate> {
    let predicate = match operator {
        Operator::Empty => {
            if field.data_type == DataType::String {
                Predicate::Or(vec![
                    Predicate::is_null(term.clone()),
                    Predicate::eq(term, empty_string()),
                ])
            } else {
                Predicate::is_null(term)
            }
        }
        Operator::NotEmpty => {
            if field.data_type == DataType::String {
                Predicate::And(vec![
                    Predicate::is_not_null(term.clone()),
                    Predicate::compare(term, CmpOp::Neq, empty_string()),
                ])
            } else {
                Predicate::is_not_null(term)
            }
        }
        Operator::Like | Operator::NotLike => {
            let text = value
                .as_str()
                .ok_or_else(|| mismatch(field.name, DataType::String, value))?;
            Predicate::Like {
                term,
                pattern: Value::Text(format!("%{text}%")),
                negated: operator == Operator::NotLike,
                case_insensitive: field.like == LikePolicy::CaseInsensitive,
            }
        }
        Operator::In | Operator::NotIn => {
            let list = value
                .as_str()
                .ok_or_else(|| mismatch(field.name, DataType::String, value))?;
            let values = list
                .split(',')
                .map(|token| coerce_token(field, token.trim()))
                .collect::<Result<Vec<_>>>()?;
            Predicate::In {
                term,
                values,
                negated: operator == Operator::NotIn,
            }
        }
        Operator::Eq => Predicate::compare(term, CmpOp::Eq, coerce(field, value)?),
        Operator::Neq => Predicate::compare(term, CmpOp::Neq, coerce(field, value)?),
        Operator::Gt => Predicate::compare(term, CmpOp::Gt, coerce(field, value)?),
        Operator::Gte => Predicate::compare(term, CmpOp::Gte, coerce(field, value)?),
        Operator::Lt => Predicate::compare(term, CmpOp::Lt, coerce(field, value)?),
        Operator::Lte => Predicate::compare(term, CmpOp::Lte, coerce(field, value)?),
    };
    Ok(predicate)
}

fn empty_string() -> Term {
    Term::Literal("''".into())
}

/// `eq` tests that a matching related row exists; `neq` that the owning row
/// has related rows but none with this value.
fn relation_predicate(
    binder: &Binder<'_>,
    field: &FieldDescriptor,
    relation: &Relation,
    operator: Operator,
    value: &JsonValue,
) -> Result<Predicate> {
    let value = match coerce(field, value)? {
        Term::Param(value) => value,
        _ => return Err(mismatch(field.name, field.data_type, &JsonValue::Null)),
    };
    let matching = relation_subquery(binder, relation, Some(value))?;
    match operator {
        Operator::Eq => Ok(Predicate::exists(matching)),
        Operator::Neq => Ok(Predicate::And(vec![
            Predicate::not_exists(matching),
            Predicate::exists(relation_subquery(binder, relation, None)?),
        ])),
        _ => Err(CompileError::UnsupportedOperator {
            field: field.name.to_owned(),
            operator: operator.as_str().to_owned(),
        }),
    }
}

/// `SELECT 1 FROM ... WHERE <conditions> [AND value_column = ?] LIMIT 1`
fn relation_subquery(
    binder: &Binder<'_>,
    relation: &Relation,
    value: Option<Value>,
) -> Result<Sql> {
    let mut conditions = binder.conditions(relation.conditions)?;
    if let Some(value) = value {
        let column = Term::Column(relation.value_column);
        conditions.push(Predicate::eq(column, Term::Param(value)));
    }
    let mut sql = SQL::token(Token::SELECT)
        .push(SQLChunk::Number(1))
        .append(from_clause(binder, &relation.from, relation.joins)?);
    let filter = Predicate::And(conditions);
    if !filter.is_empty() {
        sql = sql.push(Token::WHERE).append(filter.into_sql());
    }
    Ok(sql.push(Token::LIMIT).push(SQLChunk::Number(1)))
}

fn mismatch(field: &str, expected: DataType, value: &JsonValue) -> CompileError {
    CompileError::TypeMismatch {
        field: field.to_owned(),
        expected,
        value: value.to_string(),
    }
}

/// Coerces a scalar filter value to the field's declared type.
pub(crate) fn coerce(field: &FieldDescriptor, value: &JsonValue) -> Result<Term> {
    let fail = || mismatch(field.name, field.data_type, value);
    let term = match field.data_type {
        DataType::String => Term::Param(Value::Text(value.as_str().ok_or_else(fail)?.to_owned())),
        DataType::Number => Term::Param(match value {
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::number(n.as_f64().ok_or_else(fail)?),
            },
            JsonValue::String(s) => parse_number(s).ok_or_else(fail)?,
            _ => return Err(fail()),
        }),
        DataType::Bool => Term::Param(Value::Bool(match value {
            JsonValue::Bool(b) => *b,
            JsonValue::String(s) => parse_bool(s).ok_or_else(fail)?,
            _ => return Err(fail()),
        })),
        DataType::Datetime => {
            let raw = value.as_str().ok_or_else(fail)?;
            let parsed = parse_datetime(raw).ok_or_else(fail)?;
            match field.datetime {
                DatetimeBinding::Param => Term::Param(Value::Text(raw.to_owned())),
                DatetimeBinding::TypedLiteral => {
                    let stamp = parsed.to_rfc3339_opts(SecondsFormat::AutoSi, true);
                    Term::Literal(format!("timestamp '{stamp}'").into())
                }
            }
        }
    };
    Ok(term)
}

/// Coerces one trimmed element of an `in`/`notin` list.
fn coerce_token(field: &FieldDescriptor, token: &str) -> Result<Value> {
    let fail = || mismatch(field.name, field.data_type, &JsonValue::from(token));
    match field.data_type {
        DataType::String => Ok(Value::Text(token.to_owned())),
        DataType::Number => parse_number(token).ok_or_else(fail),
        DataType::Bool => parse_bool(token).map(Value::Bool).ok_or_else(fail),
        DataType::Datetime => match parse_datetime(token) {
            Some(_) => Ok(Value::Text(token.to_owned())),
            None => Err(fail()),
        },
    }
}

fn parse_number(s: &str) -> Option<Value> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::Integer(i));
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::number)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Accepts RFC 3339 timestamps, zone-less date-times and plain dates.
pub(crate) fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
