//! Composers for the variable parts of parameterized SQL statements.
//!
//! Both composers return a [`SqlFragment`]: a clause body (no
//! surrounding keyword) plus the values for its `$N` placeholders, in
//! placeholder order. The caller interpolates the fragment into a
//! statement template and binds the values positionally.

use bigdecimal::BigDecimal;

#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Bool(bool),
    Numeric(BigDecimal),
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<BigDecimal> for SqlValue {
    fn from(v: BigDecimal) -> Self {
        SqlValue::Numeric(v)
    }
}

/// A partial SQL clause body and the values bound to its placeholders.
///
/// Invariant: the i-th placeholder in `sql` is `$i+1` and binds
/// `values[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SqlFragment {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl SqlFragment {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SqlError {
    #[error("no data to update")]
    NoData,
    #[error("filter `{key}` expects a number, got `{value}`")]
    NotANumber { key: String, value: String },
}

/// Builds the SET clause of a partial UPDATE.
///
/// `data` holds `(field, value)` pairs in the order the caller wants
/// them bound; `renames` maps API field names to column names, fields
/// absent from it are used as-is. An empty change set is a client
/// error, not a no-op UPDATE.
///
/// The resolved identifier is double-quoted verbatim, without
/// escaping: callers only pass hardcoded field names, never user
/// input.
pub fn build_update_set(
    data: &[(&str, SqlValue)],
    renames: &[(&str, &str)],
) -> Result<SqlFragment, SqlError> {
    if data.is_empty() {
        return Err(SqlError::NoData);
    }

    let mut assignments = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (idx, (field, value)) in data.iter().enumerate() {
        let column = renames
            .iter()
            .find(|(from, _)| from == field)
            .map(|(_, to)| *to)
            .unwrap_or(*field);
        assignments.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value.clone());
    }

    Ok(SqlFragment {
        sql: assignments.join(", "),
        values,
    })
}

#[derive(Clone, Copy, Debug)]
pub enum FilterOp {
    /// Case-insensitive substring match; the value is bound as `%v%`.
    Contains,
    /// Integer lower bound.
    GreaterEq,
    /// Integer upper bound.
    LessEq,
    /// `<column> > 0`, appended only when the raw value is exactly
    /// `"true"`. Binds nothing.
    PositiveFlag,
}

/// One recognized filter key and how it turns into a condition.
pub struct FilterRule {
    pub key: &'static str,
    pub column: &'static str,
    pub op: FilterOp,
}

/// Recognized keys of the company list endpoint, in condition order.
pub const COMPANY_FILTERS: &[FilterRule] = &[
    FilterRule {
        key: "nameLike",
        column: "name",
        op: FilterOp::Contains,
    },
    FilterRule {
        key: "minEmployees",
        column: "num_employees",
        op: FilterOp::GreaterEq,
    },
    FilterRule {
        key: "maxEmployees",
        column: "num_employees",
        op: FilterOp::LessEq,
    },
];

/// Recognized keys of the job list endpoint, in condition order.
pub const JOB_FILTERS: &[FilterRule] = &[
    FilterRule {
        key: "titleLike",
        column: "title",
        op: FilterOp::Contains,
    },
    FilterRule {
        key: "minSalary",
        column: "salary",
        op: FilterOp::GreaterEq,
    },
    FilterRule {
        key: "hasEquity",
        column: "equity",
        op: FilterOp::PositiveFlag,
    },
];

/// Builds the WHERE clause body for a list endpoint.
///
/// Conditions come out in rule-table order, AND-joined, regardless of
/// the order criteria were supplied in. Criteria with keys not in the
/// table are ignored; empty raw values count as absent. No criteria
/// means an empty fragment, the caller then omits the WHERE keyword.
pub fn build_filter(
    rules: &[FilterRule],
    criteria: &[(&str, &str)],
) -> Result<SqlFragment, SqlError> {
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    for rule in rules {
        let raw = criteria
            .iter()
            .find(|(key, _)| *key == rule.key)
            .map(|(_, value)| *value);
        let Some(raw) = raw else { continue };
        if raw.is_empty() {
            continue;
        }

        match rule.op {
            FilterOp::Contains => {
                values.push(SqlValue::Text(format!("%{raw}%")));
                conditions.push(format!("{} ILIKE ${}", rule.column, values.len()));
            }
            FilterOp::GreaterEq | FilterOp::LessEq => {
                let bound: i64 = raw.parse().map_err(|_| SqlError::NotANumber {
                    key: rule.key.into(),
                    value: raw.into(),
                })?;
                values.push(SqlValue::Int(bound));
                let op = match rule.op {
                    FilterOp::GreaterEq => ">=",
                    _ => "<=",
                };
                conditions.push(format!("{} {} ${}", rule.column, op, values.len()));
            }
            FilterOp::PositiveFlag => {
                if raw == "true" {
                    conditions.push(format!("{} > 0", rule.column));
                }
            }
        }
    }

    Ok(SqlFragment {
        sql: conditions.join(" AND "),
        values,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_update_set_applies_renames() {
        let data = vec![
            ("firstName", SqlValue::from("Aliya")),
            ("age", SqlValue::from(32i64)),
        ];
        let renames = [("firstName", "first_name")];

        let frag = build_update_set(&data, &renames).unwrap();
        assert_eq!(frag.sql, r#""first_name"=$1, "age"=$2"#);
        assert_eq!(
            frag.values,
            vec![SqlValue::from("Aliya"), SqlValue::from(32i64)]
        );
    }

    #[test]
    fn test_update_set_keeps_insertion_order() {
        let data = vec![
            ("name", SqlValue::from("Acme")),
            ("description", SqlValue::from("anvils")),
            ("numEmployees", SqlValue::from(7i64)),
        ];
        let renames = [("numEmployees", "num_employees")];

        let frag = build_update_set(&data, &renames).unwrap();
        assert_eq!(
            frag.sql,
            r#""name"=$1, "description"=$2, "num_employees"=$3"#
        );
        assert_eq!(frag.values.len(), data.len());
        for (got, (_, want)) in frag.values.iter().zip(data.iter()) {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_update_set_works_for_booleans() {
        let data = vec![
            ("firstName", SqlValue::from("Aliya")),
            ("isAdmin", SqlValue::from(true)),
        ];
        let renames = [("firstName", "first_name"), ("isAdmin", "is_admin")];

        let frag = build_update_set(&data, &renames).unwrap();
        assert_eq!(frag.sql, r#""first_name"=$1, "is_admin"=$2"#);
        assert_eq!(
            frag.values,
            vec![SqlValue::from("Aliya"), SqlValue::from(true)]
        );
    }

    #[test]
    fn test_update_set_rejects_empty_change_set() {
        let res = build_update_set(&[], &[]);
        assert_eq!(res.unwrap_err(), SqlError::NoData);
    }

    #[test]
    fn test_filter_no_recognized_keys_yields_empty_fragment() {
        let frag = build_filter(COMPANY_FILTERS, &[("bogus", "x"), ("other", "y")]).unwrap();
        assert!(frag.is_empty());
        assert!(frag.values.is_empty());

        let frag = build_filter(JOB_FILTERS, &[]).unwrap();
        assert!(frag.is_empty());
    }

    #[test]
    fn test_filter_job_title_substring() {
        let frag = build_filter(JOB_FILTERS, &[("titleLike", "t1")]).unwrap();
        assert_eq!(frag.sql, "title ILIKE $1");
        assert_eq!(frag.values, vec![SqlValue::from("%t1%")]);
    }

    #[test]
    fn test_filter_job_min_salary_and_equity_order() {
        let criteria = [("hasEquity", "true"), ("minSalary", "150")];
        let frag = build_filter(JOB_FILTERS, &criteria).unwrap();
        // rule-table order wins over the criteria order
        assert_eq!(frag.sql, "salary >= $1 AND equity > 0");
        assert_eq!(frag.values, vec![SqlValue::from(150i64)]);
    }

    #[rstest]
    #[case("false")]
    #[case("1")]
    #[case("TRUE")]
    #[case("")]
    fn test_filter_equity_flag_requires_exact_true(#[case] raw: &str) {
        let frag = build_filter(JOB_FILTERS, &[("hasEquity", raw)]).unwrap();
        assert!(frag.is_empty());
        assert!(frag.values.is_empty());
    }

    #[test]
    fn test_filter_company_all_criteria_fixed_order() {
        let criteria = [
            ("maxEmployees", "3"),
            ("nameLike", "c"),
            ("minEmployees", "1"),
        ];
        let frag = build_filter(COMPANY_FILTERS, &criteria).unwrap();
        assert_eq!(
            frag.sql,
            "name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3"
        );
        assert_eq!(
            frag.values,
            vec![
                SqlValue::from("%c%"),
                SqlValue::from(1i64),
                SqlValue::from(3i64),
            ]
        );
    }

    #[rstest]
    #[case("minEmployees", "ten")]
    #[case("maxEmployees", "3.5")]
    #[case("minEmployees", "NaN")]
    fn test_filter_rejects_non_numeric_bounds(#[case] key: &str, #[case] value: &str) {
        let res = build_filter(COMPANY_FILTERS, &[(key, value)]);
        assert_eq!(
            res.unwrap_err(),
            SqlError::NotANumber {
                key: key.into(),
                value: value.into(),
            }
        );
    }

    #[test]
    fn test_composers_are_pure() {
        let data = vec![("title", SqlValue::from("engineer"))];
        let first = build_update_set(&data, &[]).unwrap();
        let second = build_update_set(&data, &[]).unwrap();
        assert_eq!(first, second);

        let criteria = [("titleLike", "eng"), ("minSalary", "10")];
        let first = build_filter(JOB_FILTERS, &criteria).unwrap();
        let second = build_filter(JOB_FILTERS, &criteria).unwrap();
        assert_eq!(first, second);
    }
}
