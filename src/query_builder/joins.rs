use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Represents the SQL JOIN kinds a search may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinType {
    Inner,
    Left,
    Right,
}

impl JoinType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
        }
    }
}

/// An extra output column contributed by a join (`tt.name AS transport_type_name`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedColumn {
    pub source_column: String,
    pub output_alias: String,
}

impl ProjectedColumn {
    pub fn new(source_column: &str, output_alias: &str) -> Self {
        Self {
            source_column: source_column.to_string(),
            output_alias: output_alias.to_string(),
        }
    }

    /// Source expression as it appears in SELECT; bare columns belong to `join_alias`
    pub fn qualified(&self, join_alias: &str) -> String {
        if self.source_column.contains('.') {
            self.source_column.clone()
        } else {
            format!("{join_alias}.{}", self.source_column)
        }
    }
}

/// Declarative description of one optional join.
///
/// A join with no `required_params` is always part of the query. A gated join
/// is included when one of its params is active, or when another included join
/// or filter column needs its alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSpec {
    pub join_type: JoinType,
    pub table: String,
    pub alias: String,
    pub condition: String,
    #[serde(default)]
    pub required_params: BTreeSet<String>,
    /// Aliases this join's condition needs; derived from `condition` when absent
    #[serde(default)]
    pub depends_on: Option<Vec<String>>,
    #[serde(default)]
    pub extra_projections: Vec<ProjectedColumn>,
}

impl JoinSpec {
    pub fn new(join_type: JoinType, table: &str, alias: &str, condition: &str) -> Self {
        Self {
            join_type,
            table: table.to_string(),
            alias: alias.to_string(),
            condition: condition.to_string(),
            required_params: BTreeSet::new(),
            depends_on: None,
            extra_projections: Vec::new(),
        }
    }

    pub fn inner(table: &str, alias: &str, condition: &str) -> Self {
        Self::new(JoinType::Inner, table, alias, condition)
    }

    pub fn left(table: &str, alias: &str, condition: &str) -> Self {
        Self::new(JoinType::Left, table, alias, condition)
    }

    pub fn right(table: &str, alias: &str, condition: &str) -> Self {
        Self::new(JoinType::Right, table, alias, condition)
    }

    /// Only include this join when one of `params` is an active filter
    pub fn required_for(mut self, params: &[&str]) -> Self {
        self.required_params
            .extend(params.iter().map(|p| p.to_string()));
        self
    }

    /// Declare the aliases this join depends on instead of parsing the condition
    pub fn depends_on(mut self, aliases: &[&str]) -> Self {
        self.depends_on = Some(aliases.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn project(mut self, source_column: &str, output_alias: &str) -> Self {
        self.extra_projections
            .push(ProjectedColumn::new(source_column, output_alias));
        self
    }

    pub fn is_gated(&self) -> bool {
        !self.required_params.is_empty()
    }

    /// Aliases a projection of this join reads from
    pub fn projection_aliases(&self, projection: &ProjectedColumn) -> Vec<String> {
        referenced_aliases(&projection.qualified(&self.alias))
    }

    /// Aliases other than `base_alias` and this join's own alias that must be
    /// joined before this one. Aliases read by extra projections count too,
    /// since they end up in the same SELECT.
    pub fn dependencies(&self, base_alias: &str) -> Vec<String> {
        let mut candidates = match &self.depends_on {
            Some(declared) => declared.clone(),
            None => referenced_aliases(&self.condition),
        };
        for projection in &self.extra_projections {
            candidates.extend(self.projection_aliases(projection));
        }

        let mut deps: Vec<String> = Vec::new();
        for alias in candidates {
            if alias != base_alias && alias != self.alias && !deps.contains(&alias) {
                deps.push(alias);
            }
        }
        deps
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        format!(
            "{} {} {} ON {}",
            self.join_type.to_sql(),
            self.table,
            self.alias,
            self.condition
        )
    }
}

const CONDITION_KEYWORDS: [&str; 3] = ["AND", "OR", "ON"];

/// Extract every `alias.column` reference from a join condition, in order of
/// first appearance. Quoted literals are ignored.
pub fn referenced_aliases(condition: &str) -> Vec<String> {
    let mut aliases: Vec<String> = Vec::new();

    for token in tokenize_condition(condition) {
        if CONDITION_KEYWORDS
            .iter()
            .any(|kw| token.eq_ignore_ascii_case(kw))
        {
            continue;
        }
        if let Some((alias, column)) = token.split_once('.') {
            if is_identifier(alias) && !column.is_empty() && !aliases.iter().any(|a| a == alias) {
                aliases.push(alias.to_string());
            }
        }
    }

    aliases
}

/// Whether `sql` has a `?` outside single-quoted literals
pub fn contains_placeholder(sql: &str) -> bool {
    let mut in_literal = false;
    for ch in sql.chars() {
        match ch {
            '\'' => in_literal = !in_literal,
            '?' if !in_literal => return true,
            _ => {}
        }
    }
    false
}

fn tokenize_condition(condition: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_literal = false;

    for ch in condition.chars() {
        if in_literal {
            if ch == '\'' {
                in_literal = false;
            }
            continue;
        }
        match ch {
            '\'' => {
                flush(&mut current, &mut tokens);
                in_literal = true;
            }
            c if c.is_alphanumeric() || c == '_' || c == '.' => current.push(c),
            _ => flush(&mut current, &mut tokens),
        }
    }
    flush(&mut current, &mut tokens);

    tokens
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
