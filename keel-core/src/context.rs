/// Ordering, grouping and paging of a multi-row fetch.
///
/// Immutable: every `with_*` method returns a new context, so a base context can be kept as a
/// template and specialized per query. Empty strings and `None` (or zero) omit the clause.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct QueryContext {
    order: String,
    group: String,
    limit: Option<u32>,
    skip: Option<u32>,
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// `ORDER BY` expression, copied verbatim into the query.
    pub fn order(&self) -> &str {
        &self.order
    }

    /// `GROUP BY` expression, copied verbatim into the query.
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn skip(&self) -> Option<u32> {
        self.skip
    }

    pub fn with_order(&self, order: impl Into<String>) -> Self {
        Self {
            order: order.into(),
            ..self.clone()
        }
    }

    pub fn with_group(&self, group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            ..self.clone()
        }
    }

    /// Zero removes the limit.
    pub fn with_limit(&self, limit: u32) -> Self {
        Self {
            limit: Some(limit).filter(|v| *v > 0),
            ..self.clone()
        }
    }

    /// Zero removes the offset.
    pub fn with_skip(&self, skip: u32) -> Self {
        Self {
            skip: Some(skip).filter(|v| *v > 0),
            ..self.clone()
        }
    }

    /// Whether no clause would be rendered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
            && self.group.is_empty()
            && self.limit.is_none()
            && self.skip.is_none()
    }
}
