//! JSON filter builder for list endpoints.
//!
//! The API takes a `filter` query parameter holding a JSON document such
//! as `{"$and":[{"order_id":{"po_no":{"$eq":"48213"}}}]}`. Relation paths
//! are written dotted (`order_id.po_no`) and expanded into nested objects.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    And(Vec<Filter>),
    Condition {
        path: String,
        operator: &'static str,
        value: Value,
    },
}

impl Filter {
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::And(filters.into_iter().collect())
    }

    pub fn eq(path: &str, value: impl Into<Value>) -> Self {
        Self::condition(path, "$eq", value.into())
    }

    pub fn is_in<V: Into<Value>>(path: &str, values: impl IntoIterator<Item = V>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::condition(path, "$in", Value::Array(values))
    }

    pub fn not_empty(path: &str) -> Self {
        Self::condition(path, "$notEmpty", Value::Bool(true))
    }

    fn condition(path: &str, operator: &'static str, value: Value) -> Self {
        Self::Condition {
            path: path.to_string(),
            operator,
            value,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::And(filters) => {
                let mut map = Map::new();
                map.insert(
                    "$and".to_string(),
                    Value::Array(filters.iter().map(Filter::to_json).collect()),
                );
                Value::Object(map)
            }
            Self::Condition { path, operator, value } => {
                let mut map = Map::new();
                map.insert((*operator).to_string(), value.clone());
                let mut node = Value::Object(map);
                for segment in path.rsplit('.') {
                    let mut parent = Map::new();
                    parent.insert(segment.to_string(), node);
                    node = Value::Object(parent);
                }
                node
            }
        }
    }

    /// The encoded `filter` parameter. Top-level conditions are always
    /// wrapped in `$and`, which is the shape the backend expects.
    pub fn to_query_value(&self) -> String {
        let root = match self {
            Self::And(_) => self.to_json(),
            Self::Condition { .. } => Self::And(vec![self.clone()]).to_json(),
        };
        root.to_string()
    }
}
