use crate::error::{Error, Result};
use crate::select::EMBEDDING_COMPONENTS;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-only snapshot of the host graph for one layout session.
///
/// Node indices are dense: a node's index is its position in `nodes`, and it must stay stable
/// between `init` and `apply`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<String>) -> usize {
        self.nodes.push(Node::new(id));
        self.nodes.len() - 1
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn validate(&self) -> Result<()> {
        self.edge_endpoints().map(|_| ())
    }

    /// Resolves every edge to the dense indices of its `(source, target)` nodes, in edge order.
    pub fn edge_endpoints(&self) -> Result<Vec<(usize, usize)>> {
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        index.reserve(self.nodes.len());
        for (i, n) in self.nodes.iter().enumerate() {
            if index.insert(n.id.as_str(), i).is_some() {
                return Err(Error::DuplicateNode { id: n.id.clone() });
            }
        }

        let mut out = Vec::with_capacity(self.edges.len());
        for (i, e) in self.edges.iter().enumerate() {
            let lookup = |endpoint: &str| {
                index
                    .get(endpoint)
                    .copied()
                    .ok_or_else(|| Error::MissingEndpoint {
                        edge: e.label(i),
                        endpoint: endpoint.to_string(),
                    })
            };
            out.push((lookup(&e.source)?, lookup(&e.target)?));
        }
        Ok(out)
    }

    /// Distinct edge attribute names, in first-seen order.
    pub fn edge_attribute_names(&self) -> Vec<String> {
        let mut names: IndexSet<&str> = IndexSet::new();
        for e in &self.edges {
            for k in e.attributes.keys() {
                names.insert(k.as_str());
            }
        }
        names.into_iter().map(str::to_string).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Output position, written by the layout.
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Host-owned transient layout data; cleared when a layout session ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_data: Option<Value>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    /// Every other key of the JSON edge object is an attribute (`weight`, `sign`, ...).
    #[serde(flatten)]
    pub attributes: IndexMap<String, AttributeValue>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    fn label(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("#{index} ({} -> {})", self.source, self.target),
        }
    }
}

/// Edge attribute value of a type only known at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum AttributeValue {
    Boolean(bool),
    Integer(i64),
    Float(f32),
    Double(f64),
    /// Strings, nulls, arrays and objects.
    Other(Value),
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => AttributeValue::Boolean(b),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => AttributeValue::Integer(i),
                (None, Some(f)) => AttributeValue::Double(f),
                (None, None) => AttributeValue::Other(Value::Number(n)),
            },
            other => AttributeValue::Other(other),
        }
    }
}

impl From<AttributeValue> for Value {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Boolean(b) => Value::Bool(b),
            AttributeValue::Integer(i) => Value::from(i),
            AttributeValue::Float(f) => Value::from(f),
            AttributeValue::Double(f) => Value::from(f),
            AttributeValue::Other(v) => v,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Double(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Other(Value::String(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutResult {
    /// Node positions keyed by node id, in node order.
    pub positions: IndexMap<String, Point>,
    /// Signed eigenvalues of the selected components; `None` for zero-padded components.
    pub eigenvalues: [Option<f64>; EMBEDDING_COMPONENTS],
}
