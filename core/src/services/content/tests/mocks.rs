//! Mock implementations for testing the content gateway

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::entities::EntityKind;
use crate::errors::ContentStoreError;
use crate::services::content::{CachedResponse, ContentStore, GroqQuery, QueryCache};

/// In-memory content store evaluating the parameters the gateway emits
pub struct MockContentStore {
    docs: HashMap<EntityKind, Vec<Value>>,
    failing_params: Vec<String>,
    fail_all: bool,
    calls: AtomicUsize,
    pub queries: Mutex<Vec<GroqQuery>>,
}

impl MockContentStore {
    pub fn new() -> Self {
        Self {
            docs: HashMap::new(),
            failing_params: Vec::new(),
            fail_all: false,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_docs(mut self, kind: EntityKind, docs: Vec<Value>) -> Self {
        self.docs.insert(kind, docs);
        self
    }

    /// Fail every query that carries the given parameter
    pub fn failing_on_param(mut self, param: &str) -> Self {
        self.failing_params.push(param.to_string());
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn category_of<'a>(kind: EntityKind, doc: &'a Value) -> &'a Value {
        &doc[kind.category_field()]
    }
}

#[async_trait]
impl ContentStore for MockContentStore {
    async fn query(&self, query: &GroqQuery) -> Result<Value, ContentStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        if self.fail_all || self.failing_params.iter().any(|p| query.params.contains_key(p)) {
            return Err(ContentStoreError::Transport {
                message: "connection reset".to_string(),
            });
        }

        let kind = query.kind;
        let docs = self.docs.get(&kind).cloned().unwrap_or_default();
        let param = |name: &str| query.params.get(name).cloned();

        let related_category = param("relatedTo").map(|slug| {
            docs.iter()
                .find(|d| d["slug"] == slug)
                .map(|d| Self::category_of(kind, d)["_id"].clone())
                .unwrap_or(Value::Null)
        });

        let mut matches: Vec<Value> = docs
            .into_iter()
            .filter(|d| !d["slug"].is_null())
            .filter(|d| param("slug").map_or(true, |s| d["slug"] == s))
            .filter(|d| param("excludeSlug").map_or(true, |s| d["slug"] != s))
            .filter(|d| param("categoryId").map_or(true, |c| Self::category_of(kind, d)["_id"] == c))
            .filter(|d| param("categorySlug").map_or(true, |c| Self::category_of(kind, d)["slug"] == c))
            .filter(|d| {
                related_category
                    .as_ref()
                    .map_or(true, |c| !c.is_null() && Self::category_of(kind, d)["_id"] == *c)
            })
            .filter(|d| !query.query.contains("featured == true") || d["featured"] == json!(true))
            .collect();

        // Evaluate `order(...)` and the `[0...N]` slice the way the store does
        let clauses = order_clauses(&query.query);
        matches.sort_by(|a, b| {
            clauses
                .iter()
                .map(|(expr, descending)| {
                    let ordering = compare_values(&eval_order_expr(expr, a), &eval_order_expr(expr, b));
                    if *descending {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                })
                .find(|o| o.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        if let Some(limit) = slice_limit(&query.query) {
            matches.truncate(limit);
        }

        if query.single {
            Ok(matches.into_iter().next().unwrap_or(Value::Null))
        } else {
            Ok(Value::Array(matches))
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// `(expression, descending)` pairs of the query's `order(...)` clause
fn order_clauses(query: &str) -> Vec<(String, bool)> {
    let Some(start) = query.find("| order(") else {
        return Vec::new();
    };
    let body = &query[start + "| order(".len()..];
    let mut clauses = Vec::new();
    let mut depth = 0;
    let mut current = String::new();
    for c in body.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => break,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                clauses.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    clauses.push(current);

    clauses
        .iter()
        .filter_map(|clause| {
            let clause = clause.trim();
            let (expr, direction) = clause.rsplit_once(' ')?;
            Some((expr.to_string(), direction == "desc"))
        })
        .collect()
}

/// Field named by an order expression, read from a projected document
fn eval_order_expr(expr: &str, doc: &Value) -> Value {
    if let Some(inner) = expr.strip_prefix("defined(").and_then(|e| e.strip_suffix(')')) {
        return Value::Bool(!doc[inner].is_null());
    }
    if let Some(args) = expr.strip_prefix("coalesce(") {
        let field: String = args.chars().take_while(|c| c.is_alphanumeric() || *c == '_').collect();
        return match &doc[field.as_str()] {
            Value::Null if args.ends_with("false)") => Value::Bool(false),
            value => value.clone(),
        };
    }
    doc[expr].clone()
}

/// Values of different types order null, bool, number, string, other
fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            _ => 4,
        }
    }
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(std::cmp::Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn slice_limit(query: &str) -> Option<usize> {
    let start = query.find(" [0...")? + " [0...".len();
    let end = query[start..].find(']')? + start;
    query[start..end].parse().ok()
}

/// In-memory query cache that can be told to fail
pub struct MockQueryCache {
    pub entries: Mutex<HashMap<String, CachedResponse>>,
    pub should_fail: bool,
}

impl MockQueryCache {
    pub fn new(should_fail: bool) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            should_fail,
        }
    }

    fn check(&self) -> Result<(), ContentStoreError> {
        if self.should_fail {
            return Err(ContentStoreError::Cache {
                message: "cache unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl QueryCache for MockQueryCache {
    async fn get(&self, key: &str) -> Result<Option<CachedResponse>, ContentStoreError> {
        self.check()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(
        &self,
        key: &str,
        response: &CachedResponse,
        _ttl: Duration,
    ) -> Result<(), ContentStoreError> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), response.clone());
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), ContentStoreError> {
        self.check()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

pub fn product(id: &str, slug: &str, name: &str, category: Option<&str>) -> Value {
    json!({
        "_id": id,
        "_createdAt": "2024-01-01T00:00:00Z",
        "slug": slug,
        "name": name,
        "shortDescription": format!("{} summary", name),
        "category": category.map(|c| json!({ "_id": c, "slug": c, "name": c })),
        "featured": false,
        "publishedAt": null
    })
}

pub fn article(id: &str, slug: &str, title: &str, published_at: &str) -> Value {
    json!({
        "_id": id,
        "_createdAt": "2024-01-01T00:00:00Z",
        "slug": slug,
        "title": title,
        "excerpt": format!("About {}", title),
        "body": "First paragraph.\n\nSecond paragraph.",
        "category": { "_id": "cat-news", "slug": "news", "name": "News" },
        "tags": [],
        "publishedAt": published_at
    })
}

pub fn category(id: &str, slug: &str, name: &str) -> Value {
    json!({ "_id": id, "slug": slug, "name": name })
}
