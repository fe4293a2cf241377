use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// One named snippet as stored in a language file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetDefinition {
    pub prefix: String,
    #[serde(deserialize_with = "lines_or_string")]
    pub body: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields this tool does not manage (`scope`, `isFileTemplate`, ...),
    /// carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SnippetDefinition {
    pub fn new(prefix: impl Into<String>, body: Vec<String>, description: Option<String>) -> Self {
        Self {
            prefix: prefix.into(),
            body,
            description,
            extra: serde_json::Map::new(),
        }
    }
}

fn lines_or_string<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Body {
        Lines(Vec<String>),
        Single(String),
    }

    Ok(match Body::deserialize(deserializer)? {
        Body::Lines(lines) => lines,
        Body::Single(line) => vec![line],
    })
}

/// The contents of one language file: snippet name to definition, in file
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetStore {
    entries: IndexMap<String, SnippetDefinition>,
}

impl SnippetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding exactly one entry.
    pub fn single(name: impl Into<String>, definition: SnippetDefinition) -> Self {
        let mut store = Self::new();
        store.insert(name, definition);
        store
    }

    /// Insert or replace an entry. A replaced entry keeps its position.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        definition: SnippetDefinition,
    ) -> Option<SnippetDefinition> {
        self.entries.insert(name.into(), definition)
    }

    pub fn get(&self, name: &str) -> Option<&SnippetDefinition> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SnippetDefinition)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl IntoIterator for SnippetStore {
    type Item = (String, SnippetDefinition);
    type IntoIter = indexmap::map::IntoIter<String, SnippetDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, SnippetDefinition)> for SnippetStore {
    fn from_iter<I: IntoIterator<Item = (String, SnippetDefinition)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Combine two stores. Every key of either side survives; on a key present
/// in both, the `incoming` definition wins. Colliding keys stay where `base`
/// had them and new keys are appended in `incoming` order.
pub fn merge(base: SnippetStore, incoming: SnippetStore) -> SnippetStore {
    let mut merged = base;
    for (name, definition) in incoming {
        merged.insert(name, definition);
    }
    merged
}
