//! Request header grid collection.

/// One row of the header grid. A cell is `None` when the user left it unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderRow {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl HeaderRow {
    pub fn new(key: Option<&str>, value: Option<&str>) -> Self {
        Self {
            key: key.map(str::to_string),
            value: value.map(str::to_string),
        }
    }

    /// Build a row from raw input text; blank cells count as unset.
    pub fn from_cells(key: &str, value: &str) -> Self {
        let cell = |text: &str| {
            if text.trim().is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        };
        Self {
            key: cell(key),
            value: cell(value),
        }
    }
}

/// Header mapping whose keys compare without regard to ASCII case.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseInsensitiveHeaders {
    entries: Vec<(String, String)>,
}

impl CaseInsensitiveHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An existing entry matching `key` case-insensitively
    /// keeps its position but takes the new spelling and value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&key))
        {
            Some(entry) => *entry = (key, value),
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Read the grid top to bottom, skipping any row with an unset cell.
pub fn collect_headers(rows: &[HeaderRow]) -> CaseInsensitiveHeaders {
    let mut headers = CaseInsensitiveHeaders::new();
    for row in rows {
        if let (Some(key), Some(value)) = (&row.key, &row.value) {
            headers.insert(key.as_str(), value.as_str());
        }
    }
    headers
}
