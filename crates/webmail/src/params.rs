//! Parameter objects shared by several remote methods.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::{KId, SearchQuery};

/// Params object with exactly one member.
#[derive(Debug, Clone, Copy)]
pub struct Single<'a, T: ?Sized> {
    key: &'static str,
    value: &'a T,
}

impl<'a, T: ?Sized> Single<'a, T> {
    pub const fn new(key: &'static str, value: &'a T) -> Self {
        Self { key, value }
    }
}

impl<T: Serialize + ?Sized> Serialize for Single<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, self.value)?;
        map.end()
    }
}

/// `{"ids": [...]}`
pub const fn ids(ids: &[KId]) -> Single<'_, [KId]> {
    Single::new("ids", ids)
}

/// `{"query": {...}}`
pub const fn query(query: &SearchQuery) -> Single<'_, SearchQuery> {
    Single::new("query", query)
}

/// `{"ids": [...], "folder": "..."}` for copy and move.
#[derive(Debug, serde::Serialize)]
pub struct IdsToFolder<'a> {
    pub ids: &'a [KId],
    pub folder: &'a KId,
}

/// `{"folderIds": [...], "query": {...}}` for folder listings.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderQuery<'a> {
    pub folder_ids: &'a [KId],
    pub query: &'a SearchQuery,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single() {
        let ids_list = vec![KId::new("a"), KId::new("b")];
        assert_eq!(
            serde_json::to_value(ids(&ids_list)).unwrap(),
            json!({"ids": ["a", "b"]})
        );
        assert_eq!(
            serde_json::to_value(Single::new("mailboxId", &KId::new("m"))).unwrap(),
            json!({"mailboxId": "m"})
        );
    }

    #[test]
    fn test_folder_query() {
        let query = SearchQuery::default();
        let value = serde_json::to_value(FolderQuery {
            folder_ids: &[KId::new("f")],
            query: &query,
        })
        .unwrap();
        assert_eq!(value["folderIds"], json!(["f"]));
        assert_eq!(value["query"]["limit"], -1);
    }
}
