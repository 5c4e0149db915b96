//! Page tokens and paged results.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annotations::Annotations;
use crate::error::{ConnectorError, SyncError, SyncResult};
use crate::resource::{Resource, ResourceId};
use crate::traits::ResourceSyncer;

/// Opaque continuation token owned by the caller.
///
/// An empty token denotes the start of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// The token that starts a listing.
    #[must_use]
    pub fn start() -> Self {
        Self::default()
    }

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns true if this token denotes the first page.
    #[must_use]
    pub fn is_start(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The token as an optional value, `None` at the start of a listing.
    #[must_use]
    pub fn as_option(&self) -> Option<&str> {
        if self.is_start() {
            None
        } else {
            Some(&self.0)
        }
    }
}

impl From<Option<String>> for PageToken {
    fn from(token: Option<String>) -> Self {
        Self(token.unwrap_or_default())
    }
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Empty when there are no further pages.
    pub next_page_token: PageToken,
    pub annotations: Annotations,
}

impl<T> Page<T> {
    /// A single, final page.
    #[must_use]
    pub fn last(items: Vec<T>, annotations: Annotations) -> Self {
        Self {
            items,
            next_page_token: PageToken::start(),
            annotations,
        }
    }

    /// An empty, final page without annotations.
    #[must_use]
    pub fn empty() -> Self {
        Self::last(Vec::new(), Annotations::new())
    }

    /// Returns true if no further pages follow.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next_page_token.is_start()
    }
}

/// Drains every page of `syncer`'s listing.
///
/// Fails with [`ConnectorError::PaginationCycle`] if a token repeats, so a
/// misbehaving upstream cannot keep the caller looping forever. The
/// annotations of the page that failed are kept on the error.
pub async fn list_all(
    syncer: &dyn ResourceSyncer,
    parent: Option<&ResourceId>,
) -> SyncResult<Vec<Resource>> {
    let mut resources = Vec::new();
    let mut seen = HashSet::new();
    let mut token = PageToken::start();

    loop {
        let page = syncer.list(parent, &token).await?;
        debug!(
            resource_type = %syncer.resource_type().id,
            count = page.items.len(),
            "Fetched page"
        );
        resources.extend(page.items);

        if page.next_page_token.is_start() {
            return Ok(resources);
        }
        if !seen.insert(page.next_page_token.clone()) {
            return Err(SyncError::new(
                ConnectorError::PaginationCycle {
                    token: page.next_page_token.to_string(),
                },
                page.annotations,
            ));
        }
        token = page.next_page_token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entitlement::{Entitlement, Grant};
    use crate::resource::{ResourceTraitKind, ResourceType, UserTrait};
    use async_trait::async_trait;

    /// Serves canned pages keyed by incoming token.
    struct ScriptedSyncer {
        resource_type: ResourceType,
        pages: Vec<(&'static str, Vec<&'static str>, &'static str)>,
    }

    #[async_trait]
    impl ResourceSyncer for ScriptedSyncer {
        fn resource_type(&self) -> &ResourceType {
            &self.resource_type
        }

        async fn list(
            &self,
            _parent: Option<&ResourceId>,
            token: &PageToken,
        ) -> SyncResult<Page<Resource>> {
            let (_, ids, next) = self
                .pages
                .iter()
                .find(|(t, _, _)| *t == token.as_str())
                .ok_or_else(|| ConnectorError::operation_failed("unknown token"))?;
            let items = ids
                .iter()
                .map(|id| Resource::user(*id, &self.resource_type, *id, UserTrait::new()))
                .collect();
            Ok(Page {
                items,
                next_page_token: PageToken::new(*next),
                annotations: Annotations::new(),
            })
        }

        async fn entitlements(
            &self,
            _resource: &Resource,
            _token: &PageToken,
        ) -> SyncResult<Page<Entitlement>> {
            Ok(Page::empty())
        }

        async fn grants(&self, _resource: &Resource, _token: &PageToken) -> SyncResult<Page<Grant>> {
            Ok(Page::empty())
        }
    }

    fn syncer(pages: Vec<(&'static str, Vec<&'static str>, &'static str)>) -> ScriptedSyncer {
        ScriptedSyncer {
            resource_type: ResourceType::new("user", "User", ResourceTraitKind::User),
            pages,
        }
    }

    #[test]
    fn test_page_token_start() {
        assert!(PageToken::start().is_start());
        assert!(PageToken::from(None).is_start());
        assert_eq!(PageToken::new("abc").as_option(), Some("abc"));
        assert_eq!(PageToken::new("").as_option(), None);
    }

    #[tokio::test]
    async fn test_list_all_follows_tokens_until_done() {
        let syncer = syncer(vec![
            ("", vec!["a", "b"], "p2"),
            ("p2", vec!["c"], "p3"),
            ("p3", vec!["d"], ""),
        ]);

        let all = list_all(&syncer, None).await.unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id.resource.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_list_all_detects_cycles() {
        let syncer = syncer(vec![("", vec!["a"], "p2"), ("p2", vec!["b"], "p2")]);

        let err = list_all(&syncer, None).await.unwrap_err();
        assert_eq!(err.error_code(), "PAGINATION_CYCLE");
    }
}
