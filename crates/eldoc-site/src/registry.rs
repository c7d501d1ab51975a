//! Page registry: page key to page module.
//!
//! Pages are declared in two namespaces: a flat list of documents and a list
//! of named component groups. The registry keeps both orderings for
//! navigation and merges them into one flat key space for lookup. Group names
//! are discarded from the key space; documents are merged after components
//! and win on collision.
//!
//! The registry is built once and immutable afterwards. Share it behind an
//! `Arc`.

use std::collections::HashMap;
use std::sync::Arc;

use eldoc_i18n::LocaleStore;

use crate::page::{MarkdownLabels, PageModule};

/// A named group of component pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentGroup {
    /// Group label, shown verbatim in navigation.
    pub name: String,
    /// Page keys in declaration order.
    pub pages: Vec<String>,
}

/// A page module paired with the labels it renders with.
pub struct ConfiguredPage<'a> {
    key: &'a str,
    module: &'a dyn PageModule,
    labels: MarkdownLabels,
}

impl ConfiguredPage<'_> {
    /// Registry key of the page.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key
    }

    /// Labels the page renders with.
    #[must_use]
    pub fn labels(&self) -> &MarkdownLabels {
        &self.labels
    }

    /// Render the page body to HTML.
    #[must_use]
    pub fn render(&self) -> String {
        self.module.render(&self.labels)
    }
}

/// Immutable mapping from page key to [`PageModule`].
pub struct PageRegistry {
    documents: Vec<String>,
    groups: Vec<ComponentGroup>,
    entries: HashMap<String, Arc<dyn PageModule>>,
}

impl PageRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> PageRegistryBuilder {
        PageRegistryBuilder::default()
    }

    /// Page module for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<dyn PageModule>> {
        self.entries.get(key)
    }

    /// Page for a key, configured with the current locale's markdown labels.
    ///
    /// A miss is not an error: the content pane renders empty.
    #[must_use]
    pub fn lookup(&self, key: &str, locales: &LocaleStore) -> Option<ConfiguredPage<'_>> {
        let (key, module) = self.entries.get_key_value(key)?;
        Some(ConfiguredPage {
            key,
            module: module.as_ref(),
            labels: MarkdownLabels::from_store(locales),
        })
    }

    /// Whether a key is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Document page keys in declaration order.
    #[must_use]
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Component groups in declaration order.
    #[must_use]
    pub fn groups(&self) -> &[ComponentGroup] {
        &self.groups
    }

    /// Number of distinct page keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`PageRegistry`].
#[derive(Default)]
pub struct PageRegistryBuilder {
    documents: Vec<(String, Arc<dyn PageModule>)>,
    groups: Vec<(String, Vec<(String, Arc<dyn PageModule>)>)>,
}

impl PageRegistryBuilder {
    /// Add a document page.
    #[must_use]
    pub fn document(mut self, key: impl Into<String>, module: Arc<dyn PageModule>) -> Self {
        self.documents.push((key.into(), module));
        self
    }

    /// Add a component page to a group, creating the group on first use.
    #[must_use]
    pub fn component(
        mut self,
        group: &str,
        key: impl Into<String>,
        module: Arc<dyn PageModule>,
    ) -> Self {
        let entry = (key.into(), module);
        match self.groups.iter_mut().find(|(name, _)| name == group) {
            Some((_, pages)) => pages.push(entry),
            None => self.groups.push((group.to_owned(), vec![entry])),
        }
        self
    }

    /// Flatten the component groups, merge documents on top, and freeze.
    #[must_use]
    pub fn build(self) -> PageRegistry {
        let mut entries: HashMap<String, Arc<dyn PageModule>> = HashMap::new();
        let mut insert = |key: &str, module: &Arc<dyn PageModule>| {
            if entries.insert(key.to_owned(), Arc::clone(module)).is_some() {
                tracing::warn!(page = %key, "Page key registered twice, later entry wins");
            }
        };

        for (_, pages) in &self.groups {
            for (key, module) in pages {
                insert(key, module);
            }
        }
        for (key, module) in &self.documents {
            insert(key, module);
        }

        let documents = self.documents.into_iter().map(|(key, _)| key).collect();
        let groups = self
            .groups
            .into_iter()
            .map(|(name, pages)| ComponentGroup {
                name,
                pages: pages.into_iter().map(|(key, _)| key).collect(),
            })
            .collect();

        tracing::debug!(pages = entries.len(), "Built page registry");

        PageRegistry {
            documents,
            groups,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MarkdownPage;
    use eldoc_i18n::LocaleTable;
    use pretty_assertions::assert_eq;

    fn page(source: &str) -> Arc<dyn PageModule> {
        Arc::new(MarkdownPage::new(source))
    }

    fn store(locale: &str) -> LocaleStore {
        let mut store = LocaleStore::new(Arc::new(LocaleTable::builtin().unwrap()));
        store.set_locale(Some(locale));
        store
    }

    fn registry() -> PageRegistry {
        PageRegistry::builder()
            .document("install", page("# Install"))
            .document("quick-start", page("# Quick start"))
            .component("Basic", "button", page("# Button"))
            .component("Form", "input", page("# Input"))
            .component("Basic", "icon", page("# Icon"))
            .build()
    }

    #[test]
    fn test_lookup_hit() {
        let registry = registry();
        let page = registry.lookup("button", &store("en-US")).unwrap();

        assert_eq!(page.key(), "button");
        assert_eq!(page.render(), "<h1>Button</h1>\n");
        assert_eq!(page.labels().show, "Expand");
        assert_eq!(page.labels().hide, "Hide");
    }

    #[test]
    fn test_lookup_miss() {
        let registry = registry();
        assert!(registry.lookup("nonexistent", &store("en-US")).is_none());
        assert!(registry.get("nonexistent").is_none());
        assert!(!registry.contains("Basic"));
    }

    #[test]
    fn test_lookup_labels_follow_locale() {
        let registry = registry();
        let page = registry.lookup("install", &store("zh-CN")).unwrap();
        assert_eq!(page.labels().show, "显示代码");
    }

    #[test]
    fn test_namespaces_are_flattened() {
        let registry = registry();
        assert_eq!(registry.len(), 5);
        for key in ["install", "quick-start", "button", "input", "icon"] {
            assert!(registry.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let registry = registry();
        assert_eq!(registry.documents(), ["install", "quick-start"]);
        assert_eq!(
            registry.groups(),
            [
                ComponentGroup {
                    name: "Basic".to_owned(),
                    pages: vec!["button".to_owned(), "icon".to_owned()],
                },
                ComponentGroup {
                    name: "Form".to_owned(),
                    pages: vec!["input".to_owned()],
                },
            ]
        );
    }

    #[test]
    fn test_document_wins_key_collision() {
        let registry = PageRegistry::builder()
            .component("Basic", "color", page("# Component color"))
            .document("color", page("# Document color"))
            .build();

        assert_eq!(registry.len(), 1);
        let html = registry.lookup("color", &store("en-US")).unwrap().render();
        assert_eq!(html, "<h1>Document color</h1>\n");
    }

    #[test]
    fn test_empty_registry() {
        let registry = PageRegistry::builder().build();
        assert!(registry.is_empty());
        assert!(registry.documents().is_empty());
    }

    static_assertions::assert_impl_all!(PageRegistry: Send, Sync);
}
