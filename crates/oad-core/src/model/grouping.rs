use indexmap::IndexMap;
use serde::Serialize;

use super::document::DocumentModel;
use super::operation::Operation;
use crate::transform::naming::slugify;

/// One tag and the operations filed under it.
#[derive(Debug, Clone, Serialize)]
pub struct TagSection<'a> {
    pub tag: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub operations: Vec<&'a Operation>,
}

/// A navigation group: a named `x-tagGroups` entry, or the single unnamed
/// group used when the document declares no tag groups.
#[derive(Debug, Clone, Serialize)]
pub struct NavGroup<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub sections: Vec<TagSection<'a>>,
}

impl DocumentModel {
    /// Group operations by tag.
    ///
    /// Declared tags come first in declaration order, then tags only seen on
    /// operations in first-use order, then the default group for untagged
    /// operations. Tags without operations are left out. An operation with
    /// several tags appears under each of them.
    pub fn group_operations_by_tag(&self) -> IndexMap<String, Vec<&Operation>> {
        let mut groups: IndexMap<String, Vec<&Operation>> = self
            .tags()
            .iter()
            .map(|t| (t.name.clone(), Vec::new()))
            .collect();
        let mut untagged = Vec::new();

        for op in self.list_operations() {
            if op.tags.is_empty() {
                untagged.push(op);
            }
            for tag in &op.tags {
                groups.entry(tag.clone()).or_default().push(op);
            }
        }

        if !untagged.is_empty() {
            groups
                .entry(self.default_tag.clone())
                .or_default()
                .extend(untagged);
        }

        groups.retain(|_, ops| !ops.is_empty());
        groups
    }

    /// Build the navigation tree from `x-tagGroups`.
    ///
    /// Tags with operations that no group lists end up in a trailing group
    /// named after the configured ungrouped label.
    pub fn navigation(&self) -> Vec<NavGroup<'_>> {
        let mut sections: IndexMap<String, TagSection<'_>> = self
            .group_operations_by_tag()
            .into_iter()
            .map(|(tag, operations)| {
                let section = TagSection {
                    slug: slugify(&tag),
                    description: self.tag_description(&tag),
                    tag: tag.clone(),
                    operations,
                };
                (tag, section)
            })
            .collect();

        if self.tag_groups().is_empty() {
            return vec![NavGroup {
                name: None,
                sections: sections.into_values().collect(),
            }];
        }

        let mut nav = Vec::with_capacity(self.tag_groups().len() + 1);
        for group in self.tag_groups() {
            let grouped: Vec<TagSection<'_>> = group
                .tags
                .iter()
                .filter_map(|tag| sections.shift_remove(tag))
                .collect();
            if !grouped.is_empty() {
                nav.push(NavGroup {
                    name: Some(group.name.clone()),
                    sections: grouped,
                });
            }
        }

        if !sections.is_empty() {
            nav.push(NavGroup {
                name: Some(self.ungrouped.clone()),
                sections: sections.into_values().collect(),
            });
        }

        nav
    }
}
