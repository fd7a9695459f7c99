//! Item use-cases, scoped to one category per call.
//!
//! # Invariants
//! - `list_items` orders by title; `search_items` orders newest first, also
//!   for an empty query. The two orders differ on purpose.

use crate::model::category::{Category, CategoryId};
use crate::model::item::{Item, ItemId, NewItem};
use crate::repo::item_repo::ItemRepository;
use crate::repo::RepoResult;
use crate::service::logged;
use log::info;

/// Owns the items of every category.
pub struct ItemStore<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> ItemStore<R> {
    /// Creates a store over the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Appends a pending item to `category_id`.
    pub fn add_item(
        &self,
        category_id: CategoryId,
        title: impl Into<String>,
        color_code: impl Into<String>,
    ) -> RepoResult<Item> {
        let draft = NewItem::new(title, color_code);
        let item = logged(
            "item_add",
            "category",
            category_id,
            self.repo.add_item(category_id, &draft),
        )?;
        info!(
            "event=item_add module=store status=ok category_id={category_id} item_id={}",
            item.id
        );
        Ok(item)
    }

    /// Items of `category_id`, sorted by title.
    pub fn list_items(&self, category_id: CategoryId) -> RepoResult<Vec<Item>> {
        logged(
            "item_list",
            "category",
            category_id,
            self.repo.list_items(category_id),
        )
    }

    /// Items of `category_id` whose title contains `query`, newest first.
    pub fn search_items(&self, category_id: CategoryId, query: &str) -> RepoResult<Vec<Item>> {
        logged(
            "item_search",
            "category",
            category_id,
            self.repo.search_items(category_id, query),
        )
    }

    /// Loads one item by id.
    pub fn get(&self, id: ItemId) -> RepoResult<Option<Item>> {
        logged("item_get", "item", id, self.repo.get_item(id))
    }

    /// Flips the completion flag of one item.
    pub fn toggle_done(&self, id: ItemId) -> RepoResult<Item> {
        logged("item_toggle_done", "item", id, self.repo.toggle_done(id))
    }

    /// Removes `id` from `category_id`.
    pub fn delete(&self, category_id: CategoryId, id: ItemId) -> RepoResult<()> {
        logged(
            "item_delete",
            "item",
            id,
            self.repo.delete_item(category_id, id),
        )?;
        info!("event=item_delete module=store status=ok category_id={category_id} item_id={id}");
        Ok(())
    }

    /// The category that currently contains `id`, if the item exists.
    pub fn parent_category(&self, id: ItemId) -> RepoResult<Option<Category>> {
        logged(
            "item_parent_category",
            "item",
            id,
            self.repo.parent_category(id),
        )
    }
}
