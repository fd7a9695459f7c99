//! Category use-cases.

use crate::model::category::{Category, CategoryId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::RepoResult;
use crate::service::logged;
use log::{error, info};

/// Owns the collection of categories.
pub struct CategoryStore<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryStore<R> {
    /// Creates a store over the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists a category with an empty item list.
    pub fn create(
        &self,
        name: impl Into<String>,
        color_code: impl Into<String>,
    ) -> RepoResult<Category> {
        let category = Category::new(name, color_code);
        let created = logged(
            "category_create",
            "category",
            category.id,
            self.repo.create_category(&category),
        )?;
        info!(
            "event=category_create module=store status=ok category_id={}",
            created.id
        );
        Ok(created)
    }

    /// Returns every category in insertion order.
    pub fn list_all(&self) -> RepoResult<Vec<Category>> {
        self.repo.list_categories().map_err(|err| {
            error!(
                "event=category_list module=store status=error error_code={} error={err}",
                err.code()
            );
            err
        })
    }

    /// Loads one category by id.
    pub fn get(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        logged("category_get", "category", id, self.repo.get_category(id))
    }

    /// Replaces a category's display name.
    pub fn rename(&self, id: CategoryId, name: &str) -> RepoResult<Category> {
        logged(
            "category_rename",
            "category",
            id,
            self.repo.rename_category(id, name),
        )
    }

    /// Deletes a category and every item it owns.
    pub fn delete(&self, id: CategoryId) -> RepoResult<()> {
        logged(
            "category_delete",
            "category",
            id,
            self.repo.delete_category(id),
        )?;
        info!("event=category_delete module=store status=ok category_id={id}");
        Ok(())
    }
}
