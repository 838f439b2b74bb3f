//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate};
use shared::TenantId;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active menu items for a tenant
    pub async fn find_all(&self, tenant: &TenantId) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE tenant = $tenant AND is_active = true ORDER BY name")
            .bind(("tenant", tenant.as_str().to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Create a new menu item
    pub async fn create(&self, tenant: &TenantId, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let item = MenuItem {
            id: None,
            tenant: tenant.as_str().to_string(),
            name: data.name,
            price: data.price,
            direct: data.direct,
            is_active: true,
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }
}
