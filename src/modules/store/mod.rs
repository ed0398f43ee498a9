//! Store accessors for hazard reports and their owning users
//!
//! Handlers and services only see the traits; `PgStore` is the PostgreSQL
//! implementation wired up in `main`.

mod postgres;

#[cfg(test)]
mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::hazard_reports::models::{
    CreateHazardReport, HazardReport, UpdateHazardReport,
};
use crate::features::users::models::User;

pub use postgres::PgStore;

#[cfg(test)]
pub use memory::MemoryStore;

/// Accessor for the `hazard_reports` collection
#[async_trait]
pub trait HazardReportStore: Send + Sync {
    /// Insert a report owned by `user_id` and append its id to the owner's
    /// `reports` list. Both writes succeed or neither does.
    async fn create_for_user(
        &self,
        user_id: Uuid,
        data: &CreateHazardReport,
    ) -> Result<HazardReport>;

    /// All reports, oldest first
    async fn find_all(&self) -> Result<Vec<HazardReport>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HazardReport>>;

    /// Apply `data` and return the post-update record
    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        data: &UpdateHazardReport,
    ) -> Result<Option<HazardReport>>;

    /// Remove the report and return what was deleted
    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<HazardReport>>;

    /// Reports whose owning reference equals `user_id`, oldest first
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<HazardReport>>;
}

/// Accessor for the `users` collection
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
}
