use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{HazardReportStore, UserStore};
use crate::core::error::{AppError, Result};
use crate::features::hazard_reports::models::{
    CreateHazardReport, HazardReport, UpdateHazardReport,
};
use crate::features::users::models::User;

/// In-process store used by handler tests
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    calls: AtomicUsize,
}

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    reports: Vec<HazardReport>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user the way the external sign-up flow would
    pub fn insert_user(&self, user_name: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            first_name: "Test".to_string(),
            last_name: "Reporter".to_string(),
            user_name: user_name.to_string(),
            email: format!("{}@example.com", user_name),
            role: "user".to_string(),
            reports: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub fn report_count(&self) -> usize {
        self.state.lock().unwrap().reports.len()
    }

    /// Number of accessor calls served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn track(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl HazardReportStore for MemoryStore {
    async fn create_for_user(
        &self,
        user_id: Uuid,
        data: &CreateHazardReport,
    ) -> Result<HazardReport> {
        self.track();
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let report = HazardReport {
            id: Uuid::now_v7(),
            report_type: data.report_type.clone(),
            description: data.description.clone(),
            status: data.status.clone(),
            images: data.images.clone(),
            user_id,
            created_at: now,
            updated_at: now,
        };

        let owner = state
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        owner.reports.push(report.id);
        owner.updated_at = now;

        state.reports.push(report.clone());
        Ok(report)
    }

    async fn find_all(&self) -> Result<Vec<HazardReport>> {
        self.track();
        Ok(self.state.lock().unwrap().reports.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HazardReport>> {
        self.track();
        Ok(self
            .state
            .lock()
            .unwrap()
            .reports
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        data: &UpdateHazardReport,
    ) -> Result<Option<HazardReport>> {
        self.track();
        let mut state = self.state.lock().unwrap();
        let Some(report) = state.reports.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        report.report_type = data.report_type.clone();
        report.description = data.description.clone();
        report.status = data.status.clone();
        if let Some(images) = &data.images {
            report.images = images.clone();
        }
        report.updated_at = Utc::now();

        Ok(Some(report.clone()))
    }

    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<HazardReport>> {
        self.track();
        let mut state = self.state.lock().unwrap();
        let position = state.reports.iter().position(|r| r.id == id);
        Ok(position.map(|i| state.reports.remove(i)))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<HazardReport>> {
        self.track();
        Ok(self
            .state
            .lock()
            .unwrap()
            .reports
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.track();
        Ok(self.user(id))
    }
}
