//! Meal schedule and employee storage.
//!
//! # Design
//! - Handlers depend on the [`ScheduleStore`] trait only; the in-memory store is the
//!   shipped implementation.
//! - Employee names are resolved on read so schedule records never carry stale names.
//! - Identifiers are assigned by the store, starting at 1.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use mealsched_api_models::{EmployeeDto, MealScheduleDto};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by schedule storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("schedule store unavailable")]
    Unavailable {
        /// Operation that failed.
        operation: &'static str,
    },
    /// No further identifiers can be assigned.
    #[error("identifier space exhausted")]
    IdExhausted {
        /// Entity kind whose counter overflowed.
        entity: &'static str,
    },
}

/// Data-access seam for schedules and employees.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Every schedule, ordered by id.
    async fn list_schedules(&self) -> StoreResult<Vec<MealScheduleDto>>;
    /// One schedule by id.
    async fn get_schedule(&self, id: i32) -> StoreResult<Option<MealScheduleDto>>;
    /// Schedules belonging to one employee.
    async fn schedules_for_employee(&self, employee_id: i32) -> StoreResult<Vec<MealScheduleDto>>;
    /// Schedules on one calendar day.
    async fn schedules_on(&self, date: NaiveDate) -> StoreResult<Vec<MealScheduleDto>>;
    /// Insert a schedule and return it with its assigned id.
    async fn create_schedule(&self, schedule: MealScheduleDto) -> StoreResult<MealScheduleDto>;
    /// Overwrite an existing schedule; `false` when the id is unknown.
    async fn update_schedule(&self, schedule: MealScheduleDto) -> StoreResult<bool>;
    /// Remove a schedule; `false` when the id is unknown.
    async fn delete_schedule(&self, id: i32) -> StoreResult<bool>;
    /// Replace every schedule on `date` with `schedules`.
    async fn replace_schedules_on(
        &self,
        date: NaiveDate,
        schedules: Vec<MealScheduleDto>,
    ) -> StoreResult<()>;
    /// Every employee, ordered by id.
    async fn list_employees(&self) -> StoreResult<Vec<EmployeeDto>>;
    /// One employee by id.
    async fn get_employee(&self, id: i32) -> StoreResult<Option<EmployeeDto>>;
    /// Insert an employee and return it with its assigned ids.
    async fn create_employee(&self, employee: EmployeeDto) -> StoreResult<EmployeeDto>;
}

/// Process-local [`ScheduleStore`] guarded by a tokio `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryScheduleStore {
    inner: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    schedules: BTreeMap<i32, MealScheduleDto>,
    employees: BTreeMap<i32, EmployeeDto>,
    last_schedule_id: i32,
    last_employee_id: i32,
}

impl Tables {
    fn with_employee_name(&self, mut schedule: MealScheduleDto) -> MealScheduleDto {
        schedule.employee_name = self
            .employees
            .get(&schedule.employee_id)
            .map(|employee| employee.employee_name.clone());
        schedule
    }

    fn select(&self, filter: impl Fn(&MealScheduleDto) -> bool) -> Vec<MealScheduleDto> {
        self.schedules
            .values()
            .filter(|schedule| filter(schedule))
            .cloned()
            .map(|schedule| self.with_employee_name(schedule))
            .collect()
    }

    fn insert_schedule(&mut self, mut schedule: MealScheduleDto) -> StoreResult<MealScheduleDto> {
        let id = next_id(&mut self.last_schedule_id, "schedule")?;
        schedule.schedule_id = id;
        schedule.employee_name = None;
        self.schedules.insert(id, schedule.clone());
        Ok(self.with_employee_name(schedule))
    }
}

fn next_id(counter: &mut i32, entity: &'static str) -> StoreResult<i32> {
    *counter = counter
        .checked_add(1)
        .ok_or(StoreError::IdExhausted { entity })?;
    Ok(*counter)
}

impl InMemoryScheduleStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn list_schedules(&self) -> StoreResult<Vec<MealScheduleDto>> {
        Ok(self.inner.read().await.select(|_| true))
    }

    async fn get_schedule(&self, id: i32) -> StoreResult<Option<MealScheduleDto>> {
        let tables = self.inner.read().await;
        Ok(tables
            .schedules
            .get(&id)
            .cloned()
            .map(|schedule| tables.with_employee_name(schedule)))
    }

    async fn schedules_for_employee(&self, employee_id: i32) -> StoreResult<Vec<MealScheduleDto>> {
        Ok(self
            .inner
            .read()
            .await
            .select(|schedule| schedule.employee_id == employee_id))
    }

    async fn schedules_on(&self, date: NaiveDate) -> StoreResult<Vec<MealScheduleDto>> {
        Ok(self
            .inner
            .read()
            .await
            .select(|schedule| schedule.meal_date == Some(date)))
    }

    async fn create_schedule(&self, schedule: MealScheduleDto) -> StoreResult<MealScheduleDto> {
        self.inner.write().await.insert_schedule(schedule)
    }

    async fn update_schedule(&self, mut schedule: MealScheduleDto) -> StoreResult<bool> {
        let mut tables = self.inner.write().await;
        let Some(existing) = tables.schedules.get_mut(&schedule.schedule_id) else {
            return Ok(false);
        };
        schedule.employee_name = None;
        *existing = schedule;
        Ok(true)
    }

    async fn delete_schedule(&self, id: i32) -> StoreResult<bool> {
        Ok(self.inner.write().await.schedules.remove(&id).is_some())
    }

    async fn replace_schedules_on(
        &self,
        date: NaiveDate,
        schedules: Vec<MealScheduleDto>,
    ) -> StoreResult<()> {
        let mut tables = self.inner.write().await;
        tables
            .schedules
            .retain(|_, schedule| schedule.meal_date != Some(date));
        for schedule in schedules {
            tables.insert_schedule(schedule)?;
        }
        Ok(())
    }

    async fn list_employees(&self) -> StoreResult<Vec<EmployeeDto>> {
        Ok(self.inner.read().await.employees.values().cloned().collect())
    }

    async fn get_employee(&self, id: i32) -> StoreResult<Option<EmployeeDto>> {
        Ok(self.inner.read().await.employees.get(&id).cloned())
    }

    async fn create_employee(&self, mut employee: EmployeeDto) -> StoreResult<EmployeeDto> {
        let mut tables = self.inner.write().await;
        employee.id = next_id(&mut tables.last_employee_id, "employee")?;
        if employee.employee_id.trim().is_empty() {
            employee.employee_id = Uuid::new_v4().to_string();
        }
        employee.employee_name = employee.employee_name.trim().to_string();
        tables.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 3, day)
    }

    fn schedule(employee_id: i32, day: u32) -> MealScheduleDto {
        MealScheduleDto {
            schedule_id: 0,
            employee_id,
            employee_name: None,
            meal_date: date(day),
            notes: None,
            is_active: true,
        }
    }

    fn employee(name: &str) -> EmployeeDto {
        EmployeeDto {
            id: 0,
            employee_id: String::new(),
            employee_name: name.to_string(),
            employee_code: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_resolves_names() -> StoreResult<()> {
        let store = InMemoryScheduleStore::new();
        let ada = store.create_employee(employee(" Ada ")).await?;
        assert_eq!(ada.id, 1);
        assert_eq!(ada.employee_name, "Ada");
        assert!(Uuid::parse_str(&ada.employee_id).is_ok());

        let created = store.create_schedule(schedule(ada.id, 1)).await?;
        assert_eq!(created.schedule_id, 1);
        assert_eq!(created.employee_name.as_deref(), Some("Ada"));

        let fetched = store.get_schedule(1).await?;
        assert_eq!(fetched, Some(created));
        assert!(store.get_schedule(99).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn filters_by_employee_and_date() -> StoreResult<()> {
        let store = InMemoryScheduleStore::new();
        store.create_schedule(schedule(1, 1)).await?;
        store.create_schedule(schedule(2, 1)).await?;
        store.create_schedule(schedule(1, 2)).await?;

        assert_eq!(store.schedules_for_employee(1).await?.len(), 2);
        assert_eq!(store.schedules_on(date(1).unwrap_or_default()).await?.len(), 2);
        assert_eq!(store.list_schedules().await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_report_unknown_ids() -> StoreResult<()> {
        let store = InMemoryScheduleStore::new();
        let mut created = store.create_schedule(schedule(1, 1)).await?;
        created.notes = Some("vegetarian".to_string());
        assert!(store.update_schedule(created.clone()).await?);
        assert_eq!(
            store.get_schedule(created.schedule_id).await?.and_then(|s| s.notes),
            Some("vegetarian".to_string())
        );

        created.schedule_id = 42;
        assert!(!store.update_schedule(created).await?);
        assert!(store.delete_schedule(1).await?);
        assert!(!store.delete_schedule(1).await?);
        Ok(())
    }

    #[tokio::test]
    async fn replace_only_touches_the_given_day() -> StoreResult<()> {
        let store = InMemoryScheduleStore::new();
        store.create_schedule(schedule(1, 1)).await?;
        store.create_schedule(schedule(2, 1)).await?;
        store.create_schedule(schedule(3, 2)).await?;

        let day = date(1).unwrap_or_default();
        store
            .replace_schedules_on(day, vec![schedule(7, 1)])
            .await?;

        let on_day = store.schedules_on(day).await?;
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].employee_id, 7);
        assert_eq!(store.list_schedules().await?.len(), 2);
        Ok(())
    }
}
