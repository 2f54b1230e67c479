use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use time::OffsetDateTime;

use opsdash_domain::{ActivityRecord, MetricRecord, ProjectRecord};

/// One independently fetched collection plus its fetch bookkeeping.
#[derive(Clone, Debug)]
pub struct Dataset<T> {
	pub items: Vec<T>,
	/// True while a fetch is outstanding. False says nothing about whether it succeeded.
	pub loading: bool,
	pub last_error: Option<String>,
	pub loaded_at: Option<OffsetDateTime>,
}
impl<T> Default for Dataset<T> {
	fn default() -> Self {
		Self { items: Vec::new(), loading: true, last_error: None, loaded_at: None }
	}
}

/// A dataset behind a lock. Writers only ever swap the whole list, so readers see either the
/// previous or the next complete snapshot.
#[derive(Debug)]
pub struct DatasetCell<T> {
	inner: RwLock<Dataset<T>>,
}
impl<T> Default for DatasetCell<T> {
	fn default() -> Self {
		Self { inner: RwLock::new(Dataset::default()) }
	}
}
impl<T> DatasetCell<T> {
	pub fn is_loading(&self) -> bool {
		self.read().loading
	}

	pub fn last_error(&self) -> Option<String> {
		self.read().last_error.clone()
	}

	pub fn loaded_at(&self) -> Option<OffsetDateTime> {
		self.read().loaded_at
	}

	/// Runs `f` against the current list without cloning it.
	pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
		f(&self.read().items)
	}

	/// Marks the dataset loading until the returned fetch is settled or dropped.
	pub(crate) fn begin(&self) -> Fetch<'_, T> {
		self.write().loading = true;

		Fetch { dataset: self, settled: false }
	}

	fn read(&self) -> RwLockReadGuard<'_, Dataset<T>> {
		self.inner.read().unwrap_or_else(|err| err.into_inner())
	}

	fn write(&self) -> RwLockWriteGuard<'_, Dataset<T>> {
		self.inner.write().unwrap_or_else(|err| err.into_inner())
	}
}
impl<T> DatasetCell<T>
where
	T: Clone,
{
	pub fn items(&self) -> Vec<T> {
		self.read().items.clone()
	}
}

/// An outstanding fetch against one dataset.
///
/// Dropping it unsettled (the refresh future was cancelled) clears the loading flag and leaves the
/// items and last error untouched.
pub(crate) struct Fetch<'a, T> {
	dataset: &'a DatasetCell<T>,
	settled: bool,
}
impl<T> Fetch<'_, T> {
	pub(crate) fn replace(mut self, items: Vec<T>, now: OffsetDateTime) {
		let mut dataset = self.dataset.write();

		dataset.items = items;
		dataset.loading = false;
		dataset.last_error = None;
		dataset.loaded_at = Some(now);
		self.settled = true;
	}

	pub(crate) fn fail(mut self, error: String) {
		let mut dataset = self.dataset.write();

		dataset.loading = false;
		dataset.last_error = Some(error);
		self.settled = true;
	}
}
impl<T> Drop for Fetch<'_, T> {
	fn drop(&mut self) {
		if !self.settled {
			self.dataset.write().loading = false;
		}
	}
}

#[derive(Debug, Default)]
pub struct DashboardState {
	pub activities: DatasetCell<ActivityRecord>,
	pub projects: DatasetCell<ProjectRecord>,
	pub metrics: DatasetCell<MetricRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LoadingState {
	pub activities: bool,
	pub projects: bool,
	pub metrics: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DatasetErrors {
	pub activities: Option<String>,
	pub projects: Option<String>,
	pub metrics: Option<String>,
}

/// When each dataset last loaded successfully.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoadedAt {
	#[serde(serialize_with = "crate::time_serde::serialize_option")]
	pub activities: Option<OffsetDateTime>,
	#[serde(serialize_with = "crate::time_serde::serialize_option")]
	pub projects: Option<OffsetDateTime>,
	#[serde(serialize_with = "crate::time_serde::serialize_option")]
	pub metrics: Option<OffsetDateTime>,
}
