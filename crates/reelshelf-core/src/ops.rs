//! Sequential catalog operations.
//!
//! Each write validates locally, makes one call against the collection
//! service and, on success, reloads the whole collection. Failures are logged
//! and queued as notices on the catalog before being returned.

use crate::catalog::Catalog;
use crate::error::OpError;
use crate::forms::AddForm;
use crate::ids::IdSource;
use log::warn;
use reelshelf_protocol::{Movie, MovieApi, MovieId};

/// Fetch the collection into the cache; returns the record count.
pub async fn reload(catalog: &mut Catalog, api: &dyn MovieApi) -> Result<usize, OpError> {
    let result = api.list().await;
    Ok(catalog.apply_fetch(result)?)
}

/// Create a record from the add form.
pub async fn create(
    catalog: &mut Catalog,
    api: &dyn MovieApi,
    form: &mut AddForm,
    ids: &dyn IdSource,
) -> Result<Movie, OpError> {
    let request = catalog.prepare_create(form, ids)?;
    let result = api.create(&request).await;
    let created = catalog.finish_create(result, form)?;
    reload_after(catalog, api, "create").await;
    Ok(created)
}

/// Submit the open edit form.
pub async fn update(catalog: &mut Catalog, api: &dyn MovieApi) -> Result<Movie, OpError> {
    let replacement = catalog.prepare_update()?;
    let result = api.update(&replacement).await;
    let updated = catalog.finish_update(&replacement.id, result)?;
    reload_after(catalog, api, "update").await;
    Ok(updated)
}

/// Delete the record whose deletion was confirmed.
pub async fn delete(catalog: &mut Catalog, api: &dyn MovieApi) -> Result<MovieId, OpError> {
    let id = catalog.confirm_delete().ok_or(OpError::NotConfirmed)?;
    let result = api.delete(&id).await;
    catalog.finish_delete(&id, result)?;
    reload_after(catalog, api, "delete").await;
    Ok(id)
}

/// The write already succeeded; a failed reload only leaves the inline
/// failure message in place.
async fn reload_after(catalog: &mut Catalog, api: &dyn MovieApi, action: &str) {
    if let Err(err) = reload(catalog, api).await {
        warn!("reload after {action} failed (error={err})");
    }
}
