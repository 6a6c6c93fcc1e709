//! One-shot command implementations behind the CLI subcommands.
//!
//! Each command drives a fresh [`Catalog`] through the same operations the
//! terminal UI uses, so validation, notices and the reload-after-write cycle
//! behave identically. Notices become the error message shown to the user.

use anyhow::bail;
use log::info;
use reelshelf_core::render::{self, NO_RESULTS_MESSAGE};
use reelshelf_core::{AddForm, Catalog, IdSource, ListView, OpError, ops};
use reelshelf_protocol::{Movie, MovieApi, MovieId};

/// Field overrides for `edit`; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditArgs {
    pub title: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
}

/// Fetch, filter and render the collection as text rows or an HTML fragment.
pub async fn list(api: &dyn MovieApi, search: &str, html: bool) -> anyhow::Result<String> {
    let mut catalog = Catalog::new();
    catalog.set_search(search);
    ops::reload(&mut catalog, api)
        .await
        .map_err(|err| failure(&mut catalog, err))?;
    let view = catalog.view();
    Ok(if html {
        render::html(&view)
    } else {
        text(&view)
    })
}

/// Create a record; returns it as stored by the service.
pub async fn add(
    api: &dyn MovieApi,
    ids: &dyn IdSource,
    title: &str,
    year: &str,
    genre: &str,
) -> anyhow::Result<Movie> {
    let mut catalog = Catalog::new();
    let mut form = AddForm::new(title, genre, year);
    ops::create(&mut catalog, api, &mut form, ids)
        .await
        .map_err(|err| failure(&mut catalog, err))
}

/// Replace a record, keeping current values for fields not given.
pub async fn edit(api: &dyn MovieApi, id: &MovieId, args: EditArgs) -> anyhow::Result<Movie> {
    let mut catalog = Catalog::new();
    ops::reload(&mut catalog, api)
        .await
        .map_err(|err| failure(&mut catalog, err))?;
    catalog
        .begin_edit(id)
        .map_err(|err| failure(&mut catalog, err))?;
    if let Some(form) = catalog.edit_mut() {
        if let Some(title) = args.title {
            form.title = title;
        }
        if let Some(year) = args.year {
            form.year = year;
        }
        if let Some(genre) = args.genre {
            form.genre = genre;
        }
    }
    ops::update(&mut catalog, api)
        .await
        .map_err(|err| failure(&mut catalog, err))
}

/// Delete a record. Refuses without explicit confirmation.
pub async fn remove(api: &dyn MovieApi, id: &MovieId, confirmed: bool) -> anyhow::Result<()> {
    if !confirmed {
        bail!("refusing to delete movie {id} without --yes");
    }
    let mut catalog = Catalog::new();
    catalog.request_delete(id.clone());
    let deleted = ops::delete(&mut catalog, api)
        .await
        .map_err(|err| failure(&mut catalog, err))?;
    info!("delete command finished (id={deleted})");
    Ok(())
}

/// Plain-text form of a list view, one record per line.
pub fn text(view: &ListView) -> String {
    match view {
        ListView::Failed(message) => message.clone(),
        ListView::Empty => NO_RESULTS_MESSAGE.to_string(),
        ListView::Rows(rows) => rows
            .iter()
            .map(|row| format!("{}\t{} ({}) - {}", row.id, row.title, row.year, row.genre))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Attach the queued notice (or the inline failure) as the user-facing message.
fn failure(catalog: &mut Catalog, err: OpError) -> anyhow::Error {
    let message = catalog
        .take_notice()
        .map(|notice| notice.message)
        .or_else(|| catalog.failure().map(str::to_string));
    let err = anyhow::Error::new(err);
    match message {
        Some(message) => err.context(message),
        None => err,
    }
}
