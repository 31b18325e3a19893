//! Click handling for the journal page.
//!
//! Each handler takes the page and the network client it works on, so the
//! whole interaction runs against [`MemoryPage`] in tests and against the
//! server through [`HttpJournalClient`].

pub mod client;
pub mod page;

pub use client::{ClientError, HttpJournalClient, JournalClient};
pub use page::{Control, Field, MemoryPage, Node, Page, PageEvent, Panel};

use crate::fragments::{render_created, render_updated, TextMode};
use crate::models::{EditEntryForm, EntryId, JournalEntry, NewEntryForm};
use tracing::{debug, info, warn};

/// Sends the create form and shows the new entry under it.
///
/// On error the page is not touched.
pub async fn create_entry<P: Page, C: JournalClient>(
    page: &mut P,
    client: &C,
) -> Result<JournalEntry, ClientError> {
    let form = NewEntryForm {
        title: read_field(page, Field::Title),
        text: read_field(page, Field::Text),
    };

    let entry = match client.create(&form).await {
        Ok(entry) => entry,
        Err(err) => {
            warn!("create entry failed, page left as is: {err}");
            return Err(err);
        }
    };
    info!(id = ?entry.id, "entry created");

    page.reset(Control::Add);
    page.insert_after(Panel::Create, &render_created(&entry, TextMode::RawHtml));
    page.hide(Panel::Create).await;
    Ok(entry)
}

/// Sends the edit form for `target` and swaps the form for the updated entry.
///
/// A missing `target` is still sent, as an empty `id`.
pub async fn update_entry<P: Page, C: JournalClient>(
    page: &mut P,
    client: &C,
    target: Option<EntryId>,
) -> Result<JournalEntry, ClientError> {
    if target.is_none() {
        debug!("edit form has no target entry");
    }
    let form = EditEntryForm::new(
        target,
        read_field(page, Field::Title),
        read_field(page, Field::Text),
    );

    let entry = match client.update(&form).await {
        Ok(entry) => entry,
        Err(err) => {
            warn!("update entry failed, page left as is: {err}");
            return Err(err);
        }
    };
    info!(id = ?entry.id, "entry updated");

    page.reset(Control::Submit);
    page.insert_after(Panel::Edit, &render_updated(&entry, TextMode::RawHtml));
    page.hide(Panel::Edit).await;
    Ok(entry)
}

pub async fn enter_edit_mode<P: Page>(page: &mut P) {
    swap_panels(page, Panel::Detail, Panel::Edit).await;
}

pub async fn cancel_edit<P: Page>(page: &mut P) {
    swap_panels(page, Panel::Edit, Panel::Detail).await;
}

pub async fn open_create_form<P: Page>(page: &mut P) {
    debug!(panel = Panel::Create.selector(), "show");
    page.show(Panel::Create).await;
}

// The show starts only once the hide has completed.
async fn swap_panels<P: Page>(page: &mut P, from: Panel, to: Panel) {
    debug!(from = from.selector(), to = to.selector(), "swap panels");
    page.hide(from).await;
    page.show(to).await;
}

fn read_field<P: Page>(page: &P, field: Field) -> String {
    let value = page.value(field);
    debug!(field = field.selector(), chars = value.chars().count(), "read field");
    value
}

/// A page bound to a client, dispatching clicks to the handlers above.
pub struct Controller<P, C> {
    page: P,
    client: C,
    edit_target: Option<EntryId>,
}

impl<P: Page, C: JournalClient> Controller<P, C> {
    pub fn new(page: P, client: C) -> Self {
        Self {
            page,
            client,
            edit_target: None,
        }
    }

    /// The entry the edit form belongs to.
    pub fn with_edit_target(mut self, target: Option<EntryId>) -> Self {
        self.edit_target = target;
        self
    }

    pub fn edit_target(&self) -> Option<EntryId> {
        self.edit_target
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn into_parts(self) -> (P, C) {
        (self.page, self.client)
    }

    /// Runs the handler bound to `control`. Returns the entry the server sent
    /// back for the two submit controls.
    ///
    /// Submit clicks have their default action prevented before anything is
    /// sent, whether or not the request then succeeds.
    pub async fn click(&mut self, control: Control) -> Result<Option<JournalEntry>, ClientError> {
        let prevent_default = control.suppresses_default();
        debug!(control = control.selector(), prevent_default, "click");
        if prevent_default {
            self.page.prevent_default(control);
        }
        match control {
            Control::Add => create_entry(&mut self.page, &self.client).await.map(Some),
            Control::Submit => update_entry(&mut self.page, &self.client, self.edit_target)
                .await
                .map(Some),
            Control::Edit => {
                enter_edit_mode(&mut self.page).await;
                Ok(None)
            }
            Control::Cancel => {
                cancel_edit(&mut self.page).await;
                Ok(None)
            }
            Control::Create => {
                open_create_form(&mut self.page).await;
                Ok(None)
            }
        }
    }
}
