//! The form shared by the new record and edit record pages.

use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::{
    Error,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    record::{NewRecord, RecordKind},
};

pub struct RecordFormDefaults<'a> {
    pub kind: RecordKind,
    pub name: Option<&'a str>,
    pub amount: Option<f64>,
    pub category: Option<&'a str>,
    pub date: Option<Date>,
    /// Records created before dates were tracked may be saved without one.
    pub date_required: bool,
}

pub fn record_form_fields(defaults: &RecordFormDefaults<'_>) -> Markup {
    let amount = defaults.amount.map(|amount| format!("{amount:.2}"));

    html! {
        div
        {
            label for="name" class=(FORM_LABEL_STYLE) { "Name" }

            input
                name="name"
                id="name"
                type="text"
                placeholder="Name"
                required
                autofocus
                value=[defaults.name]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0"
                placeholder="0.00"
                required
                value=[amount]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[defaults.category.is_none()] { "No category" }

                @for &category in defaults.kind.categories() {
                    option value=(category) selected[defaults.category == Some(category)]
                    {
                        (category)
                    }
                }
            }
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                required[defaults.date_required]
                value=[defaults.date]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// The form data for creating or editing a record from a page.
#[derive(Debug, Deserialize)]
pub struct RecordFormData {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    /// The local date of the record.
    #[serde(default)]
    pub date: Option<Date>,
}

impl RecordFormData {
    /// Validate the form, placing the record at `occurred_at`.
    pub fn validate(&self, occurred_at: Option<OffsetDateTime>) -> Result<NewRecord, Error> {
        NewRecord::new(
            &self.name,
            self.amount,
            self.category.as_deref(),
            occurred_at,
        )
    }
}

/// The instant for a record entered on `date` at `offset`.
///
/// Today's date maps to `now` so records entered on the same day keep their
/// order. Any other date maps to the start of that local day.
pub fn instant_for_local_date(date: Date, now: OffsetDateTime, offset: UtcOffset) -> OffsetDateTime {
    if now.to_offset(offset).date() == date {
        now
    } else {
        date.midnight().assume_offset(offset)
    }
}
