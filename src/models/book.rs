//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Book record as stored in `mst_book`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Free-form release year, kept as text
    pub release_year: String,
    pub pages: i32,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub release_year: String,
    pub pages: i32,
}

impl NewBook {
    pub fn into_book(self, id: i32) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            release_year: self.release_year,
            pages: self.pages,
        }
    }
}

/// Update book request. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub release_year: Option<String>,
    pub pages: Option<i32>,
}

impl BookPatch {
    /// Merge the patch into an existing book.
    ///
    /// Text fields are replaced only by values that are non-blank once
    /// trimmed; the stored value is the one supplied, untrimmed. `pages` is
    /// replaced only by a non-zero value unless `allow_zero_pages` is set.
    pub fn merge_into(&self, book: &mut Book, allow_zero_pages: bool) {
        merge_text(&mut book.title, self.title.as_deref());
        merge_text(&mut book.author, self.author.as_deref());
        merge_text(&mut book.release_year, self.release_year.as_deref());

        if let Some(pages) = self.pages {
            if pages != 0 || allow_zero_pages {
                book.pages = pages;
            }
        }
    }
}

fn merge_text(target: &mut String, incoming: Option<&str>) {
    if let Some(value) = incoming {
        if !value.trim().is_empty() {
            *target = value.to_string();
        }
    }
}

/// Query parameters for listing books
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
}

impl BookQuery {
    /// Title filter, with an empty value treated as absent
    pub fn title_filter(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}
