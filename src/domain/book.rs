//! Catalog payload model.
//!
//! These types mirror the JSON document returned by the book catalog. The
//! wire format uses Portuguese field names, mapped to English Rust names with
//! serde renames. Nearly every field is optional because the catalog omits or
//! nulls fields freely; display helpers supply the fallback text.

use serde::{Deserialize, Serialize};

/// Author line shown when a book has no contributors.
pub const UNKNOWN_AUTHOR: &str = "Autor Desconhecido";

/// Response to a single catalog search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Success flag and server message.
    #[serde(default)]
    pub status: ResponseStatus,

    /// Books matching the query, in catalog order.
    ///
    /// The catalog occasionally emits `null` entries inside the list.
    #[serde(default)]
    pub books: Option<Vec<Option<Book>>>,
}

/// Status block of a [`SearchResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,

    #[serde(rename = "sinopse", default)]
    pub synopsis: Option<String>,

    #[serde(rename = "sumario", default)]
    pub summary: Option<String>,

    #[serde(rename = "contribuicao", default)]
    pub contributors: Option<Vec<Option<Contributor>>>,

    #[serde(rename = "imagens", default)]
    pub images: Option<Images>,
}

/// Author, translator or other credited person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    #[serde(rename = "nome", default)]
    pub first_name: Option<String>,

    #[serde(rename = "sobrenome", default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Images {
    #[serde(rename = "imagem_primeira_capa", default)]
    pub front_cover: Option<Cover>,
}

/// Cover image URLs in three sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cover {
    #[serde(rename = "pequena", default)]
    pub small: Option<String>,

    #[serde(rename = "media", default)]
    pub medium: Option<String>,

    #[serde(rename = "grande", default)]
    pub large: Option<String>,
}

impl SearchResponse {
    /// Returns `true` when the catalog flagged the search as successful.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.status.success == Some(true)
    }

    /// Iterates over the non-null books in catalog order.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().flatten().flatten()
    }

    /// Returns `true` when the response carries at least one book.
    #[must_use]
    pub fn has_books(&self) -> bool {
        self.books().next().is_some()
    }
}

impl Book {
    /// Formats the first contributor as `"first last"`.
    ///
    /// Falls back to [`UNKNOWN_AUTHOR`] when no contributor is listed. Missing
    /// name parts are rendered as empty strings, so a contributor with only a
    /// surname still produces a usable line.
    #[must_use]
    pub fn author_line(&self) -> String {
        let first = self
            .contributors
            .as_ref()
            .and_then(|list| list.first())
            .and_then(Option::as_ref);

        match first {
            Some(contributor) => {
                let first_name = contributor.first_name.as_deref().unwrap_or_default();
                let last_name = contributor.last_name.as_deref().unwrap_or_default();
                format!("{first_name} {last_name}").trim().to_string()
            }
            None => UNKNOWN_AUTHOR.to_string(),
        }
    }

    /// Title, or an empty string when the catalog omitted it.
    #[must_use]
    pub fn title_line(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Synopsis, falling back to the table of contents. Blank text counts as
    /// missing.
    #[must_use]
    pub fn synopsis_text(&self) -> Option<&str> {
        non_blank(self.synopsis.as_deref()).or_else(|| non_blank(self.summary.as_deref()))
    }

    /// Small front cover URL, if any.
    #[must_use]
    pub fn cover_url(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|images| images.front_cover.as_ref())
            .and_then(|cover| cover.small.as_deref())
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|s| !s.is_empty())
}
