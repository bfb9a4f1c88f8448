use chrono::{DateTime, Local, NaiveDate};

/// General metadata such as title, description, etc, written into both drawings and
/// documents
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    /// The title of the drawing or document.
    pub title: Option<String>,
    /// Free-form description, written before any generated notes
    pub description: Option<String>,
    /// If set, a Creative Commons CC0 public domain dedication naming this author is
    /// appended to the description
    pub dedication_author: Option<String>,
    /// When the artifact was created; defaults to the time it is written
    pub created: Option<DateTime<Local>>,
}

impl Info {
    /// Create a new info block, with all metadata set to [None]
    pub fn new() -> Info {
        Info::default()
    }

    /// Set the title of the info block, modifying `self`
    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the description of the info block, modifying `self`
    pub fn description<S: ToString>(&mut self, description: S) -> &mut Self {
        self.description = Some(description.to_string());
        self
    }

    /// Dedicate the artifact to the public domain on behalf of `author`, modifying `self`
    pub fn dedicate<S: ToString>(&mut self, author: S) -> &mut Self {
        self.dedication_author = Some(author.to_string().trim().to_string());
        self
    }

    /// Pin the creation time, modifying `self`
    pub fn created(&mut self, created: DateTime<Local>) -> &mut Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn creation_time(&self) -> DateTime<Local> {
        self.created.unwrap_or_else(Local::now)
    }

    /// The dedication paragraph, if an author was given
    pub(crate) fn dedication(&self, date: NaiveDate) -> Option<String> {
        self.dedication_author.as_ref().map(|author| {
            format!(
                "Created on {date} by {author}.\n\n\
                 To the extent possible under law, {author} has waived all copyright and \
                 related or neighboring rights to this image.  You can copy, modify, \
                 distribute and perform this image, even for commercial purposes, all \
                 without asking permission.  Please see \
                 <http://creativecommons.org/publicdomain/zero/1.0/> for more information.",
                date = date.format("%Y-%m-%d"),
            )
        })
    }
}
