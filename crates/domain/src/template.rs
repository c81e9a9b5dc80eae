//! Marketplace templates assembled from a repository listing.

use serde::{Deserialize, Serialize};

/// File holding a template's description.
pub const README_FILE: &str = "readme.md";

/// File holding a template's importable body.
pub const TEMPLATE_FILE: &str = "template.json";

/// Kind of entry in a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Symbolic link.
    Symlink,
    /// Git submodule.
    Submodule,
    /// Anything the listing adds later.
    #[serde(other)]
    Other,
}

/// One item of a source-hosting directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    /// Base name of the entry.
    pub name: String,
    /// Path relative to the repository root.
    pub path: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Raw content location, only present for files.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl RepoEntry {
    /// Returns true if this entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Returns true if the entry name matches `name` ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A space template offered for download or one-step installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Folder path in the repository.
    pub id: String,
    /// Human-readable name derived from the folder name.
    pub name: String,
    /// Readme text.
    pub description: String,
    /// Location of the template JSON body.
    pub template_url: String,
}

impl Template {
    /// Assembles a template from a directory and the two files found in it.
    ///
    /// Returns `None` if the template file has no download location.
    #[must_use]
    pub fn from_listing(folder: &RepoEntry, template_file: &RepoEntry, readme: String) -> Option<Self> {
        let template_url = template_file.download_url.clone()?;
        Some(Self {
            id: folder.path.clone(),
            name: display_name_from_folder(&folder.name),
            description: readme,
            template_url,
        })
    }

    /// Returns the file name used when downloading this template.
    #[must_use]
    pub fn download_file_name(&self) -> String {
        format!("{}.json", self.id.replace('/', "-"))
    }
}

/// Turns a folder name like `crm-demo` into `Crm Demo`.
///
/// Dashes become spaces and the first word character after any non-word
/// character is upper-cased.
#[must_use]
pub fn display_name_from_folder(folder: &str) -> String {
    let mut name = String::with_capacity(folder.len());
    let mut previous_is_word = false;
    for c in folder.chars().map(|c| if c == '-' { ' ' } else { c }) {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !previous_is_word {
            name.push(c.to_ascii_uppercase());
        } else {
            name.push(c);
        }
        previous_is_word = is_word;
    }
    name
}
