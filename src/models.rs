use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Note {
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    pub content: String,
}

impl Note {
    pub fn from_parts(front_matter: FrontMatter, content: &str) -> Self {
        Self {
            title: front_matter.title,
            date: front_matter.date,
            tags: front_matter.tags,
            content: content.trim().to_string(),
        }
    }

    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter {
            title: self.title.clone(),
            date: self.date.clone(),
            tags: self.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FrontMatter {
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
}

/// One (metadata, body) pair cut from the buffer, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub metadata: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiledNote {
    pub title: String,
    pub date: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub filed: Vec<FiledNote>,
}

impl ProcessReport {
    pub fn is_empty(&self) -> bool {
        self.filed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filed.len()
    }
}
