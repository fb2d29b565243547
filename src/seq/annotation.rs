// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::seq::gff;

// Records only ever see annotations through this trait; how an annotation renders itself is the
// annotation's business.
pub trait Annotation: fmt::Debug {
    /// Value placed after `annotN=` in a GFF attributes column. Must not contain tabs or ';'.
    fn gff_attribute(&self) -> String;

    /// Column names for `tab_row()`.
    fn tab_header(&self) -> String;

    fn tab_row(&self) -> String;

    /// Multi-line, human-oriented rendering.
    fn describe(&self) -> String {
        format!("{}\n{}", self.tab_header(), self.tab_row())
    }
}

// A homology-style annotation: where it came from, how it was obtained, and what it says.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub method: String,
    #[serde(default, rename = "type")]
    pub annotation_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl AnnotationRecord {
    pub fn new(source: &str, method: &str, annotation_type: &str, name: &str) -> Self {
        AnnotationRecord {
            source: source.to_string(),
            method: method.to_string(),
            annotation_type: annotation_type.to_string(),
            name: name.to_string(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

impl Annotation for AnnotationRecord {
    fn gff_attribute(&self) -> String {
        let mut attr = format!("{} {}", self.source, self.name);
        if !self.description.is_empty() {
            attr.push_str(" | ");
            attr.push_str(&self.description);
        }
        gff::escape_attribute(attr.trim())
    }

    fn tab_header(&self) -> String {
        String::from("Source\tMethod\tType\tName\tDescription")
    }

    fn tab_row(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.source, self.method, self.annotation_type, self.name, self.description
        )
    }

    fn describe(&self) -> String {
        format!(
            "Source: {}\nMethod: {}\nType: {}\nName: {}\nDescription: {}",
            self.source, self.method, self.annotation_type, self.name, self.description
        )
    }
}
