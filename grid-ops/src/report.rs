use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Column-oriented command output. Only the data contract lives here; how a
/// shell lays the table out on screen is its own concern. The `Display`
/// impls exist for logs and the demo binaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularReport {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularReport {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: impl IntoIterator<Item = impl Into<String>>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl Display for TabularReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        writeln!(f, "{}", self.columns.iter().join(" | "))?;
        for row in &self.rows {
            writeln!(f, "{}", row.iter().join(" | "))?;
        }
        Ok(())
    }
}

/// Section-oriented command output: labelled values grouped into sections,
/// labels repeating where a section carries one entry per item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionedReport {
    sections: Vec<ReportSection>,
}

impl SectionedReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }
}

impl Display for SectionedReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for section in &self.sections {
            section.fmt(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    header: Option<String>,
    fields: Vec<(String, String)>,
}

impl ReportSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            fields: Vec::new(),
        }
    }

    pub fn field(&mut self, label: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push((label.into(), value.into()));
        self
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(label, _)| label.as_str())
    }

    /// First value carrying the given label, if any.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, value)| value.as_str())
    }
}

impl Display for ReportSection {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if let Some(header) = &self.header {
            writeln!(f, "{}", header)?;
        }
        for (label, value) in &self.fields {
            // multi-line values keep the label only on their first line
            let mut lines = value.split('\n');
            writeln!(f, "{:<18}: {}", label, lines.next().unwrap_or(""))?;
            for line in lines {
                writeln!(f, "{:<18}  {}", "", line)?;
            }
        }
        Ok(())
    }
}
