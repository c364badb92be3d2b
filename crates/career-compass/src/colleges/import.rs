use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{College, CollegeId};

#[derive(Debug, thiserror::Error)]
pub enum CollegeImportError {
    #[error("failed to read college catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid college CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row} has no college name")]
    MissingName { row: usize },
}

/// Loads the college collection from a CSV export.
///
/// Expected headers: `name,city,state,rating,fees_range,courses,website` plus an optional
/// `id`. Courses are `;`-separated. Blank optional cells become `None`.
pub struct CollegeCsvImporter;

impl CollegeCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<College>, CollegeImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<College>, CollegeImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut colleges = Vec::new();

        for (index, row) in csv_reader.deserialize::<CollegeRow>().enumerate() {
            let row = row?;
            // Header is line 1.
            let line = index + 2;
            if row.name.trim().is_empty() {
                return Err(CollegeImportError::MissingName { row: line });
            }

            colleges.push(row.into_college(line));
        }

        Ok(colleges)
    }
}

#[derive(Debug, Deserialize)]
struct CollegeRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    fees_range: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    courses: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    website: Option<String>,
}

impl CollegeRow {
    fn into_college(self, line: usize) -> College {
        let courses = self.courses.map(|raw| {
            raw.split(';')
                .map(str::trim)
                .filter(|course| !course.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        College {
            id: CollegeId(self.id.unwrap_or_else(|| format!("college-{line:04}"))),
            name: self.name,
            city: self.city,
            state: self.state,
            rating: self.rating,
            fees_range: self.fees_range,
            courses: courses.filter(|courses| !courses.is_empty()),
            website: self.website,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
