use serde::{Deserialize, Serialize};

/// Identifier of a college in the external catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollegeId(pub String);

/// College as returned by the gateway. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub id: CollegeId,
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub fees_range: Option<String>,
    #[serde(default)]
    pub courses: Option<Vec<String>>,
    #[serde(default)]
    pub website: Option<String>,
}

impl College {
    /// Rating used for ordering; a missing rating compares as zero.
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn college_type(&self) -> CollegeType {
        CollegeType::classify(&self.name)
    }
}

const GOVERNMENT_MARKERS: [&str; 3] = ["government", "nit", "iit"];

/// Display classification derived from the college name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollegeType {
    Government,
    Private,
}

impl CollegeType {
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        if GOVERNMENT_MARKERS
            .iter()
            .any(|marker| name.contains(marker))
        {
            CollegeType::Government
        } else {
            CollegeType::Private
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CollegeType::Government => "Government",
            CollegeType::Private => "Private",
        }
    }
}
