//! College catalog: records, CSV import, and the ranking stage that orders them for display.

pub mod domain;
pub mod import;
pub mod ranking;
pub mod recommender;

pub use domain::{College, CollegeId, CollegeType};
pub use import::{CollegeCsvImporter, CollegeImportError};
pub use recommender::{interest_notice, CollegeCard, CollegeRecommender, RecommendationInputs};
