use career_compass::colleges::{College, CollegeCsvImporter, CollegeId};
use career_compass::config::CatalogConfig;
use career_compass::error::AppError;
use career_compass::gateway::InMemoryGateway;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Colleges from `APP_COLLEGE_CSV` when configured, otherwise the bundled sample catalog.
pub(crate) fn load_colleges(config: &CatalogConfig) -> Result<Vec<College>, AppError> {
    match &config.college_csv {
        Some(path) => {
            let colleges = CollegeCsvImporter::from_path(path)?;
            info!(path = %path.display(), count = colleges.len(), "college catalog imported");
            Ok(colleges)
        }
        None => Ok(sample_colleges()),
    }
}

pub(crate) fn seeded_gateway(config: &CatalogConfig) -> Result<Arc<InMemoryGateway>, AppError> {
    let colleges = load_colleges(config)?;
    Ok(Arc::new(InMemoryGateway::with_colleges(colleges)))
}

#[allow(clippy::too_many_arguments)]
fn sample_college(
    id: &str,
    name: &str,
    city: &str,
    state: &str,
    rating: Option<f64>,
    fees_range: &str,
    courses: &[&str],
    website: &str,
) -> College {
    College {
        id: CollegeId(id.to_string()),
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        rating,
        fees_range: (!fees_range.is_empty()).then(|| fees_range.to_string()),
        courses: (!courses.is_empty())
            .then(|| courses.iter().map(|course| course.to_string()).collect()),
        website: (!website.is_empty()).then(|| website.to_string()),
    }
}

pub(crate) fn sample_colleges() -> Vec<College> {
    vec![
        sample_college(
            "iit-bombay",
            "IIT Bombay",
            "Mumbai",
            "Maharashtra",
            Some(4.9),
            "₹2-3 Lakhs",
            &["B.Tech Computer Science", "B.Tech Electrical", "M.Tech", "PhD"],
            "https://www.iitb.ac.in",
        ),
        sample_college(
            "coep",
            "Government College of Engineering Pune",
            "Pune",
            "Maharashtra",
            Some(4.5),
            "₹1-2 Lakhs",
            &["B.Tech Mechanical", "B.Tech Civil", "B.Tech Computer"],
            "https://www.coep.org.in",
        ),
        sample_college(
            "fergusson",
            "Fergusson College",
            "Pune",
            "Maharashtra",
            Some(4.3),
            "₹50K-1 Lakh",
            &["BA Economics", "B.Sc Physics", "B.Sc Computer Science"],
            "https://www.fergusson.edu",
        ),
        sample_college(
            "nit-trichy",
            "NIT Tiruchirappalli",
            "Tiruchirappalli",
            "Tamil Nadu",
            Some(4.6),
            "₹1.5-2.5 Lakhs",
            &["B.Tech Production", "B.Tech Chemical", "MBA"],
            "https://www.nitt.edu",
        ),
        sample_college(
            "christ-bangalore",
            "Christ University",
            "Bengaluru",
            "Karnataka",
            Some(4.2),
            "₹2-4 Lakhs",
            &["BBA", "B.Com Honours", "BA Psychology", "LLB"],
            "https://christuniversity.in",
        ),
        sample_college(
            "srcc",
            "Shri Ram College of Commerce",
            "New Delhi",
            "Delhi",
            Some(4.7),
            "₹30K-50K",
            &["B.Com Honours", "BA Economics Honours"],
            "https://www.srcc.edu",
        ),
        sample_college(
            "symbiosis-design",
            "Symbiosis Institute of Design",
            "Pune",
            "Maharashtra",
            Some(4.0),
            "₹3-4 Lakhs",
            &["B.Des Communication", "B.Des Product"],
            "",
        ),
        sample_college(
            "nagpur-arts",
            "Vidarbha Arts and Commerce College",
            "Nagpur",
            "Maharashtra",
            None,
            "",
            &[],
            "",
        ),
    ]
}
