//! Search filter and location-biased ordering for the college listing.
//!
//! Everything here is a pure function of its inputs. Callers recompute the listing whenever
//! the search term, the fetched college set, or the profile changes; nothing is cached.

use std::cmp::Ordering;

use super::domain::College;

/// Trimmed, non-empty search term or `None`.
fn normalized(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

/// Keep colleges whose name, city, or state contains the search term, ignoring case.
pub fn filter_by_search<'a>(colleges: &'a [College], search: Option<&str>) -> Vec<&'a College> {
    match normalized(search) {
        Some(term) => colleges
            .iter()
            .filter(|college| {
                college.name.to_lowercase().contains(&term)
                    || college.city.to_lowercase().contains(&term)
                    || college.state.to_lowercase().contains(&term)
            })
            .collect(),
        None => colleges.iter().collect(),
    }
}

pub fn in_preferred_city(college: &College, preferred_city: Option<&str>) -> bool {
    normalized(preferred_city)
        .map(|city| college.city.to_lowercase().contains(&city))
        .unwrap_or(false)
}

/// Stable order: preferred-city matches first, then rating descending (missing rating = 0).
pub fn rank<'a>(mut colleges: Vec<&'a College>, preferred_city: Option<&str>) -> Vec<&'a College> {
    let preferred = normalized(preferred_city);
    let matches = |college: &College| {
        preferred
            .as_deref()
            .map(|city| college.city.to_lowercase().contains(city))
            .unwrap_or(false)
    };

    colleges.sort_by(|a, b| {
        let location = match (matches(a), matches(b)) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        };
        location.then_with(|| b.rating_or_zero().total_cmp(&a.rating_or_zero()))
    });
    colleges
}

/// Filter then rank.
pub fn recommend<'a>(
    colleges: &'a [College],
    search: Option<&str>,
    preferred_city: Option<&str>,
) -> Vec<&'a College> {
    rank(filter_by_search(colleges, search), preferred_city)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colleges::domain::CollegeId;

    fn college(id: &str, name: &str, city: &str, state: &str, rating: Option<f64>) -> College {
        College {
            id: CollegeId(id.to_string()),
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            rating,
            fees_range: None,
            courses: None,
            website: None,
        }
    }

    fn ids(colleges: &[&College]) -> Vec<String> {
        colleges.iter().map(|college| college.id.0.clone()).collect()
    }

    fn pune_and_mumbai() -> Vec<College> {
        vec![
            college("pune-42", "Deccan College", "Pune", "Maharashtra", Some(4.2)),
            college("mumbai-48", "Harbour Institute", "Mumbai", "Maharashtra", Some(4.8)),
            college("pune-39", "Kothrud College", "Pune", "Maharashtra", Some(3.9)),
        ]
    }

    #[test]
    fn preferred_city_dominates_rating() {
        let colleges = pune_and_mumbai();
        let ranked = recommend(&colleges, None, Some("Pune"));
        assert_eq!(ids(&ranked), vec!["pune-42", "pune-39", "mumbai-48"]);
    }

    #[test]
    fn no_preferred_city_orders_by_rating_only() {
        let colleges = pune_and_mumbai();
        assert_eq!(
            ids(&recommend(&colleges, None, None)),
            vec!["mumbai-48", "pune-42", "pune-39"]
        );
        assert_eq!(
            ids(&recommend(&colleges, None, Some("   "))),
            vec!["mumbai-48", "pune-42", "pune-39"]
        );
    }

    #[test]
    fn preferred_city_matches_substrings_case_insensitively() {
        let colleges = vec![
            college("a", "A", "New Delhi", "Delhi", Some(3.0)),
            college("b", "B", "Chennai", "Tamil Nadu", Some(4.9)),
        ];
        assert_eq!(ids(&recommend(&colleges, None, Some("delhi"))), vec!["a", "b"]);
        assert!(in_preferred_city(&colleges[0], Some("DELHI")));
        assert!(!in_preferred_city(&colleges[1], None));
    }

    #[test]
    fn search_matches_name_city_or_state_independently() {
        let colleges = vec![
            college("name", "Karnataka Science College", "Dharwad", "Karnataka", Some(4.0)),
            college("state", "Lakeside Institute", "Hubli", "Karnataka", Some(3.5)),
            college("city", "Riverside College", "Bhopal", "Madhya Pradesh", Some(4.5)),
        ];

        assert_eq!(ids(&filter_by_search(&colleges, Some("KARNATAKA"))), vec!["name", "state"]);
        assert_eq!(ids(&filter_by_search(&colleges, Some("bhopal"))), vec!["city"]);
        assert_eq!(ids(&filter_by_search(&colleges, Some("  "))).len(), 3);
        assert!(filter_by_search(&colleges, Some("Goa")).is_empty());
    }

    #[test]
    fn search_term_is_trimmed_before_matching() {
        let colleges = pune_and_mumbai();
        assert_eq!(
            ids(&filter_by_search(&colleges, Some("  mumbai "))),
            vec!["mumbai-48"]
        );
    }

    #[test]
    fn missing_rating_ranks_as_zero() {
        let colleges = vec![
            college("unrated", "U", "Pune", "MH", None),
            college("zero", "Z", "Pune", "MH", Some(0.0)),
            college("rated", "R", "Pune", "MH", Some(2.5)),
        ];
        let ranked = recommend(&colleges, None, None);
        assert_eq!(ids(&ranked), vec!["rated", "unrated", "zero"]);
        assert!(ranked[1].rating.is_none(), "record is not rewritten");
    }

    #[test]
    fn ties_keep_fetch_order() {
        let colleges = vec![
            college("first", "F", "Pune", "MH", Some(4.0)),
            college("second", "S", "Pune", "MH", Some(4.0)),
        ];
        assert_eq!(
            ids(&recommend(&colleges, None, Some("pune"))),
            vec!["first", "second"]
        );
    }
}
