use crate::infra::seeded_gateway;
use career_compass::assessments::FlowStage;
use career_compass::colleges::{ranking, CollegeCard, CollegeCsvImporter};
use career_compass::config::CatalogConfig;
use career_compass::error::AppError;
use career_compass::gateway::Gateway;
use career_compass::profile::ProfileForm;
use career_compass::{GuidanceError, GuidanceService, Identity};
use clap::Args;
use std::path::PathBuf;

const LISTING_LIMIT: usize = 5;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Preferred city saved on the sample student's profile
    #[arg(long, default_value = "Pune")]
    pub(crate) preferred_city: String,
    /// Search term applied to the college listing
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Seed colleges from a CSV export instead of the bundled sample catalog
    #[arg(long)]
    pub(crate) college_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct CollegeRankArgs {
    /// CSV export with name,city,state,rating,fees_range,courses,website columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Preferred city; matching colleges are listed first
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Only keep colleges whose name, city, or state contains this term
    #[arg(long)]
    pub(crate) search: Option<String>,
}

pub(crate) fn run_college_rank(args: CollegeRankArgs) -> Result<(), AppError> {
    let CollegeRankArgs { csv, city, search } = args;

    let colleges = CollegeCsvImporter::from_path(&csv)?;
    let ranked = ranking::recommend(&colleges, search.as_deref(), city.as_deref());

    println!(
        "College ranking for {} ({} of {} colleges match)",
        city.as_deref().unwrap_or("any city"),
        ranked.len(),
        colleges.len()
    );
    for (position, college) in ranked.into_iter().enumerate() {
        render_card(position + 1, &CollegeCard::from_college(college, city.as_deref()));
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        preferred_city,
        search,
        college_csv,
    } = args;

    let gateway = seeded_gateway(&CatalogConfig { college_csv })?;
    let service = GuidanceService::new(gateway);
    let identity = Identity::new(
        "demo-student",
        Some("asha.rao@example.com".to_string()),
    );

    println!("Career guidance demo");
    if let Err(err) = walk_journey(&service, &identity, preferred_city).await {
        println!("  Demo stopped: {err}");
        return Ok(());
    }

    let cards = service.recommendations(&identity, search.as_deref()).await;
    println!("\nRecommended colleges");
    if cards.is_empty() {
        println!("- none match the current search");
        return Ok(());
    }
    for (position, card) in cards.iter().take(LISTING_LIMIT).enumerate() {
        render_card(position + 1, card);
    }
    if cards.len() > LISTING_LIMIT {
        println!("  ... {} more", cards.len() - LISTING_LIMIT);
    }

    match service.register_interest(&identity, &cards[0].id).await {
        Ok(notice) => println!("\n{notice}"),
        Err(err) => println!("\nInterest not recorded: {err}"),
    }

    Ok(())
}

async fn walk_journey<G>(
    service: &GuidanceService<G>,
    identity: &Identity,
    preferred_city: String,
) -> Result<(), GuidanceError>
where
    G: Gateway + 'static,
{
    let form = ProfileForm {
        full_name: "Asha Rao".to_string(),
        phone: "+91 98200 11223".to_string(),
        current_town: "Nashik".to_string(),
        preferred_city,
        tenth_marks: "91".to_string(),
        twelfth_marks: "87.5".to_string(),
        ..service.profile_form(identity).await
    };
    let profile = service.save_profile(identity, form).await?;
    println!(
        "- Saved profile for {} (preferred city: {})",
        profile.full_name,
        profile.preferred_city().unwrap_or("none")
    );
    println!("- Next step: {}", service.journey(identity).await.next_step_label);

    println!("\nAssessments");
    while service.flow_view(identity).await?.stage != FlowStage::Complete {
        answer_current_assessment(service, identity).await?;
        let (outcome, _) = service.submit(identity).await?;
        let record = outcome.record();
        println!(
            "- {} submitted with {} answers (record {})",
            record.ordinal.title(),
            record.answers.len(),
            record.id.0
        );
    }

    let journey = service.journey(identity).await;
    println!("- Next step: {}", journey.next_step_label);
    for entry in &journey.history {
        println!(
            "  {} completed {}",
            entry.title,
            entry.completed_at.format("%Y-%m-%d %H:%M UTC")
        );
    }

    Ok(())
}

/// Answers rotate through the options so each assessment gets a varied sheet.
async fn answer_current_assessment<G>(
    service: &GuidanceService<G>,
    identity: &Identity,
) -> Result<(), GuidanceError>
where
    G: Gateway + 'static,
{
    let mut view = service.flow_view(identity).await?;
    while let Some(number) = view.question_number {
        let Some(option) = view.options.get((number - 1) % view.options.len().max(1)) else {
            break;
        };
        let answered = service.select_answer(identity, option).await?;
        if !answered.can_advance {
            break;
        }
        view = service.advance(identity).await?;
    }
    Ok(())
}

fn render_card(position: usize, card: &CollegeCard) {
    let location = if card.in_preferred_city {
        " [preferred city]"
    } else {
        ""
    };
    println!(
        "{position}. {} ({}, {}){location}",
        card.name, card.city, card.state
    );
    println!(
        "   {} | rating {} | fees {}",
        card.type_label,
        card.rating_label.as_deref().unwrap_or("n/a"),
        card.fees_range.as_deref().unwrap_or("n/a")
    );
    if !card.featured_courses.is_empty() {
        println!("   Courses: {}", card.featured_courses.join(", "));
    }
}
