use serde::Serialize;

use super::domain::AssessmentOrdinal;

/// A single-choice question. Options are shown, and answered, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

impl Question {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| *candidate == option)
    }
}

/// Summary of one assessment for listing screens.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentSummary {
    pub ordinal: AssessmentOrdinal,
    pub title: &'static str,
    pub description: &'static str,
    pub question_count: usize,
}

pub fn questions(ordinal: AssessmentOrdinal) -> &'static [Question] {
    match ordinal {
        AssessmentOrdinal::FieldDiscovery => FIELD_DISCOVERY,
        AssessmentOrdinal::Specialization => SPECIALIZATION,
        AssessmentOrdinal::FinalDecision => FINAL_DECISION,
    }
}

pub fn question_count(ordinal: AssessmentOrdinal) -> usize {
    questions(ordinal).len()
}

pub fn summaries() -> Vec<AssessmentSummary> {
    AssessmentOrdinal::ALL
        .into_iter()
        .map(|ordinal| AssessmentSummary {
            ordinal,
            title: ordinal.title(),
            description: ordinal.description(),
            question_count: question_count(ordinal),
        })
        .collect()
}

const fn q(prompt: &'static str, options: &'static [&'static str]) -> Question {
    Question { prompt, options }
}

static FIELD_DISCOVERY: &[Question] = &[
    q(
        "Which of these subjects interests you the most?",
        &["Mathematics & Physics", "Biology & Chemistry", "Social Sciences", "Arts & Literature", "Computer Science"],
    ),
    q(
        "What type of work environment appeals to you?",
        &["Laboratory/Research", "Office/Corporate", "Outdoor/Field work", "Creative studio", "Technology companies"],
    ),
    q(
        "Which career outcome excites you most?",
        &["Solving complex problems", "Helping people", "Creating something new", "Leading teams", "Building technology"],
    ),
    q(
        "How do you prefer to work?",
        &["Independently", "In small teams", "In large groups", "With mentorship", "Remotely"],
    ),
    q(
        "Which of these activities do you enjoy?",
        &["Analyzing data", "Caring for others", "Designing/Creating", "Public speaking", "Programming"],
    ),
    q(
        "What motivates you most?",
        &["Financial success", "Making a difference", "Recognition", "Personal growth", "Innovation"],
    ),
    q(
        "Which field seems most promising to you?",
        &["Engineering", "Medicine", "Business", "Arts", "Technology"],
    ),
    q(
        "How do you handle pressure?",
        &["Thrive under pressure", "Work steadily", "Need calm environment", "Prefer deadlines", "Flexible approach"],
    ),
    q(
        "What's your learning style?",
        &["Visual learner", "Hands-on practice", "Reading/Writing", "Discussion-based", "Online learning"],
    ),
    q(
        "Which skill do you want to develop?",
        &["Technical skills", "Communication", "Leadership", "Creativity", "Analytical thinking"],
    ),
    q(
        "What type of impact do you want to make?",
        &["Scientific breakthrough", "Social change", "Economic growth", "Cultural influence", "Technological advancement"],
    ),
    q(
        "Which work schedule suits you?",
        &["Regular 9-5", "Flexible hours", "Project-based", "Shift work", "Freelance"],
    ),
    q(
        "What's your ideal work-life balance?",
        &["Work-focused", "Balanced", "Life-focused", "Seasonal variation", "No preference"],
    ),
    q(
        "Which of these excites you most?",
        &["Research & Development", "Patient care", "Business strategy", "Creative expression", "Software development"],
    ),
    q(
        "How important is job security to you?",
        &["Very important", "Somewhat important", "Not important", "Depends on role", "Prefer risk-taking"],
    ),
];

static SPECIALIZATION: &[Question] = &[
    q(
        "Based on your field interest, which specialization appeals most?",
        &["Core engineering", "Applied sciences", "Management studies", "Research oriented", "Interdisciplinary"],
    ),
    q(
        "What type of problems do you want to solve?",
        &["Technical challenges", "Human problems", "Business issues", "Environmental concerns", "Social problems"],
    ),
    q(
        "Which industry interests you most?",
        &["Technology", "Healthcare", "Finance", "Education", "Manufacturing"],
    ),
    q(
        "What's your preferred study intensity?",
        &["Highly theoretical", "Practical focused", "Balanced theory-practice", "Research intensive", "Application oriented"],
    ),
    q(
        "Which skills do you want to master?",
        &["Technical expertise", "Management skills", "Research abilities", "Creative skills", "Communication"],
    ),
    q(
        "What's your career timeline preference?",
        &["Quick employment", "Graduate studies first", "Entrepreneurship", "Research career", "Government service"],
    ),
    q(
        "Which work setting interests you?",
        &["Corporate environment", "Academic institution", "Government sector", "Startup culture", "Non-profit organization"],
    ),
    q(
        "What's your risk tolerance?",
        &["High risk, high reward", "Moderate risk", "Low risk preferred", "Calculated risks", "Risk averse"],
    ),
    q(
        "Which achievement would make you proudest?",
        &["Technical innovation", "Leading a team", "Publishing research", "Starting a company", "Serving society"],
    ),
    q(
        "What's your ideal project duration?",
        &["Short-term projects", "Medium-term goals", "Long-term vision", "Ongoing research", "Varied timelines"],
    ),
    q(
        "Which collaboration style suits you?",
        &["Cross-functional teams", "Subject matter experts", "International cooperation", "Community engagement", "Solo expertise"],
    ),
    q(
        "What's your preferred complexity level?",
        &["Highly complex problems", "Moderate complexity", "Simple solutions", "Gradually increasing", "Variable complexity"],
    ),
    q(
        "Which outcome matters most to you?",
        &["Practical applications", "Theoretical understanding", "Commercial success", "Academic recognition", "Social impact"],
    ),
    q(
        "What's your technology comfort level?",
        &["Cutting-edge technology", "Proven technologies", "Traditional methods", "Hybrid approaches", "Technology-independent"],
    ),
    q(
        "Which growth path appeals to you?",
        &["Technical leadership", "People management", "Subject matter expert", "Entrepreneurial", "Academic career"],
    ),
    q(
        "What's your global perspective?",
        &["International opportunities", "National focus", "Regional impact", "Local community", "Universal applications"],
    ),
    q(
        "Which challenge excites you most?",
        &["Unsolved problems", "Optimization tasks", "Innovation projects", "Implementation challenges", "System design"],
    ),
    q(
        "What's your ideal team size?",
        &["Individual contributor", "Small team (2-5)", "Medium team (6-15)", "Large team (15+)", "No preference"],
    ),
    q(
        "Which success metric matters most?",
        &["Technical excellence", "Business impact", "Research citations", "User satisfaction", "Social change"],
    ),
    q(
        "What's your long-term vision?",
        &["Industry expert", "Research leader", "Business executive", "Social entrepreneur", "Academic professor"],
    ),
];

static FINAL_DECISION: &[Question] = &[
    q(
        "Considering all factors, which degree program feels most aligned with your goals?",
        &["Engineering (B.Tech)", "Science (B.Sc)", "Commerce (B.Com)", "Arts (B.A)", "Management (BBA)"],
    ),
    q(
        "What's most important in your college choice?",
        &["Academic reputation", "Placement records", "Faculty quality", "Infrastructure", "Location"],
    ),
    q(
        "Which factor would you prioritize?",
        &["Low fees", "High placement package", "Research opportunities", "Industry connections", "Alumni network"],
    ),
    q(
        "What's your backup plan preference?",
        &["Multiple similar programs", "Diverse options", "Gap year acceptable", "Immediate employment", "Family business"],
    ),
    q(
        "How important is college ranking to you?",
        &["Extremely important", "Very important", "Moderately important", "Slightly important", "Not important"],
    ),
    q(
        "What's your financial preference?",
        &["Scholarship/Merit aid", "Educational loan", "Family funding", "Part-time work", "Government schemes"],
    ),
    q(
        "Which college type do you prefer?",
        &["Government college", "Private university", "Deemed university", "Autonomous college", "No preference"],
    ),
    q(
        "What's your accommodation preference?",
        &["College hostel", "Private accommodation", "Day scholar", "Home nearby", "Flexible"],
    ),
    q(
        "Which extracurricular activities interest you?",
        &["Technical clubs", "Sports", "Cultural activities", "Social service", "Entrepreneurship"],
    ),
    q(
        "How important is diversity to you?",
        &["Very important", "Somewhat important", "Not important", "Regional preference", "International exposure"],
    ),
    q(
        "What's your decision-making approach?",
        &["Data-driven analysis", "Intuition-based", "Family consultation", "Peer opinions", "Expert guidance"],
    ),
    q(
        "Which support system do you need?",
        &["Academic support", "Career counseling", "Personal mentoring", "Financial aid", "Industry exposure"],
    ),
    q(
        "What's your timeline flexibility?",
        &["Must start this year", "Can wait one year", "Flexible timeline", "Prefer early admission", "No rush"],
    ),
    q(
        "Which outcome concerns you most?",
        &["Unemployment after graduation", "Low starting salary", "Limited growth opportunities", "Work-life balance", "Job satisfaction"],
    ),
    q(
        "What's your final decision factor?",
        &["Personal passion", "Market demand", "Family expectations", "Financial considerations", "Future opportunities"],
    ),
];
