//! Content registry: what each window shows.
//!
//! Every [`ContentKey`] maps to exactly one [`ContentView`] constructor in
//! [`ContentView::mount`]. The match is exhaustive, so a new key does not
//! compile until it has a view.

use folio_storage::Certification;
use folio_types::content::ContentKey;

/// Static body of one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentView {
    key: ContentKey,
    heading: &'static str,
    lines: Vec<String>,
    /// Lines shown so far for progressively revealed views.
    revealed: Option<usize>,
}

impl ContentView {
    /// Build the view for `key`. Only the certifications view reads `certs`.
    pub fn mount(key: ContentKey, certs: &[Certification]) -> Self {
        let (heading, lines) = match key {
            ContentKey::About => ("Chanakya Yadav", owned(&ABOUT)),
            ContentKey::Documents => ("Documents", owned(&DOCUMENTS)),
            ContentKey::VsCode => ("about_me.py", owned(&ABOUT_ME_PY)),
            ContentKey::Jupyter => ("projects.ipynb", owned(&NOTEBOOK)),
            ContentKey::Excel => ("Skills.xlsx", owned(&SKILL_SHEET)),
            ContentKey::MlModels => ("Model Registry", owned(&MODELS)),
            ContentKey::Skills => ("Technical Skills", owned(&SKILLS)),
            ContentKey::Experience => ("Experience", owned(&EXPERIENCE)),
            ContentKey::Certifications => ("Certifications", certification_lines(certs)),
            ContentKey::Browser => ("Welcome to my Portfolio", owned(&BROWSER)),
            ContentKey::Terminal => ("chanakya@portfolio:~", owned(&TERMINAL)),
            ContentKey::Settings => ("System Settings", owned(&SETTINGS)),
        };
        let revealed = Self::reveals_progressively(key).then_some(0);
        Self {
            key,
            heading,
            lines,
            revealed,
        }
    }

    /// Whether this content types its lines in on a timer.
    pub fn reveals_progressively(key: ContentKey) -> bool {
        matches!(key, ContentKey::VsCode | ContentKey::Jupyter)
    }

    pub fn key(&self) -> ContentKey {
        self.key
    }

    pub fn heading(&self) -> &str {
        self.heading
    }

    /// Reveal one more line. Returns `true` when everything is visible.
    pub fn reveal_step(&mut self) -> bool {
        if let Some(shown) = self.revealed.as_mut()
            && *shown < self.lines.len()
        {
            *shown += 1;
        }
        self.is_fully_revealed()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.revealed.is_none_or(|shown| shown >= self.lines.len())
    }

    /// Lines currently on screen.
    pub fn visible_lines(&self) -> &[String] {
        let shown = self.revealed.unwrap_or(self.lines.len()).min(self.lines.len());
        &self.lines[..shown]
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Rebuild the certifications list after the store changed.
    pub fn refresh_certifications(&mut self, certs: &[Certification]) {
        if self.key == ContentKey::Certifications {
            self.lines = certification_lines(certs);
        }
    }
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| (*l).to_string()).collect()
}

fn certification_lines(certs: &[Certification]) -> Vec<String> {
    if certs.is_empty() {
        return vec!["No certifications yet.".to_string()];
    }
    certs
        .iter()
        .map(|c| {
            if c.skills.is_empty() {
                format!("[{}] {} ({})", c.icon, c.name, c.issuer)
            } else {
                format!("[{}] {} ({}) {}", c.icon, c.name, c.issuer, c.skills.join(", "))
            }
        })
        .collect()
}

// -- Static bodies ------------------------------------------------------------

const ABOUT: [&str; 5] = [
    "Data Analyst",
    "4+ years driving data-informed decisions across banking, healthcare, and e-commerce.",
    "$1.7M+ in cost savings. Dashboards, predictive models, data governance.",
    "M.S. Information Systems & Management, Dallas Baptist University",
    "chanakya.csv@gmail.com",
];

const DOCUMENTS: [&str; 6] = [
    "Resume.pdf            245 KB",
    "Cover Letter.docx     32 KB",
    "Portfolio.pdf         1.2 MB",
    "Certificates          8 items",
    "Screenshots           15 items",
    "Presentations         5 items",
];

const ABOUT_ME_PY: [&str; 12] = [
    "class AboutMe:",
    "    \"\"\"Personal information and background\"\"\"",
    "",
    "    def __init__(self):",
    "        self.name = \"Chanakya Yadav\"",
    "        self.title = \"Data Analyst\"",
    "        self.education = [",
    "            \"M.S. Information Systems & Management\",",
    "        ]",
    "        self.certifications = [",
    "            \"Databricks Academy Accreditation\", \"Google Analytics Certificate\",",
    "        ]",
];

const NOTEBOOK: [&str; 11] = [
    "# Portfolio Projects Analysis",
    "# Loading project data...",
    "import portfolio as pf",
    "from skills import DataScience",
    "",
    "projects = pf.load_projects()",
    "print(f\"Total Projects: {len(projects)}\")",
    "Total Projects: 6",
    "",
    "# Executing portfolio showcase...",
    "pf.display_projects(projects)",
];

const SKILL_SHEET: [&str; 5] = [
    "Category      | Skills",
    "Languages     | Python, SQL, R, SAS",
    "ML            | scikit-learn, XGBoost, TensorFlow, SHAP",
    "Data          | Snowflake, Databricks, PostgreSQL, dbt",
    "BI            | Power BI, Tableau, Looker, Advanced Excel",
];

const MODELS: [&str; 8] = [
    "Credit Risk Prediction",
    "Fraud Detection & Anomaly Detection",
    "Patient Readmission Prediction",
    "Claims Fraud & Overpayment Detection",
    "Customer Segmentation & Clustering",
    "Time Series Forecasting",
    "NLP Predictive Risk Scoring",
    "Unit Economics & LTV/CAC Modeling",
];

const SKILLS: [&str; 4] = [
    "Python, SQL, R, SAS, Git, pandas, NumPy, scikit-learn",
    "TensorFlow, XGBoost, NLP, GenAI, LLM",
    "Snowflake, Databricks, dbt, PostgreSQL, MySQL, MongoDB",
    "Azure, AWS, GCP, BigQuery, Airflow, SSIS",
];

const EXPERIENCE: [&str; 4] = [
    "Data Analyst, Swiggy (Apr 2020 - May 2021)",
    "Data Analyst, Molina Healthcare (Jun 2021 - Aug 2023)",
    "Graduate Student & Student Ambassador, Dallas Baptist University (Aug 2023 - May 2025)",
    "Data Analyst, Synovus Bank (Dec 2024 - Present)",
];

const BROWSER: [&str; 2] = ["Explore my work using the desktop icons.", "Contact Me"];

const TERMINAL: [&str; 6] = [
    "$ whoami",
    "Chanakya Yadav - Data Analyst",
    "$ cat skills.txt",
    "Python, pandas, NumPy, scikit-learn, XGBoost, SHAP",
    "$ cat experience.txt",
    "Synovus Bank | Molina Healthcare | Swiggy",
];

const SETTINGS: [&str; 5] = [
    "Theme: Dark Blue",
    "Resolution: 1920 x 1080",
    "Sound: Enabled",
    "Animations: Smooth",
    "3D Effects: Enabled",
];
