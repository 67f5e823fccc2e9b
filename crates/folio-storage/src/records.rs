//! Certification and profile records.

use serde::{Deserialize, Serialize};

use crate::repository::{JsonRepository, Repository};
use crate::store::KeyValueStore;

/// Storage key of the certification list.
pub const CERTIFICATIONS_KEY: &str = "certifications";
/// Storage key of the profile image data URL.
pub const PROFILE_IMAGE_KEY: &str = "profileImage";

/// Gradient/background pairs handed out to new certifications in turn.
const PALETTE: [(&str, &str); 5] = [
    ("from-orange-500 to-amber-600", "bg-orange-500"),
    ("from-blue-500 to-cyan-600", "bg-blue-500"),
    ("from-purple-500 to-pink-600", "bg-purple-500"),
    ("from-green-500 to-emerald-600", "bg-green-500"),
    ("from-red-500 to-rose-600", "bg-red-500"),
];

/// One certification card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub credential_id: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub bg_color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_url: Option<String>,
}

/// User input for a new certification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCertification {
    pub name: String,
    pub issuer: String,
    /// Comma-separated skill list.
    pub skills: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// The certifications shown when nothing has been stored yet.
pub fn default_certifications() -> Vec<Certification> {
    vec![
        Certification {
            id: "cert-databricks".into(),
            name: "Databricks Accredited Databricks Fundamentals".into(),
            issuer: "Databricks".into(),
            date: String::new(),
            credential_id: String::new(),
            skills: vec![
                "Databricks".into(),
                "Apache Spark".into(),
                "Data Engineering".into(),
                "Lakehouse".into(),
            ],
            color: "from-red-500 to-orange-600".into(),
            bg_color: "bg-red-500".into(),
            description: "Certification validating foundational knowledge of the Databricks \
                          Lakehouse Platform, including data engineering and analytics capabilities."
                .into(),
            icon: "DAT".into(),
            image_url: None,
            verify_url: None,
        },
        Certification {
            id: "cert-google-analytics".into(),
            name: "Google Analytics Certification".into(),
            issuer: "Google".into(),
            date: String::new(),
            credential_id: String::new(),
            skills: vec![
                "Google Analytics".into(),
                "Data Analysis".into(),
                "Web Analytics".into(),
                "Reporting".into(),
            ],
            color: "from-blue-500 to-cyan-600".into(),
            bg_color: "bg-blue-500".into(),
            description: "Certification demonstrating proficiency in Google Analytics for \
                          measuring and analyzing website traffic and user behavior."
                .into(),
            icon: "GA".into(),
            image_url: None,
            verify_url: None,
        },
    ]
}

/// The stored certification list.
///
/// An absent or empty list is replaced by [`default_certifications`] and
/// written back, so the defaults survive the first edit.
pub struct CertificationRepository<'s> {
    inner: JsonRepository<'s, Vec<Certification>>,
}

impl<'s> CertificationRepository<'s> {
    pub fn new(store: &'s mut dyn KeyValueStore) -> Self {
        Self {
            inner: JsonRepository::new(store, CERTIFICATIONS_KEY, default_certifications),
        }
    }

    /// Number of certifications a fresh load would show, without writing.
    pub fn count(&self) -> usize {
        let certs = self.inner.load();
        if certs.is_empty() {
            default_certifications().len()
        } else {
            certs.len()
        }
    }

    /// Add a certification. Name and issuer are required.
    pub fn add(&mut self, input: NewCertification) -> Option<Certification> {
        let name = input.name.trim();
        let issuer = input.issuer.trim();
        if name.is_empty() || issuer.is_empty() {
            log::debug!("Rejected certification without name/issuer");
            return None;
        }
        let mut certs = self.load();
        let (color, bg_color) = PALETTE[certs.len() % PALETTE.len()];
        let description = if input.description.trim().is_empty() {
            format!("Certification from {issuer}")
        } else {
            input.description.trim().to_string()
        };
        let cert = Certification {
            id: next_id(&certs),
            name: name.to_string(),
            issuer: issuer.to_string(),
            date: String::new(),
            credential_id: String::new(),
            skills: input
                .skills
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            color: color.to_string(),
            bg_color: bg_color.to_string(),
            description,
            icon: issuer.chars().take(3).collect::<String>().to_uppercase(),
            image_url: input.image_url,
            verify_url: None,
        };
        certs.push(cert.clone());
        self.save(&certs);
        log::info!("Added certification {} '{}'", cert.id, cert.name);
        Some(cert)
    }

    /// Delete by id. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let mut certs = self.load();
        let before = certs.len();
        certs.retain(|c| c.id != id);
        if certs.len() == before {
            return false;
        }
        self.save(&certs);
        log::info!("Deleted certification {id}");
        true
    }
}

impl Repository<Vec<Certification>> for CertificationRepository<'_> {
    fn load(&self) -> Vec<Certification> {
        let certs = self.inner.load();
        if certs.is_empty() {
            default_certifications()
        } else {
            certs
        }
    }

    fn save(&mut self, value: &Vec<Certification>) {
        self.inner.save(value);
    }
}

impl CertificationRepository<'_> {
    /// Load, writing the defaults back if the stored list was absent or empty.
    pub fn load_or_seed(&mut self) -> Vec<Certification> {
        let stored = self.inner.load();
        if self.inner.is_stored() && !stored.is_empty() {
            return stored;
        }
        let defaults = default_certifications();
        self.inner.save(&defaults);
        defaults
    }
}

fn next_id(existing: &[Certification]) -> String {
    let mut n = existing.len() + 1;
    loop {
        let id = format!("cert-{n}");
        if !existing.iter().any(|c| c.id == id) {
            return id;
        }
        n += 1;
    }
}

/// The profile image, stored as a raw data URL string.
pub struct ProfileImageRepository<'s> {
    store: &'s mut dyn KeyValueStore,
}

impl<'s> ProfileImageRepository<'s> {
    pub fn new(store: &'s mut dyn KeyValueStore) -> Self {
        Self { store }
    }
}

impl Repository<Option<String>> for ProfileImageRepository<'_> {
    fn load(&self) -> Option<String> {
        match self.store.get(PROFILE_IMAGE_KEY) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                log::warn!("Reading profile image failed: {e}");
                None
            },
        }
    }

    fn save(&mut self, value: &Option<String>) {
        let result = match value {
            Some(url) => self.store.set(PROFILE_IMAGE_KEY, url),
            None => self.store.remove(PROFILE_IMAGE_KEY),
        };
        if let Err(e) = result {
            log::warn!("Saving profile image failed: {e}");
        }
    }
}
