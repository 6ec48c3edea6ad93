use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted worker profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

/// Identifier wrapper for placement agencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgencyId(pub String);

/// Identifier wrapper for platform users (agency staff, sponsors, workers).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Declared marital status of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl MaritalStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "married" => Some(Self::Married),
            "divorced" => Some(Self::Divorced),
            "widowed" => Some(Self::Widowed),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
            MaritalStatus::Divorced => "divorced",
            MaritalStatus::Widowed => "widowed",
        }
    }
}

/// Whether a worker can currently be placed with a household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Busy,
    Hired,
    Inactive,
}

impl AvailabilityStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Some(Self::Available),
            "busy" => Some(Self::Busy),
            "hired" => Some(Self::Hired),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Busy => "busy",
            AvailabilityStatus::Hired => "hired",
            AvailabilityStatus::Inactive => "inactive",
        }
    }
}

/// Progress of the platform's identity verification pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

/// Listing lifecycle for a profile. Freshly ingested profiles start as drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Draft,
    Published,
    Archived,
}

impl ProfileStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ProfileStatus::Draft => "draft",
            ProfileStatus::Published => "published",
            ProfileStatus::Archived => "archived",
        }
    }
}

/// The sanitized, fully defaulted worker profile produced by validation.
///
/// Every field is concrete: optional inputs either carried a valid value or
/// were defaulted, numeric fields are parsed, and enum fields are one of
/// their allowed values. This is the only shape the persistence layer sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerProfile {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub nationality: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub marital_status: Option<MaritalStatus>,
    pub children_count: u8,
    pub experience_years: u8,
    pub preferred_salary_min: Option<u32>,
    pub preferred_salary_max: Option<u32>,
    pub preferred_currency: String,
    pub passport_expiry: Option<NaiveDate>,
    pub available_from: Option<NaiveDate>,
    pub availability_status: AvailabilityStatus,
    pub verification_status: VerificationStatus,
    pub live_in_preference: bool,
    pub rating: f32,
    pub view_count: u32,
    pub application_count: u32,
    pub identity_verified: bool,
    pub medical_clearance: bool,
    pub police_clearance: bool,
    pub status: ProfileStatus,
    /// Owning agency. `None` for self-submitted profiles; the batch upload
    /// path always stamps the submitting agency here.
    pub agency_id: Option<AgencyId>,
    /// Agency-submitted rows are auto-approved, unlike self-submitted ones.
    pub agency_approved: bool,
}
