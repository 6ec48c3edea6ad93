pub mod bulk;
pub mod domain;

pub use domain::{
    AgencyId, AvailabilityStatus, MaritalStatus, ProfileId, ProfileStatus, UserId,
    VerificationStatus, WorkerProfile,
};
