//! Application services for the user directory.

mod lookup;
mod provisioning;

pub use lookup::UserLookupService;
pub use provisioning::{
    CreateUserRequest, UserProvisioningError, UserProvisioningResult, UserProvisioningService,
};
