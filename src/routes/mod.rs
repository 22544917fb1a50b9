pub mod assignments;

pub mod submissions;

pub mod system;

pub use assignments::configure_assignment_routes;
pub use submissions::configure_submission_routes;
pub use system::configure_system_routes;
