pub mod use_cases;

pub use use_cases::seed::SeedService;
pub use use_cases::verify::VerificationService;
