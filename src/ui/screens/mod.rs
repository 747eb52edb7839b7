pub mod advice;
pub mod crops;
pub mod dashboard;
pub mod features;

pub use advice::AdviceScreen;
pub use crops::CropsScreen;
pub use dashboard::DashboardScreen;
pub use features::FeaturesScreen;
