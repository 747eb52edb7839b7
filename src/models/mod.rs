pub mod catalog;
pub mod crop;
pub mod farm_record;
pub mod feature;
pub mod recommendation;
pub mod reference;
pub mod submission;
pub mod weather;

pub use catalog::*;
pub use crop::*;
pub use farm_record::*;
pub use feature::*;
pub use recommendation::*;
pub use reference::*;
pub use submission::*;
pub use weather::*;
