// HTTP routes
pub mod health;
pub mod history;
pub mod industries;
pub mod merge;
pub mod regions;
pub mod search;
pub mod series;

pub use health::*;
pub use history::*;
pub use industries::*;
pub use merge::*;
pub use regions::*;
pub use search::*;
pub use series::*;
