pub mod card;
pub mod collection;
pub mod license;
pub mod series;

pub use card::*;
pub use collection::*;
pub use license::*;
pub use series::*;
