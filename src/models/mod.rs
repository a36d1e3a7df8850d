pub mod advisory;
pub mod alert;
pub mod environmental;
pub mod health;
pub mod history;
pub mod report;
pub mod risk;

pub use advisory::*;
pub use alert::*;
pub use environmental::*;
pub use health::*;
pub use history::*;
pub use report::*;
pub use risk::*;
