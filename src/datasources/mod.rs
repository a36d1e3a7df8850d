pub mod globalforestwatch;
pub mod openweathermap;
pub mod soilgrids;
pub mod synthetic;

pub use globalforestwatch::GlobalForestWatchClient;
pub use openweathermap::OpenWeatherMapClient;
pub use soilgrids::SoilGridsClient;
pub use synthetic::{SeededSynthetic, SyntheticDataProvider};
