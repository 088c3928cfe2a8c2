pub mod model;
pub mod traits;
pub mod valuator;

pub use model::{NewRealEstate, RealEstate, RealEstatePrice};
pub use traits::{RealEstatePriceRepositoryTrait, RealEstateRepositoryTrait};
pub use valuator::{value_real_estate, RealEstateValuation};
