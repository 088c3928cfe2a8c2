use async_trait::async_trait;

use super::model::{NewRealEstate, RealEstate, RealEstatePrice};
use crate::errors::Result;

#[async_trait]
pub trait RealEstateRepositoryTrait: Send + Sync {
    async fn create(&self, new_re: NewRealEstate) -> Result<RealEstate>;
    async fn get_by_id(&self, id: &str) -> Result<RealEstate>;
    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<RealEstate>>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait RealEstatePriceRepositoryTrait: Send + Sync {
    /// Full catalog for a property type, used to run the fallback chain
    /// in [`crate::real_estate::valuator::value_real_estate`].
    async fn list_for_type(&self, property_type: &str) -> Result<Vec<RealEstatePrice>>;
    async fn add(&self, price: RealEstatePrice) -> Result<()>;
}
