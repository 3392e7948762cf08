use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the paginated instrument catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Instrument title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Absolute URL of the instrument page.
    #[serde(rename = "fronturl", default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Instrument type, e.g. `share`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Issuer details.
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: CatalogCompany,
    /// Last price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Decimal,
    /// Price currency code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
}

/// Issuer of a catalog item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCompany {
    /// Company name.
    #[serde(rename = "title", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Logo URL.
    #[serde(rename = "logo_link", default, deserialize_with = "null_as_default")]
    pub logo: String,
    /// Company page URL.
    #[serde(rename = "fronturl", default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Treat an explicit `null` like an absent key.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}
