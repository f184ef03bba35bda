//! Payloads returned by the third-party geocoding and weather APIs.

use crate::services::validation::celsius_to_fahrenheit;
use serde::{Deserialize, Deserializer, Serialize};

/// ViaCEP lookup result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRecord {
    pub cep: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "localidade")]
    pub city: String,
    #[serde(rename = "uf")]
    pub state: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
    /// Not-found flag. ViaCEP sends it either as a boolean or as `"true"`.
    #[serde(rename = "erro", deserialize_with = "deserialize_flag")]
    pub not_found: bool,
}

impl LocationRecord {
    /// A record is usable only when the flag is clear and a city was resolved
    pub fn is_found(&self) -> bool {
        !self.not_found && !self.city.trim().is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Text(value)) => value.trim().eq_ignore_ascii_case("true"),
        None => false,
    })
}

/// WeatherAPI `current.json` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    #[serde(default)]
    pub location: WeatherLocation,
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherLocation {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub temp_f: f64,
}

/// Celsius value used for development-mode mock samples
pub const MOCK_TEMP_C: f64 = 25.0;

impl WeatherSample {
    /// Fixed sample substituted in development mode when the weather API fails
    pub fn mock(city: &str) -> Self {
        Self {
            location: WeatherLocation {
                name: city.to_string(),
                country: "Brazil".to_string(),
                ..WeatherLocation::default()
            },
            current: CurrentConditions {
                temp_c: MOCK_TEMP_C,
                temp_f: celsius_to_fahrenheit(MOCK_TEMP_C),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_record_decodes_viacep_body() {
        let body = r#"{
            "cep": "29902-555",
            "logradouro": "Rua Sete de Setembro",
            "complemento": "",
            "bairro": "Centro",
            "localidade": "Vitória",
            "uf": "ES",
            "ibge": "3205309",
            "gia": "",
            "ddd": "27",
            "siafi": "5705"
        }"#;

        let record: LocationRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.city, "Vitória");
        assert_eq!(record.state, "ES");
        assert_eq!(record.district, "Centro");
        assert!(!record.not_found);
        assert!(record.is_found());
    }

    #[test]
    fn test_not_found_flag_as_bool_and_string() {
        let as_bool: LocationRecord = serde_json::from_str(r#"{"erro": true}"#).unwrap();
        let as_text: LocationRecord = serde_json::from_str(r#"{"erro": "true"}"#).unwrap();

        assert!(as_bool.not_found);
        assert!(as_text.not_found);
        assert!(!as_bool.is_found());
        assert!(!as_text.is_found());
    }

    #[test]
    fn test_empty_city_is_not_found() {
        let record: LocationRecord =
            serde_json::from_str(r#"{"localidade": "", "uf": "SP"}"#).unwrap();
        assert!(!record.not_found);
        assert!(!record.is_found());
    }

    #[test]
    fn test_weather_sample_requires_current_block() {
        let missing = serde_json::from_str::<WeatherSample>(r#"{"location": {"name": "X"}}"#);
        assert!(missing.is_err());

        let sample: WeatherSample = serde_json::from_str(
            r#"{"location": {"name": "São Paulo", "region": "Sao Paulo", "country": "Brazil", "lat": -23.53, "lon": -46.62},
                "current": {"temp_c": 28.0, "temp_f": 82.4}}"#,
        )
        .unwrap();
        assert_eq!(sample.location.name, "São Paulo");
        assert_eq!(sample.current.temp_c, 28.0);
    }

    #[test]
    fn test_mock_sample() {
        let sample = WeatherSample::mock("Campinas");
        assert_eq!(sample.location.name, "Campinas");
        assert_eq!(sample.location.country, "Brazil");
        assert_eq!(sample.current.temp_c, 25.0);
        assert_eq!(sample.current.temp_f, 77.0);
    }
}
