use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// IATA airport code, e.g. ATL.
    pub airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// RFC 3339 instant with offset, e.g. 2024-06-04T21:50:00-04:00.
    pub iso: String,
    /// IANA zone of the airport, e.g. America/New_York.
    pub time_zone: String,
}

impl Endpoint {
    pub fn new(airport: &str, iso: &str, time_zone: &str) -> Self {
        Self {
            airport: airport.to_string(),
            city: None,
            iso: iso.to_string(),
            time_zone: time_zone.to_string(),
        }
    }

    pub fn with_city(mut self, city: &str) -> Self {
        self.city = Some(city.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Codeshare {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightSegment {
    #[serde(alias = "airlineCode", skip_serializing_if = "Option::is_none")]
    pub marketing_carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_carrier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codeshare: Option<Codeshare>,
    #[serde(alias = "number")]
    pub flight_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_fallback_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<Endpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival: Option<Endpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eticketable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

impl FlightSegment {
    /// Marketing carrier, uppercased, `XX` when missing or blank.
    pub fn carrier(&self) -> String {
        self.marketing_carrier
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
            .unwrap_or_else(|| "XX".to_string())
    }

    pub fn cabin_kind(&self) -> Option<Cabin> {
        self.cabin.as_deref().and_then(Cabin::from_str_loose)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cabin {
    First,
    Business,
    Premium,
    Economy,
}

impl Cabin {
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIRST" => Some(Self::First),
            "BUSINESS" => Some(Self::Business),
            "PREMIUM" => Some(Self::Premium),
            "ECONOMY" => Some(Self::Economy),
            _ => None,
        }
    }

    pub fn fallback_booking_class(self) -> char {
        match self {
            Self::First => 'F',
            Self::Business => 'J',
            Self::Premium => 'N',
            Self::Economy => 'Y',
        }
    }
}
