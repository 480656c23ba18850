//! REST Countries API client.

use std::collections::HashMap;

use serde::Deserialize;

use super::error::CountryError;

/// Default base URL for the REST Countries API (no key needed).
const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

// ============================================================================
// Wire DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
struct CountryDto {
    name: NameDto,
    #[serde(default)]
    capital: Vec<String>,
    population: u64,
    #[serde(default)]
    region: String,
    #[serde(default)]
    subregion: String,
    #[serde(default)]
    currencies: HashMap<String, CurrencyDto>,
    #[serde(default)]
    languages: HashMap<String, String>,
    flags: FlagsDto,
    #[serde(default, rename = "coatOfArms")]
    coat_of_arms: Option<CoatOfArmsDto>,
    #[serde(default)]
    latlng: Vec<f64>,
    #[serde(default)]
    area: f64,
    #[serde(default)]
    timezones: Vec<String>,
    #[serde(default)]
    borders: Vec<String>,
    #[serde(default)]
    idd: Option<IddDto>,
}

#[derive(Debug, Deserialize)]
struct NameDto {
    common: String,
    official: String,
}

#[derive(Debug, Deserialize)]
struct CurrencyDto {
    name: String,
    #[serde(default)]
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlagsDto {
    #[serde(default)]
    svg: String,
    #[serde(default)]
    png: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoatOfArmsDto {
    #[serde(default)]
    svg: Option<String>,
    #[serde(default)]
    png: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IddDto {
    #[serde(default)]
    root: Option<String>,
    #[serde(default)]
    suffixes: Vec<String>,
}

// ============================================================================
// Flattened views
// ============================================================================

/// One currency used by a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: String,
    pub name: String,
    pub symbol: Option<String>,
}

/// Country profile for the about page.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryProfile {
    pub name: String,
    pub official_name: String,
    pub capital: String,
    pub population: u64,
    pub region: String,
    pub subregion: String,
    pub currencies: Vec<CurrencyInfo>,
    pub languages: Vec<String>,
    pub flag_svg: String,
    pub flag_png: String,
    pub coat_of_arms: Option<String>,
    pub coordinates: Option<(f64, f64)>,
    pub area_km2: f64,
    pub timezones: Vec<String>,
    pub borders: Vec<String>,
    pub calling_code: String,
}

impl CountryProfile {
    /// Currencies as a display string, e.g. "Ghanaian cedi (₵)".
    pub fn format_currencies(&self) -> String {
        if self.currencies.is_empty() {
            return "N/A".to_string();
        }
        self.currencies
            .iter()
            .map(|c| match &c.symbol {
                Some(symbol) => format!("{} ({symbol})", c.name),
                None => format!("{} ({})", c.name, c.code),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Languages as a display string.
    pub fn format_languages(&self) -> String {
        if self.languages.is_empty() {
            return "N/A".to_string();
        }
        self.languages.join(", ")
    }

    /// Population with thousands separators.
    pub fn format_population(&self) -> String {
        let digits = self.population.to_string();
        let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                formatted.push(',');
            }
            formatted.push(c);
        }
        formatted
    }
}

impl From<CountryDto> for CountryProfile {
    fn from(dto: CountryDto) -> Self {
        // HashMaps have no stable order; sort for deterministic display
        let mut currencies: Vec<CurrencyInfo> = dto
            .currencies
            .into_iter()
            .map(|(code, c)| CurrencyInfo {
                code,
                name: c.name,
                symbol: c.symbol,
            })
            .collect();
        currencies.sort_by(|a, b| a.code.cmp(&b.code));

        let mut languages: Vec<String> = dto.languages.into_values().collect();
        languages.sort();

        let calling_code = match dto.idd {
            Some(idd) => {
                let root = idd.root.unwrap_or_default();
                let suffix = idd.suffixes.first().cloned().unwrap_or_default();
                format!("{root}{suffix}")
            }
            None => String::new(),
        };

        Self {
            name: dto.name.common,
            official_name: dto.name.official,
            capital: dto.capital.first().cloned().unwrap_or_else(|| "Accra".to_string()),
            population: dto.population,
            region: dto.region,
            subregion: dto.subregion,
            currencies,
            languages,
            flag_svg: dto.flags.svg,
            flag_png: dto.flags.png,
            coat_of_arms: dto.coat_of_arms.and_then(|c| c.svg.or(c.png)),
            coordinates: (dto.latlng.len() >= 2).then(|| (dto.latlng[0], dto.latlng[1])),
            area_km2: dto.area,
            timezones: dto.timezones,
            borders: dto.borders,
            calling_code,
        }
    }
}

/// Summary of a neighbouring country.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighbourSummary {
    pub name: String,
    pub capital: String,
    pub population: u64,
    pub flag_svg: String,
}

/// Configuration for the country client.
#[derive(Debug, Clone)]
pub struct CountryClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CountryClientConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for CountryClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Client for the REST Countries API.
#[derive(Debug, Clone)]
pub struct CountryClient {
    http: reqwest::Client,
    base_url: String,
}

impl CountryClient {
    /// Create a new country client.
    pub fn new(config: CountryClientConfig) -> Result<Self, CountryError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the Ghana country profile.
    pub async fn ghana(&self) -> Result<CountryProfile, CountryError> {
        let url = format!("{}/name/ghana", self.base_url);
        let body = self.fetch(&url).await?;

        let countries: Vec<CountryDto> =
            serde_json::from_str(&body).map_err(|e| CountryError::Json {
                message: e.to_string(),
            })?;

        countries
            .into_iter()
            .next()
            .map(CountryProfile::from)
            .ok_or(CountryError::NotFound)
    }

    /// Fetch summaries for neighbouring countries by ISO code.
    /// An empty code list yields an empty result without a request.
    pub async fn neighbours(&self, codes: &[String]) -> Result<Vec<NeighbourSummary>, CountryError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/alpha?codes={}", self.base_url, codes.join(","));
        let body = self.fetch(&url).await?;

        let countries: Vec<CountryDto> =
            serde_json::from_str(&body).map_err(|e| CountryError::Json {
                message: e.to_string(),
            })?;

        Ok(countries
            .into_iter()
            .map(|dto| NeighbourSummary {
                name: dto.name.common,
                capital: dto.capital.first().cloned().unwrap_or_else(|| "N/A".to_string()),
                population: dto.population,
                flag_svg: dto.flags.svg,
            })
            .collect())
    }

    async fn fetch(&self, url: &str) -> Result<String, CountryError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CountryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ghana_json() -> &'static str {
        r#"[{
            "name": { "common": "Ghana", "official": "Republic of Ghana" },
            "capital": ["Accra"],
            "population": 31072945,
            "region": "Africa",
            "subregion": "Western Africa",
            "currencies": { "GHS": { "name": "Ghanaian cedi", "symbol": "₵" } },
            "languages": { "eng": "English" },
            "flags": { "svg": "https://flagcdn.com/gh.svg", "png": "https://flagcdn.com/w320/gh.png" },
            "coatOfArms": { "svg": "https://mainfacts.com/media/images/coats_of_arms/gh.svg" },
            "latlng": [8.0, -2.0],
            "area": 238533.0,
            "timezones": ["UTC"],
            "borders": ["BFA", "CIV", "TGO"],
            "idd": { "root": "+2", "suffixes": ["33"] }
        }]"#
    }

    #[test]
    fn profile_flattens_from_wire() {
        let countries: Vec<CountryDto> = serde_json::from_str(ghana_json()).unwrap();
        let profile = CountryProfile::from(countries.into_iter().next().unwrap());

        assert_eq!(profile.name, "Ghana");
        assert_eq!(profile.official_name, "Republic of Ghana");
        assert_eq!(profile.capital, "Accra");
        assert_eq!(profile.calling_code, "+233");
        assert_eq!(profile.coordinates, Some((8.0, -2.0)));
        assert_eq!(profile.borders, vec!["BFA", "CIV", "TGO"]);
        assert_eq!(profile.coat_of_arms.as_deref(), Some("https://mainfacts.com/media/images/coats_of_arms/gh.svg"));
    }

    #[test]
    fn display_formatting() {
        let countries: Vec<CountryDto> = serde_json::from_str(ghana_json()).unwrap();
        let profile = CountryProfile::from(countries.into_iter().next().unwrap());

        assert_eq!(profile.format_currencies(), "Ghanaian cedi (₵)");
        assert_eq!(profile.format_languages(), "English");
        assert_eq!(profile.format_population(), "31,072,945");
    }

    #[test]
    fn format_population_small_numbers() {
        let mut profile: CountryProfile = {
            let countries: Vec<CountryDto> = serde_json::from_str(ghana_json()).unwrap();
            countries.into_iter().next().unwrap().into()
        };

        profile.population = 999;
        assert_eq!(profile.format_population(), "999");
        profile.population = 1000;
        assert_eq!(profile.format_population(), "1,000");
    }

    #[test]
    fn missing_optional_sections_default() {
        let json = r#"[{
            "name": { "common": "Ghana", "official": "Republic of Ghana" },
            "population": 31072945,
            "flags": { "svg": "", "png": "" }
        }]"#;

        let countries: Vec<CountryDto> = serde_json::from_str(json).unwrap();
        let profile = CountryProfile::from(countries.into_iter().next().unwrap());

        assert_eq!(profile.capital, "Accra");
        assert!(profile.borders.is_empty());
        assert_eq!(profile.format_currencies(), "N/A");
        assert_eq!(profile.format_languages(), "N/A");
        assert!(profile.coordinates.is_none());
    }

    #[test]
    fn config_defaults() {
        let config = CountryClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        assert!(CountryClient::new(CountryClientConfig::default()).is_ok());
    }
}
