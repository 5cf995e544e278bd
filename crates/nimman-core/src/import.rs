//! Shop data loaders for JSON, TOML, YAML and CSV files
//!
//! Every loader validates each record and aborts on the first violation, so
//! an invalid shop never reaches the insight engine.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::dataset::{fingerprint, Dataset};
use crate::error::{Error, Result, ValidationError};
use crate::models::{Aspect, AspectScores, PriceLevel, ShopRecord};

/// Separator between complaints in a CSV cell
pub const CSV_COMPLAINT_SEPARATOR: char = '|';

/// Supported shop data file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Toml,
    Yaml,
    Csv,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }

    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl std::str::FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Unknown data format: {}", s)),
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Document shape shared by the JSON, TOML and YAML loaders
#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    shops: Vec<RawShopRecord>,
}

/// A shop record as written in a data file, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawShopRecord {
    pub name: String,
    #[serde(alias = "reviews")]
    pub review_count: i64,
    pub rating: f64,
    pub sentiment_score: f64,
    #[serde(alias = "sentiment_trend")]
    pub sentiment_trend_pct: i32,
    pub price_level: String,
    #[serde(default)]
    pub aspects: BTreeMap<String, f64>,
    #[serde(default)]
    pub complaints: Vec<String>,
}

impl RawShopRecord {
    /// Convert into a validated [`ShopRecord`]
    pub fn into_record(self) -> std::result::Result<ShopRecord, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        if self.review_count < 0 {
            return Err(ValidationError::NegativeReviewCount {
                shop: name,
                value: self.review_count,
            });
        }
        let review_count = u32::try_from(self.review_count).map_err(|_| {
            ValidationError::ReviewCountTooLarge {
                shop: name.clone(),
                value: self.review_count,
            }
        })?;

        let price_level = self.price_level.parse::<PriceLevel>().map_err(|_| {
            ValidationError::UnknownPriceTier {
                shop: name.clone(),
                value: self.price_level.clone(),
            }
        })?;

        let mut aspects = AspectScores::new();
        for (key, score) in self.aspects {
            let aspect =
                key.parse::<Aspect>()
                    .map_err(|_| ValidationError::UnknownAspect {
                        shop: name.clone(),
                        name: key.clone(),
                    })?;
            if aspects.insert(aspect, score).is_some() {
                return Err(ValidationError::DuplicateAspect { shop: name, aspect });
            }
        }

        let record = ShopRecord {
            name,
            review_count,
            rating: self.rating,
            sentiment_score: self.sentiment_score,
            sentiment_trend_pct: self.sentiment_trend_pct,
            price_level,
            aspects,
            complaints: self
                .complaints
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        };
        record.validate()?;

        Ok(record)
    }
}

/// One CSV row; aspect cells may be blank so a gap is reported as a
/// missing aspect rather than a parse error
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    #[serde(alias = "reviews")]
    review_count: i64,
    rating: f64,
    sentiment_score: f64,
    #[serde(alias = "sentiment_trend")]
    sentiment_trend_pct: i32,
    price_level: String,
    food: Option<f64>,
    atmosphere: Option<f64>,
    service: Option<f64>,
    value: Option<f64>,
    #[serde(default)]
    complaints: Option<String>,
}

impl From<CsvRow> for RawShopRecord {
    fn from(row: CsvRow) -> Self {
        let aspects = [
            (Aspect::Food, row.food),
            (Aspect::Atmosphere, row.atmosphere),
            (Aspect::Service, row.service),
            (Aspect::Value, row.value),
        ]
        .into_iter()
        .filter_map(|(aspect, score)| score.map(|s| (aspect.as_str().to_string(), s)))
        .collect();

        let complaints = row
            .complaints
            .unwrap_or_default()
            .split(CSV_COMPLAINT_SEPARATOR)
            .map(|c| c.to_string())
            .collect();

        Self {
            name: row.name,
            review_count: row.review_count,
            rating: row.rating,
            sentiment_score: row.sentiment_score,
            sentiment_trend_pct: row.sentiment_trend_pct,
            price_level: row.price_level,
            aspects,
            complaints,
        }
    }
}

/// Parse CSV shop data
/// Format: name,review_count,rating,sentiment_score,sentiment_trend_pct,price_level,food,atmosphere,service,value,complaints
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<ShopRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut shops = Vec::new();
    for result in rdr.deserialize::<CsvRow>() {
        let row = result?;
        shops.push(RawShopRecord::from(row).into_record()?);
    }

    debug!(count = shops.len(), "Parsed CSV shop data");
    Ok(shops)
}

/// Parse shop data held in memory
pub fn parse_str(content: &str, format: DataFormat) -> Result<Vec<ShopRecord>> {
    let raw: RawDataset = match format {
        DataFormat::Json => serde_json::from_str(content)?,
        DataFormat::Toml => toml::from_str(content)?,
        DataFormat::Yaml => serde_yaml::from_str(content)?,
        DataFormat::Csv => return parse_csv(content.as_bytes()),
    };

    let shops = raw
        .shops
        .into_iter()
        .map(RawShopRecord::into_record)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!(count = shops.len(), format = format.as_str(), "Parsed shop data");
    Ok(shops)
}

/// Load and validate a data file into a [`Dataset`]
///
/// The format is taken from `format` when given, otherwise from the file
/// extension.
pub fn load_file(path: &Path, format: Option<DataFormat>) -> Result<Dataset> {
    let format = match format.or_else(|| DataFormat::from_path(path)) {
        Some(f) => f,
        None => {
            return Err(Error::UnsupportedFormat(format!(
                "cannot detect format of {} (use json, toml, yaml or csv)",
                path.display()
            )))
        }
    };

    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes)
        .map_err(|e| Error::Import(format!("{} is not valid UTF-8: {}", path.display(), e)))?;

    let shops = parse_str(&content, format)?;
    let dataset = Dataset::new(
        shops,
        path.display().to_string(),
        fingerprint(content.as_bytes()),
    )?;

    info!(
        path = %path.display(),
        format = format.as_str(),
        shops = dataset.len(),
        "Loaded shop data"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML_DATA: &str = r#"
[[shops]]
name = "Shop A (Kua Gai Nimman)"
reviews = 142
rating = 4.2
sentiment_score = 3.8
sentiment_trend = -5
price_level = "฿฿"
complaints = ["Staff ignores customers", "Food served slowly"]

[shops.aspects]
Food = 4.5
Atmosphere = 3.2
Service = 2.1
Value = 4.0
"#;

    const CSV_DATA: &str = "name,review_count,rating,sentiment_score,sentiment_trend_pct,price_level,food,atmosphere,service,value,complaints
Shop B (Khao Soi Mae Sai),320,4.8,4.6,12,₭,4.8,4.0,4.2,4.9,Queue is too long|Too spicy|Crowded
Shop C (Tong Tem Toh),510,4.0,3.5,-2,₭₭₭,4.1,4.5,3.0,3.2,
";

    fn raw() -> RawShopRecord {
        RawShopRecord {
            name: "Shop X".to_string(),
            review_count: 5,
            rating: 4.0,
            sentiment_score: 4.0,
            sentiment_trend_pct: 1,
            price_level: "₭".to_string(),
            aspects: [("Food", 4.0), ("Atmosphere", 4.0), ("Service", 4.0), ("Value", 4.0)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            complaints: vec![],
        }
    }

    #[test]
    fn test_parse_toml_with_aliases() {
        let shops = parse_str(TOML_DATA, DataFormat::Toml).unwrap();
        assert_eq!(shops.len(), 1);
        let shop = &shops[0];
        assert_eq!(shop.review_count, 142);
        assert_eq!(shop.sentiment_trend_pct, -5);
        assert_eq!(shop.price_level, PriceLevel::Moderate);
        assert_eq!(shop.aspects.get(Aspect::Service), Some(2.1));
        assert_eq!(shop.complaints[1], "Food served slowly");
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"shops": [{
            "name": "Shop B",
            "review_count": 320,
            "rating": 4.8,
            "sentiment_score": 4.6,
            "sentiment_trend_pct": 12,
            "price_level": "₭",
            "aspects": {"food": 4.8, "atmosphere": 4.0, "service": 4.2, "value": 4.9},
            "complaints": ["Crowded"]
        }]}"#;
        let shops = parse_str(json, DataFormat::Json).unwrap();
        assert_eq!(shops[0].aspects.get(Aspect::Value), Some(4.9));
        assert_eq!(shops[0].price_level, PriceLevel::Inexpensive);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
shops:
  - name: Shop C
    review_count: 510
    rating: 4.0
    sentiment_score: 3.5
    sentiment_trend_pct: -2
    price_level: "3"
    aspects:
      Food: 4.1
      Atmosphere: 4.5
      Service: 3.0
      Value: 3.2
    complaints:
      - Expensive
"#;
        let shops = parse_str(yaml, DataFormat::Yaml).unwrap();
        assert_eq!(shops[0].price_level, PriceLevel::Expensive);
        assert_eq!(shops[0].complaints, vec!["Expensive"]);
    }

    #[test]
    fn test_parse_csv() {
        let shops = parse_csv(CSV_DATA.as_bytes()).unwrap();
        assert_eq!(shops.len(), 2);
        assert_eq!(
            shops[0].complaints,
            vec!["Queue is too long", "Too spicy", "Crowded"]
        );
        assert!(shops[1].complaints.is_empty());
        assert_eq!(shops[1].aspects.get(Aspect::Service), Some(3.0));
    }

    #[test]
    fn test_csv_blank_aspect_is_missing() {
        let csv = "name,review_count,rating,sentiment_score,sentiment_trend_pct,price_level,food,atmosphere,service,value,complaints
Gap,1,4.0,4.0,0,₭,4.0,,4.0,4.0,";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingAspect {
                aspect: Aspect::Atmosphere,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_unknown_price_tier() {
        let mut r = raw();
        r.price_level = "$$".to_string();
        assert!(matches!(
            r.into_record(),
            Err(ValidationError::UnknownPriceTier { ref value, .. }) if value == "$$"
        ));
    }

    #[test]
    fn test_rejects_unknown_aspect() {
        let mut r = raw();
        r.aspects.insert("Parking".to_string(), 2.0);
        assert!(matches!(
            r.into_record(),
            Err(ValidationError::UnknownAspect { ref name, .. }) if name == "Parking"
        ));
    }

    #[test]
    fn test_rejects_negative_reviews_and_bad_scores() {
        let mut r = raw();
        r.review_count = -1;
        assert!(matches!(
            r.into_record(),
            Err(ValidationError::NegativeReviewCount { value: -1, .. })
        ));

        let mut r = raw();
        r.aspects.insert("Value".to_string(), 5.5);
        assert!(matches!(
            r.into_record(),
            Err(ValidationError::ScoreOutOfRange { .. })
        ));

        let mut r = raw();
        r.name = "  ".to_string();
        assert_eq!(r.into_record(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_rejects_review_count_beyond_u32() {
        let mut r = raw();
        r.review_count = i64::from(u32::MAX) + 1;
        assert!(matches!(
            r.into_record(),
            Err(ValidationError::ReviewCountTooLarge { value, .. }) if value == i64::from(u32::MAX) + 1
        ));
    }

    #[test]
    fn test_rejects_aspect_given_twice_in_different_case() {
        let json = r#"{"shops": [{
            "name": "Shop X",
            "review_count": 5,
            "rating": 4.0,
            "sentiment_score": 4.0,
            "sentiment_trend_pct": 1,
            "price_level": "₭",
            "aspects": {"Food": 4.5, "food": 1.0, "Atmosphere": 4.0, "Service": 4.0, "Value": 4.0}
        }]}"#;
        assert!(matches!(
            parse_str(json, DataFormat::Json),
            Err(Error::Validation(ValidationError::DuplicateAspect {
                aspect: Aspect::Food,
                ..
            }))
        ));
    }

    #[test]
    fn test_rejects_record_without_trend() {
        let json = r#"{"shops": [{
            "name": "Shop X",
            "review_count": 5,
            "rating": 4.0,
            "sentiment_score": 4.0,
            "price_level": "₭",
            "aspects": {"Food": 4.0, "Atmosphere": 4.0, "Service": 4.0, "Value": 4.0}
        }]}"#;
        let err = parse_str(json, DataFormat::Json).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().contains("sentiment_trend_pct"));

        let toml = TOML_DATA.replace("sentiment_trend = -5\n", "");
        assert!(matches!(
            parse_str(&toml, DataFormat::Toml),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn test_rejects_missing_aspect() {
        let mut r = raw();
        r.aspects.remove("Food");
        assert!(matches!(
            r.into_record(),
            Err(ValidationError::MissingAspect {
                aspect: Aspect::Food,
                ..
            })
        ));
    }

    #[test]
    fn test_one_bad_record_fails_whole_load() {
        let data = TOML_DATA.replace("Service = 2.1", "Service = 9.0");
        assert!(matches!(
            parse_str(&data, DataFormat::Toml),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            DataFormat::from_path(Path::new("shops.YML")),
            Some(DataFormat::Yaml)
        );
        assert_eq!(
            DataFormat::from_path(Path::new("a/b.csv")),
            Some(DataFormat::Csv)
        );
        assert_eq!(DataFormat::from_path(Path::new("shops")), None);
        assert_eq!(DataFormat::from_path(Path::new("shops.xlsx")), None);
    }

    #[test]
    fn test_load_file_records_fingerprint() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML_DATA.as_bytes()).unwrap();

        let dataset = load_file(file.path(), None).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.fingerprint(), fingerprint(TOML_DATA.as_bytes()));
        assert_eq!(dataset.origin(), file.path().display().to_string());
    }

    #[test]
    fn test_load_file_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".dat").tempfile().unwrap();
        assert!(matches!(
            load_file(file.path(), None),
            Err(Error::UnsupportedFormat(_))
        ));
        // Explicit format overrides detection
        assert!(matches!(
            load_file(file.path(), Some(DataFormat::Json)),
            Err(Error::Json(_))
        ));
    }
}
