// core/src/sheets_api.rs
use log::{debug, info};
use serde::Deserialize;
use ureq::Agent;

use crate::config::SheetConfig;
use crate::error::{Error, Result};
use crate::grid::{a1_range, pad_to_width, Grid, GridRange, GridSource, MajorDimension};

#[derive(Debug, Clone, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Clone, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
struct SheetProperties {
    title: String,
    #[serde(default, alias = "gridProperties")]
    grid_properties: Option<GridProperties>,
}

#[derive(Debug, Clone, Deserialize)]
struct GridProperties {
    #[serde(default, alias = "columnCount")]
    column_count: Option<usize>,
}

/// Regnearkklient – enkel blocking-versjon (ureq) mot Sheets v4 values-API.
///
/// Ett kall = ett øyeblikksbilde. Ingen cache, ingen retry; feil fra nett og
/// tilgang går rett tilbake til kaller.
pub struct SheetsApiClient {
    agent: Agent,
    cfg: SheetConfig,
}

impl SheetsApiClient {
    pub fn new(cfg: SheetConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build();
        Self { agent, cfg }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.cfg
    }

    fn spreadsheet_url(&self) -> String {
        format!(
            "{}/spreadsheets/{}",
            self.cfg.api_base.trim_end_matches('/'),
            urlencoding::encode(&self.cfg.spreadsheet_id)
        )
    }

    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<ureq::Response> {
        let token = self.cfg.resolve_token()?;
        let mut req = self
            .agent
            .get(url)
            .set("Authorization", &format!("Bearer {token}"));
        for (k, v) in query {
            req = req.query(k, v);
        }
        req.call().map_err(map_ureq_error)
    }

    /// Fanens deklarerte kolonneantall (gridProperties.columnCount).
    pub fn column_count(&self, tab: &str) -> Result<usize> {
        let resp = self.get(
            &self.spreadsheet_url(),
            &[("fields", "sheets.properties(title,gridProperties.columnCount)")],
        )?;
        let meta: SpreadsheetMeta = resp.into_json().map_err(|e| Error::Decode(e.to_string()))?;
        meta.sheets
            .into_iter()
            .find(|s| s.properties.title == tab)
            .map(|s| {
                s.properties
                    .grid_properties
                    .and_then(|g| g.column_count)
                    .unwrap_or(26)
            })
            .ok_or_else(|| Error::TabNotFound(tab.to_string()))
    }
}

impl GridSource for SheetsApiClient {
    fn fetch(&self, tab: &str, range: &GridRange, major: MajorDimension) -> Result<Grid> {
        let a1 = match range {
            GridRange::Whole => format!("'{}'", tab.replace('\'', "''")),
            GridRange::Bounded { max_rows } => {
                let cols = self.column_count(tab)?;
                a1_range(tab, *max_rows, cols)
            }
        };
        debug!("[Sheets] henter {} ({})", a1, major.as_api_str());

        let url = format!("{}/values/{}", self.spreadsheet_url(), urlencoding::encode(&a1));
        let resp = self.get(&url, &[("majorDimension", major.as_api_str())])?;
        let mut body: ValueRange = resp.into_json().map_err(|e| Error::Decode(e.to_string()))?;
        if major == MajorDimension::Rows {
            pad_to_width(&mut body.values);
        }

        info!("[Sheets] {} => {} linjer", a1, body.values.len());
        Ok(Grid::new(body.values))
    }
}

fn map_ureq_error(err: ureq::Error) -> Error {
    match err {
        ureq::Error::Status(status, resp) => {
            let body = resp.into_string().unwrap_or_default();
            if status == 401 || status == 403 {
                Error::Unauthorized { status, body }
            } else {
                Error::Http { status, body }
            }
        }
        ureq::Error::Transport(t) => Error::Transport(t.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_value_range_without_values() {
        let v: ValueRange = serde_json::from_str(r#"{"range":"'вес'!A1:B2","majorDimension":"COLUMNS"}"#).unwrap();
        assert!(v.values.is_empty());
    }

    #[test]
    fn decodes_grid_properties() {
        let m: SpreadsheetMeta = serde_json::from_str(
            r#"{"sheets":[{"properties":{"title":"вес","gridProperties":{"columnCount":48}}}]}"#,
        )
        .unwrap();
        let cols = m.sheets[0].properties.grid_properties.as_ref().and_then(|g| g.column_count);
        assert_eq!(cols, Some(48));
    }

    #[test]
    fn status_errors_split_on_auth() {
        let forbidden = ureq::Response::new(403, "Forbidden", "nope").unwrap();
        match map_ureq_error(ureq::Error::Status(403, forbidden)) {
            Error::Unauthorized { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "nope");
            }
            other => panic!("forventet Unauthorized, fikk {other:?}"),
        }

        let unauth = ureq::Response::new(401, "Unauthorized", "").unwrap();
        assert!(matches!(
            map_ureq_error(ureq::Error::Status(401, unauth)),
            Error::Unauthorized { status: 401, .. }
        ));

        let boom = ureq::Response::new(500, "Internal Server Error", "x").unwrap();
        match map_ureq_error(ureq::Error::Status(500, boom)) {
            Error::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "x");
            }
            other => panic!("forventet Http, fikk {other:?}"),
        }
    }

    #[test]
    fn fetch_without_token_is_missing_credentials() {
        let client = SheetsApiClient::new(SheetConfig::new("doc"));
        let err = client
            .fetch("вес", &GridRange::Whole, MajorDimension::Rows)
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
    }
}
