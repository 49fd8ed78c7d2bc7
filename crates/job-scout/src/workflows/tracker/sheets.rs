use async_trait::async_trait;
use google_sheets4::api::{
    AddSheetRequest, BatchUpdateSpreadsheetRequest, GridProperties, Request, Scope,
    SheetProperties, ValueRange,
};
use google_sheets4::{hyper_rustls, hyper_util, yup_oauth2, Sheets};
use serde_json::Value;
use tracing::info;

use super::{TrackedApplication, TrackerError, TrackerRow, TrackerSheet, TRACKER_HEADERS};
use crate::config::TrackerConfig;

const NEW_WORKSHEET_ROWS: i32 = 1000;

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;

/// Tracker stored in one worksheet of a Google spreadsheet.
pub struct GoogleSheetsTracker<C>
where
    C: google_sheets4::common::Connector,
{
    hub: Sheets<C>,
    spreadsheet_id: String,
    worksheet: String,
}

impl GoogleSheetsTracker<HttpsConnector> {
    /// Authenticate with the configured service account key.
    pub async fn connect(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let spreadsheet_id = config
            .spreadsheet_id
            .clone()
            .ok_or(TrackerError::NotConfigured("GOOGLE_SHEET_ID is not set"))?;
        let credentials_path = config
            .credentials_path
            .as_ref()
            .ok_or(TrackerError::NotConfigured("GOOGLE_CREDENTIALS is not set"))?;

        let key = yup_oauth2::read_service_account_key(credentials_path)
            .await
            .map_err(|err| TrackerError::Credentials(err.to_string()))?;
        let auth = yup_oauth2::ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|err| TrackerError::Credentials(err.to_string()))?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|err| TrackerError::Backend(err.to_string()))?
            .https_or_http()
            .enable_http1()
            .build();
        let client =
            hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
                .build(connector);

        Ok(Self::new(
            Sheets::new(client, auth),
            spreadsheet_id,
            config.worksheet.clone(),
        ))
    }
}

impl<C> GoogleSheetsTracker<C>
where
    C: google_sheets4::common::Connector,
{
    pub fn new(hub: Sheets<C>, spreadsheet_id: String, worksheet: String) -> Self {
        Self {
            hub,
            spreadsheet_id,
            worksheet,
        }
    }

    fn range(&self, cells: &str) -> String {
        format!("'{}'!{}", self.worksheet.replace('\'', "''"), cells)
    }

    async fn worksheet_exists(&self) -> Result<bool, TrackerError> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(&self.spreadsheet_id)
            .param("fields", "sheets.properties.title")
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(map_error)?;

        Ok(spreadsheet.sheets.unwrap_or_default().iter().any(|sheet| {
            sheet
                .properties
                .as_ref()
                .and_then(|properties| properties.title.as_deref())
                == Some(self.worksheet.as_str())
        }))
    }

    async fn add_worksheet(&self) -> Result<(), TrackerError> {
        let request = BatchUpdateSpreadsheetRequest {
            requests: Some(vec![Request {
                add_sheet: Some(AddSheetRequest {
                    properties: Some(SheetProperties {
                        title: Some(self.worksheet.clone()),
                        grid_properties: Some(GridProperties {
                            row_count: Some(NEW_WORKSHEET_ROWS),
                            column_count: Some(TRACKER_HEADERS.len() as i32),
                            ..GridProperties::default()
                        }),
                        ..SheetProperties::default()
                    }),
                    ..AddSheetRequest::default()
                }),
                ..Request::default()
            }]),
            ..BatchUpdateSpreadsheetRequest::default()
        };

        self.hub
            .spreadsheets()
            .batch_update(request, &self.spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(map_error)?;

        info!(worksheet = %self.worksheet, "created tracker worksheet");
        Ok(())
    }

    async fn first_cell_is_empty(&self) -> Result<bool, TrackerError> {
        let (_, range) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, &self.range("A1"))
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(map_error)?;

        let first = range
            .values
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .map(cell_text)
            .unwrap_or_default();
        Ok(first.is_empty())
    }

    async fn append_cells(&self, cells: Vec<Value>) -> Result<(), TrackerError> {
        let request = ValueRange {
            values: Some(vec![cells]),
            ..ValueRange::default()
        };

        self.hub
            .spreadsheets()
            .values_append(request, &self.spreadsheet_id, &self.range("A1"))
            .value_input_option("USER_ENTERED")
            .insert_data_option("INSERT_ROWS")
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(map_error)?;
        Ok(())
    }
}

impl<C> std::fmt::Debug for GoogleSheetsTracker<C>
where
    C: google_sheets4::common::Connector,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsTracker")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("worksheet", &self.worksheet)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C> TrackerSheet for GoogleSheetsTracker<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    async fn ensure_header(&self, headers: &[&str]) -> Result<(), TrackerError> {
        if !self.worksheet_exists().await? {
            self.add_worksheet().await?;
        }

        if self.first_cell_is_empty().await? {
            let cells = headers
                .iter()
                .map(|header| Value::String(header.to_string()))
                .collect();
            self.append_cells(cells).await?;
        }

        Ok(())
    }

    async fn append_row(&self, row: &TrackerRow) -> Result<(), TrackerError> {
        let cells = row.cells().into_iter().map(Value::String).collect();
        self.append_cells(cells).await
    }

    async fn rows(&self) -> Result<Vec<TrackedApplication>, TrackerError> {
        let (_, range) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, &self.range("A:J"))
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(map_error)?;

        let mut lines = range.values.unwrap_or_default().into_iter();
        let Some(headers) = lines.next() else {
            return Ok(Vec::new());
        };
        let headers: Vec<String> = headers.into_iter().map(cell_text).collect();

        Ok(lines
            .map(|line| {
                let cells: Vec<String> = line.into_iter().map(cell_text).collect();
                TrackedApplication::from_cells(&headers, &cells)
            })
            .collect())
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn map_error(err: google_sheets4::Error) -> TrackerError {
    match err {
        google_sheets4::Error::MissingToken(source) => TrackerError::Credentials(source.to_string()),
        other => TrackerError::Backend(other.to_string()),
    }
}
