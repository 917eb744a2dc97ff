//! Bulk composer - sheet picker, preview and templated send
//!
//! The composer owns the sheet list, the preview of the selected sheet and
//! the cached header row used for `{{Header}}` placeholders.

use log::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::gateway::ConsoleApi;
use crate::gateway::api::BulkSendReport;
use crate::models::{SheetPreview, SheetRef};

/// State of the preview pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// No sheet selected
    Prompt,
    Loaded(SheetPreview),
    Error(String),
}

impl Preview {
    const PROMPT: &'static str = "Select a sheet to see its preview.";
}

pub struct BulkComposer {
    open: bool,
    sheets: Vec<SheetRef>,
    selected_sheet: Option<String>,
    preview: Preview,
    /// Header row of the most recently previewed sheet
    headers: Vec<String>,
    template: String,
}

impl Default for BulkComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkComposer {
    pub fn new() -> Self {
        Self {
            open: false,
            sheets: Vec::new(),
            selected_sheet: None,
            preview: Preview::Prompt,
            headers: Vec::new(),
            template: String::new(),
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn sheets(&self) -> &[SheetRef] {
        &self.sheets
    }

    pub fn selected_sheet(&self) -> Option<&str> {
        self.selected_sheet.as_deref()
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Refill the sheet picker
    ///
    /// Responses are applied in arrival order; a slow response to an older
    /// search can overwrite a newer one.
    pub fn load_sheets(&mut self, api: &dyn ConsoleApi, search: &str) -> ApiResult<()> {
        match api.list_sheets(Some(search)) {
            Ok(sheets) => {
                info!("Loaded {} sheets", sheets.len());
                // A selection that is no longer listed falls back to the placeholder
                if let Some(selected) = &self.selected_sheet
                    && !sheets.iter().any(|sheet| &sheet.id == selected)
                {
                    self.selected_sheet = None;
                }
                self.sheets = sheets;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching sheets: {}", e);
                self.preview = Preview::Error("Error loading sheets.".to_string());
                Err(e)
            }
        }
    }

    /// Select a sheet (or clear the selection) and load its preview
    pub fn select_sheet(&mut self, api: &dyn ConsoleApi, sheet_id: Option<&str>) -> ApiResult<()> {
        let Some(sheet_id) = sheet_id.filter(|id| !id.is_empty()) else {
            self.selected_sheet = None;
            self.preview = Preview::Prompt;
            self.headers.clear();
            return Ok(());
        };

        self.selected_sheet = Some(sheet_id.to_string());
        match api.get_sheet_data(sheet_id) {
            Ok(preview) => {
                self.headers = preview.headers.clone();
                info!("Available headers for templating: {:?}", self.headers);
                self.preview = Preview::Loaded(preview);
                Ok(())
            }
            Err(e) => {
                error!("Error fetching sheet data for {}: {}", sheet_id, e);
                self.headers.clear();
                self.preview = Preview::Error(match &e {
                    ApiError::Server { message, .. } => message.clone(),
                    _ => "Error loading sheet data.".to_string(),
                });
                Err(e)
            }
        }
    }

    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    /// Append a `{{Header}}` placeholder for a cached header
    pub fn insert_placeholder(&mut self, header: &str) -> ApiResult<()> {
        if !self.headers.iter().any(|h| h == header) {
            return Err(ApiError::validation(format!(
                "Unknown column '{}' for the selected sheet.",
                header
            )));
        }
        self.template.push_str(&format!("{{{{{}}}}}", header));
        Ok(())
    }

    /// Validate and send the template to every row of the selected sheet
    pub fn submit(&self, api: &dyn ConsoleApi) -> ApiResult<BulkSendReport> {
        let sheet_id = self
            .selected_sheet
            .as_deref()
            .ok_or_else(|| ApiError::validation("Please select a Google Sheet first."))?;
        if self.template.is_empty() {
            return Err(ApiError::validation("Please enter a message template."));
        }

        info!("Sending bulk SMS using sheet {}", sheet_id);
        api.send_bulk_sms(sheet_id, &self.template)
    }

    /// Text rendering of the sheet picker and preview table
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(match self.selected_sheet() {
            Some(id) => {
                let name = self
                    .sheets
                    .iter()
                    .find(|sheet| sheet.id == id)
                    .map_or(id, |sheet| sheet.name.as_str());
                format!("Sheet: {}", name)
            }
            None => "Select a Google Sheet".to_string(),
        });

        match &self.preview {
            Preview::Prompt => lines.push(Preview::PROMPT.to_string()),
            Preview::Error(message) => lines.push(format!("! {}", message)),
            Preview::Loaded(preview) => {
                lines.push(preview.headers.join(" | "));
                for row in &preview.data {
                    lines.push(row.join(" | "));
                }
            }
        }
        lines
    }
}
