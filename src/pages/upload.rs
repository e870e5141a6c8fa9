//! Upload page: parse or process a log file on the server, and CSV exports

use serde::Serialize;

use super::SummaryCard;
use crate::api::{CareApi, ClientError, Envelope, FileRequest, ParseSummary, CSV_EXPORTS};
use crate::view::Loaded;

/// What the backend should do with the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UploadMode {
    /// `POST /parse`: parse only
    Parse,
    /// `POST /process`: parse, then run the full analysis
    Process,
}

impl UploadMode {
    pub const ALL: [UploadMode; 2] = [UploadMode::Process, UploadMode::Parse];

    pub fn label(self) -> &'static str {
        match self {
            UploadMode::Parse => "解析のみ",
            UploadMode::Process => "解析と分析",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UploadMode::Parse => "parse",
            UploadMode::Process => "process",
        }
    }

    /// Inverse of [`UploadMode::as_str`]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

/// Request body for a server-side path; a blank path means "backend default"
pub fn file_request(file_path: &str) -> FileRequest {
    let trimmed = file_path.trim();
    FileRequest {
        file_path: (!trimmed.is_empty()).then(|| trimmed.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadResult {
    pub mode: UploadMode,
    pub events_count: u64,
    pub days_count: u64,
    pub growth_records: u64,
    /// The process call also produced a fresh analysis
    pub analyzed: bool,
    pub message: Option<String>,
    pub cards: Vec<SummaryCard>,
}

impl UploadResult {
    fn new(mode: UploadMode, counts: &ParseSummary, analyzed: bool, message: Option<String>) -> Self {
        let cards = vec![
            SummaryCard::new("イベント数", counts.events_count.to_string()),
            SummaryCard::new("日数", counts.days_count.to_string()),
            SummaryCard::new("成長記録数", counts.growth_records.to_string()),
        ];
        Self {
            mode,
            events_count: counts.events_count,
            days_count: counts.days_count,
            growth_records: counts.growth_records,
            analyzed,
            message,
            cards,
        }
    }
}

/// Success envelopes carry a confirmation message worth showing
fn split_message<T>(envelope: Envelope<T>) -> Result<(Option<T>, Option<String>), ClientError> {
    let message = envelope.message.clone().filter(|m| !m.trim().is_empty());
    Ok((envelope.into_result()?, message))
}

/// Submit the form in the chosen mode
pub async fn submit(
    api: &dyn CareApi,
    mode: UploadMode,
    file_path: &str,
) -> Result<Loaded<UploadResult>, ClientError> {
    let request = file_request(file_path);
    tracing::info!(mode = mode.as_str(), file_path = ?request.file_path, "Submitting log file");

    let result = match mode {
        UploadMode::Parse => {
            let (data, message) = split_message(api.parse(&request).await?)?;
            data.map(|counts| UploadResult::new(mode, &counts, false, message))
        }
        UploadMode::Process => {
            let (data, message) = split_message(api.process(&request).await?)?;
            data.map(|summary| {
                UploadResult::new(mode, &summary.counts, summary.analysis.is_some(), message)
            })
        }
    };
    Ok(Loaded::from_option(result))
}

/// A CSV download offered on the upload page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportLink {
    pub filename: &'static str,
    pub label: &'static str,
    pub url: String,
}

fn export_label(filename: &str) -> &'static str {
    match filename {
        "events.csv" => "イベント一覧",
        "daily_summary.csv" => "日次サマリー",
        "growth.csv" => "成長記録",
        _ => "CSV",
    }
}

/// Links for every CSV the backend exports
pub fn export_links(api: &dyn CareApi) -> Vec<ExportLink> {
    CSV_EXPORTS
        .into_iter()
        .filter_map(|filename| {
            api.csv_url(filename).ok().map(|url| ExportLink {
                filename,
                label: export_label(filename),
                url,
            })
        })
        .collect()
}
