//! Page controller scenarios against a scripted backend

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;

use cradle::api::dto::*;
use cradle::api::{CareApi, ClientError, ClientResult, DEFAULT_API_BASE};
use cradle::metrics::Peak;
use cradle::pages::{self, UploadMode};
use cradle::view::{drive, FetchTracker, Loaded, ViewState};

/// Replies for one endpoint; the last reply repeats once the queue drains
struct Script<T>(RefCell<VecDeque<ClientResult<Envelope<T>>>>);

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self(RefCell::new(VecDeque::new()))
    }

    fn reply(self, reply: ClientResult<Envelope<T>>) -> Self {
        self.0.borrow_mut().push_back(reply);
        self
    }

    fn next(&self, endpoint: &str) -> ClientResult<Envelope<T>> {
        let mut queue = self.0.borrow_mut();
        match queue.len() {
            0 => Err(ClientError::Transport(format!("{} not scripted", endpoint))),
            1 => queue[0].clone(),
            _ => queue.pop_front().unwrap(),
        }
    }
}

struct FakeApi {
    calls: RefCell<Vec<&'static str>>,
    comprehensive: Script<ComprehensiveAnalysis>,
    sleep: Script<SleepPatterns>,
    feeding: Script<FeedingPatterns>,
    vomit: Script<VomitCorrelation>,
    daily: Script<Vec<DailySummaryRow>>,
    events: Script<Vec<EventRecord>>,
    growth: Script<GrowthData>,
    parse: Script<ParseSummary>,
    process: Script<ProcessSummary>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            comprehensive: Script::new(),
            sleep: Script::new(),
            feeding: Script::new(),
            vomit: Script::new(),
            daily: Script::new(),
            events: Script::new(),
            growth: Script::new(),
            parse: Script::new(),
            process: Script::new(),
        }
    }

    fn record(&self, endpoint: &'static str) {
        self.calls.borrow_mut().push(endpoint);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl CareApi for FakeApi {
    fn base_url(&self) -> &str {
        DEFAULT_API_BASE
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        self.record("health");
        Ok(HealthStatus {
            status: "ok".into(),
            timestamp: None,
        })
    }

    async fn parse(&self, _request: &FileRequest) -> ClientResult<Envelope<ParseSummary>> {
        self.record("parse");
        self.parse.next("parse")
    }

    async fn analyze(&self) -> ClientResult<Envelope<ComprehensiveAnalysis>> {
        self.record("analyze");
        self.comprehensive.next("analyze")
    }

    async fn process(&self, _request: &FileRequest) -> ClientResult<Envelope<ProcessSummary>> {
        self.record("process");
        self.process.next("process")
    }

    async fn events(&self, filter: &EventFilter) -> ClientResult<Envelope<Vec<EventRecord>>> {
        assert_eq!(filter.category.as_deref(), Some("vomit"));
        self.record("events");
        self.events.next("events")
    }

    async fn daily_summary(&self, _range: &DateRange) -> ClientResult<Envelope<Vec<DailySummaryRow>>> {
        self.record("daily_summary");
        self.daily.next("daily_summary")
    }

    async fn growth(&self, _filter: &GrowthFilter) -> ClientResult<Envelope<GrowthData>> {
        self.record("growth");
        self.growth.next("growth")
    }

    async fn vomit_correlation(&self) -> ClientResult<Envelope<VomitCorrelation>> {
        self.record("vomit_correlation");
        self.vomit.next("vomit_correlation")
    }

    async fn sleep_patterns(&self) -> ClientResult<Envelope<SleepPatterns>> {
        self.record("sleep_patterns");
        self.sleep.next("sleep_patterns")
    }

    async fn feeding_patterns(&self) -> ClientResult<Envelope<FeedingPatterns>> {
        self.record("feeding_patterns");
        self.feeding.next("feeding_patterns")
    }

    async fn comprehensive_analysis(&self) -> ClientResult<Envelope<ComprehensiveAnalysis>> {
        self.record("comprehensive_analysis");
        self.comprehensive.next("comprehensive_analysis")
    }
}

fn json<T: serde::de::DeserializeOwned>(raw: &str) -> T {
    serde_json::from_str(raw).unwrap()
}

fn transport_error() -> ClientError {
    ClientError::Transport("connection refused".into())
}

fn vomit_payload() -> VomitCorrelation {
    json(
        r#"{"milk_amount_vomit_count":{"correlation":0.3,"p_value":0.2},
            "vomit_hour_distribution":{"2":1,"22":2}}"#,
    )
}

#[tokio::test]
async fn test_dashboard_scenario() {
    let mut api = FakeApi::new();
    api.comprehensive = Script::new().reply(Ok(json(
        r#"{"status":"success","data":{"summary":{"stats":{"sleep_minutes":{"mean":480}}},
            "time_series":{"daily":{"dates":["2024-02-01"],"sleep_minutes":[480]}}}}"#,
    )));

    let view = match pages::dashboard::load(&api).await.unwrap() {
        Loaded::Ready(v) => v,
        Loaded::Empty => panic!("expected ready"),
    };
    assert_eq!(view.cards[0].value, "8.0 時間");
    assert_eq!(view.sleep_series.len(), 1);
    assert_eq!(view.sleep_series[0].value, 8.0);
    assert_eq!(api.calls(), vec!["comprehensive_analysis"]);
}

#[tokio::test]
async fn test_null_fields_are_zero() {
    let mut api = FakeApi::new();
    api.comprehensive = Script::new().reply(Ok(json(
        r#"{"status":"success","data":{"summary":{"stats":{"sleep_minutes":{"mean":null},"milk_amount":{}}},
            "time_series":{"daily":{"dates":["2024-02-01","2024-02-02"],"sleep_minutes":[null,600],"milk_amount":null}}}}"#,
    )));

    let view = match pages::dashboard::load(&api).await.unwrap() {
        Loaded::Ready(v) => v,
        Loaded::Empty => panic!("expected ready"),
    };
    assert_eq!(view.avg_sleep_hours, 0.0);
    assert_eq!(view.avg_milk_ml, 0.0);
    assert_eq!(view.sleep_series[0].value, 0.0);
    assert_eq!(view.sleep_series[1].value, 10.0);
    assert!(view.milk_series.is_empty());
    assert!(view
        .sleep_series
        .iter()
        .chain(&view.milk_series)
        .all(|p| p.value.is_finite()));
}

#[tokio::test]
async fn test_growth_both_lists_empty() {
    let mut api = FakeApi::new();
    api.growth = Script::new().reply(Ok(json(
        r#"{"status":"success","data":{"weight_records":[],"height_records":[]}}"#,
    )));

    let tracker = FetchTracker::new();
    let state = drive(&tracker, |_| {}, pages::growth::load(&api)).await;
    assert_eq!(state, Some(ViewState::Empty));
}

#[tokio::test]
async fn test_growth_temperature_only_log() {
    let mut api = FakeApi::new();
    api.growth = Script::new().reply(Ok(json(
        r#"{"status":"success","count":2,"data":[
            {"date":"Thu, 01 Feb 2024 00:00:00 GMT","type":"temperature","value":38.2,"unit":"°C"},
            {"date":"Fri, 02 Feb 2024 00:00:00 GMT","type":"temperature","value":36.8,"unit":"°C"}
        ]}"#,
    )));

    let tracker = FetchTracker::new();
    let state = drive(&tracker, |_| {}, pages::growth::load(&api)).await;
    let view = match state {
        Some(ViewState::Ready(v)) => v,
        other => panic!("expected ready, got {:?}", other),
    };
    assert!(view.weight.is_none() && view.height.is_none());
    let temperature = view.temperature.unwrap();
    assert_eq!(temperature.fever_days, vec!["2024-02-01"]);
    assert_eq!(temperature.max, 38.2);
}

#[tokio::test]
async fn test_all_zero_distribution_is_unknown() {
    let mut api = FakeApi::new();
    api.feeding = Script::new().reply(Ok(json(
        r#"{"status":"success","data":{"daily_milk_amount":{"mean":600},
            "milk_time_distribution":{"0":0,"12":0}}}"#,
    )));

    let view = match pages::feeding::load(&api).await.unwrap() {
        Loaded::Ready(v) => v,
        Loaded::Empty => panic!("expected ready"),
    };
    assert_eq!(view.peak_milk_hour, Peak::Unknown);
    assert_eq!(view.peak_milk_hour.to_string(), "不明");
}

#[tokio::test]
async fn test_transport_error_then_retry() {
    let mut api = FakeApi::new();
    api.sleep = Script::new()
        .reply(Err(transport_error()))
        .reply(Ok(json(
            r#"{"status":"success","data":{"daily_sleep_hours":{"mean":11.5}}}"#,
        )));

    let tracker = FetchTracker::new();
    let seen = RefCell::new(Vec::new());

    let first = drive(&tracker, |s| seen.borrow_mut().push(s.label()), pages::sleep::load(&api)).await;
    let banner = first.as_ref().and_then(|s| s.error()).cloned().unwrap();
    assert!(banner.retryable);
    assert_eq!(banner.message, cradle::api::error::GENERIC_FETCH_ERROR);

    // retry re-enters Loading and issues the same call again
    let second = drive(&tracker, |s| seen.borrow_mut().push(s.label()), pages::sleep::load(&api)).await;
    assert_eq!(second.unwrap().ready().unwrap().avg_sleep_hours, 11.5);
    assert_eq!(seen.into_inner(), vec!["loading", "error", "loading", "ready"]);
    assert_eq!(api.calls(), vec!["sleep_patterns", "sleep_patterns"]);
}

#[tokio::test]
async fn test_application_error_uses_backend_message() {
    let mut api = FakeApi::new();
    api.growth = Script::new().reply(Ok(Envelope::failure("成長データ取得エラー: growth.csv")));

    let state: ViewState<_> = pages::growth::load(&api).await.into();
    assert_eq!(
        state.error().map(|e| e.message.as_str()),
        Some("成長データ取得エラー: growth.csv")
    );
}

#[tokio::test]
async fn test_vomit_secondary_failure_degrades() {
    let mut api = FakeApi::new();
    api.vomit = Script::new().reply(Ok(Envelope::success(vomit_payload())));
    api.daily = Script::new().reply(Err(ClientError::Http {
        status: 500,
        message: "日次サマリーデータ取得エラー".into(),
    }));
    api.events = Script::new().reply(Ok(Envelope::success(vec![EventRecord {
        category: "vomit".into(),
        value: Some(3.0),
        ..Default::default()
    }])));

    let view = match pages::vomit::load(&api).await.unwrap() {
        Loaded::Ready(v) => v,
        Loaded::Empty => panic!("expected ready"),
    };
    assert!(view.secondary_unavailable);
    assert!(view.daily_series.is_empty());
    assert_eq!(view.peak_hour, Peak::Label("22時".into()));
    assert_eq!(view.severity[2].count, 1);
    assert_eq!(
        api.calls(),
        vec!["vomit_correlation", "daily_summary", "events"]
    );
}

#[tokio::test]
async fn test_vomit_primary_failure_skips_secondary() {
    let mut api = FakeApi::new();
    api.vomit = Script::new().reply(Ok(Envelope::failure("相関分析結果取得エラー")));

    let result = pages::vomit::load(&api).await;
    assert!(matches!(result, Err(ClientError::Application { .. })));
    assert_eq!(api.calls(), vec!["vomit_correlation"]);
}

#[tokio::test]
async fn test_vomit_empty_payload() {
    let mut api = FakeApi::new();
    api.vomit = Script::new().reply(Ok(json(r#"{"status":"success","data":{}}"#)));

    assert_eq!(pages::vomit::load(&api).await.unwrap(), Loaded::Empty);
    assert_eq!(api.calls(), vec!["vomit_correlation"]);
}

#[tokio::test]
async fn test_same_responses_same_view() {
    let mut api = FakeApi::new();
    api.vomit = Script::new().reply(Ok(Envelope::success(vomit_payload())));
    api.daily = Script::new().reply(Ok(json(
        r#"{"status":"success","count":1,"data":[{"date":"Thu, 01 Feb 2024 00:00:00 GMT","milk_amount":640,"vomit_count":2}]}"#,
    )));
    api.events = Script::new().reply(Ok(Envelope::success(Vec::new())));

    let first = pages::vomit::load(&api).await.unwrap();
    let second = pages::vomit::load(&api).await.unwrap();
    assert_eq!(first, second);

    let view = match first {
        Loaded::Ready(v) => v,
        Loaded::Empty => panic!("expected ready"),
    };
    assert_eq!(view.scatter[0].label, "2024-02-01");
    assert_eq!(view.scatter[0].x, 640.0);
}

#[tokio::test]
async fn test_upload_process_mode() {
    let mut api = FakeApi::new();
    api.process = Script::new().reply(Ok(json(
        r#"{"status":"success","message":"データ処理が完了しました",
            "data":{"events_count":812,"days_count":29,"growth_records":6,"analysis":{"daily_stats":{}}}}"#,
    )));

    let result = match pages::upload::submit(&api, UploadMode::Process, " ").await.unwrap() {
        Loaded::Ready(r) => r,
        Loaded::Empty => panic!("expected ready"),
    };
    assert_eq!(result.events_count, 812);
    assert!(result.analyzed);
    assert_eq!(result.message.as_deref(), Some("データ処理が完了しました"));
    assert_eq!(api.calls(), vec!["process"]);
}

#[test]
fn test_export_links() {
    let api = FakeApi::new();
    let links = pages::upload::export_links(&api);
    assert_eq!(links.len(), 3);
    assert_eq!(links[0].url, "http://localhost:5000/api/data/csv/events.csv");
    assert!(api.csv_url("secrets.txt").is_err());
}
