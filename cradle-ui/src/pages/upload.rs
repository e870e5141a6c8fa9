//! Upload Page
//!
//! Runs the backend parser over a server-side log file, offers the CSV
//! exports, and lets the backend URL be changed.

use leptos::*;
use leptos_router::*;
use std::rc::Rc;

use cradle::api::CareApi;
use cradle::pages::upload::{self, UploadMode, UploadResult};
use cradle::shell::Route as Destination;
use cradle::view::{drive, FetchTracker, ViewState};

use super::PageTitle;
use crate::api::{self, GlooClient};
use crate::components::{ErrorBanner, InlineLoading, Loading, Section, SummaryCards};
use crate::state::use_app_context;

#[component]
pub fn UploadPage() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <PageTitle title=Destination::Upload.title() subtitle="ログファイルの解析とCSVの書き出し" />
            <UploadForm />
            <ExportLinks />
            <ApiSettings />
        </div>
    }
}

#[component]
fn UploadForm() -> impl IntoView {
    let ctx = use_app_context();
    let mode = create_rw_signal(UploadMode::Process);
    let file_path = create_rw_signal(String::new());
    // None until the first submission
    let result = create_rw_signal(None::<ViewState<UploadResult>>);

    let tracker = FetchTracker::new();
    let cleanup_tracker = tracker.clone();
    on_cleanup(move || cleanup_tracker.dispose());

    let submit = move || {
        let tracker = tracker.clone();
        let api = ctx.api.get_untracked();
        let mode = mode.get_untracked();
        let path = file_path.get_untracked();
        spawn_local(async move {
            drive(
                &tracker,
                |s| result.set(Some(s)),
                upload::submit(&*api, mode, &path),
            )
            .await;
        });
    };

    let on_submit = {
        let submit = submit.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            submit();
        }
    };
    let retry = Callback::new(move |_| submit());
    let busy = move || result.with(|r| matches!(r, Some(ViewState::Loading)));

    view! {
        <Section title="ログファイルの取り込み" description="サーバー上のファイルパスを指定します。空欄の場合は既定のファイルを使用します。">
            <form on:submit=on_submit class="space-y-4">
                <input
                    type="text"
                    placeholder="/path/to/log.txt"
                    prop:value=move || file_path.get()
                    on:input=move |ev| file_path.set(event_target_value(&ev))
                    class="w-full bg-gray-50 rounded-lg px-4 py-3 border border-gray-300 focus:border-primary-500 focus:outline-none"
                />
                <div class="flex items-center space-x-3">
                    <select
                        on:change=move |ev| {
                            if let Some(m) = UploadMode::from_value(&event_target_value(&ev)) {
                                mode.set(m);
                            }
                        }
                        class="bg-gray-50 rounded-lg px-4 py-3 border border-gray-300"
                    >
                        {UploadMode::ALL.into_iter().map(|m| view! {
                            <option value=m.as_str() selected=move || mode.get() == m>{m.label()}</option>
                        }).collect_view()}
                    </select>
                    <button
                        type="submit"
                        disabled=busy
                        class="px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-300 text-white rounded-lg font-medium transition-colors"
                    >
                        {move || if busy() { view! { <InlineLoading /> }.into_view() } else { "実行".into_view() }}
                    </button>
                </div>
            </form>

            <div class="mt-6">
                {move || match result.get() {
                    None => ().into_view(),
                    Some(ViewState::Loading) => view! { <Loading /> }.into_view(),
                    Some(ViewState::Error(e)) => view! {
                        <ErrorBanner message=e.message retryable=e.retryable on_retry=retry />
                    }
                    .into_view(),
                    Some(ViewState::Empty) => view! {
                        <p class="text-gray-500">"取り込めるデータがありませんでした。"</p>
                    }
                    .into_view(),
                    Some(ViewState::Ready(r)) => view! { <UploadSummary result=r /> }.into_view(),
                }}
            </div>
        </Section>
    }
}

#[component]
fn UploadSummary(result: UploadResult) -> impl IntoView {
    view! {
        <div class="space-y-4">
            {result.message.map(|m| view! {
                <p class="bg-green-50 border border-green-200 text-green-800 rounded-lg p-3 text-sm">{m}</p>
            })}
            <SummaryCards cards=result.cards />
            {result.analyzed.then(|| view! {
                <A href=Destination::Dashboard.path() class="inline-block text-primary-600 hover:underline">
                    "分析結果をダッシュボードで見る →"
                </A>
            })}
        </div>
    }
}

#[component]
fn ExportLinks() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <Section title="CSVダウンロード">
            <ul class="space-y-2">
                {move || {
                    let api = ctx.api.get();
                    upload::export_links(&*api)
                        .into_iter()
                        .map(|link| view! {
                            <li>
                                <a href=link.url download=link.filename class="text-primary-600 hover:underline">
                                    {link.label}
                                    <span class="text-gray-400 text-sm ml-2">{link.filename}</span>
                                </a>
                            </li>
                        })
                        .collect_view()
                }}
            </ul>
        </Section>
    }
}

/// Backend URL stored in localStorage
#[component]
fn ApiSettings() -> impl IntoView {
    let ctx = use_app_context();
    let api_url = create_rw_signal(ctx.api.get_untracked().base_url().to_string());
    let testing = create_rw_signal(false);
    let test_result = create_rw_signal(None::<bool>);

    let test_connection = move |_| {
        testing.set(true);
        test_result.set(None);
        let client = GlooClient::new(&api_url.get_untracked());
        spawn_local(async move {
            let healthy = matches!(client.health().await, Ok(h) if h.is_healthy());
            test_result.set(Some(healthy));
            testing.set(false);
        });
    };

    let save_url = move |_| {
        api::set_api_base(&api_url.get_untracked());
        let client = GlooClient::from_storage();
        api_url.set(client.base_url().to_string());
        ctx.api.set(Rc::new(client));
    };

    view! {
        <Section title="接続先" description="分析サーバーのAPI URL">
            <div class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || api_url.get()
                    on:input=move |ev| api_url.set(event_target_value(&ev))
                    class="flex-1 bg-gray-50 rounded-lg px-4 py-3 border border-gray-300 focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=test_connection
                    disabled=move || testing.get()
                    class="px-4 py-3 bg-gray-200 hover:bg-gray-300 rounded-lg font-medium transition-colors"
                >
                    {move || if testing.get() { "確認中..." } else { "接続テスト" }}
                </button>
                <button
                    on:click=save_url
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700 text-white rounded-lg font-medium transition-colors"
                >
                    "保存"
                </button>
            </div>
            <div class="mt-2 text-sm">
                {move || match test_result.get() {
                    Some(true) => view! { <span class="text-green-600">"✓ 接続できました"</span> }.into_view(),
                    Some(false) => view! { <span class="text-red-600">"✕ 接続できません"</span> }.into_view(),
                    None => ().into_view(),
                }}
            </div>
        </Section>
    }
}
