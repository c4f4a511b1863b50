//! Diagnostics Panel
//!
//! Collapsible view of the most recent log lines kept by the console logger.

use leptos::prelude::*;

#[component]
pub fn DiagnosticsPanel() -> impl IntoView {
    let (open, set_open) = signal(false);
    let (lines, set_lines) = signal(Vec::<String>::new());

    let refresh = move || set_lines.set(console_logger::recent_lines());

    view! {
        <div class="diagnostics">
            <button
                class="diagnostics-toggle"
                on:click=move |_| {
                    if !open.get_untracked() {
                        refresh();
                    }
                    set_open.update(|o| *o = !*o);
                }
            >
                {move || if open.get() { "Hide logs" } else { "Show logs" }}
            </button>
            <Show when=move || open.get()>
                <div class="diagnostics-body">
                    <button class="diagnostics-refresh" on:click=move |_| refresh()>"Refresh"</button>
                    <pre class="diagnostics-lines">
                        {move || {
                            let lines = lines.get();
                            if lines.is_empty() { "No log lines yet.".to_string() } else { lines.join("\n") }
                        }}
                    </pre>
                </div>
            </Show>
        </div>
    }
}
