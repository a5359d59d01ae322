use crate::shared::icons::icon;
use leptos::prelude::*;

/// First/previous/next/last buttons with a "page / pages (items)" label.
#[component]
pub fn PaginationControls(
    /// Current page, 1-based like the meals API
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)]
    total_pages: Signal<usize>,

    #[prop(into)]
    total_count: Signal<usize>,

    on_page_change: Callback<usize>,
) -> impl IntoView {
    let last = move || total_pages.get().max(1);

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=move || current_page.get() <= 1
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || current_page.get() <= 1
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("{} / {} ({})", current_page.get(), last(), total_count.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < last() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || current_page.get() >= last()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(last())
                disabled=move || current_page.get() >= last()
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
        </div>
    }
}
