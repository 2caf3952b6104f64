use leptos::prelude::*;
use tw_merge::*;

#[component]
pub fn Label(
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] html_for: String,
    children: Children,
) -> impl IntoView {
    let class = tw_merge!(
        "flex items-center gap-2 text-sm leading-none font-medium select-none",
        class
    );

    view! {
        <label class=class r#for=html_for>
            {children()}
        </label>
    }
}

/// Per-field validation message, rendered only while `when` holds.
#[component]
pub fn FieldMessage(
    #[prop(into)] when: Signal<bool>,
    #[prop(optional, into)] class: String,
    children: ChildrenFn,
) -> impl IntoView {
    let class = tw_merge!("text-destructive text-xs", class);

    view! {
        <p class=class class:hidden=move || !when.get() aria-live="polite">
            {children()}
        </p>
    }
}
